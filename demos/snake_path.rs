//! # Snake Path
//!
//! A chain of twenty markers sliding around a rounded rectangle.
//!
//! ## What This Demonstrates
//!
//! - `RoundedRectCurve` with arc-length time allocation
//! - `PathFollower` sharing one phase across the whole chain
//! - Segment resolution, printed for the head each second
//!
//! ## Try This
//!
//! - Raise `spacing` until the tail meets the head (`count * spacing > 1`)
//! - Set the radius above half the width and watch it clamp
//! - Run with `RUST_LOG=debug` to see the clamping message
//!
//! Run with: `cargo run --example snake_path`

use pathfield::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> pathfield::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let curve = RoundedRectCurve::new(6.0, 10.0, 2.0)?;
    tracing::info!(
        total_length = curve.total_length(),
        radius = curve.radius(),
        "curve built"
    );
    for (i, (length, end)) in curve
        .segment_lengths()
        .iter()
        .zip(curve.cumulative())
        .enumerate()
    {
        tracing::info!(segment = i, length, cumulative = end, "segment");
    }

    let mut snake = PathFollower::new(curve, FollowerConfig::default())?;
    let mut time = Time::fixed(1.0 / 60.0);

    for _ in 0..600 {
        let (_, delta) = time.update();
        snake.advance(delta);

        if time.frame() % 60 == 0 {
            let (segment, local) = snake.curve().locate(snake.phase());
            let positions = snake.positions_3d();
            tracing::info!(
                frame = time.frame(),
                phase = snake.phase(),
                segment,
                local,
                head = ?positions[0],
                tail = ?positions[positions.len() - 1],
                "snake"
            );
        }
    }

    Ok(())
}
