//! # Particle Field
//!
//! Generates the default 5000-particle orbit field, animates it for a few
//! seconds, then switches to the spiral layout.
//!
//! ## What This Demonstrates
//!
//! - `ParticleField::generate` drawing colors and sizes from palettes
//! - Closed-form `update(elapsed)`: no integration, same time same output
//! - The spiral layout, which only rotates as a whole
//!
//! ## Try This
//!
//! - Pass a seed as the first argument for a reproducible field
//! - Increase `randomness` to thicken the orbit band
//! - Try `with_spiral(5, -2.0)` for five arms twisting the other way
//!
//! Run with: `cargo run --example particle_field -- 42`

use pathfield::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> pathfield::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let seed: Option<u64> = std::env::args().nth(1).and_then(|s| s.parse().ok());

    let mut params = FieldParams::default();
    params.seed = seed;

    let palette = Palette::default();
    let sizes = SizePalette::default();
    let mut field = ParticleField::generate(&params, &palette, &sizes)?;
    tracing::info!(count = field.count(), seed = field.seed(), "orbit field generated");

    for second in 0..5 {
        let elapsed = second as f32;
        field.update(elapsed);
        let b = field.buffers();
        let (min, max) = (0..b.len()).map(|i| b.position(i)).fold(
            (Vec3::splat(f32::MAX), Vec3::splat(f32::MIN)),
            |(lo, hi), p| (lo.min(p), hi.max(p)),
        );
        tracing::info!(elapsed, ?min, ?max, "orbit bounds");
    }

    let spiral = params.clone().with_spiral(3, 1.0);
    let mut field = ParticleField::generate(&spiral, &palette, &sizes)?;
    for second in 0..5 {
        field.update(second as f32);
        tracing::info!(
            rotation = field.rotation_y(),
            first = ?field.world_position(0),
            "spiral"
        );
    }

    Ok(())
}
