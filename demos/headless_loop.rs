//! # Headless Loop
//!
//! Runs a full scene (path, follower and particle field) through the
//! `FrameDriver` with an in-memory renderer, editing a parameter midway.
//!
//! ## What This Demonstrates
//!
//! - Loading a `SceneConfig` from JSON (or using the defaults)
//! - One elapsed-time snapshot per frame for every update
//! - Control-panel edits triggering a full regeneration
//! - The old field being released only after the new one is uploaded
//!
//! ## Try This
//!
//! - Save a config with `SceneConfig::default().save("scene.json")`, edit it,
//!   and pass the path as the first argument
//! - Set `"curve": null` in the config for a particle-only scene
//!
//! Run with: `cargo run --example headless_loop -- scene.json`

use pathfield::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => SceneConfig::load(path)?,
        None => SceneConfig::default(),
    };

    let mut driver =
        FrameDriver::new(config, RecordingRenderer::new())?.with_time(Time::fixed(1.0 / 60.0));

    for frame in 0..600u32 {
        let info = driver.frame();

        if frame == 300 {
            driver.set_parameter(Parameter::Count, 10_000.0)?;
            // Rejected: the previous field stays live.
            if let Err(e) = driver.regenerate(FieldParams::default().with_count(0)) {
                tracing::warn!(error = %e, "edit rejected");
            }
        }

        if info.frame % 120 == 0 {
            tracing::info!(
                frame = info.frame,
                elapsed = info.elapsed,
                markers = info.markers,
                particles = info.particles,
                "tick"
            );
        }
    }

    let renderer = driver.renderer();
    tracing::info!(
        frames = renderer.frames.len(),
        live = ?renderer.live_fields(),
        released = ?renderer.released,
        "done"
    );
    Ok(())
}
