//! # pathfield
//!
//! Procedural point geometry for real-time rendering: chains of markers
//! gliding around a rounded-rectangle path, and large particle fields
//! animated by closed-form expressions of elapsed time.
//!
//! pathfield does the math and keeps the attribute buffers; drawing is left to
//! whatever implements [`Renderer`].
//!
//! ## Quick Start
//!
//! ```ignore
//! use pathfield::prelude::*;
//!
//! fn main() -> pathfield::Result<()> {
//!     let mut driver = FrameDriver::new(SceneConfig::default(), RecordingRenderer::new())?
//!         .with_time(Time::fixed(1.0 / 60.0));
//!
//!     for _ in 0..600 {
//!         driver.frame();
//!     }
//!
//!     // Panel edit: always a full regeneration.
//!     driver.set_parameter(Parameter::Count, 20_000.0)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Curves
//!
//! [`RoundedRectCurve`] splits a rounded rectangle into eight segments and
//! gives each a share of the `[0, 1)` parameter range proportional to its
//! length. `get_point(t)` wraps `t` into range, so callers never have to.
//!
//! ### Followers
//!
//! [`PathFollower`] keeps one phase for a whole chain. Marker `i` sits
//! `i * spacing` behind the head, so the chain never reorders.
//!
//! ### Particle fields
//!
//! [`ParticleField`] stores parallel attribute columns. In the
//! [`FieldLayout::Orbit`] layout positions are recomputed from scratch
//! every frame; in [`FieldLayout::Spiral`] they are fixed and the whole field
//! rotates.
//!
//! ### Frames
//!
//! [`SceneState::tick`] advances everything from a single elapsed-time
//! snapshot. [`FrameDriver`] adds a clock and renderer handoff, and swaps in
//! regenerated fields only once they are fully built.
//!
//! ## Feature Overview
//!
//! | Area | Items |
//! |------|-------|
//! | Geometry | [`RoundedRectCurve`], [`Segment`], [`PathFollower`] |
//! | Particles | [`ParticleField`], [`FieldParams`], [`FieldLayout`], [`Palette`], [`SizePalette`] |
//! | Frame loop | [`FrameDriver`], [`SceneState`], [`Time`] |
//! | Integration | [`Renderer`], [`RecordingRenderer`], [`SceneConfig`], [`Parameter`] |

pub mod config;
pub mod curve;
pub mod driver;
mod error;
pub mod field;
pub mod follower;
pub mod palette;
pub mod params;
pub mod renderer;
mod spawn;
pub mod time;

pub use bytemuck;
pub use config::{CurveConfig, SceneConfig};
pub use curve::{RoundedRectCurve, Segment};
pub use driver::{ActiveField, FrameDriver, SceneState};
pub use error::{Error, Result};
pub use field::{DirtyFlags, FieldBuffers, FieldLayout, FieldParams, FieldUpdate, ParticleField};
pub use follower::{FollowerConfig, PathFollower};
pub use glam::{Vec2, Vec3};
pub use palette::{Palette, SizePalette};
pub use params::Parameter;
pub use renderer::{FieldHandle, FieldUpload, FrameInfo, RecordedField, RecordingRenderer, Renderer};
pub use spawn::SpawnContext;
pub use time::{Time, TimeSource};

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use pathfield::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::{CurveConfig, SceneConfig};
    pub use crate::curve::RoundedRectCurve;
    pub use crate::driver::{FrameDriver, SceneState};
    pub use crate::field::{FieldLayout, FieldParams, ParticleField};
    pub use crate::follower::{FollowerConfig, PathFollower};
    pub use crate::palette::{Palette, SizePalette};
    pub use crate::params::Parameter;
    pub use crate::renderer::{FieldHandle, FrameInfo, RecordingRenderer, Renderer};
    pub use crate::time::Time;
    pub use crate::{Vec2, Vec3};
}
