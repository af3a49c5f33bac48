//! Per-frame entry point.
//!
//! [`SceneState`] is the whole animated state: the follower chain, the
//! active particle field, and the last elapsed time. [`SceneState::tick`]
//! advances it from one elapsed-time snapshot and touches nothing else, so
//! a frame can be replayed in isolation.
//!
//! [`FrameDriver`] wraps a scene with a clock and a [`Renderer`], hands the
//! results over after each tick, and owns field regeneration.
//!
//! ```ignore
//! let mut driver = FrameDriver::new(SceneConfig::default(), RecordingRenderer::new())?;
//! loop {
//!     driver.frame();
//! }
//! ```

use crate::config::SceneConfig;
use crate::error::{Error, Result};
use crate::field::{FieldParams, ParticleField};
use crate::follower::PathFollower;
use crate::palette::{Palette, SizePalette};
use crate::params::Parameter;
use crate::renderer::{FieldHandle, FieldUpload, FrameInfo, Renderer};
use crate::time::Time;
use glam::Vec3;

/// A particle field together with its renderer handle and the parameters
/// it was generated from.
#[derive(Debug, Clone)]
pub struct ActiveField {
    pub handle: FieldHandle,
    pub field: ParticleField,
    pub params: FieldParams,
}

/// Everything that changes from frame to frame.
#[derive(Debug, Clone, Default)]
pub struct SceneState {
    follower: Option<PathFollower>,
    field: Option<ActiveField>,
    markers: Vec<Vec3>,
    last_elapsed: f32,
    frame: u64,
}

impl SceneState {
    pub fn new(follower: Option<PathFollower>) -> Self {
        Self {
            follower,
            ..Default::default()
        }
    }

    pub fn follower(&self) -> Option<&PathFollower> {
        self.follower.as_ref()
    }

    pub fn field(&self) -> Option<&ActiveField> {
        self.field.as_ref()
    }

    /// Marker positions computed by the last tick.
    pub fn markers(&self) -> &[Vec3] {
        &self.markers
    }

    pub fn last_elapsed(&self) -> f32 {
        self.last_elapsed
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Swap in a new field, returning the one it replaces.
    pub fn replace_field(&mut self, field: ActiveField) -> Option<ActiveField> {
        self.field.replace(field)
    }

    pub fn take_field(&mut self) -> Option<ActiveField> {
        self.field.take()
    }

    /// Advance the scene to `elapsed` seconds.
    ///
    /// The follower moves by the time since the previous tick and the field
    /// is recomputed at `elapsed`, both from the same snapshot. Time never
    /// runs backwards: a smaller or non-finite `elapsed` repeats the previous
    /// one.
    pub fn tick(&mut self, elapsed: f32) -> FrameInfo {
        let elapsed = if elapsed.is_finite() && elapsed >= self.last_elapsed {
            elapsed
        } else {
            self.last_elapsed
        };
        let delta = elapsed - self.last_elapsed;
        self.last_elapsed = elapsed;
        self.frame += 1;

        if let Some(follower) = self.follower.as_mut() {
            follower.advance(delta);
            follower.positions_into(&mut self.markers);
        }

        if let Some(active) = self.field.as_mut() {
            active.field.update(elapsed);
        }

        FrameInfo {
            frame: self.frame,
            elapsed,
            delta,
            markers: self.markers.len(),
            particles: self.field.as_ref().map_or(0, |f| f.field.count()),
        }
    }
}

/// Runs a scene against a renderer, one frame per display refresh.
pub struct FrameDriver<R: Renderer> {
    state: SceneState,
    renderer: R,
    time: Time,
    palette: Palette,
    sizes: SizePalette,
    field_params: Option<FieldParams>,
    next_handle: u64,
}

impl<R: Renderer> FrameDriver<R> {
    /// Build the scene described by `config` and upload it.
    pub fn new(config: SceneConfig, mut renderer: R) -> Result<Self> {
        config.palette.validate()?;
        config.sizes.validate()?;

        let follower = config.build_follower()?;
        if let (Some(follower), Some(curve)) = (&follower, &config.curve) {
            let outline: Vec<Vec3> = follower
                .curve()
                .sample(curve.outline_samples)
                .into_iter()
                .map(|p| p.extend(0.0))
                .collect();
            renderer.upload_path(&outline);
        }

        let mut driver = Self {
            state: SceneState::new(follower),
            renderer,
            time: Time::new(),
            palette: config.palette,
            sizes: config.sizes,
            field_params: None,
            next_handle: 1,
        };

        if let Some(params) = config.field {
            driver.regenerate(params)?;
        }

        tracing::info!(
            markers = driver.state.follower().map_or(0, |f| f.count()),
            particles = driver.state.field().map_or(0, |f| f.field.count()),
            "scene ready"
        );
        Ok(driver)
    }

    /// Use a different clock, e.g. [`Time::fixed`] for replayable runs.
    pub fn with_time(mut self, time: Time) -> Self {
        self.time = time;
        self
    }

    pub fn state(&self) -> &SceneState {
        &self.state
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn into_renderer(self) -> R {
        self.renderer
    }

    pub fn time(&self) -> &Time {
        &self.time
    }

    pub fn time_mut(&mut self) -> &mut Time {
        &mut self.time
    }

    /// Parameters of the current field, or of the last successful generation
    /// once the field has been cleared.
    pub fn field_params(&self) -> Option<&FieldParams> {
        self.state
            .field()
            .map(|active| &active.params)
            .or(self.field_params.as_ref())
    }

    /// Read the clock and run one frame.
    pub fn frame(&mut self) -> FrameInfo {
        let (elapsed, _) = self.time.update();
        self.tick(elapsed)
    }

    /// Run one frame at `elapsed` seconds and hand the results to the renderer.
    ///
    /// Buffers are handed over only after every position for the frame has
    /// been written.
    pub fn tick(&mut self, elapsed: f32) -> FrameInfo {
        let info = self.state.tick(elapsed);

        if self.state.follower.is_some() {
            self.renderer.update_markers(&self.state.markers);
        }

        if let Some(active) = self.state.field.as_mut() {
            let dirty = active.field.take_dirty();
            if dirty.positions {
                self.renderer
                    .update_field_positions(active.handle, &active.field.buffers().positions);
            }
            if dirty.rotation {
                self.renderer
                    .set_field_rotation(active.handle, active.field.rotation_y());
            }
        }

        self.renderer.present(&info);
        info
    }

    /// Replace the particle field with a freshly generated one.
    ///
    /// The new field is built and uploaded before the old one is released.
    /// On error nothing changes and the previous field stays on screen.
    pub fn regenerate(&mut self, params: FieldParams) -> Result<FieldHandle> {
        let mut field = match ParticleField::generate(&params, &self.palette, &self.sizes) {
            Ok(field) => field,
            Err(e) => {
                tracing::warn!(error = %e, "field regeneration rejected, keeping previous field");
                return Err(e);
            }
        };

        // Bring the new field to the current frame time before it is shown.
        field.update(self.state.last_elapsed);
        field.take_dirty();

        let handle = FieldHandle(self.next_handle);
        self.next_handle += 1;
        self.renderer
            .upload_field(handle, &FieldUpload::from_field(&field));

        let active = ActiveField {
            handle,
            field,
            params: params.clone(),
        };
        if let Some(old) = self.state.replace_field(active) {
            self.renderer.release_field(old.handle);
            tracing::debug!(old = old.handle.0, new = handle.0, "released previous field");
        }

        tracing::info!(
            handle = handle.0,
            count = params.count,
            layout = ?params.layout,
            "particle field generated"
        );
        self.field_params = Some(params);
        Ok(handle)
    }

    /// Apply a control-panel edit and regenerate the field.
    ///
    /// The value is clamped to the parameter's range and snapped to its step.
    pub fn set_parameter(&mut self, parameter: Parameter, value: f32) -> Result<FieldHandle> {
        let value = parameter
            .clamp_value(value)
            .ok_or_else(|| Error::parameter(parameter.name(), "value is not a number"))?;
        let base = self.field_params().cloned().unwrap_or_default();
        let params = parameter.apply(&base, value);
        tracing::debug!(%parameter, value, "parameter edited");
        self.regenerate(params)
    }

    /// Drop the particle field and free its renderer resources.
    pub fn clear_field(&mut self) {
        if let Some(old) = self.state.take_field() {
            self.renderer.release_field(old.handle);
        }
    }
}
