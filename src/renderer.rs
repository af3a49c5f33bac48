//! Boundary between the simulation and whatever draws it.
//!
//! The frame driver talks to a [`Renderer`] only through flat attribute
//! arrays and opaque field handles. A GPU backend would map each call onto
//! buffer writes; [`RecordingRenderer`] keeps everything in memory for
//! headless runs and tests.

use crate::field::{FieldBuffers, ParticleField};
use glam::Vec3;
use std::collections::HashMap;

/// Identifies one generated particle field on the renderer side.
///
/// Handles are never reused, so a stale handle can't alias a newer field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldHandle(pub u64);

/// Everything a renderer needs to create a particle field.
#[derive(Clone, Copy, Debug)]
pub struct FieldUpload<'a> {
    pub buffers: &'a FieldBuffers,
    /// Base point size.
    pub point_size: f32,
    /// Rotation about Y in radians.
    pub rotation_y: f32,
}

impl<'a> FieldUpload<'a> {
    pub fn from_field(field: &'a ParticleField) -> Self {
        Self {
            buffers: field.buffers(),
            point_size: field.point_size(),
            rotation_y: field.rotation_y(),
        }
    }
}

/// Per-frame summary passed to [`Renderer::present`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameInfo {
    pub frame: u64,
    pub elapsed: f32,
    pub delta: f32,
    pub markers: usize,
    pub particles: usize,
}

/// Consumer of per-frame geometry.
pub trait Renderer {
    /// Replace the drawn outline of the path.
    fn upload_path(&mut self, points: &[Vec3]);

    /// New marker positions for this frame, head first.
    fn update_markers(&mut self, positions: &[Vec3]);

    /// Create GPU resources for a freshly generated field.
    fn upload_field(&mut self, handle: FieldHandle, upload: &FieldUpload<'_>);

    /// Flat `[x, y, z, ...]` positions for an existing field.
    fn update_field_positions(&mut self, handle: FieldHandle, positions: &[f32]);

    /// Whole-field rotation about Y.
    fn set_field_rotation(&mut self, handle: FieldHandle, rotation_y: f32);

    /// Free everything associated with `handle`.
    fn release_field(&mut self, handle: FieldHandle);

    /// Draw the frame.
    fn present(&mut self, frame: &FrameInfo);
}

/// Renderer-side copy of a field.
#[derive(Clone, Debug, PartialEq)]
pub struct RecordedField {
    pub buffers: FieldBuffers,
    pub point_size: f32,
    pub rotation_y: f32,
    /// Number of position updates received since upload.
    pub position_updates: u64,
}

/// In-memory renderer that mirrors what a GPU backend would hold.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub path: Vec<Vec3>,
    pub markers: Vec<Vec3>,
    pub fields: HashMap<FieldHandle, RecordedField>,
    pub frames: Vec<FrameInfo>,
    /// Handles in the order they were released.
    pub released: Vec<FieldHandle>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handles currently alive, sorted.
    pub fn live_fields(&self) -> Vec<FieldHandle> {
        let mut handles: Vec<_> = self.fields.keys().copied().collect();
        handles.sort();
        handles
    }

    pub fn field(&self, handle: FieldHandle) -> Option<&RecordedField> {
        self.fields.get(&handle)
    }

    pub fn last_frame(&self) -> Option<&FrameInfo> {
        self.frames.last()
    }
}

impl Renderer for RecordingRenderer {
    fn upload_path(&mut self, points: &[Vec3]) {
        self.path = points.to_vec();
    }

    fn update_markers(&mut self, positions: &[Vec3]) {
        self.markers.clear();
        self.markers.extend_from_slice(positions);
    }

    fn upload_field(&mut self, handle: FieldHandle, upload: &FieldUpload<'_>) {
        self.fields.insert(
            handle,
            RecordedField {
                buffers: upload.buffers.clone(),
                point_size: upload.point_size,
                rotation_y: upload.rotation_y,
                position_updates: 0,
            },
        );
    }

    fn update_field_positions(&mut self, handle: FieldHandle, positions: &[f32]) {
        match self.fields.get_mut(&handle) {
            Some(field) => {
                field.buffers.positions.clear();
                field.buffers.positions.extend_from_slice(positions);
                field.position_updates += 1;
            }
            None => tracing::warn!(?handle, "position update for unknown field"),
        }
    }

    fn set_field_rotation(&mut self, handle: FieldHandle, rotation_y: f32) {
        if let Some(field) = self.fields.get_mut(&handle) {
            field.rotation_y = rotation_y;
        }
    }

    fn release_field(&mut self, handle: FieldHandle) {
        if self.fields.remove(&handle).is_some() {
            self.released.push(handle);
        }
    }

    fn present(&mut self, frame: &FrameInfo) {
        self.frames.push(*frame);
    }
}
