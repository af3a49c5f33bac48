//! Procedural particle fields.
//!
//! A [`ParticleField`] holds N particles as parallel attribute columns
//! (position, color, size, speed, jitter), the layout point-sprite renderers
//! consume directly. Attributes are drawn once by [`ParticleField::generate`];
//! afterwards only positions (or the whole-field rotation) change.
//!
//! # Layouts
//!
//! - **Orbit** (default): every frame each particle's position is recomputed
//!   from its index, its speed, its jitter and the elapsed time. Nothing is
//!   integrated, so the same elapsed time always gives the same positions.
//! - **Spiral**: particles are placed once along `branches` spiral arms
//!   twisted by `spin`. Positions never change; the field spins as a whole.
//!
//! # Example
//!
//! ```ignore
//! let params = FieldParams::default().with_count(5000).with_seed(7);
//! let mut field = ParticleField::generate(&params, &Palette::default(), &SizePalette::default())?;
//!
//! // Each frame:
//! field.update(elapsed);
//! if field.take_dirty().positions {
//!     upload(field.buffers().positions_bytes());
//! }
//! ```

use crate::error::{Error, Result};
use crate::palette::{Palette, SizePalette};
use crate::spawn::SpawnContext;
use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

/// Fraction of a full turn per second per unit of particle speed.
const ORBIT_RATE: f32 = 0.1;

/// How particles are laid out and animated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldLayout {
    /// Closed-form orbit recomputed every frame.
    #[default]
    Orbit,
    /// Static spiral arms with whole-field rotation.
    Spiral,
}

/// Generation parameters for a particle field.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldParams {
    /// Number of particles.
    pub count: u32,
    /// Base point size handed to the renderer.
    pub size: f32,
    /// Orbit radius, or the outer radius of the spiral.
    pub radius: f32,
    /// Spiral arm count.
    pub branches: u32,
    /// Spiral twist per unit of distance from the center.
    pub spin: f32,
    /// Jitter scale.
    pub randomness: f32,
    /// Exponent applied to spiral offsets; higher is tighter arms.
    pub randomness_power: f32,
    /// Per-particle speed range `[min, max)`.
    pub speed_range: [f32; 2],
    /// Whole-field rotation in radians per second (spiral only).
    pub rotation_speed: f32,
    pub layout: FieldLayout,
    /// Fixed seed for reproducible fields; `None` seeds from the clock.
    pub seed: Option<u64>,
}

impl Default for FieldParams {
    fn default() -> Self {
        Self {
            count: 5000,
            size: 0.1,
            radius: 7.0,
            branches: 3,
            spin: 1.0,
            randomness: 2.0,
            randomness_power: 3.0,
            speed_range: [0.01, 0.03],
            rotation_speed: 0.02,
            layout: FieldLayout::Orbit,
            seed: None,
        }
    }
}

impl FieldParams {
    pub fn with_count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }

    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_randomness(mut self, randomness: f32) -> Self {
        self.randomness = randomness;
        self
    }

    pub fn with_layout(mut self, layout: FieldLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Switch to the spiral layout with the given arms and twist.
    pub fn with_spiral(mut self, branches: u32, spin: f32) -> Self {
        self.layout = FieldLayout::Spiral;
        self.branches = branches;
        self.spin = spin;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check every value is usable for generation.
    pub fn validate(&self) -> Result<()> {
        if self.count == 0 {
            return Err(Error::InvalidParticleCount(self.count));
        }
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(Error::parameter("radius", format!("must be positive, got {}", self.radius)));
        }
        if !self.size.is_finite() || self.size <= 0.0 {
            return Err(Error::parameter("size", format!("must be positive, got {}", self.size)));
        }
        if !self.randomness.is_finite() || self.randomness < 0.0 {
            return Err(Error::parameter(
                "randomness",
                format!("must be non-negative, got {}", self.randomness),
            ));
        }
        let [min, max] = self.speed_range;
        if !(min.is_finite() && max.is_finite()) || min > max {
            return Err(Error::parameter(
                "speed_range",
                format!("expected finite min <= max, got [{}, {}]", min, max),
            ));
        }
        if self.layout == FieldLayout::Spiral {
            if self.branches == 0 {
                return Err(Error::parameter("branches", "spiral needs at least one branch"));
            }
            if !self.spin.is_finite() {
                return Err(Error::parameter("spin", "must be finite"));
            }
            if !self.randomness_power.is_finite() || self.randomness_power <= 0.0 {
                return Err(Error::parameter("randomness_power", "must be positive"));
            }
            if !self.rotation_speed.is_finite() {
                return Err(Error::parameter("rotation_speed", "must be finite"));
            }
        }
        Ok(())
    }
}

/// Parallel attribute columns, index-aligned across all arrays.
///
/// Vector attributes are flattened as `[x0, y0, z0, x1, y1, z1, ...]`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FieldBuffers {
    pub positions: Vec<f32>,
    pub colors: Vec<f32>,
    pub sizes: Vec<f32>,
    pub speeds: Vec<f32>,
    /// Per-particle offset fixed at generation time.
    pub jitter: Vec<f32>,
}

impl FieldBuffers {
    fn with_capacity(count: usize) -> Self {
        Self {
            positions: Vec::with_capacity(count * 3),
            colors: Vec::with_capacity(count * 3),
            sizes: Vec::with_capacity(count),
            speeds: Vec::with_capacity(count),
            jitter: Vec::with_capacity(count * 3),
        }
    }

    fn push(&mut self, position: Vec3, color: Vec3, size: f32, speed: f32, jitter: Vec3) {
        self.positions.extend_from_slice(&position.to_array());
        self.colors.extend_from_slice(&color.to_array());
        self.sizes.push(size);
        self.speeds.push(speed);
        self.jitter.extend_from_slice(&jitter.to_array());
    }

    /// Number of particles.
    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    #[inline]
    pub fn position(&self, index: usize) -> Vec3 {
        Vec3::from_slice(&self.positions[index * 3..index * 3 + 3])
    }

    #[inline]
    pub fn color(&self, index: usize) -> Vec3 {
        Vec3::from_slice(&self.colors[index * 3..index * 3 + 3])
    }

    #[inline]
    pub fn jitter(&self, index: usize) -> Vec3 {
        Vec3::from_slice(&self.jitter[index * 3..index * 3 + 3])
    }

    // ========== Byte views for GPU upload ==========

    pub fn positions_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    pub fn colors_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.colors)
    }

    pub fn sizes_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.sizes)
    }

    pub fn speeds_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.speeds)
    }

    pub fn jitter_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.jitter)
    }
}

/// What a call to [`ParticleField::update`] changed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FieldUpdate {
    /// Every position was rewritten.
    Positions,
    /// Only the whole-field rotation changed, in radians about Y.
    Rotation(f32),
}

/// Pending changes not yet handed to the renderer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DirtyFlags {
    pub positions: bool,
    pub rotation: bool,
}

/// A generated particle field.
#[derive(Debug, Clone)]
pub struct ParticleField {
    params: FieldParams,
    buffers: FieldBuffers,
    seed: u64,
    rotation_y: f32,
    dirty: DirtyFlags,
}

impl ParticleField {
    /// Generate a fresh field.
    ///
    /// Fails without allocating when `params` or a palette is invalid.
    pub fn generate(params: &FieldParams, palette: &Palette, sizes: &SizePalette) -> Result<Self> {
        params.validate()?;
        palette.validate()?;
        sizes.validate()?;

        let mut ctx = SpawnContext::new(params.count, params.seed);
        let buffers = match params.layout {
            FieldLayout::Orbit => spawn_orbit(params, palette, sizes, &mut ctx),
            FieldLayout::Spiral => spawn_spiral(params, palette, sizes, &mut ctx),
        };

        tracing::debug!(
            count = params.count,
            layout = ?params.layout,
            seed = ctx.seed(),
            "generated particle field"
        );

        Ok(Self {
            params: params.clone(),
            buffers,
            seed: ctx.seed(),
            rotation_y: 0.0,
            dirty: DirtyFlags {
                positions: true,
                rotation: true,
            },
        })
    }

    pub fn params(&self) -> &FieldParams {
        &self.params
    }

    pub fn buffers(&self) -> &FieldBuffers {
        &self.buffers
    }

    pub fn layout(&self) -> FieldLayout {
        self.params.layout
    }

    pub fn count(&self) -> usize {
        self.buffers.len()
    }

    /// Seed the field was generated with.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Base point size for the renderer.
    pub fn point_size(&self) -> f32 {
        self.params.size
    }

    /// Whole-field rotation about Y, in radians.
    pub fn rotation_y(&self) -> f32 {
        self.rotation_y
    }

    /// Particle position with the whole-field rotation applied.
    pub fn world_position(&self, index: usize) -> Vec3 {
        Quat::from_rotation_y(self.rotation_y) * self.buffers.position(index)
    }

    /// Recompute the field for `elapsed` seconds since start.
    ///
    /// Depends only on `elapsed` and the generated attributes.
    pub fn update(&mut self, elapsed: f32) -> FieldUpdate {
        match self.params.layout {
            FieldLayout::Orbit => {
                let count = self.buffers.len() as f32;
                let radius = self.params.radius;
                let FieldBuffers {
                    positions,
                    speeds,
                    jitter,
                    ..
                } = &mut self.buffers;

                for (i, ((pos, speed), jit)) in positions
                    .chunks_exact_mut(3)
                    .zip(speeds.iter())
                    .zip(jitter.chunks_exact(3))
                    .enumerate()
                {
                    let (x, z) = orbit_xz(i as f32 / count, radius, elapsed, *speed);
                    pos[0] = x + jit[0];
                    pos[2] = z + jit[2];
                }

                self.dirty.positions = true;
                FieldUpdate::Positions
            }
            FieldLayout::Spiral => {
                let rotation = elapsed * self.params.rotation_speed;
                if rotation != self.rotation_y {
                    self.rotation_y = rotation;
                    self.dirty.rotation = true;
                }
                FieldUpdate::Rotation(rotation)
            }
        }
    }

    /// Return pending changes and clear them.
    pub fn take_dirty(&mut self) -> DirtyFlags {
        std::mem::take(&mut self.dirty)
    }

    /// Pending changes without clearing them.
    pub fn dirty(&self) -> DirtyFlags {
        self.dirty
    }
}

/// Orbit position (without jitter) for a particle at spawn `progress`.
#[inline]
fn orbit_xz(progress: f32, radius: f32, elapsed: f32, speed: f32) -> (f32, f32) {
    let theta = TAU * progress + TAU * ORBIT_RATE * elapsed * speed;
    let (sin, cos) = theta.sin_cos();
    (sin * cos * radius, cos * radius)
}

fn spawn_orbit(
    params: &FieldParams,
    palette: &Palette,
    sizes: &SizePalette,
    ctx: &mut SpawnContext,
) -> FieldBuffers {
    let mut buffers = FieldBuffers::with_capacity(params.count as usize);
    let [speed_min, speed_max] = params.speed_range;

    for i in 0..params.count {
        let jitter = ctx.squared_jitter(params.randomness);
        let color = *ctx.pick(palette.colors());
        let size = *ctx.pick(sizes.sizes());
        let speed = ctx.random_range(speed_min, speed_max);

        // Same as update(0.0); y stays at its jitter value for the field's lifetime.
        let (x, z) = orbit_xz(ctx.progress(i), params.radius, 0.0, speed);
        let position = Vec3::new(x, 0.0, z) + jitter;

        buffers.push(position, color, size, speed, jitter);
    }
    buffers
}

fn spawn_spiral(
    params: &FieldParams,
    palette: &Palette,
    sizes: &SizePalette,
    ctx: &mut SpawnContext,
) -> FieldBuffers {
    let mut buffers = FieldBuffers::with_capacity(params.count as usize);
    let [speed_min, speed_max] = params.speed_range;

    for i in 0..params.count {
        let r = ctx.random() * params.radius;
        let branch = (i % params.branches) as f32 / params.branches as f32 * TAU;
        let spin = r * params.spin;
        let offset = ctx.power_offset(params.randomness_power, params.randomness * r);

        let angle = branch + spin;
        let position = Vec3::new(angle.cos() * r, 0.0, angle.sin() * r) + offset;

        let color = *ctx.pick(palette.colors());
        let size = *ctx.pick(sizes.sizes());
        let speed = ctx.random_range(speed_min, speed_max);

        buffers.push(position, color, size, speed, offset);
    }
    buffers
}

#[cfg(test)]
mod tests {
    use super::*;

    fn orbit(count: u32) -> ParticleField {
        let params = FieldParams::default().with_count(count).with_seed(1234);
        ParticleField::generate(&params, &Palette::default(), &SizePalette::default()).unwrap()
    }

    #[test]
    fn test_column_lengths() {
        let field = orbit(5000);
        let b = field.buffers();
        assert_eq!(b.len(), 5000);
        assert_eq!(b.positions.len(), 15000);
        assert_eq!(b.colors.len(), 15000);
        assert_eq!(b.sizes.len(), 5000);
        assert_eq!(b.speeds.len(), 5000);
        assert_eq!(b.jitter.len(), 15000);
        assert_eq!(b.positions_bytes().len(), 15000 * 4);
    }

    #[test]
    fn test_attributes_from_palettes() {
        let field = orbit(2000);
        let palette = Palette::default();
        let sizes = SizePalette::default();
        let b = field.buffers();
        for i in 0..b.len() {
            assert!(palette.contains(b.color(i)));
            assert!(sizes.contains(b.sizes[i]));
            assert!((0.01..0.03).contains(&b.speeds[i]));
            assert!(b.jitter(i).min_element() >= 0.0);
        }
    }

    #[test]
    fn test_initial_positions_match_update_zero() {
        let mut field = orbit(300);
        let before = field.buffers().positions.clone();
        field.update(0.0);
        assert_eq!(field.buffers().positions, before);
    }

    #[test]
    fn test_update_is_time_deterministic() {
        let mut field = orbit(1000);
        field.update(12.5);
        let first = field.buffers().positions.clone();
        field.update(3.0);
        field.update(12.5);
        assert_eq!(field.buffers().positions, first);
    }

    #[test]
    fn test_update_keeps_y() {
        let mut field = orbit(200);
        field.update(40.0);
        let b = field.buffers();
        for i in 0..b.len() {
            assert_eq!(b.position(i).y, b.jitter(i).y);
        }
    }

    #[test]
    fn test_update_formula() {
        let mut field = orbit(8);
        let elapsed = 17.0;
        field.update(elapsed);
        let b = field.buffers();
        let i = 3;
        let theta = TAU * (i as f32 / 8.0) + TAU * 0.1 * elapsed * b.speeds[i];
        let x = theta.sin() * theta.cos() * 7.0 + b.jitter(i).x;
        let z = theta.cos() * 7.0 + b.jitter(i).z;
        let p = b.position(i);
        assert!((p.x - x).abs() < 1e-4);
        assert!((p.z - z).abs() < 1e-4);
    }

    #[test]
    fn test_dirty_handoff() {
        let mut field = orbit(10);
        assert!(field.take_dirty().positions);
        assert_eq!(field.take_dirty(), DirtyFlags::default());
        assert_eq!(field.update(1.0), FieldUpdate::Positions);
        assert!(field.dirty().positions);
    }

    #[test]
    fn test_rejects_zero_count() {
        let params = FieldParams::default().with_count(0);
        let err = ParticleField::generate(&params, &Palette::default(), &SizePalette::default());
        assert!(matches!(err, Err(Error::InvalidParticleCount(0))));
    }

    #[test]
    fn test_rejects_bad_params() {
        let palette = Palette::default();
        let sizes = SizePalette::default();
        let bad_radius = FieldParams::default().with_radius(0.0);
        assert!(ParticleField::generate(&bad_radius, &palette, &sizes).is_err());
        let bad_random = FieldParams::default().with_randomness(f32::NAN);
        assert!(ParticleField::generate(&bad_random, &palette, &sizes).is_err());
        let bad_branches = FieldParams::default().with_spiral(0, 1.0);
        assert!(ParticleField::generate(&bad_branches, &palette, &sizes).is_err());
        let empty = SizePalette::new(vec![]);
        assert!(ParticleField::generate(&FieldParams::default(), &palette, &empty).is_err());
    }

    #[test]
    fn test_seeded_generation_reproducible() {
        let a = orbit(500);
        let b = orbit(500);
        assert_eq!(a.buffers(), b.buffers());
        assert_eq!(a.seed(), 1234);
    }

    #[test]
    fn test_spiral_is_static_and_rotates() {
        let params = FieldParams::default()
            .with_count(900)
            .with_spiral(3, 1.0)
            .with_seed(5);
        let mut field =
            ParticleField::generate(&params, &Palette::default(), &SizePalette::default()).unwrap();
        field.take_dirty();
        let before = field.buffers().positions.clone();

        match field.update(10.0) {
            FieldUpdate::Rotation(r) => assert!((r - 0.2).abs() < 1e-6),
            other => panic!("expected rotation, got {:?}", other),
        }
        assert_eq!(field.buffers().positions, before);
        assert!((field.rotation_y() - 0.2).abs() < 1e-6);
        let dirty = field.take_dirty();
        assert!(dirty.rotation && !dirty.positions);

        // Every particle stays within the spiral radius plus its offset.
        let b = field.buffers();
        for i in 0..b.len() {
            let p = b.position(i) - b.jitter(i);
            assert!(p.length() <= 7.0 + 1e-3);
            assert!(p.y.abs() < 1e-6);
        }
    }

    #[test]
    fn test_spiral_arms_without_spin_or_randomness() {
        let branches = 3;
        let params = FieldParams::default()
            .with_count(300)
            .with_spiral(branches, 0.0)
            .with_randomness(0.0)
            .with_seed(9);
        let field =
            ParticleField::generate(&params, &Palette::default(), &SizePalette::default()).unwrap();
        let b = field.buffers();
        for i in 0..b.len() {
            assert_eq!(b.jitter(i), Vec3::ZERO);
            let p = b.position(i);
            assert_eq!(p.y, 0.0);
            if p.length() < 1e-3 {
                continue;
            }
            let expected = (i as u32 % branches) as f32 / branches as f32 * TAU;
            let angle = p.z.atan2(p.x).rem_euclid(TAU);
            let diff = (angle - expected).rem_euclid(TAU);
            let diff = diff.min(TAU - diff);
            assert!(diff < 1e-3, "particle {} at {} expected {}", i, angle, expected);
        }
    }

    #[test]
    fn test_world_position_applies_rotation() {
        let params = FieldParams::default().with_count(4).with_spiral(2, 0.0).with_seed(2);
        let mut field =
            ParticleField::generate(&params, &Palette::default(), &SizePalette::default()).unwrap();
        field.update(0.0);
        let p = field.buffers().position(0);
        assert!(field.world_position(0).distance(p) < 1e-6);
        field.update(100.0);
        let local = field.buffers().position(1);
        let world = field.world_position(1);
        assert!((local.length() - world.length()).abs() < 1e-4);
    }
}
