//! Chains of markers that slither along a [`RoundedRectCurve`].
//!
//! Every marker shares one `phase`. Marker `i` trails the head by
//! `i * spacing` in parameter space, so the chain keeps its order and shape
//! as it moves.
//!
//! ```ignore
//! let curve = RoundedRectCurve::new(6.0, 10.0, 2.0)?;
//! let mut snake = PathFollower::new(curve, FollowerConfig::default())?;
//!
//! // Each frame:
//! snake.advance(dt);
//! let positions = snake.positions_3d();
//! ```

use crate::curve::{wrap_unit, RoundedRectCurve};
use crate::error::{Error, Result};
use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Settings for a follower chain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FollowerConfig {
    /// Number of markers in the chain.
    pub count: usize,
    /// Parameter-space gap between neighbouring markers.
    pub spacing: f32,
    /// Phase advance in curve cycles per second.
    pub speed: f32,
}

impl Default for FollowerConfig {
    fn default() -> Self {
        Self {
            count: 20,
            spacing: 0.005,
            // 0.002 per frame at 60 Hz
            speed: 0.12,
        }
    }
}

impl FollowerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.count == 0 {
            return Err(Error::InvalidFollower("chain needs at least one marker".into()));
        }
        if !self.spacing.is_finite() || self.spacing < 0.0 {
            return Err(Error::InvalidFollower(format!(
                "spacing must be a non-negative number, got {}",
                self.spacing
            )));
        }
        if !self.speed.is_finite() {
            return Err(Error::InvalidFollower(format!(
                "speed must be finite, got {}",
                self.speed
            )));
        }
        Ok(())
    }
}

/// A fixed-length chain of markers driven by a shared phase.
#[derive(Debug, Clone)]
pub struct PathFollower {
    curve: RoundedRectCurve,
    count: usize,
    spacing: f32,
    speed: f32,
    phase: f32,
}

impl PathFollower {
    /// Create a chain with its head at the start of the curve.
    pub fn new(curve: RoundedRectCurve, config: FollowerConfig) -> Result<Self> {
        config.validate()?;
        if config.count as f32 * config.spacing > 1.0 {
            tracing::warn!(
                count = config.count,
                spacing = config.spacing,
                "follower chain is longer than the curve and will overlap itself"
            );
        }
        Ok(Self {
            curve,
            count: config.count,
            spacing: config.spacing,
            speed: config.speed,
            phase: 0.0,
        })
    }

    pub fn curve(&self) -> &RoundedRectCurve {
        &self.curve
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Current head position in `[0, 1)`.
    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// Jump the head to `phase` (wrapped into `[0, 1)`).
    pub fn set_phase(&mut self, phase: f32) {
        self.phase = wrap_unit(phase);
    }

    /// Move the head forward by `speed * dt`.
    pub fn advance(&mut self, dt: f32) {
        self.phase = wrap_unit(self.phase + self.speed * dt);
    }

    /// Curve parameter of marker `index`.
    #[inline]
    pub fn parameter(&self, index: usize) -> f32 {
        wrap_unit(self.phase - index as f32 * self.spacing + 1.0)
    }

    /// Curve parameters of every marker, head first.
    pub fn parameters(&self) -> Vec<f32> {
        (0..self.count).map(|i| self.parameter(i)).collect()
    }

    /// Marker positions in the curve plane, head first.
    pub fn positions(&self) -> Vec<Vec2> {
        (0..self.count)
            .map(|i| self.curve.get_point(self.parameter(i)))
            .collect()
    }

    /// Marker positions embedded at `z = 0`, head first.
    pub fn positions_3d(&self) -> Vec<Vec3> {
        let mut out = Vec::with_capacity(self.count);
        self.positions_into(&mut out);
        out
    }

    /// Write marker positions into `out`, reusing its allocation.
    pub fn positions_into(&self, out: &mut Vec<Vec3>) {
        out.clear();
        out.extend((0..self.count).map(|i| self.curve.get_point_3d(self.parameter(i))));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snake() -> PathFollower {
        let curve = RoundedRectCurve::new(6.0, 10.0, 2.0).unwrap();
        PathFollower::new(curve, FollowerConfig::default()).unwrap()
    }

    #[test]
    fn test_advance_wraps() {
        let mut s = snake();
        s.advance(5.0);
        assert!((s.phase() - 0.6).abs() < 1e-5);
        s.advance(5.0);
        assert!((s.phase() - 0.2).abs() < 1e-4);
        assert!(s.phase() >= 0.0 && s.phase() < 1.0);
    }

    #[test]
    fn test_head_at_phase() {
        let mut s = snake();
        s.set_phase(0.3);
        assert_eq!(s.positions()[0], s.curve().get_point(0.3));
    }

    #[test]
    fn test_trailing_markers_wrap_behind_start() {
        let s = snake();
        let params = s.parameters();
        assert_eq!(params.len(), 20);
        assert_eq!(params[0], 0.0);
        // Marker 1 sits just before the end of the curve.
        assert!((params[1] - 0.995).abs() < 1e-5);
        assert!(params.iter().all(|p| (0.0..1.0).contains(p)));
    }

    #[test]
    fn test_positions_3d_in_plane() {
        let s = snake();
        let mut buf = Vec::new();
        s.positions_into(&mut buf);
        assert_eq!(buf.len(), s.count());
        assert!(buf.iter().all(|p| p.z == 0.0));
        assert_eq!(buf, s.positions_3d());
    }

    #[test]
    fn test_rejects_empty_chain() {
        let curve = RoundedRectCurve::new(1.0, 1.0, 0.1).unwrap();
        let config = FollowerConfig {
            count: 0,
            ..Default::default()
        };
        assert!(matches!(
            PathFollower::new(curve.clone(), config),
            Err(Error::InvalidFollower(_))
        ));
        let config = FollowerConfig {
            spacing: -0.1,
            ..Default::default()
        };
        assert!(PathFollower::new(curve, config).is_err());
    }
}
