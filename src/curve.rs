//! Closed rounded-rectangle curve with arc-length time allocation.
//!
//! The curve is made of four straight edges joined by four quarter arcs.
//! Each segment receives a share of the global `[0, 1)` parameter range
//! proportional to its length, so a follower moving at constant parameter
//! speed also moves at (roughly) constant speed along the path.
//!
//! The coordinate frame has `y` growing downward: the top edge sits at
//! `y = -height / 2` and the curve is traversed clockwise on screen,
//! starting at the left end of the top edge.
//!
//! # Example
//!
//! ```ignore
//! use pathfield::curve::RoundedRectCurve;
//!
//! let curve = RoundedRectCurve::new(6.0, 10.0, 2.0)?;
//! let start = curve.get_point(0.0);     // (-1, -5)
//! let outline = curve.sample(100);       // points for drawing the path
//! ```

use crate::error::{Error, Result};
use glam::{Vec2, Vec3};
use std::f32::consts::{FRAC_PI_2, PI};

/// Number of segments in a rounded rectangle.
pub const SEGMENT_COUNT: usize = 8;

/// One piece of the closed curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    /// Straight edge between two points.
    Line { start: Vec2, end: Vec2 },
    /// Circular arc swept from `start_angle` by `sweep` radians.
    Arc {
        center: Vec2,
        radius: f32,
        start_angle: f32,
        sweep: f32,
    },
}

impl Segment {
    /// Evaluate the segment at a local parameter in `[0, 1]`.
    #[inline]
    pub fn point_at(&self, local_t: f32) -> Vec2 {
        match *self {
            Segment::Line { start, end } => start.lerp(end, local_t),
            Segment::Arc {
                center,
                radius,
                start_angle,
                sweep,
            } => {
                let angle = start_angle + local_t * sweep;
                center + radius * Vec2::new(angle.cos(), angle.sin())
            }
        }
    }

    /// Geometric length of the segment.
    pub fn length(&self) -> f32 {
        match *self {
            Segment::Line { start, end } => start.distance(end),
            Segment::Arc { radius, sweep, .. } => radius * sweep.abs(),
        }
    }

    /// Whether this segment is a corner arc.
    pub fn is_arc(&self) -> bool {
        matches!(self, Segment::Arc { .. })
    }
}

/// Closed rounded-rectangle curve, immutable once constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundedRectCurve {
    width: f32,
    height: f32,
    radius: f32,
    total_length: f32,
    segments: [Segment; SEGMENT_COUNT],
    lengths: [f32; SEGMENT_COUNT],
    fractions: [f32; SEGMENT_COUNT],
    cumulative: [f32; SEGMENT_COUNT],
}

impl RoundedRectCurve {
    /// Build a curve centered at the origin.
    ///
    /// Fails when `width` or `height` is not a positive finite number, or when
    /// `radius` is negative or not finite. A radius larger than half the
    /// shorter side is clamped so the corners never overlap.
    pub fn new(width: f32, height: f32, radius: f32) -> Result<Self> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(Error::InvalidDimensions { width, height });
        }
        if !radius.is_finite() || radius < 0.0 {
            return Err(Error::InvalidRadius(radius));
        }

        let max_radius = width.min(height) / 2.0;
        let r = radius.min(max_radius);
        if r < radius {
            tracing::debug!(requested = radius, clamped = r, "corner radius clamped");
        }

        let left = -width / 2.0 + r;
        let right = width / 2.0 - r;
        let top = -height / 2.0 + r;
        let bottom = height / 2.0 - r;

        let corner = |center: Vec2, start_angle: f32| Segment::Arc {
            center,
            radius: r,
            start_angle,
            sweep: FRAC_PI_2,
        };

        let segments = [
            Segment::Line {
                start: Vec2::new(left, top - r),
                end: Vec2::new(right, top - r),
            },
            corner(Vec2::new(right, top), -FRAC_PI_2),
            Segment::Line {
                start: Vec2::new(right + r, top),
                end: Vec2::new(right + r, bottom),
            },
            corner(Vec2::new(right, bottom), 0.0),
            Segment::Line {
                start: Vec2::new(right, bottom + r),
                end: Vec2::new(left, bottom + r),
            },
            corner(Vec2::new(left, bottom), FRAC_PI_2),
            Segment::Line {
                start: Vec2::new(left - r, bottom),
                end: Vec2::new(left - r, top),
            },
            corner(Vec2::new(left, top), PI),
        ];

        // Lengths come from the same scalars as the geometry, not from the
        // endpoints, so opposite edges are bit-identical.
        let straight_h = right - left;
        let straight_v = bottom - top;
        let arc = PI * r / 2.0;
        let lengths = [
            straight_h, arc, straight_v, arc, straight_h, arc, straight_v, arc,
        ];
        let total_length: f32 = lengths.iter().sum();

        let mut fractions = [0.0; SEGMENT_COUNT];
        let mut cumulative = [0.0; SEGMENT_COUNT];
        let mut acc = 0.0;
        for i in 0..SEGMENT_COUNT {
            fractions[i] = lengths[i] / total_length;
            acc += fractions[i];
            cumulative[i] = acc;
        }
        cumulative[SEGMENT_COUNT - 1] = 1.0;

        Ok(Self {
            width,
            height,
            radius: r,
            total_length,
            segments,
            lengths,
            fractions,
            cumulative,
        })
    }

    /// Requested width.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Requested height.
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Effective (clamped) corner radius.
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Perimeter: the sum of all segment lengths.
    pub fn total_length(&self) -> f32 {
        self.total_length
    }

    /// Segments in traversal order: top, top-right, right, bottom-right,
    /// bottom, bottom-left, left, top-left.
    pub fn segments(&self) -> &[Segment; SEGMENT_COUNT] {
        &self.segments
    }

    pub fn segment_lengths(&self) -> &[f32; SEGMENT_COUNT] {
        &self.lengths
    }

    /// Share of the parameter range given to each segment.
    pub fn segment_fractions(&self) -> &[f32; SEGMENT_COUNT] {
        &self.fractions
    }

    /// Running sum of the fractions; the last entry is exactly `1.0`.
    pub fn cumulative(&self) -> &[f32; SEGMENT_COUNT] {
        &self.cumulative
    }

    /// Resolve a global parameter to `(segment index, local parameter)`.
    ///
    /// `t` is wrapped into `[0, 1)` first, so `1.0` is the same as `0.0` and
    /// negative values wrap backwards. Non-finite input resolves to `0.0`.
    pub fn locate(&self, t: f32) -> (usize, f32) {
        let t = wrap_unit(t);

        // First segment whose end lies strictly after t. Zero-length
        // segments share their end with the previous one and are skipped.
        let index = self
            .cumulative
            .partition_point(|&end| end <= t)
            .min(SEGMENT_COUNT - 1);

        let start = if index == 0 { 0.0 } else { self.cumulative[index - 1] };
        let end = self.cumulative[index];
        let span = end - start;
        let local = if span > 0.0 { (t - start) / span } else { 0.0 };

        (index, local.clamp(0.0, 1.0))
    }

    /// Point on the curve for a global parameter.
    pub fn get_point(&self, t: f32) -> Vec2 {
        let (index, local) = self.locate(t);
        self.segments[index].point_at(local)
    }

    /// Point on the curve embedded in the `z = 0` plane.
    pub fn get_point_3d(&self, t: f32) -> Vec3 {
        self.get_point(t).extend(0.0)
    }

    /// `count` points at parameters `i / count`, for drawing the outline.
    pub fn sample(&self, count: usize) -> Vec<Vec2> {
        (0..count)
            .map(|i| self.get_point(i as f32 / count as f32))
            .collect()
    }
}

/// Wrap a parameter into `[0, 1)`.
#[inline]
pub fn wrap_unit(t: f32) -> f32 {
    if !t.is_finite() {
        return 0.0;
    }
    let wrapped = t.rem_euclid(1.0);
    // rem_euclid can round up to exactly 1.0 for tiny negative inputs
    if wrapped >= 1.0 {
        0.0
    } else {
        wrapped
    }
}
