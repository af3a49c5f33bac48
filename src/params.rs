//! Named field parameters exposed to an interactive control panel.
//!
//! Each [`Parameter`] carries the range and step the panel slider uses.
//! Edits are clamped and snapped here, then applied with
//! [`FrameDriver::set_parameter`](crate::driver::FrameDriver::set_parameter),
//! which always regenerates the whole field.

use crate::error::Error;
use crate::field::FieldParams;
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

/// Tunable field parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Parameter {
    Count,
    Size,
    Radius,
    Branches,
    Spin,
    Randomness,
}

impl Parameter {
    /// Every parameter, in panel order.
    pub const ALL: [Parameter; 6] = [
        Parameter::Count,
        Parameter::Size,
        Parameter::Branches,
        Parameter::Radius,
        Parameter::Spin,
        Parameter::Randomness,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Parameter::Count => "count",
            Parameter::Size => "size",
            Parameter::Radius => "radius",
            Parameter::Branches => "branches",
            Parameter::Spin => "spin",
            Parameter::Randomness => "randomness",
        }
    }

    /// Slider range.
    pub fn range(&self) -> RangeInclusive<f32> {
        match self {
            Parameter::Count => 100.0..=100_000.0,
            Parameter::Size => 0.001..=0.1,
            Parameter::Radius => 1.0..=20.0,
            Parameter::Branches => 2.0..=10.0,
            Parameter::Spin => -5.0..=5.0,
            Parameter::Randomness => 1.0..=10.0,
        }
    }

    /// Slider increment.
    pub fn step(&self) -> f32 {
        match self {
            Parameter::Count => 100.0,
            Parameter::Size => 0.001,
            Parameter::Radius => 1.0,
            Parameter::Branches => 1.0,
            Parameter::Spin => 0.001,
            Parameter::Randomness => 0.001,
        }
    }

    /// Clamp into range, then snap to the nearest step from the range start.
    ///
    /// Returns `None` for NaN.
    pub fn clamp_value(&self, value: f32) -> Option<f32> {
        if value.is_nan() {
            return None;
        }
        let range = self.range();
        let (min, max) = (*range.start(), *range.end());
        let step = self.step();
        let clamped = value.clamp(min, max);
        let snapped = min + ((clamped - min) / step).round() * step;
        Some(snapped.clamp(min, max))
    }

    /// Current value of this parameter in `params`.
    pub fn get(&self, params: &FieldParams) -> f32 {
        match self {
            Parameter::Count => params.count as f32,
            Parameter::Size => params.size,
            Parameter::Radius => params.radius,
            Parameter::Branches => params.branches as f32,
            Parameter::Spin => params.spin,
            Parameter::Randomness => params.randomness,
        }
    }

    /// Copy of `params` with this parameter set to `value` (already clamped).
    pub fn apply(&self, params: &FieldParams, value: f32) -> FieldParams {
        let mut next = params.clone();
        match self {
            Parameter::Count => next.count = value.round() as u32,
            Parameter::Size => next.size = value,
            Parameter::Radius => next.radius = value,
            Parameter::Branches => next.branches = value.round() as u32,
            Parameter::Spin => next.spin = value,
            Parameter::Randomness => next.randomness = value,
        }
        next
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Parameter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Parameter::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnknownParameter(s.to_string()))
    }
}
