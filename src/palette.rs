//! Fixed color and size sets sampled by the particle field.
//!
//! Each particle picks one color and one size uniformly at generation time.
//!
//! ```ignore
//! let colors = Palette::from_hex(&[0xff0000, 0x00ff00]);
//! let sizes = SizePalette::new(vec![0.02, 0.04]);
//! ```

use crate::error::{Error, Result};
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Default particle colors: teal, two blues, and a near-black slate.
pub const DEFAULT_COLORS: [u32; 4] = [0x21b1a2, 0x2978e0, 0x289be0, 0x282c34];

/// Default particle sizes.
pub const DEFAULT_SIZES: [f32; 5] = [0.03, 0.05, 0.07, 0.09, 0.11];

/// Convert a `0xRRGGBB` value to normalized sRGB components.
pub fn hex_to_rgb(hex: u32) -> Vec3 {
    let r = ((hex >> 16) & 0xff) as f32 / 255.0;
    let g = ((hex >> 8) & 0xff) as f32 / 255.0;
    let b = (hex & 0xff) as f32 / 255.0;
    Vec3::new(r, g, b)
}

/// Set of RGB colors (each channel 0.0-1.0).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    colors: Vec<Vec3>,
}

impl Palette {
    pub fn new(colors: Vec<Vec3>) -> Self {
        Self { colors }
    }

    /// Build from `0xRRGGBB` values.
    pub fn from_hex(colors: &[u32]) -> Self {
        Self {
            colors: colors.iter().copied().map(hex_to_rgb).collect(),
        }
    }

    pub fn colors(&self) -> &[Vec3] {
        &self.colors
    }

    pub fn contains(&self, color: Vec3) -> bool {
        self.colors.iter().any(|c| *c == color)
    }

    /// Non-empty, every channel finite and within `[0, 1]`.
    pub fn validate(&self) -> Result<()> {
        if self.colors.is_empty() {
            return Err(Error::parameter("palette", "needs at least one color"));
        }
        for c in &self.colors {
            if !c.is_finite() || c.min_element() < 0.0 || c.max_element() > 1.0 {
                return Err(Error::parameter(
                    "palette",
                    format!("color {:?} has channels outside 0..=1", c),
                ));
            }
        }
        Ok(())
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::from_hex(&DEFAULT_COLORS)
    }
}

/// Set of point sizes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizePalette {
    sizes: Vec<f32>,
}

impl SizePalette {
    pub fn new(sizes: Vec<f32>) -> Self {
        Self { sizes }
    }

    pub fn sizes(&self) -> &[f32] {
        &self.sizes
    }

    pub fn contains(&self, size: f32) -> bool {
        self.sizes.iter().any(|s| *s == size)
    }

    /// Non-empty, every size positive and finite.
    pub fn validate(&self) -> Result<()> {
        if self.sizes.is_empty() {
            return Err(Error::parameter("sizes", "needs at least one size"));
        }
        if let Some(bad) = self.sizes.iter().find(|s| !s.is_finite() || **s <= 0.0) {
            return Err(Error::parameter(
                "sizes",
                format!("size {} must be positive", bad),
            ));
        }
        Ok(())
    }
}

impl Default for SizePalette {
    fn default() -> Self {
        Self::new(DEFAULT_SIZES.to_vec())
    }
}
