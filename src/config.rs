//! Scene configuration.
//!
//! A [`SceneConfig`] describes what the frame driver should build: an
//! optional path with its follower chain, and an optional particle field.
//! Configs serialize to JSON; missing keys fall back to defaults.

use crate::curve::RoundedRectCurve;
use crate::error::Result;
use crate::field::FieldParams;
use crate::follower::{FollowerConfig, PathFollower};
use crate::palette::{Palette, SizePalette};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Rounded-rectangle path dimensions.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurveConfig {
    pub width: f32,
    pub height: f32,
    /// Corner radius; clamped to half the shorter side.
    pub radius: f32,
    /// Points used to draw the path outline.
    pub outline_samples: usize,
}

impl Default for CurveConfig {
    fn default() -> Self {
        Self {
            width: 6.0,
            height: 10.0,
            radius: 2.0,
            outline_samples: 100,
        }
    }
}

impl CurveConfig {
    pub fn build(&self) -> Result<RoundedRectCurve> {
        RoundedRectCurve::new(self.width, self.height, self.radius)
    }
}

/// Full scene description.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Path and follower chain; `None` for a particle-only scene.
    pub curve: Option<CurveConfig>,
    pub follower: FollowerConfig,
    /// Particle field; `None` for a path-only scene.
    pub field: Option<FieldParams>,
    pub palette: Palette,
    pub sizes: SizePalette,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            curve: Some(CurveConfig::default()),
            follower: FollowerConfig::default(),
            field: Some(FieldParams::default()),
            palette: Palette::default(),
            sizes: SizePalette::default(),
        }
    }
}

impl SceneConfig {
    /// Only the path and its follower chain.
    pub fn path_only() -> Self {
        Self {
            field: None,
            ..Self::default()
        }
    }

    /// Only a particle field.
    pub fn field_only(params: FieldParams) -> Self {
        Self {
            curve: None,
            field: Some(params),
            ..Self::default()
        }
    }

    /// Build the follower described by `curve` and `follower`, if any.
    pub fn build_follower(&self) -> Result<Option<PathFollower>> {
        self.curve
            .as_ref()
            .map(|c| PathFollower::new(c.build()?, self.follower))
            .transpose()
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }
}
