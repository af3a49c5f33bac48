//! Error types for pathfield.
//!
//! Configuration mistakes (degenerate curves, empty fields, out-of-domain
//! parameters) are reported here. Per-frame updates never produce errors.

use std::fmt;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while configuring a curve, follower, or particle field.
#[derive(Debug)]
pub enum Error {
    /// Curve width or height is not a positive finite number.
    InvalidDimensions { width: f32, height: f32 },
    /// Corner radius is negative or not finite.
    InvalidRadius(f32),
    /// Follower chain settings are unusable.
    InvalidFollower(String),
    /// Particle count must be at least one.
    InvalidParticleCount(u32),
    /// A named field parameter is outside its domain.
    InvalidParameter { name: &'static str, reason: String },
    /// No control-panel parameter with this name exists.
    UnknownParameter(String),
    /// Failed to read or write a configuration file.
    Io(std::io::Error),
    /// Failed to parse or serialize a configuration.
    Json(serde_json::Error),
}

impl Error {
    pub(crate) fn parameter(name: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    /// Whether this error came from bad configuration values rather than I/O.
    pub fn is_config(&self) -> bool {
        !matches!(self, Error::Io(_) | Error::Json(_))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidDimensions { width, height } => write!(
                f,
                "Curve dimensions must be positive, got width={} height={}",
                width, height
            ),
            Error::InvalidRadius(r) => {
                write!(f, "Corner radius must be a non-negative number, got {}", r)
            }
            Error::InvalidFollower(msg) => write!(f, "Invalid follower configuration: {}", msg),
            Error::InvalidParticleCount(n) => {
                write!(f, "Particle count must be at least 1, got {}", n)
            }
            Error::InvalidParameter { name, reason } => {
                write!(f, "Invalid value for '{}': {}", name, reason)
            }
            Error::UnknownParameter(name) => write!(f, "Unknown parameter '{}'", name),
            Error::Io(e) => write!(f, "Failed to access configuration file: {}", e),
            Error::Json(e) => write!(f, "Failed to parse configuration: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Json(e)
    }
}
