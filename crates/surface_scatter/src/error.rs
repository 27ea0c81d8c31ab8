//! Error types and result alias for the crate.
//!
//! All configuration problems are reported through [`enum@crate::error::Error`]
//! before a scatter run mutates anything; budget exhaustion is an expected
//! partial result and is never represented here.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("surface object '{name}' not found")]
    SurfaceNotFound { name: String },

    #[error("object '{name}' is not a valid surface mesh")]
    NotASurface { name: String },

    #[error("template object '{name}' not found")]
    TemplateNotFound { name: String },

    #[error("min_scale {min} must be <= max_scale {max}")]
    InvalidScaleRange { min: f32, max: f32 },
}

impl From<String> for Error {
    fn from(value: String) -> Self {
        Error::InvalidConfig(value)
    }
}

impl From<&str> for Error {
    fn from(value: &str) -> Self {
        Error::InvalidConfig(value.to_owned())
    }
}
