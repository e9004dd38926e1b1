//! Error types.
//!
//! [`RenderError`] covers everything that can go wrong while bringing up the window, the
//! shader program and the geometry. [`ConfigError`] covers loading the optional config file.

use std::path::PathBuf;

use thiserror::Error;

use crate::abs::ShaderStage;

#[derive(Debug, Error)]
pub enum RenderError {
    /// The window or the OpenGL context could not be acquired.
    #[error("context acquisition failed: {0}")]
    Context(String),

    /// A shader stage failed to compile. `log` is the driver's info log.
    #[error("{stage} shader compilation failed:\n{log}")]
    Compile { stage: ShaderStage, log: String },

    /// The program failed to link. Holds the driver's info log.
    #[error("shader program linking failed:\n{0}")]
    Link(String),

    /// A GPU object (buffer, vertex array, shader, program) could not be created.
    #[error("failed to create GPU object: {0}")]
    Resource(String),

    /// The linked program does not expose a uniform the scene writes to.
    #[error("shader program has no uniform named `{0}`")]
    MissingUniform(String),

    #[error("invalid geometry: {0}")]
    Geometry(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config file")]
    Parse(#[from] serde_json::Error),

    #[error("window dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
}
