//! Error types shared by the GPU wrappers.
//!
//! Application code (scene construction, asset IO, host setup) uses `anyhow`. The wrappers in
//! [`crate::data_structures`] return [`GpuError`] so callers can match on what went wrong.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GpuError {
    #[error("{label}: cannot create a buffer from empty data")]
    EmptyData { label: String },

    #[error("{what}: index {index} is out of range 0..{len}")]
    InvalidIndex {
        what: &'static str,
        index: usize,
        len: usize,
    },

    #[error("invalid vertex layout: {0}")]
    InvalidVertexLayout(String),

    #[error("mesh `{name}` is invalid: {reason}")]
    InvalidMesh { name: String, reason: String },

    #[error("invalid model: {0}")]
    InvalidModel(String),

    #[error("Shader Error ({label}): {log}")]
    ShaderCompilation { label: String, log: String },

    #[error("{label}: no @{stage} entry point found")]
    MissingEntryPoint { label: String, stage: &'static str },

    #[error("{label}: unsupported binding `{name}`: {reason}")]
    UnsupportedBinding {
        label: String,
        name: String,
        reason: String,
    },

    #[error("Uniform(name = {0}) is not found in the program")]
    UniformNotFound(String),

    #[error("uniform `{name}` is declared as {declared} but was set as {given}")]
    UniformTypeMismatch {
        name: String,
        declared: &'static str,
        given: &'static str,
    },

    #[error("texture `{0}` is not declared by the program")]
    TextureNotFound(String),

    #[error("GPU validation failed ({label}): {message}")]
    Validation { label: String, message: String },
}

/// Runs `f` inside a validation error scope and reports whatever the device captured.
///
/// Only debug builds pay for the scope. Release builds run `f` directly and leave errors to the
/// device's uncaptured error handler.
pub fn checked<T>(
    device: &wgpu::Device,
    label: &str,
    f: impl FnOnce() -> T,
) -> Result<T, GpuError> {
    if !cfg!(debug_assertions) {
        return Ok(f());
    }
    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let value = f();
    match futures::executor::block_on(device.pop_error_scope()) {
        Some(err) => Err(GpuError::Validation {
            label: label.to_string(),
            message: err.to_string(),
        }),
        None => Ok(value),
    }
}
