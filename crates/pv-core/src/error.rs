//! Errors raised by view surfaces and overlay layers

use thiserror::Error;

/// Errors that can occur while probing a view
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReadoutError {
    #[error("point ({x}, {y}) does not map to a world location")]
    OffSurface { x: f32, y: f32 },

    #[error("layer '{layer}' failed to sample: {message}")]
    Layer { layer: String, message: String },

    #[error("Other error: {0}")]
    Other(String),
}

impl ReadoutError {
    /// Shorthand for a failure reported by a named layer
    pub fn layer(layer: impl Into<String>, message: impl Into<String>) -> Self {
        ReadoutError::Layer {
            layer: layer.into(),
            message: message.into(),
        }
    }
}
