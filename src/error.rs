//! Error types for reading tree shapes

use thiserror::Error;

/// Errors that can occur while loading a tree shape
#[derive(Error, Debug)]
pub enum InputError {
    #[error("failed to read tree input: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid tree JSON at line {line}, column {column}: {message}")]
    Json {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("invalid tree shape: {0}")]
    Shape(String),
}

impl From<serde_json::Error> for InputError {
    fn from(err: serde_json::Error) -> Self {
        InputError::Json {
            line: err.line(),
            column: err.column(),
            message: err.to_string(),
        }
    }
}
