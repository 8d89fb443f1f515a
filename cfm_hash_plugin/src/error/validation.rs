//! Validation related error types

use thiserror::Error;

/// Input validation and configuration errors
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Algorithm name not known to the underlying hash library
    #[error("Unsupported algorithm '{name}'")]
    UnsupportedAlgorithm { name: String },

    /// C string argument is not valid UTF-8
    #[error("Invalid UTF-8 in parameter '{parameter}'")]
    InvalidUtf8 { parameter: String },

    /// Plugin options could not be loaded
    #[error("Invalid options: {message}")]
    InvalidOptions { message: String },
}

impl ValidationError {
    /// Create an unsupported algorithm error
    pub fn unsupported_algorithm(name: &str) -> Self {
        Self::UnsupportedAlgorithm {
            name: name.to_string(),
        }
    }

    /// Create an invalid UTF-8 error
    pub fn invalid_utf8(parameter: &str) -> Self {
        Self::InvalidUtf8 {
            parameter: parameter.to_string(),
        }
    }

    /// Create an invalid options error
    pub fn invalid_options(message: &str) -> Self {
        Self::InvalidOptions {
            message: message.to_string(),
        }
    }
}
