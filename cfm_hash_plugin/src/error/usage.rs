//! Usage error types
//!
//! These are raised when a call is well-formed on its face but cannot be
//! honored as made. None of them mutate the handle involved.

use thiserror::Error;

/// ABI misuse and precondition failures
#[derive(Error, Debug)]
pub enum UsageError {
    /// A required pointer argument was null
    #[error("Null pointer on parameter '{parameter}'")]
    NullPointer { parameter: &'static str },

    /// Output buffer cannot hold the digest
    #[error("Insufficient buffer: digest needs {required} bytes, buffer holds {provided}")]
    InsufficientBuffer { required: usize, provided: usize },

    /// Handle was never issued, or has already been destroyed
    #[error("Invalid handle {handle:#x}")]
    InvalidHandle { handle: usize },

    /// Operation requires an initialized plugin session
    #[error("Plugin is not initialized")]
    NotInitialized,
}

impl UsageError {
    /// Create a null pointer error
    pub fn null_pointer(parameter: &'static str) -> Self {
        Self::NullPointer { parameter }
    }

    /// Create an insufficient buffer error
    pub fn insufficient_buffer(required: usize, provided: usize) -> Self {
        Self::InsufficientBuffer { required, provided }
    }

    /// Create an invalid handle error
    pub fn invalid_handle(handle: usize) -> Self {
        Self::InvalidHandle { handle }
    }
}
