//! Internal plugin error types

use thiserror::Error;

/// Resource and unexpected internal errors
#[derive(Error, Debug)]
pub enum InternalError {
    /// Handle table is full
    #[error("Handle limit reached: {limit} live handles")]
    OutOfHandles { limit: usize },

    /// A panic was caught at the ABI boundary
    #[error("{message}")]
    Panic { message: String },

    /// Internal assertion failure
    #[error("Internal assertion failed: {message}")]
    Assertion { message: String },
}

impl InternalError {
    /// Create an out of handles error
    pub fn out_of_handles(limit: usize) -> Self {
        Self::OutOfHandles { limit }
    }

    /// Create a caught panic error
    pub fn panic(message: impl Into<String>) -> Self {
        Self::Panic {
            message: message.into(),
        }
    }

    /// Create an internal assertion failure error
    pub fn assertion(message: impl Into<String>) -> Self {
        Self::Assertion {
            message: message.into(),
        }
    }

    /// Check if this error is recoverable
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::OutOfHandles { .. })
    }
}
