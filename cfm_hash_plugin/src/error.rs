//! Error types for the Confium hash plugin
//!
//! Every failure the plugin can observe is one of these variants. Nothing here
//! crosses the C ABI directly: the boundary guard in [`crate::ffi::helpers`]
//! converts each error into a [`CfmStatus`] code and a diagnostic line.

use crate::ffi::types::CfmStatus;
use thiserror::Error;

pub mod internal;
pub mod usage;
pub mod validation;

pub use internal::InternalError;
pub use usage::UsageError;
pub use validation::ValidationError;

/// Result type alias for the plugin
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the plugin
///
/// Errors are categorized the way hosts are expected to react to them:
/// - Validation errors: bad algorithm names, malformed options, bad strings.
///   The caller must supply corrected input.
/// - Usage errors: the call was well-formed but cannot be honored as made
///   (buffer too small, stale handle, null argument, no session).
/// - Internal errors: resource exhaustion and anything unexpected.
#[derive(Error, Debug)]
pub enum Error {
    /// Validation related errors
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Usage related errors
    #[error(transparent)]
    Usage(#[from] UsageError),

    /// Internal plugin errors
    #[error(transparent)]
    Internal(#[from] InternalError),
}

impl Error {
    /// Status code reported to the host for this error
    pub fn status(&self) -> CfmStatus {
        match self {
            Error::Validation(err) => match err {
                ValidationError::UnsupportedAlgorithm { .. } => {
                    CfmStatus::ErrorUnsupportedAlgorithm
                }
                ValidationError::InvalidUtf8 { .. } => CfmStatus::ErrorInvalidUtf8,
                ValidationError::InvalidOptions { .. } => CfmStatus::ErrorInvalidOptions,
            },
            Error::Usage(err) => match err {
                UsageError::NullPointer { .. } => CfmStatus::ErrorNullPointer,
                UsageError::InsufficientBuffer { .. } => CfmStatus::ErrorInsufficientBuffer,
                UsageError::InvalidHandle { .. } => CfmStatus::ErrorInvalidHandle,
                UsageError::NotInitialized => CfmStatus::ErrorNotInitialized,
            },
            Error::Internal(err) => match err {
                InternalError::OutOfHandles { .. } => CfmStatus::ErrorOutOfHandles,
                _ => CfmStatus::ErrorUnknown,
            },
        }
    }

    /// Whether retrying the same call can succeed once the caller adjusts
    /// something other than the input itself
    pub fn is_recoverable(&self) -> bool {
        match self {
            Error::Usage(UsageError::InsufficientBuffer { .. }) => true,
            Error::Internal(err) => err.is_recoverable(),
            _ => false,
        }
    }
}

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::Validation(ValidationError::invalid_options(&err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_algorithm_maps_to_distinct_status() {
        let error = Error::from(ValidationError::unsupported_algorithm("SHA-999"));
        assert_eq!(error.status(), CfmStatus::ErrorUnsupportedAlgorithm);
        assert!(error.to_string().contains("SHA-999"));
        assert!(!error.is_recoverable());
    }

    #[test]
    fn test_insufficient_buffer_is_recoverable() {
        let error = Error::from(UsageError::insufficient_buffer(32, 31));
        assert_eq!(error.status(), CfmStatus::ErrorInsufficientBuffer);
        assert_ne!(error.status(), CfmStatus::ErrorUnknown);
        assert!(error.is_recoverable());
    }

    #[test]
    fn test_out_of_handles_is_resource_error() {
        let error = Error::from(InternalError::out_of_handles(16));
        assert_eq!(error.status(), CfmStatus::ErrorOutOfHandles);
        assert!(error.is_recoverable());
    }

    #[test]
    fn test_unexpected_internal_errors_use_generic_status() {
        let error = Error::from(InternalError::panic("index out of bounds"));
        assert_eq!(error.status(), CfmStatus::ErrorUnknown);
        assert_eq!(u32::from(error.status()), 1);

        let error = Error::from(InternalError::assertion("slot table corrupted"));
        assert_eq!(error.status(), CfmStatus::ErrorUnknown);
    }

    #[test]
    fn test_usage_error_statuses() {
        assert_eq!(
            Error::from(UsageError::null_pointer("hash")).status(),
            CfmStatus::ErrorNullPointer
        );
        assert_eq!(
            Error::from(UsageError::invalid_handle(0xdead)).status(),
            CfmStatus::ErrorInvalidHandle
        );
        assert_eq!(
            Error::from(UsageError::NotInitialized).status(),
            CfmStatus::ErrorNotInitialized
        );
    }

    #[test]
    fn test_figment_error_becomes_invalid_options() {
        let err = figment::Error::from("missing field `diagnostics_file`".to_string());
        let error = Error::from(err);
        assert_eq!(error.status(), CfmStatus::ErrorInvalidOptions);
        assert!(error.to_string().contains("diagnostics_file"));
    }
}
