//! Status code descriptions for FFI

use crate::ffi::types::CfmStatus;
use std::ffi::{CStr, c_char};

impl CfmStatus {
    /// NUL-terminated form of [`description`](Self::description)
    pub fn c_description(self) -> &'static CStr {
        match self {
            CfmStatus::Success => c"Success",
            CfmStatus::ErrorUnknown => c"Unknown error",
            CfmStatus::ErrorNullPointer => c"NULL pointer",
            CfmStatus::ErrorInvalidUtf8 => c"Invalid UTF-8",
            CfmStatus::ErrorInsufficientBuffer => c"Insufficient buffer",
            CfmStatus::ErrorInvalidHandle => c"Invalid handle",
            CfmStatus::ErrorOutOfHandles => c"Handle limit reached",
            CfmStatus::ErrorNotInitialized => c"Plugin not initialized",
            CfmStatus::ErrorInvalidOptions => c"Invalid options",
            CfmStatus::ErrorUnsupportedAlgorithm => c"Unsupported algorithm",
        }
    }
}

/// Get human-readable status description. The string is static.
#[unsafe(no_mangle)]
pub extern "C" fn cfmp_status_string(status: u32) -> *const c_char {
    CfmStatus::from_code(status)
        .map_or(c"Unrecognized status", CfmStatus::c_description)
        .as_ptr()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(status: u32) -> &'static str {
        unsafe { CStr::from_ptr(cfmp_status_string(status)) }
            .to_str()
            .unwrap()
    }

    #[test]
    fn test_descriptions_agree() {
        for code in 0..=64 {
            if let Some(status) = CfmStatus::from_code(code) {
                assert_eq!(read(code), status.description());
            }
        }
    }

    #[test]
    fn test_known_strings() {
        assert_eq!(read(0), "Success");
        assert_eq!(read(12), "Insufficient buffer");
        assert_eq!(read(50), "Unsupported algorithm");
    }

    #[test]
    fn test_unrecognized_code() {
        assert_eq!(read(7), "Unrecognized status");
        assert_eq!(read(u32::MAX), "Unrecognized status");
    }
}
