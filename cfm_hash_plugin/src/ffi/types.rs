//! C-compatible type definitions for FFI

use std::marker::{PhantomData, PhantomPinned};

/* ========================================================================== */
/*                              Status Codes                                   */
/* ========================================================================== */

/// Status returned by every fallible entry point. `0` is success.
///
/// Codes share their numbering with the Confium host's error codes.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CfmStatus {
    Success = 0,
    ErrorUnknown = 1,
    ErrorNullPointer = 2,
    ErrorInvalidUtf8 = 3,
    ErrorInsufficientBuffer = 12,
    ErrorInvalidHandle = 14,
    ErrorOutOfHandles = 15,
    ErrorNotInitialized = 16,
    ErrorInvalidOptions = 22,
    ErrorUnsupportedAlgorithm = 50,
}

impl CfmStatus {
    const ALL: [CfmStatus; 10] = [
        CfmStatus::Success,
        CfmStatus::ErrorUnknown,
        CfmStatus::ErrorNullPointer,
        CfmStatus::ErrorInvalidUtf8,
        CfmStatus::ErrorInsufficientBuffer,
        CfmStatus::ErrorInvalidHandle,
        CfmStatus::ErrorOutOfHandles,
        CfmStatus::ErrorNotInitialized,
        CfmStatus::ErrorInvalidOptions,
        CfmStatus::ErrorUnsupportedAlgorithm,
    ];

    /// Map a raw code back to a status, if it is one this plugin emits
    pub fn from_code(code: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|status| *status as u32 == code)
    }

    pub fn is_success(self) -> bool {
        self == CfmStatus::Success
    }

    /// Human-readable description
    pub fn description(self) -> &'static str {
        match self {
            CfmStatus::Success => "Success",
            CfmStatus::ErrorUnknown => "Unknown error",
            CfmStatus::ErrorNullPointer => "NULL pointer",
            CfmStatus::ErrorInvalidUtf8 => "Invalid UTF-8",
            CfmStatus::ErrorInsufficientBuffer => "Insufficient buffer",
            CfmStatus::ErrorInvalidHandle => "Invalid handle",
            CfmStatus::ErrorOutOfHandles => "Handle limit reached",
            CfmStatus::ErrorNotInitialized => "Plugin not initialized",
            CfmStatus::ErrorInvalidOptions => "Invalid options",
            CfmStatus::ErrorUnsupportedAlgorithm => "Unsupported algorithm",
        }
    }
}

impl From<CfmStatus> for u32 {
    #[inline]
    fn from(status: CfmStatus) -> u32 {
        status as u32
    }
}

/* ========================================================================== */
/*                              Opaque Types                                   */
/* ========================================================================== */

/// Host context passed to session-level calls. Never dereferenced.
#[repr(C)]
pub struct Confium {
    _data: [u8; 0],
    _marker: PhantomData<(*mut u8, PhantomPinned)>,
}

/// Host-owned options object. Never dereferenced by the hash capability.
#[repr(C)]
pub struct Options {
    _data: [u8; 0],
    _marker: PhantomData<(*mut u8, PhantomPinned)>,
}

/// Hash handle as seen by the host. The pointer value is a
/// [`HandleId`](crate::ffi::handles::HandleId), not an address.
#[repr(C)]
pub struct Hash {
    _data: [u8; 0],
    _marker: PhantomData<(*mut u8, PhantomPinned)>,
}
