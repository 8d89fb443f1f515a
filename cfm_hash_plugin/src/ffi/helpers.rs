//! Boundary guard and pointer conversions for FFI
//!
//! Every exported entry point runs its body through [`guard`]. The guard is the
//! only place errors and panics are turned into status codes, so no unwinding
//! ever reaches the host.

use crate::diagnostics::{DiagnosticSink, default_sink, format_diagnostic};
use crate::error::{Error, InternalError, Result, UsageError, ValidationError};
use crate::ffi::types::CfmStatus;
use std::any::Any;
use std::ffi::{CStr, c_char};
use std::panic::{AssertUnwindSafe, catch_unwind};

/// Message used for panics whose payload is not a string
pub const UNKNOWN_FAILURE: &str = "unknown exception";

/// Run `f` at the ABI boundary, reporting failures to the default sink
pub fn guard<F>(function: &str, f: F) -> CfmStatus
where
    F: FnOnce() -> Result<()>,
{
    guard_with(default_sink().as_ref(), function, f)
}

/// Run `f` at the ABI boundary, reporting failures to `sink`
pub fn guard_with<F>(sink: &dyn DiagnosticSink, function: &str, f: F) -> CfmStatus
where
    F: FnOnce() -> Result<()>,
{
    let error = match catch_unwind(AssertUnwindSafe(f)) {
        Ok(Ok(())) => return CfmStatus::Success,
        Ok(Err(error)) => error,
        Err(payload) => Error::from(InternalError::panic(panic_message(payload.as_ref()))),
    };
    report(sink, function, &error)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&'static str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        UNKNOWN_FAILURE.to_string()
    }
}

fn report(sink: &dyn DiagnosticSink, function: &str, error: &Error) -> CfmStatus {
    let status = error.status();
    let line = format_diagnostic(function, status.into(), &error.to_string());
    log::debug!("{function} failed with {status:?}: {error}");
    // A misbehaving sink must not unwind into the host either
    let _ = catch_unwind(AssertUnwindSafe(|| sink.write_line(&line)));
    status
}

/// Borrow a NUL-terminated UTF-8 string argument
pub(crate) fn c_str_to_str<'a>(ptr: *const c_char, parameter: &'static str) -> Result<&'a str> {
    if ptr.is_null() {
        return Err(UsageError::null_pointer(parameter).into());
    }
    let s = unsafe { CStr::from_ptr(ptr) };
    s.to_str()
        .map_err(|_| ValidationError::invalid_utf8(parameter).into())
}

/// Borrow an out-parameter
pub(crate) fn out_param<'a, T>(ptr: *mut T, parameter: &'static str) -> Result<&'a mut T> {
    unsafe { ptr.as_mut() }.ok_or_else(|| UsageError::null_pointer(parameter).into())
}

/// Borrow `length` input bytes. A null pointer is accepted for zero length.
pub(crate) fn input_bytes<'a>(data: *const u8, length: u32) -> Result<&'a [u8]> {
    if length == 0 {
        return Ok(&[]);
    }
    if data.is_null() {
        return Err(UsageError::null_pointer("data").into());
    }
    Ok(unsafe { std::slice::from_raw_parts(data, length as usize) })
}

/// Borrow `length` writable bytes. A null pointer is accepted for zero length.
pub(crate) fn output_bytes<'a>(out: *mut u8, length: u32) -> Result<&'a mut [u8]> {
    if length == 0 {
        return Ok(&mut []);
    }
    if out.is_null() {
        return Err(UsageError::null_pointer("result").into());
    }
    Ok(unsafe { std::slice::from_raw_parts_mut(out, length as usize) })
}

/// Narrow a size to the ABI's `u32`
pub(crate) fn size_to_u32(size: usize) -> Result<u32> {
    u32::try_from(size)
        .map_err(|_| InternalError::assertion(format!("size {size} does not fit in u32")).into())
}
