//! Hash operations exposed through the FFI layer
//!
//! Each function decodes its handle, locks that handle's state and delegates
//! to [`HashState`]. The registry lock is released before the state lock is
//! taken, so different handles never contend with each other.

use crate::engine::HashState;
use crate::error::Result;
use crate::ffi::handles;
use crate::ffi::helpers::{c_str_to_str, guard, input_bytes, out_param, output_bytes, size_to_u32};
use crate::ffi::types::{CfmStatus, Confium, Hash, Options};
use crate::session;
use std::ffi::c_char;
use std::ptr;
use std::sync::PoisonError;

fn with_state<T>(hash: *mut Hash, f: impl FnOnce(&mut HashState) -> Result<T>) -> Result<T> {
    let shared = handles::lookup(hash)?;
    let mut state = shared.lock().unwrap_or_else(PoisonError::into_inner);
    f(&mut state)
}

/// Create a hash handle for the algorithm named `name`
///
/// `*hash` is set to null before any other work, so it is null on every
/// failure path.
#[unsafe(no_mangle)]
pub extern "C" fn cfmp_hash_create(
    _cfm: *mut Confium,
    hash: *mut *mut Hash,
    name: *const c_char,
    _opts: *mut Options,
) -> CfmStatus {
    guard("cfmp_hash_create", || {
        let out = out_param(hash, "hash")?;
        *out = ptr::null_mut();
        let name = c_str_to_str(name, "name")?;
        let limit = session::handle_limit()?;

        let state = HashState::create(name)?;
        let id = handles::register(state, limit)?;
        log::trace!("Created {name} handle {:#x}", id.raw());
        *out = id.as_ptr();
        Ok(())
    })
}

/// Digest length in bytes
#[unsafe(no_mangle)]
pub extern "C" fn cfmp_hash_output_size(hash: *mut Hash, size: *mut u32) -> CfmStatus {
    guard("cfmp_hash_output_size", || {
        let out = out_param(size, "size")?;
        *out = with_state(hash, |state| size_to_u32(state.output_size()))?;
        Ok(())
    })
}

/// Internal block size in bytes
#[unsafe(no_mangle)]
pub extern "C" fn cfmp_hash_block_size(hash: *mut Hash, size: *mut u32) -> CfmStatus {
    guard("cfmp_hash_block_size", || {
        let out = out_param(size, "size")?;
        *out = with_state(hash, |state| size_to_u32(state.block_size()))?;
        Ok(())
    })
}

/// Absorb `length` bytes at `data`. `data` may be null when `length` is 0.
#[unsafe(no_mangle)]
pub extern "C" fn cfmp_hash_update(hash: *mut Hash, data: *const u8, length: u32) -> CfmStatus {
    guard("cfmp_hash_update", || {
        with_state(hash, |state| {
            state.update(input_bytes(data, length)?);
            Ok(())
        })
    })
}

/// Discard absorbed input
#[unsafe(no_mangle)]
pub extern "C" fn cfmp_hash_reset(hash: *mut Hash) -> CfmStatus {
    guard("cfmp_hash_reset", || {
        with_state(hash, |state| {
            state.reset();
            Ok(())
        })
    })
}

/// Create an independent handle holding a copy of `src`'s state
#[unsafe(no_mangle)]
pub extern "C" fn cfmp_hash_clone(src: *mut Hash, dst: *mut *mut Hash) -> CfmStatus {
    guard("cfmp_hash_clone", || {
        let out = out_param(dst, "dst")?;
        *out = ptr::null_mut();
        let limit = session::handle_limit()?;

        let copy = with_state(src, |state| Ok(state.snapshot()))?;
        let name = copy.name();
        let id = handles::register(copy, limit)?;
        log::trace!("Cloned {name} handle {:#x} into {:#x}", src as usize, id.raw());
        *out = id.as_ptr();
        Ok(())
    })
}

/// Write the digest into the first `output_size` bytes of `result`
///
/// When `length` is smaller than the digest, returns
/// `ErrorInsufficientBuffer` and leaves both the buffer and the handle as
/// they were. On success the handle is reset.
#[unsafe(no_mangle)]
pub extern "C" fn cfmp_hash_finalize(hash: *mut Hash, result: *mut u8, length: u32) -> CfmStatus {
    guard("cfmp_hash_finalize", || {
        with_state(hash, |state| {
            state.finalize_into(output_bytes(result, length)?)?;
            Ok(())
        })
    })
}

/// Release a handle. Null is ignored; an unknown handle is reported to the
/// diagnostic sink.
#[unsafe(no_mangle)]
pub extern "C" fn cfmp_hash_destroy(hash: *mut Hash) {
    if hash.is_null() {
        return;
    }
    let _ = guard("cfmp_hash_destroy", || {
        handles::release(hash)?;
        log::trace!("Destroyed handle {:#x}", hash as usize);
        Ok(())
    });
}
