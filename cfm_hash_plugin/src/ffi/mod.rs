//! C ABI of the Confium hash plugin
//!
//! The host loads the `cdylib` and resolves the `cfmp_*` symbols below.
//! Session-level calls take the host's opaque `Confium` context, hash calls
//! take handles issued by [`cfmp_hash_create`] and [`cfmp_hash_clone`].
//!
//! # Safety
//!
//! Every entry point except the infallible accessors runs inside
//! [`helpers::guard`], which turns errors and panics into a [`CfmStatus`]
//! and a diagnostic line. No panic crosses the boundary. Handles are decoded
//! through [`handles`], never dereferenced, so a stale or forged handle is
//! reported as `ErrorInvalidHandle`.

#![allow(clippy::not_unsafe_ptr_arg_deref)]

pub mod handles;
pub mod helpers;
pub mod operations;
pub mod results;
pub mod types;

pub use handles::{HandleId, MAX_SLOTS, live_handles};
pub use helpers::{UNKNOWN_FAILURE, guard, guard_with};
pub use operations::*;
pub use results::*;
pub use types::*;

use crate::{capabilities, session};

/* ========================================================================== */
/*                          Plugin Lifecycle                                   */
/* ========================================================================== */

/// Plugin interface version implemented by this library
#[unsafe(no_mangle)]
pub extern "C" fn cfmp_interface_version(_cfm: *mut Confium) -> u32 {
    session::INTERFACE_VERSION
}

/// Start a plugin session
///
/// Plugin settings come from `CFMP_*` environment variables; `opts` is
/// accepted for interface compatibility and may be null. Repeated calls
/// succeed without reloading.
#[unsafe(no_mangle)]
pub extern "C" fn cfmp_initialize(_cfm: *mut Confium, _opts: *const Options) -> CfmStatus {
    guard("cfmp_initialize", session::initialize)
}

/// End the plugin session. Handles still live remain usable until destroyed.
#[unsafe(no_mangle)]
pub extern "C" fn cfmp_finalize(_cfm: *mut Confium) -> CfmStatus {
    guard("cfmp_finalize", || {
        session::finalize();
        Ok(())
    })
}

/// Capability table. Static for the life of the process; never free it.
#[unsafe(no_mangle)]
pub extern "C" fn cfmp_query_interfaces(_cfm: *mut Confium) -> *const u8 {
    capabilities::table().as_ptr()
}
