//! Host side of the plugin ABI
//!
//! The CLI links the plugin statically but talks to it only through the
//! exported `cfmp_*` functions, the same way the Confium runtime does after
//! loading the shared library.

use cfm_hash_plugin::capabilities::{DecodedCapability, decode_raw};
use cfm_hash_plugin::ffi::{
    CfmStatus, Hash, cfmp_finalize, cfmp_hash_block_size, cfmp_hash_create, cfmp_hash_destroy,
    cfmp_hash_finalize, cfmp_hash_output_size, cfmp_hash_update, cfmp_initialize,
    cfmp_interface_version, cfmp_query_interfaces,
};
use std::ffi::CString;
use std::fmt;
use std::ptr;

/// Largest slice handed to a single `cfmp_hash_update` call
const MAX_UPDATE: usize = u32::MAX as usize;

/// A plugin call returned a non-success status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostError {
    pub function: &'static str,
    pub status: CfmStatus,
}

impl HostError {
    pub fn new(function: &'static str, status: CfmStatus) -> Self {
        Self { function, status }
    }
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}() returned {} ({})",
            self.function,
            u32::from(self.status),
            self.status.description()
        )
    }
}

impl std::error::Error for HostError {}

fn check(function: &'static str, status: CfmStatus) -> Result<(), HostError> {
    if status.is_success() {
        Ok(())
    } else {
        Err(HostError::new(function, status))
    }
}

/// An initialized plugin session, finalized on drop
#[derive(Debug)]
pub struct PluginHost {
    interface_version: u32,
}

impl PluginHost {
    pub fn start() -> Result<Self, HostError> {
        let interface_version = cfmp_interface_version(ptr::null_mut());
        check(
            "cfmp_initialize",
            cfmp_initialize(ptr::null_mut(), ptr::null()),
        )?;
        log::debug!("Plugin session started (interface v{interface_version})");
        Ok(Self { interface_version })
    }

    pub fn interface_version(&self) -> u32 {
        self.interface_version
    }

    pub fn capabilities(&self) -> Vec<DecodedCapability> {
        unsafe { decode_raw(cfmp_query_interfaces(ptr::null_mut())) }
    }

    /// Open a hash handle for `algorithm`
    pub fn hash(&self, algorithm: &str) -> Result<HostHash, HostError> {
        let name = CString::new(algorithm)
            .map_err(|_| HostError::new("cfmp_hash_create", CfmStatus::ErrorUnsupportedAlgorithm))?;
        let mut raw: *mut Hash = ptr::null_mut();
        check(
            "cfmp_hash_create",
            cfmp_hash_create(ptr::null_mut(), &mut raw, name.as_ptr(), ptr::null_mut()),
        )?;
        log::trace!("Opened {algorithm} handle");
        Ok(HostHash {
            raw,
            algorithm: algorithm.to_string(),
        })
    }
}

impl Drop for PluginHost {
    fn drop(&mut self) {
        let _ = cfmp_finalize(ptr::null_mut());
        log::debug!("Plugin session finalized");
    }
}

/// An open hash handle, destroyed on drop
#[derive(Debug)]
pub struct HostHash {
    raw: *mut Hash,
    algorithm: String,
}

impl HostHash {
    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }

    pub fn output_size(&self) -> Result<u32, HostError> {
        let mut size = 0u32;
        check(
            "cfmp_hash_output_size",
            cfmp_hash_output_size(self.raw, &mut size),
        )?;
        Ok(size)
    }

    pub fn block_size(&self) -> Result<u32, HostError> {
        let mut size = 0u32;
        check(
            "cfmp_hash_block_size",
            cfmp_hash_block_size(self.raw, &mut size),
        )?;
        Ok(size)
    }

    /// Feed `data`, splitting it if it exceeds the ABI's `u32` length
    pub fn update(&mut self, data: &[u8]) -> Result<(), HostError> {
        for chunk in data.chunks(MAX_UPDATE) {
            // chunks() never yields more than MAX_UPDATE bytes
            let length = chunk.len() as u32;
            check(
                "cfmp_hash_update",
                cfmp_hash_update(self.raw, chunk.as_ptr(), length),
            )?;
        }
        Ok(())
    }

    /// Finalize into a buffer sized from `output_size`. The handle is reset.
    pub fn finish(&mut self) -> Result<Vec<u8>, HostError> {
        let mut out = vec![0u8; self.output_size()? as usize];
        check(
            "cfmp_hash_finalize",
            cfmp_hash_finalize(self.raw, out.as_mut_ptr(), out.len() as u32),
        )?;
        Ok(out)
    }
}

impl Drop for HostHash {
    fn drop(&mut self) {
        cfmp_hash_destroy(self.raw);
    }
}
