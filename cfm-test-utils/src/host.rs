//! In-process mock host
//!
//! [`TestHost`] owns a plugin session and [`HostDigest`] owns a hash handle.
//! Both release what they own on drop, so a failing assertion never leaks a
//! handle into the next test. Everything goes through the exported `cfmp_*`
//! functions, exactly as a host that loaded the `cdylib` would call them.

use cfm_hash_plugin::capabilities::{DecodedCapability, decode_raw};
use cfm_hash_plugin::config::{DiagnosticTarget, PluginConfig};
use cfm_hash_plugin::ffi::{
    CfmStatus, Hash, cfmp_finalize, cfmp_hash_block_size, cfmp_hash_clone, cfmp_hash_create,
    cfmp_hash_destroy, cfmp_hash_finalize, cfmp_hash_output_size, cfmp_hash_reset,
    cfmp_hash_update, cfmp_initialize, cfmp_interface_version, cfmp_query_interfaces,
};
use cfm_hash_plugin::session;
use std::ffi::CString;
use std::ptr;

/// Turn a status into a `Result`
pub fn check(status: CfmStatus) -> Result<(), CfmStatus> {
    if status.is_success() {
        Ok(())
    } else {
        Err(status)
    }
}

/// A plugin session held for the lifetime of the value
#[derive(Debug)]
pub struct TestHost {
    _private: (),
}

impl TestHost {
    /// Initialize through `cfmp_initialize`, reading `CFMP_*` settings
    pub fn start() -> Result<Self, CfmStatus> {
        check(cfmp_initialize(ptr::null_mut(), ptr::null()))?;
        Ok(Self { _private: () })
    }

    /// Initialize with diagnostics disabled, ending any session left behind
    pub fn quiet() -> Self {
        Self::with_config(PluginConfig {
            diagnostics: DiagnosticTarget::Disabled,
            ..PluginConfig::default()
        })
    }

    /// Initialize with an explicit configuration, ending any session left
    /// behind
    ///
    /// # Panics
    ///
    /// Panics if `config` is rejected.
    pub fn with_config(config: PluginConfig) -> Self {
        session::finalize();
        if let Err(e) = session::initialize_with(config) {
            panic!("test configuration rejected: {e}");
        }
        Self { _private: () }
    }

    pub fn interface_version(&self) -> u32 {
        cfmp_interface_version(ptr::null_mut())
    }

    /// Decode the capability table the way the Confium runtime does
    pub fn capabilities(&self) -> Vec<DecodedCapability> {
        unsafe { decode_raw(cfmp_query_interfaces(ptr::null_mut())) }
    }

    /// Create a handle for `name`
    pub fn create(&self, name: &str) -> Result<HostDigest, CfmStatus> {
        HostDigest::create(name)
    }

    /// One-shot digest of `data`
    pub fn digest(&self, name: &str, data: &[u8]) -> Result<Vec<u8>, CfmStatus> {
        let mut hash = self.create(name)?;
        hash.update(data)?;
        hash.finish()
    }

    /// One-shot digest as lowercase hex
    pub fn digest_hex(&self, name: &str, data: &[u8]) -> Result<String, CfmStatus> {
        self.digest(name, data).map(hex::encode)
    }
}

impl Drop for TestHost {
    fn drop(&mut self) {
        let _ = cfmp_finalize(ptr::null_mut());
    }
}

/// Owned hash handle, destroyed on drop
#[derive(Debug)]
pub struct HostDigest {
    raw: *mut Hash,
}

// SAFETY: handles are registry keys, not addresses, and the plugin locks each
// handle's state per call.
unsafe impl Send for HostDigest {}

impl HostDigest {
    /// Create through `cfmp_hash_create`. Works without a [`TestHost`] so
    /// tests can observe `ErrorNotInitialized`.
    pub fn create(name: &str) -> Result<Self, CfmStatus> {
        let name = CString::new(name).map_err(|_| CfmStatus::ErrorInvalidUtf8)?;
        let mut raw = ptr::null_mut();
        check(cfmp_hash_create(
            ptr::null_mut(),
            &mut raw,
            name.as_ptr(),
            ptr::null_mut(),
        ))?;
        Ok(Self { raw })
    }

    /// The value handed to the host
    pub fn as_ptr(&self) -> *mut Hash {
        self.raw
    }

    /// Give up ownership without destroying the handle
    pub fn into_raw(self) -> *mut Hash {
        let raw = self.raw;
        std::mem::forget(self);
        raw
    }

    pub fn output_size(&self) -> Result<u32, CfmStatus> {
        let mut size = 0u32;
        check(cfmp_hash_output_size(self.raw, &mut size))?;
        Ok(size)
    }

    pub fn block_size(&self) -> Result<u32, CfmStatus> {
        let mut size = 0u32;
        check(cfmp_hash_block_size(self.raw, &mut size))?;
        Ok(size)
    }

    /// Feed `data`
    ///
    /// # Panics
    ///
    /// Panics if `data` is longer than the ABI's `u32` length.
    pub fn update(&mut self, data: &[u8]) -> Result<(), CfmStatus> {
        let length = u32::try_from(data.len()).expect("chunk longer than u32::MAX");
        check(cfmp_hash_update(self.raw, data.as_ptr(), length))
    }

    pub fn reset(&mut self) -> Result<(), CfmStatus> {
        check(cfmp_hash_reset(self.raw))
    }

    /// Clone through `cfmp_hash_clone`
    pub fn try_clone(&self) -> Result<HostDigest, CfmStatus> {
        let mut raw = ptr::null_mut();
        check(cfmp_hash_clone(self.raw, &mut raw))?;
        Ok(HostDigest { raw })
    }

    /// Raw finalize into a caller buffer of any length
    pub fn finalize_into(&mut self, out: &mut [u8]) -> CfmStatus {
        let length = u32::try_from(out.len()).unwrap_or(u32::MAX);
        cfmp_hash_finalize(self.raw, out.as_mut_ptr(), length)
    }

    /// Finalize into a buffer sized by `output_size`
    pub fn finish(&mut self) -> Result<Vec<u8>, CfmStatus> {
        let mut out = vec![0u8; self.output_size()? as usize];
        check(self.finalize_into(&mut out))?;
        Ok(out)
    }

    /// Finalize as lowercase hex
    pub fn finish_hex(&mut self) -> Result<String, CfmStatus> {
        self.finish().map(hex::encode)
    }
}

impl Drop for HostDigest {
    fn drop(&mut self) {
        cfmp_hash_destroy(self.raw);
    }
}
