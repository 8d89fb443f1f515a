//! Plugin session, capability discovery and configuration tests
//!
//! These touch process-wide state (the session, the default diagnostic sink
//! and `CFMP_*` environment variables) and therefore all run serially.

use cfm_hash_plugin::ffi::{
    CfmStatus, cfmp_finalize, cfmp_initialize, cfmp_interface_version, cfmp_query_interfaces,
    cfmp_status_string, live_handles,
};
use cfm_hash_plugin::{MemorySink, capabilities, diagnostics, session};
use cfm_test_utils::{HostDigest, TestHost};
use std::ffi::CStr;
use std::ptr;
use std::sync::Arc;
use tempfile::TempDir;

/// Sets `CFMP_*` variables for one test and removes them on drop
struct EnvGuard {
    keys: Vec<&'static str>,
}

impl EnvGuard {
    fn set(vars: &[(&'static str, &str)]) -> Self {
        for (key, value) in vars {
            unsafe { std::env::set_var(key, value) };
        }
        Self {
            keys: vars.iter().map(|(key, _)| *key).collect(),
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for key in &self.keys {
            unsafe { std::env::remove_var(key) };
        }
    }
}

#[test]
#[serial_test::serial]
fn test_interface_version_and_capabilities() {
    assert_eq!(cfmp_interface_version(ptr::null_mut()), 0);

    let table = cfmp_query_interfaces(ptr::null_mut());
    assert!(!table.is_null());
    let bytes = unsafe { std::slice::from_raw_parts(table, 8) };
    assert_eq!(bytes, b"hash\0\0\0\0");

    let host = TestHost::quiet();
    let caps = host.capabilities();
    assert_eq!(caps.len(), 1);
    assert_eq!(caps[0].name, "hash");
    assert_eq!(caps[0].version, 0);
    assert_eq!(caps, capabilities::decode(capabilities::table()));
}

#[test]
#[serial_test::serial]
fn test_capabilities_available_without_session() {
    session::finalize();
    let caps = unsafe { capabilities::decode_raw(cfmp_query_interfaces(ptr::null_mut())) };
    assert_eq!(caps[0].name, "hash");
}

#[test]
#[serial_test::serial]
fn test_initialize_finalize_through_abi() {
    session::finalize();
    let _env = EnvGuard::set(&[("CFMP_DIAGNOSTICS", "none")]);

    assert_eq!(
        cfmp_initialize(ptr::null_mut(), ptr::null()),
        CfmStatus::Success
    );
    assert_eq!(
        cfmp_initialize(ptr::null_mut(), ptr::null()),
        CfmStatus::Success
    );
    assert!(session::is_initialized());

    let hash = HostDigest::create("MD5").unwrap();
    assert_eq!(cfmp_finalize(ptr::null_mut()), CfmStatus::Success);
    assert!(!session::is_initialized());

    // Handle outlives the session and is still destroyed cleanly
    assert_eq!(hash.output_size().unwrap(), 16);
    drop(hash);
    assert_eq!(cfmp_finalize(ptr::null_mut()), CfmStatus::Success);
}

#[test]
#[serial_test::serial]
fn test_malformed_environment_is_invalid_options() {
    session::finalize();
    let _env = EnvGuard::set(&[("CFMP_DIAGNOSTICS", "carrier-pigeon")]);
    let sink = Arc::new(MemorySink::new());
    let previous = diagnostics::set_default_sink(sink.clone());

    assert_eq!(
        cfmp_initialize(ptr::null_mut(), ptr::null()),
        CfmStatus::ErrorInvalidOptions
    );
    assert!(!session::is_initialized());
    assert_eq!(
        HostDigest::create("MD5").unwrap_err(),
        CfmStatus::ErrorNotInitialized
    );

    let lines = sink.lines();
    assert!(lines[0].starts_with("[cfmp_initialize()] Error 0x00000016: "));
    diagnostics::set_default_sink(previous);
}

#[test]
#[serial_test::serial]
fn test_file_diagnostics_from_environment() {
    session::finalize();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("cfmp.log");
    let path_str = path.to_str().unwrap().to_string();
    let _env = EnvGuard::set(&[
        ("CFMP_DIAGNOSTICS", "file"),
        ("CFMP_DIAGNOSTICS_FILE", &path_str),
    ]);

    let host = TestHost::start().unwrap();
    assert_eq!(
        host.create("WHIRLPOOL").unwrap_err(),
        CfmStatus::ErrorUnsupportedAlgorithm
    );
    drop(host);

    let log = std::fs::read_to_string(&path).unwrap();
    assert_eq!(
        log,
        "[cfmp_hash_create()] Error 0x00000032: Unsupported algorithm 'WHIRLPOOL'\n"
    );
}

#[test]
#[serial_test::serial]
fn test_handle_limit_from_environment() {
    session::finalize();
    let limit = live_handles() + 2;
    let limit_str = limit.to_string();
    let _env = EnvGuard::set(&[("CFMP_DIAGNOSTICS", "none"), ("CFMP_MAX_HANDLES", &limit_str)]);

    let host = TestHost::start().unwrap();
    let a = host.create("SHA-1").unwrap();
    let b = a.try_clone().unwrap();
    assert_eq!(
        host.create("SHA-1").unwrap_err(),
        CfmStatus::ErrorOutOfHandles
    );
    assert_eq!(a.try_clone().unwrap_err(), CfmStatus::ErrorOutOfHandles);

    drop(b);
    assert!(host.create("SHA-1").is_ok());
}

#[test]
#[serial_test::serial]
fn test_status_strings() {
    let read = |code: CfmStatus| {
        unsafe { CStr::from_ptr(cfmp_status_string(code.into())) }
            .to_str()
            .unwrap()
            .to_string()
    };
    assert_eq!(read(CfmStatus::Success), "Success");
    assert_eq!(read(CfmStatus::ErrorInsufficientBuffer), "Insufficient buffer");
    assert_eq!(read(CfmStatus::ErrorNotInitialized), "Plugin not initialized");
}
