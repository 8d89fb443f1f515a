//! End-to-end tests of the hash capability through the C ABI
//!
//! Every test drives the exported `cfmp_hash_*` functions via the mock host,
//! the way a Confium runtime would after loading the library.

use cfm_hash_plugin::ffi::{
    CfmStatus, Hash, cfmp_hash_block_size, cfmp_hash_clone, cfmp_hash_create, cfmp_hash_finalize,
    cfmp_hash_output_size, cfmp_hash_update, live_handles,
};
use cfm_hash_plugin::supported_algorithms;
use cfm_test_utils::{HostDigest, KNOWN_VECTORS, TestHost};
use std::ffi::CString;
use std::ptr;

#[test]
#[serial_test::serial]
fn test_md5_sizes_and_known_digests() {
    let host = TestHost::quiet();
    let mut md5 = host.create("MD5").unwrap();
    assert_eq!(md5.block_size().unwrap(), 64);
    assert_eq!(md5.output_size().unwrap(), 16);

    assert_eq!(md5.finish_hex().unwrap(), "d41d8cd98f00b204e9800998ecf8427e");

    md5.update(b"test").unwrap();
    assert_eq!(md5.finish_hex().unwrap(), "098f6bcd4621d373cade4e832627b4f6");
}

#[test]
#[serial_test::serial]
fn test_known_vectors() {
    let host = TestHost::quiet();
    for vector in KNOWN_VECTORS {
        let digest = host.digest(vector.algorithm, vector.input).unwrap();
        assert_eq!(
            hex::encode(&digest),
            vector.digest_hex,
            "{}({:?})",
            vector.algorithm,
            String::from_utf8_lossy(vector.input)
        );
    }
}

#[test]
#[serial_test::serial]
fn test_every_listed_algorithm_creates_with_reported_sizes() {
    let host = TestHost::quiet();
    for info in supported_algorithms() {
        let hash = host.create(info.name).unwrap();
        assert_eq!(hash.output_size().unwrap() as usize, info.output_length, "{}", info.name);
        assert_eq!(hash.block_size().unwrap() as usize, info.block_size, "{}", info.name);
    }
}

#[test]
#[serial_test::serial]
fn test_split_updates_match_single_update() {
    let host = TestHost::quiet();
    let mut split = host.create("SHA-256").unwrap();
    split.update(b"ab").unwrap();
    split.update(b"").unwrap();
    split.update(b"c").unwrap();

    assert_eq!(
        split.finish().unwrap(),
        host.digest("SHA-256", b"abc").unwrap()
    );
}

#[test]
#[serial_test::serial]
fn test_finalize_resets_handle() {
    let host = TestHost::quiet();
    let mut hash = host.create("SHA-1").unwrap();
    hash.update(b"abc").unwrap();
    let first = hash.finish().unwrap();

    hash.update(b"abc").unwrap();
    assert_eq!(hash.finish().unwrap(), first);
    assert_eq!(
        hash.finish_hex().unwrap(),
        "da39a3ee5e6b4b0d3255bfef95601890afd80709"
    );
}

#[test]
#[serial_test::serial]
fn test_reset_discards_input() {
    let host = TestHost::quiet();
    let mut hash = host.create("MD5").unwrap();
    hash.update(b"garbage").unwrap();
    hash.reset().unwrap();
    hash.update(b"test").unwrap();
    assert_eq!(hash.finish_hex().unwrap(), "098f6bcd4621d373cade4e832627b4f6");
}

#[test]
#[serial_test::serial]
fn test_clone_is_independent() {
    let host = TestHost::quiet();
    let mut original = host.create("MD5").unwrap();
    original.update(b"te").unwrap();

    let mut copy = original.try_clone().unwrap();
    assert_ne!(copy.as_ptr(), original.as_ptr());

    original.update(b"st").unwrap();
    copy.update(b"xx").unwrap();

    assert_eq!(original.finish_hex().unwrap(), "098f6bcd4621d373cade4e832627b4f6");
    assert_eq!(copy.finish(), host.digest("MD5", b"texx"));
}

#[test]
#[serial_test::serial]
fn test_clone_survives_source_destruction() {
    let host = TestHost::quiet();
    let mut original = host.create("SHA-3(256)").unwrap();
    original.update(b"ab").unwrap();
    let mut copy = original.try_clone().unwrap();
    drop(original);

    copy.update(b"c").unwrap();
    assert_eq!(
        copy.finish_hex().unwrap(),
        "3a985da74fe225b2045c172d6bd390bd855f086e3e9d525b46bfe24511431532"
    );
}

#[test]
#[serial_test::serial]
fn test_short_buffer_is_rejected_without_side_effects() {
    let host = TestHost::quiet();
    let mut hash = host.create("SHA-256").unwrap();
    hash.update(b"ab").unwrap();

    let mut short = [0xAAu8; 31];
    assert_eq!(
        hash.finalize_into(&mut short),
        CfmStatus::ErrorInsufficientBuffer
    );
    assert!(short.iter().all(|&b| b == 0xAA));

    hash.update(b"c").unwrap();
    let mut exact = [0u8; 32];
    assert_eq!(hash.finalize_into(&mut exact), CfmStatus::Success);
    assert_eq!(
        hex::encode(exact),
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
}

#[test]
#[serial_test::serial]
fn test_oversized_buffer_only_front_is_written() {
    let host = TestHost::quiet();
    let mut hash = host.create("MD5").unwrap();
    let mut out = [0x55u8; 24];
    assert_eq!(hash.finalize_into(&mut out), CfmStatus::Success);
    assert_eq!(hex::encode(&out[..16]), "d41d8cd98f00b204e9800998ecf8427e");
    assert!(out[16..].iter().all(|&b| b == 0x55));
}

#[test]
#[serial_test::serial]
fn test_zero_length_finalize_with_null_buffer() {
    let host = TestHost::quiet();
    let hash = host.create("MD5").unwrap();
    assert_eq!(
        cfmp_hash_finalize(hash.as_ptr(), ptr::null_mut(), 0),
        CfmStatus::ErrorInsufficientBuffer
    );
}

#[test]
#[serial_test::serial]
fn test_unknown_algorithm_does_not_leak() {
    let host = TestHost::quiet();
    let before = live_handles();
    for name in ["", "SHA-999", "md5", "sha-256", "SHA256"] {
        assert_eq!(
            host.create(name).unwrap_err(),
            CfmStatus::ErrorUnsupportedAlgorithm,
            "{name:?}"
        );
    }
    assert_eq!(live_handles(), before);
}

#[test]
#[serial_test::serial]
fn test_invalid_utf8_name() {
    let _host = TestHost::quiet();
    let name = [0xC3u8, 0x28, 0x00];
    let mut hash: *mut Hash = ptr::null_mut();
    let status = cfmp_hash_create(
        ptr::null_mut(),
        &mut hash,
        name.as_ptr().cast(),
        ptr::null_mut(),
    );
    assert_eq!(status, CfmStatus::ErrorInvalidUtf8);
    assert!(hash.is_null());
}

#[test]
#[serial_test::serial]
fn test_destroyed_handle_is_rejected() {
    let host = TestHost::quiet();
    let raw = host.create("SHA-512").unwrap().as_ptr();

    let mut size = 0u32;
    assert_eq!(
        cfmp_hash_output_size(raw, &mut size),
        CfmStatus::ErrorInvalidHandle
    );
    assert_eq!(
        cfmp_hash_block_size(raw, &mut size),
        CfmStatus::ErrorInvalidHandle
    );
    let data = b"abc";
    assert_eq!(
        cfmp_hash_update(raw, data.as_ptr(), 3),
        CfmStatus::ErrorInvalidHandle
    );
    let mut dst: *mut Hash = ptr::null_mut();
    assert_eq!(cfmp_hash_clone(raw, &mut dst), CfmStatus::ErrorInvalidHandle);
    assert!(dst.is_null());
}

#[test]
#[serial_test::serial]
fn test_forged_handle_is_rejected() {
    let _host = TestHost::quiet();
    let forged = 0xdead_0000usize as *mut Hash;
    let mut size = 0u32;
    assert_eq!(
        cfmp_hash_output_size(forged, &mut size),
        CfmStatus::ErrorInvalidHandle
    );
    assert_eq!(size, 0);
}

#[test]
#[serial_test::serial]
fn test_handles_survive_finalize() {
    let host = TestHost::quiet();
    let mut hash = host.create("MD5").unwrap();
    hash.update(b"te").unwrap();
    drop(host);

    hash.update(b"st").unwrap();
    assert_eq!(hash.finish_hex().unwrap(), "098f6bcd4621d373cade4e832627b4f6");

    // No session: new handles are refused, clones included
    assert_eq!(
        HostDigest::create("MD5").unwrap_err(),
        CfmStatus::ErrorNotInitialized
    );
    assert_eq!(hash.try_clone().unwrap_err(), CfmStatus::ErrorNotInitialized);
}

#[test]
#[serial_test::serial]
fn test_out_param_is_nulled_on_failure() {
    let _host = TestHost::quiet();
    let name = CString::new("NOT-A-HASH").unwrap();
    let mut hash = 0x1234usize as *mut Hash;
    let status = cfmp_hash_create(ptr::null_mut(), &mut hash, name.as_ptr(), ptr::null_mut());
    assert_eq!(status, CfmStatus::ErrorUnsupportedAlgorithm);
    assert!(hash.is_null());
}

#[test]
#[serial_test::serial]
fn test_concurrent_handles_on_threads() {
    let host = TestHost::quiet();
    let expected = host.digest("SHA-256", &[7u8; 4096]).unwrap();

    let workers: Vec<_> = (0..8)
        .map(|_| {
            let mut hash = host.create("SHA-256").unwrap();
            std::thread::spawn(move || {
                for chunk in [7u8; 4096].chunks(100) {
                    hash.update(chunk).unwrap();
                }
                hash.finish().unwrap()
            })
        })
        .collect();

    for worker in workers {
        assert_eq!(worker.join().unwrap(), expected);
    }
}
