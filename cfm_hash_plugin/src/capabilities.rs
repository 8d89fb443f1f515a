//! Capability table advertised through `cfmp_query_interfaces`
//!
//! The table is encoded at compile time from [`CAPABILITIES`]. Each entry is
//! the capability name, a NUL, and one version byte. An empty name (a lone
//! NUL) terminates the table, followed by one padding NUL.

use std::ffi::CStr;

/// One advertised capability
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapabilityDescriptor {
    pub name: &'static str,
    pub version: u8,
}

/// Capabilities this plugin implements
pub const CAPABILITIES: &[CapabilityDescriptor] = &[CapabilityDescriptor {
    name: "hash",
    version: 0,
}];

const fn encoded_len(caps: &[CapabilityDescriptor]) -> usize {
    let mut len = 0;
    let mut i = 0;
    while i < caps.len() {
        len += caps[i].name.len() + 2;
        i += 1;
    }
    len + 2
}

const fn is_valid(caps: &[CapabilityDescriptor]) -> bool {
    let mut i = 0;
    while i < caps.len() {
        let name = caps[i].name.as_bytes();
        if name.is_empty() {
            return false;
        }
        let mut j = 0;
        while j < name.len() {
            if name[j] == 0 {
                return false;
            }
            j += 1;
        }
        i += 1;
    }
    true
}

const fn encode<const N: usize>(caps: &[CapabilityDescriptor]) -> [u8; N] {
    let mut table = [0u8; N];
    let mut pos = 0;
    let mut i = 0;
    while i < caps.len() {
        let name = caps[i].name.as_bytes();
        let mut j = 0;
        while j < name.len() {
            table[pos] = name[j];
            pos += 1;
            j += 1;
        }
        pos += 1;
        table[pos] = caps[i].version;
        pos += 1;
        i += 1;
    }
    table
}

const _: () = assert!(is_valid(CAPABILITIES), "capability names must be non-empty without NUL");

const TABLE_LEN: usize = encoded_len(CAPABILITIES);

static TABLE: [u8; TABLE_LEN] = encode::<TABLE_LEN>(CAPABILITIES);

/// The encoded table. Lives for the whole process.
pub fn table() -> &'static [u8] {
    &TABLE
}

/// A capability read back from an encoded table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedCapability {
    pub name: String,
    pub version: u8,
}

/// Walk an encoded table held in a slice
pub fn decode(table: &[u8]) -> Vec<DecodedCapability> {
    let mut caps = Vec::new();
    let mut rest = table;
    while let Some(end) = rest.iter().position(|&b| b == 0) {
        if end == 0 {
            break;
        }
        let Some(&version) = rest.get(end + 1) else {
            break;
        };
        caps.push(DecodedCapability {
            name: String::from_utf8_lossy(&rest[..end]).into_owned(),
            version,
        });
        rest = &rest[end + 2..];
    }
    caps
}

/// Walk an encoded table behind a raw pointer, the way a host does
///
/// # Safety
///
/// `ptr` must point to a well-formed table that stays valid for the call,
/// such as the one returned by `cfmp_query_interfaces`.
pub unsafe fn decode_raw(ptr: *const u8) -> Vec<DecodedCapability> {
    let mut caps = Vec::new();
    if ptr.is_null() {
        return caps;
    }
    let mut cursor = ptr;
    loop {
        let name = unsafe { CStr::from_ptr(cursor.cast()) }.to_bytes();
        if name.is_empty() {
            break;
        }
        let version = unsafe { *cursor.add(name.len() + 1) };
        caps.push(DecodedCapability {
            name: String::from_utf8_lossy(name).into_owned(),
            version,
        });
        cursor = unsafe { cursor.add(name.len() + 2) };
    }
    caps
}
