//! Confium hash plugin
//!
//! A host-loadable library exposing streaming hash primitives over the
//! Confium plugin C ABI. The host resolves the `cfmp_*` symbols in [`ffi`];
//! the same operations are available to Rust callers through [`HashState`].

pub mod capabilities;
pub mod config;
pub mod diagnostics;
pub mod engine;
pub mod error;
pub mod ffi;
pub mod hashing;
pub mod session;

pub use capabilities::{CAPABILITIES, CapabilityDescriptor, DecodedCapability};
pub use config::{DiagnosticTarget, PluginConfig};
pub use diagnostics::{DiagnosticSink, FileSink, LogSink, MemorySink, NullSink, StderrSink};
pub use engine::HashState;
pub use error::{Error, Result};
pub use ffi::types::{CfmStatus, Confium, Hash, Options};
pub use hashing::{AlgorithmInfo, supported_algorithms};
pub use session::INTERFACE_VERSION;
