//! Library side of the `cfmhash` command line tool
//!
//! `cfmhash` is a small host for the Confium hash plugin. It drives the
//! plugin through its C ABI only, which makes it useful both as a digest
//! tool and as a smoke test of the exported interface.

pub mod config;
pub mod error;
pub mod host;
pub mod output;
pub mod paths;
pub mod terminal;
