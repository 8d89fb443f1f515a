//! Diagnostic sinks for boundary errors
//!
//! Every error converted to a status code at the ABI boundary is also written
//! as one line to a sink. Hosts act on status codes alone; the sink exists for
//! debugging. The process-wide default is stderr and can be swapped at
//! initialization (see [`crate::config`]) or per call with
//! [`guard_with`](crate::ffi::helpers::guard_with).

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

/// Destination for diagnostic lines
pub trait DiagnosticSink: Send + Sync {
    /// Write one line. Must not fail observably.
    fn write_line(&self, line: &str);
}

/// Writes to the process's standard error stream
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrSink;

impl DiagnosticSink for StderrSink {
    fn write_line(&self, line: &str) {
        let _ = writeln!(io::stderr().lock(), "{line}");
    }
}

/// Discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn write_line(&self, _line: &str) {}
}

/// Forwards to the `log` facade at error level
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn write_line(&self, line: &str) {
        log::error!(target: "cfm_hash_plugin::diagnostics", "{line}");
    }
}

/// Appends to a file
#[derive(Debug)]
pub struct FileSink {
    file: Mutex<File>,
}

impl FileSink {
    /// Open `path` for appending, creating it if needed
    pub fn open(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl DiagnosticSink for FileSink {
    fn write_line(&self, line: &str) {
        let mut file = self.file.lock().unwrap_or_else(PoisonError::into_inner);
        let _ = writeln!(file, "{line}");
    }
}

/// Keeps lines in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines written so far
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn clear(&self) {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl DiagnosticSink for MemorySink {
    fn write_line(&self, line: &str) {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(line.to_string());
    }
}

lazy_static::lazy_static! {
    static ref DEFAULT_SINK: RwLock<Arc<dyn DiagnosticSink>> = RwLock::new(Arc::new(StderrSink));
}

/// The sink boundary errors are written to unless a call overrides it
pub fn default_sink() -> Arc<dyn DiagnosticSink> {
    DEFAULT_SINK
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Replace the default sink, returning the previous one
pub fn set_default_sink(sink: Arc<dyn DiagnosticSink>) -> Arc<dyn DiagnosticSink> {
    let mut current = DEFAULT_SINK.write().unwrap_or_else(PoisonError::into_inner);
    std::mem::replace(&mut *current, sink)
}

/// Format a diagnostic line: `[<function>()] Error 0x<code>: <message>`
pub fn format_diagnostic(function: &str, code: u32, message: &str) -> String {
    format!("[{function}()] Error 0x{code:08X}: {message}")
}
