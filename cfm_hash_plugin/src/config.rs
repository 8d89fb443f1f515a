//! Plugin configuration
//!
//! The host's `Options` object is opaque to the hash capability, so the plugin
//! reads its own settings from `CFMP_`-prefixed environment variables when a
//! session is initialized, layered over built-in defaults.

use crate::diagnostics::{DiagnosticSink, FileSink, LogSink, NullSink, StderrSink};
use crate::error::{Result, ValidationError};
use crate::ffi::handles::MAX_SLOTS;
use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

/// Environment prefix for plugin settings
pub const ENV_PREFIX: &str = "CFMP_";

/// Default bound on simultaneously live hash handles
pub const DEFAULT_MAX_HANDLES: usize = 65_535;

/// Where boundary diagnostics go
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticTarget {
    #[default]
    Stderr,
    #[serde(rename = "none")]
    Disabled,
    Log,
    File,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginConfig {
    pub diagnostics: DiagnosticTarget,
    pub diagnostics_file: Option<PathBuf>,
    pub max_handles: usize,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            diagnostics: DiagnosticTarget::Stderr,
            diagnostics_file: None,
            max_handles: DEFAULT_MAX_HANDLES,
        }
    }
}

impl PluginConfig {
    /// Defaults merged with the process environment
    pub fn figment() -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    /// Load from the process environment
    pub fn load() -> Result<Self> {
        Self::from_figment(Self::figment())
    }

    /// Extract and validate from an arbitrary figment
    pub fn from_figment(figment: Figment) -> Result<Self> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.diagnostics == DiagnosticTarget::File && self.diagnostics_file.is_none() {
            return Err(ValidationError::invalid_options(
                "diagnostics = \"file\" requires diagnostics_file",
            )
            .into());
        }
        if self.max_handles == 0 {
            return Err(ValidationError::invalid_options("max_handles must be at least 1").into());
        }
        Ok(())
    }

    /// Handle limit after clamping to what the handle encoding can address
    pub fn effective_max_handles(&self) -> usize {
        self.max_handles.min(MAX_SLOTS)
    }

    /// Build the sink selected by `diagnostics`
    pub fn build_sink(&self) -> Result<Arc<dyn DiagnosticSink>> {
        let sink: Arc<dyn DiagnosticSink> = match self.diagnostics {
            DiagnosticTarget::Stderr => Arc::new(StderrSink),
            DiagnosticTarget::Disabled => Arc::new(NullSink),
            DiagnosticTarget::Log => Arc::new(LogSink),
            DiagnosticTarget::File => {
                let path = self.diagnostics_file.as_deref().ok_or_else(|| {
                    ValidationError::invalid_options("diagnostics_file is not set")
                })?;
                let sink = FileSink::open(path).map_err(|e| {
                    ValidationError::invalid_options(&format!(
                        "cannot open diagnostics file {}: {e}",
                        path.display()
                    ))
                })?;
                Arc::new(sink)
            }
        };
        Ok(sink)
    }
}
