use crate::host::HostError;
use cfm_hash_plugin::CfmStatus;
use colored::*;
use std::error::Error as StdError;
use std::fmt;
use std::io;

/// CLI-specific error type with semantic exit codes
#[derive(Debug)]
pub struct CliError {
    /// The main error message
    message: String,

    /// Error category for exit code determination
    category: ErrorCategory,

    /// Additional context information
    context: Vec<(String, String)>,

    /// Suggestions for recovery
    pub suggestions: Vec<String>,

    /// Source error if any
    source: Option<Box<dyn StdError + Send + Sync>>,
}

/// Error categories that map to exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ErrorCategory {
    General,
    Misuse,
    Plugin,
    Filesystem,
}

/// Semantic exit codes for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    Success = 0,
    GeneralError = 1,
    Misuse = 2,
    PluginError = 3,
    FilesystemError = 4,
}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Extension trait for adding context to errors
pub trait ErrorContext {
    fn with_context(self, key: &str, value: &str) -> Self;
    fn with_suggestion(self, suggestion: &str) -> Self;
}

impl CliError {
    fn new(message: &str, category: ErrorCategory) -> Self {
        Self {
            message: message.to_string(),
            category,
            context: Vec::new(),
            suggestions: Vec::new(),
            source: None,
        }
    }

    /// Create a general error
    pub fn general(message: &str) -> Self {
        Self::new(message, ErrorCategory::General)
    }

    /// Create a command misuse error
    pub fn misuse(message: &str) -> Self {
        let mut error = Self::new(message, ErrorCategory::Misuse);
        error
            .suggestions
            .push("Run 'cfmhash --help' for usage information".to_string());
        error
    }

    /// Create an error from a failed plugin call
    pub fn plugin(error: HostError) -> Self {
        let mut cli_error = Self::new(&error.to_string(), ErrorCategory::Plugin);
        match error.status {
            CfmStatus::ErrorUnsupportedAlgorithm => {
                cli_error.category = ErrorCategory::Misuse;
                cli_error
                    .suggestions
                    .push("Run 'cfmhash list' to see supported algorithm names".to_string());
                cli_error
                    .suggestions
                    .push("Algorithm names are case-sensitive, e.g. 'SHA-256'".to_string());
            }
            CfmStatus::ErrorInvalidOptions => {
                cli_error
                    .suggestions
                    .push("Check the CFMP_* environment variables".to_string());
            }
            _ => {}
        }
        cli_error.source = Some(Box::new(error));
        cli_error
    }

    /// Create an error from an IO error
    pub fn from_io_error(error: io::Error, path: &str) -> Self {
        let message = format!("IO error on '{path}': {error}");
        let mut cli_error = match error.kind() {
            io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied => {
                Self::new(&message, ErrorCategory::Filesystem)
            }
            _ => Self::general(&message),
        };

        match error.kind() {
            io::ErrorKind::NotFound => cli_error
                .suggestions
                .push("Check if the file exists".to_string()),
            io::ErrorKind::PermissionDenied => cli_error
                .suggestions
                .push("Check file permissions".to_string()),
            _ => {}
        }

        cli_error.source = Some(Box::new(error));
        cli_error
            .context
            .push(("path".to_string(), path.to_string()));
        cli_error
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self.category {
            ErrorCategory::General => ExitCode::GeneralError,
            ErrorCategory::Misuse => ExitCode::Misuse,
            ErrorCategory::Plugin => ExitCode::PluginError,
            ErrorCategory::Filesystem => ExitCode::FilesystemError,
        }
    }

    fn label(&self) -> &'static str {
        match self.category {
            ErrorCategory::General => "Error",
            ErrorCategory::Misuse => "Usage Error",
            ErrorCategory::Plugin => "Plugin Error",
            ErrorCategory::Filesystem => "File Error",
        }
    }

    /// Format the error for user display
    pub fn format_for_user(&self, debug: bool) -> String {
        let mut output = String::new();

        let prefix = match self.category {
            ErrorCategory::Misuse => self.label().yellow(),
            _ => self.label().red(),
        };
        output.push_str(&format!("{}: {}\n", prefix, self.message));

        if !self.context.is_empty() {
            output.push_str("\nContext:\n");
            for (key, value) in &self.context {
                output.push_str(&format!("  {}: {}\n", key.bold(), value));
            }
        }

        // Error chain in debug mode
        if debug && let Some(source) = &self.source {
            output.push_str("\nCaused by:\n");
            let mut current: Option<&dyn StdError> = Some(source.as_ref());
            let mut level = 1;

            while let Some(err) = current {
                output.push_str(&format!("  {level}: {err}\n"));
                current = err.source();
                level += 1;
            }
        }

        if !self.suggestions.is_empty() {
            output.push_str("\nSuggestions:\n");
            for suggestion in &self.suggestions {
                output.push_str(&format!("  - {suggestion}\n"));
            }
        }

        output
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.label(), self.message)?;

        for (key, value) in &self.context {
            write!(f, " ({key}: {value})")?;
        }

        Ok(())
    }
}

impl StdError for CliError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

impl ErrorContext for CliError {
    fn with_context(mut self, key: &str, value: &str) -> Self {
        self.context.push((key.to_string(), value.to_string()));
        self
    }

    fn with_suggestion(mut self, suggestion: &str) -> Self {
        self.suggestions.push(suggestion.to_string());
        self
    }
}

impl From<HostError> for CliError {
    fn from(error: HostError) -> Self {
        Self::plugin(error)
    }
}

/// Convert anyhow errors to CLI errors, keeping a wrapped `CliError` or
/// `HostError` intact
impl From<anyhow::Error> for CliError {
    fn from(error: anyhow::Error) -> Self {
        match error.downcast::<CliError>() {
            Ok(cli_error) => cli_error,
            Err(error) => match error.downcast::<HostError>() {
                Ok(host_error) => Self::plugin(host_error),
                Err(error) => Self::general(&format!("{error:#}")),
            },
        }
    }
}
