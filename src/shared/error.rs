use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow CI systems to distinguish between a merge that
/// succeeded, a merge whose output failed schema validation, and
/// configuration or I/O failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - merged document produced (and validated, if requested)
    Success = 0,
    /// The merged document failed schema validation
    SchemaValidationFailed = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (file I/O, parse error, etc.)
    ApplicationError = 3,
    /// Merge parameters are contradictory (e.g. hierarchical without name/version)
    ParameterValidationError = 4,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Maps an error returned by the merge pipeline to an exit code.
    ///
    /// Errors that are not a [`MergeError`] originate in collaborators
    /// and are reported as application errors.
    pub fn from_error(err: &anyhow::Error) -> Self {
        match err.downcast_ref::<MergeError>().map(MergeError::kind) {
            Some(MergeErrorKind::ParameterValidation) => ExitCode::ParameterValidationError,
            Some(MergeErrorKind::SchemaValidationFailed) => ExitCode::SchemaValidationFailed,
            _ => ExitCode::ApplicationError,
        }
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::SchemaValidationFailed => write!(f, "Schema Validation Failed (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
            ExitCode::ParameterValidationError => write!(f, "Parameter Validation Error (4)"),
        }
    }
}

/// Coarse classification of [`MergeError`] for programmatic branching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeErrorKind {
    ParameterValidation,
    SchemaValidationFailed,
    InputLoad,
    Io,
    Serialization,
}

/// Application-specific errors for BOM merging.
///
/// Uses thiserror to derive Display and Error traits automatically,
/// reducing boilerplate while maintaining user-friendly error messages.
#[derive(Debug, Error)]
pub enum MergeError {
    #[error("Invalid merge parameters: {message}\n\n💡 Hint: Run with --help to see the available options")]
    ParameterValidation { message: String },

    #[error("Merged BOM failed schema validation ({} issue(s)); {}", .messages.len(), emission_note(.output_emitted))]
    SchemaValidationFailed {
        messages: Vec<String>,
        output_emitted: bool,
    },

    #[error("Failed to load input BOM: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file is a valid CycloneDX JSON document")]
    InputLoad { path: PathBuf, details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },

    #[error("Security violation: {path}\nReason: {reason}\n\n💡 Hint: {hint}")]
    SecurityError {
        path: PathBuf,
        reason: String,
        hint: String,
    },

    #[error("Failed to serialize merged BOM: {details}")]
    Serialization { details: String },
}

fn emission_note(output_emitted: &bool) -> &'static str {
    if *output_emitted {
        "output was written for troubleshooting"
    } else {
        "no output was written"
    }
}

impl MergeError {
    /// Shorthand for a [`MergeError::ParameterValidation`]
    pub fn parameter(message: impl Into<String>) -> Self {
        MergeError::ParameterValidation {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> MergeErrorKind {
        match self {
            MergeError::ParameterValidation { .. } => MergeErrorKind::ParameterValidation,
            MergeError::SchemaValidationFailed { .. } => MergeErrorKind::SchemaValidationFailed,
            MergeError::InputLoad { .. } => MergeErrorKind::InputLoad,
            MergeError::FileWriteError { .. }
            | MergeError::FileReadError { .. }
            | MergeError::SecurityError { .. } => MergeErrorKind::Io,
            MergeError::Serialization { .. } => MergeErrorKind::Serialization,
        }
    }
}
