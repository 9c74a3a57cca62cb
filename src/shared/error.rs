use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow schedulers and CI jobs to distinguish between
/// configuration mistakes and failures while talking to the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - diagram generated, published, or already up to date
    Success = 0,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (auth, malformed data, network, file I/O, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Application-specific errors for diagram generation.
///
/// Uses thiserror to derive Display and Error traits automatically,
/// reducing boilerplate while maintaining user-friendly error messages.
#[derive(Debug, Error)]
pub enum VsmDiagramError {
    #[error("Authentication failed: {details}\n\n💡 Hint: Check the hostname and that the API token is valid and not expired")]
    Auth { details: String },

    #[error("Malformed VSM response: entity '{entity_id}' is missing expected key '{expected_key}'\n\n💡 Hint: The GraphQL response does not match the product model query; check the API version")]
    MalformedGraph {
        entity_id: String,
        expected_key: String,
    },

    #[error("Failed to fetch VSM data\nDetails: {details}\n\n💡 Hint: Check the hostname, network connectivity and that the product name is spelled exactly as in VSM")]
    Fetch { details: String },

    #[error("Failed to {operation}\nDetails: {details}")]
    Publish { operation: String, details: String },

    #[error("No layout position computed for node '{node_id}'")]
    MissingPosition { node_id: String },

    #[error("Failed to parse existing diagram\nDetails: {details}")]
    DiagramParse { details: String },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileRead { path: PathBuf, details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWrite { path: PathBuf, details: String },

    /// Validation error for configuration values
    #[error("Validation error: {message}")]
    Validation { message: String },
}

impl VsmDiagramError {
    pub fn malformed(entity_id: impl Into<String>, expected_key: impl Into<String>) -> Self {
        VsmDiagramError::MalformedGraph {
            entity_id: entity_id.into(),
            expected_key: expected_key.into(),
        }
    }
}
