//! Error types for the tagmatter library
//!
//! Every failure a single document can hit while being tagged (reading it,
//! extracting its solution, asking the suggestion service, writing it back,
//! persisting the stores) is a variant here, so the batch driver can turn
//! any of them into a per-document outcome.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for all library operations
#[derive(Error, Debug)]
pub enum TagMatterError {
    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing or serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP transport errors talking to the suggestion service
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// File not found or invalid path
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    /// The document has no fenced solution code to send for suggestions
    #[error("No solution code found in {path}")]
    NoSolutionText { path: PathBuf },

    /// The suggestion service failed or answered with something unusable
    #[error("Tag suggestion failed: {reason}")]
    Suggestion { reason: String },

    /// Vocabulary or processed-set store could not be read or written
    #[error("Store error in {path}: {reason}")]
    Store { path: PathBuf, reason: String },

    /// Invalid or unreadable configuration
    #[error("Configuration error: {reason}")]
    Config { reason: String },

    /// Interactive prompt failed or was aborted
    #[error("Prompt error: {reason}")]
    Prompt { reason: String },
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, TagMatterError>;

impl TagMatterError {
    /// Create a new file not found error
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create a new missing solution error
    pub fn no_solution_text(path: impl Into<PathBuf>) -> Self {
        Self::NoSolutionText { path: path.into() }
    }

    /// Create a new suggestion service error
    pub fn suggestion(reason: impl Into<String>) -> Self {
        Self::Suggestion {
            reason: reason.into(),
        }
    }

    /// Create a new store error
    pub fn store(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Store {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a new configuration error
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }

    /// Create a new prompt error
    pub fn prompt(reason: impl Into<String>) -> Self {
        Self::Prompt {
            reason: reason.into(),
        }
    }

    /// Whether the batch can move on to the next document after this error.
    ///
    /// Configuration and prompt failures affect every document, everything
    /// else is scoped to the document that raised it.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Config { .. } | Self::Prompt { .. } => false,
            Self::Io(_)
            | Self::Json(_)
            | Self::Http(_)
            | Self::FileNotFound { .. }
            | Self::NoSolutionText { .. }
            | Self::Suggestion { .. }
            | Self::Store { .. } => true,
        }
    }

    /// Get the severity level of this error
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Config { .. } | Self::Prompt { .. } => ErrorSeverity::Critical,
            Self::Io(_) | Self::FileNotFound { .. } | Self::Store { .. } => ErrorSeverity::High,
            Self::Http(_) | Self::Suggestion { .. } | Self::Json(_) => ErrorSeverity::Medium,
            Self::NoSolutionText { .. } => ErrorSeverity::Low,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "LOW"),
            Self::Medium => write!(f, "MEDIUM"),
            Self::High => write!(f, "HIGH"),
            Self::Critical => write!(f, "CRITICAL"),
        }
    }
}
