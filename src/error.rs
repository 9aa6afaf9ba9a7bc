use std::path::PathBuf;

use thiserror::Error;

/// Application-level error: a message plus the process exit code it maps to.
#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

/// Failures raised by the numeric core (loader, estimator, smoother, analyzer).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PdfError {
    /// File unreadable or malformed.
    #[error("failed to load PDF '{path}': {reason}", path = .path.display())]
    Load { path: PathBuf, reason: String },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Weighted mean/variance undefined for the given table.
    #[error("domain error: {0}")]
    Domain(String),
}

impl PdfError {
    pub fn load(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        PdfError::Load {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        match self {
            PdfError::Load { .. } => 2,
            PdfError::InvalidArgument(_) => 3,
            PdfError::Domain(_) => 4,
        }
    }
}

impl From<PdfError> for AppError {
    fn from(err: PdfError) -> Self {
        AppError::new(err.exit_code(), err.to_string())
    }
}
