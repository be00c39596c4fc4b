//! Centralized error handling for Jotter
//! Defines common error types, severity levels, and error codes

use std::fmt;

/// Severity level of an error
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// Informational message (not really an error)
    Info,
    /// Warning - something might be wrong but operation can continue
    Warning,
    /// Standard error - operation failed but the editor can continue
    Error,
    /// Critical error - may lead to data loss
    Critical,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "INFO"),
            Self::Warning => write!(f, "WARN"),
            Self::Error => write!(f, "ERROR"),
            Self::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Category of the error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorType {
    /// File system or I/O errors
    Io,
    /// Character encoding errors (unsupported/unsaveable encodings)
    Encoding,
    /// Offset/position mapping errors
    Position,
    /// Document lifecycle errors (busy, unsaved, read-only)
    Document,
    /// Internal logic or invariant violations
    Internal,
    /// Errors that don't fit other categories
    Other,
}

impl fmt::Display for ErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io => write!(f, "IO"),
            Self::Encoding => write!(f, "Encoding"),
            Self::Position => write!(f, "Position"),
            Self::Document => write!(f, "Document"),
            Self::Internal => write!(f, "Internal"),
            Self::Other => write!(f, "Other"),
        }
    }
}

/// A structured error in Jotter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JotterError {
    /// How serious the error is
    pub severity: ErrorSeverity,
    /// What kind of error occurred
    pub kind: ErrorType,
    /// Machine-readable error code (e.g., "IO_ERROR", "ENCODING_NOT_SAVEABLE")
    pub code: String,
    /// Human-readable description
    pub message: String,
}

impl JotterError {
    /// Create a new standard error (Severity: Error)
    pub fn new(kind: ErrorType, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: ErrorSeverity::Error,
            kind,
            code: code.into(),
            message: message.into(),
        }
    }

    /// Create a new critical error (Severity: Critical)
    pub fn critical(kind: ErrorType, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: ErrorSeverity::Critical,
            kind,
            code: code.into(),
            message: message.into(),
        }
    }

    /// Create a new warning (Severity: Warning)
    /// Used for expected, recoverable conditions the caller must resolve.
    pub fn warning(kind: ErrorType, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: ErrorSeverity::Warning,
            kind,
            code: code.into(),
            message: message.into(),
        }
    }

    /// Check if the error carries the given code (useful for callers and tests)
    pub fn is_code(&self, code: &str) -> bool {
        self.code == code
    }

    /// Check if the message contains a substring (useful for tests)
    pub fn contains_msg(&self, sub: &str) -> bool {
        self.message.contains(sub)
    }
}

impl fmt::Display for JotterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}({}): {}",
            self.severity, self.kind, self.code, self.message
        )
    }
}

impl std::error::Error for JotterError {}

impl From<String> for JotterError {
    fn from(msg: String) -> Self {
        Self::new(ErrorType::Other, "GENERIC_ERROR", msg)
    }
}

impl From<&str> for JotterError {
    fn from(msg: &str) -> Self {
        Self::new(ErrorType::Other, "GENERIC_ERROR", msg)
    }
}

impl From<std::io::Error> for JotterError {
    fn from(err: std::io::Error) -> Self {
        Self::new(ErrorType::Io, crate::constants::errors::IO_ERROR, err.to_string())
    }
}

/// Result alias for Jotter operations
pub type Result<T> = std::result::Result<T, JotterError>;

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
