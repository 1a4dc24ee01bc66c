//! Unified error type for the uniqip library.
//!
//! Library code uses `UniqipError` while CLI code continues using
//! `anyhow::Result` for convenience.
//!
//! # Error Categories
//!
//! - **Io**: File system operations (open, stat, seek, read)
//! - **Parse**: A line that is not a well-formed IPv4 dotted-quad
//! - **Validation**: Invalid parameters (zero worker count, empty path)
//! - **Allocation**: The membership bitmap allocation could not be satisfied

use std::fmt;
use std::path::PathBuf;

/// Unified error type for the uniqip library.
#[derive(Debug)]
pub enum UniqipError {
    /// I/O error with path context.
    Io {
        path: PathBuf,
        operation: &'static str,
        source: std::io::Error,
    },

    /// A line failed IPv4 parsing. Recoverable: the scan logs and skips it.
    Parse { text: String },

    /// Validation error (invalid parameters, data invariants).
    Validation(String),

    /// The membership bitmap allocation failed. Fatal: the whole algorithm's
    /// memory budget depends on this single allocation succeeding.
    Allocation { requested_bytes: usize },
}

impl fmt::Display for UniqipError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UniqipError::Io {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "I/O error during {} on '{}': {}",
                    operation,
                    path.display(),
                    source
                )
            }
            UniqipError::Parse { text } => {
                write!(f, "invalid IPv4 address: '{}'", text)
            }
            UniqipError::Validation(msg) => write!(f, "Validation error: {}", msg),
            UniqipError::Allocation { requested_bytes } => {
                write!(
                    f,
                    "failed to allocate {} bytes for the membership bitmap",
                    requested_bytes
                )
            }
        }
    }
}

impl std::error::Error for UniqipError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            UniqipError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<std::io::Error> for UniqipError {
    fn from(err: std::io::Error) -> Self {
        UniqipError::Io {
            path: PathBuf::new(),
            operation: "unknown",
            source: err,
        }
    }
}

/// Convenience type alias for Results using UniqipError.
pub type Result<T> = std::result::Result<T, UniqipError>;

impl UniqipError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, operation: &'static str, source: std::io::Error) -> Self {
        UniqipError::Io {
            path: path.into(),
            operation,
            source,
        }
    }

    /// Create a parse error naming the offending text.
    pub fn parse(text: impl Into<String>) -> Self {
        UniqipError::Parse { text: text.into() }
    }

    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        UniqipError::Validation(msg.into())
    }

    /// Create an allocation error.
    pub fn allocation(requested_bytes: usize) -> Self {
        UniqipError::Allocation { requested_bytes }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_names_offending_text() {
        let err = UniqipError::parse("999.1.1.1");
        assert_eq!(err.to_string(), "invalid IPv4 address: '999.1.1.1'");
    }

    #[test]
    fn test_io_error_includes_path_and_operation() {
        let err = UniqipError::io(
            "/tmp/ips.txt",
            "open",
            std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        );
        let msg = err.to_string();
        assert!(msg.contains("open"));
        assert!(msg.contains("/tmp/ips.txt"));
    }

    #[test]
    fn test_allocation_error_reports_size() {
        let err = UniqipError::allocation(512 * 1024 * 1024);
        assert!(err.to_string().contains("536870912"));
    }
}
