//! Error types for the mapmerge mapping-resolution library.
//!
//! This module provides structured error handling using thiserror. A load
//! attempt either produces a complete result or a single terminal error;
//! partial output is never returned.

use thiserror::Error;

/// Main error type for mapmerge operations.
#[derive(Debug, Error)]
pub enum MappingError {
    /// The mapping artifact declares a format/version we do not handle
    /// (e.g. a tiny v1 header).
    #[error("Unsupported mapping format: {0}")]
    UnsupportedFormat(String),

    /// A field/method binary descriptor does not match the descriptor
    /// grammar. Fatal: a bad descriptor corrupts the join key for its
    /// entry and would otherwise mis-join silently.
    #[error("Malformed descriptor: {0}")]
    MalformedDescriptor(String),

    /// A structurally truncated row in the tree format. Fatal: a short
    /// row would corrupt the depth-stack scope for every row after it.
    #[error("Malformed line {line}: {message}")]
    MalformedLine { line: usize, message: String },
}

/// Result type alias for mapmerge operations
pub type Result<T> = std::result::Result<T, MappingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MappingError::UnsupportedFormat("tiny v1".to_string());
        assert_eq!(err.to_string(), "Unsupported mapping format: tiny v1");

        let err = MappingError::MalformedLine {
            line: 12,
            message: "class row with 1 field".to_string(),
        };
        assert_eq!(err.to_string(), "Malformed line 12: class row with 1 field");
    }

    #[test]
    fn test_descriptor_error_display() {
        let err = MappingError::MalformedDescriptor("[I".to_string());
        assert_eq!(err.to_string(), "Malformed descriptor: [I");
    }
}
