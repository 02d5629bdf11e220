// Copyright 2026 Rowflow Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Error types for Rowflow
//!
//! This module defines all error types used throughout the operator pipeline.

use thiserror::Error;

/// Result type alias for Rowflow operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for Rowflow operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    // =========================================================================
    // Schema / index errors
    // =========================================================================
    /// Column index out of bounds for the tuple it was applied to
    #[error("column index {index} out of bounds (width {width})")]
    ColumnIndexOutOfBounds { index: usize, width: usize },

    /// A string constant or register payload exceeds the fixed width
    #[error("string value is too long, max {max} bytes, got {got}")]
    ValueTooLong { max: usize, got: usize },

    /// Inputs of a binary operator disagree on tuple width
    #[error("inputs must have the same number of columns: left has {left}, right has {right}")]
    ColumnCountMismatch { left: usize, right: usize },

    // =========================================================================
    // Comparison errors
    // =========================================================================
    /// Ordering comparison applied across register variants
    #[error("cannot order incomparable register types")]
    IncomparableTypes,

    /// Type error
    #[error("type error: {0}")]
    Type(String),

    // =========================================================================
    // Other errors
    // =========================================================================
    /// IO error (wrapped)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Internal error for unexpected conditions
    #[error("{message}")]
    Internal { message: String },
}

impl Error {
    /// Create a new ColumnIndexOutOfBounds error
    pub fn column_index_out_of_bounds(index: usize, width: usize) -> Self {
        Error::ColumnIndexOutOfBounds { index, width }
    }

    /// Create a new ValueTooLong error
    pub fn value_too_long(max: usize, got: usize) -> Self {
        Error::ValueTooLong { max, got }
    }

    /// Create a new ColumnCountMismatch error
    pub fn column_count_mismatch(left: usize, right: usize) -> Self {
        Error::ColumnCountMismatch { left, right }
    }

    /// Create a new Type error
    pub fn type_error(message: impl Into<String>) -> Self {
        Error::Type(message.into())
    }

    /// Create a new IO error
    pub fn io(message: impl Into<String>) -> Self {
        Error::Io {
            message: message.into(),
        }
    }

    /// Create a new Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Error::Internal {
            message: message.into(),
        }
    }

    /// Check if this is a schema-shaped error (bad index or width)
    pub fn is_schema_violation(&self) -> bool {
        matches!(
            self,
            Error::ColumnIndexOutOfBounds { .. }
                | Error::ValueTooLong { .. }
                | Error::ColumnCountMismatch { .. }
        )
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            Error::column_index_out_of_bounds(5, 2).to_string(),
            "column index 5 out of bounds (width 2)"
        );
        assert_eq!(
            Error::value_too_long(16, 20).to_string(),
            "string value is too long, max 16 bytes, got 20"
        );
        assert_eq!(
            Error::column_count_mismatch(2, 3).to_string(),
            "inputs must have the same number of columns: left has 2, right has 3"
        );
        assert_eq!(
            Error::IncomparableTypes.to_string(),
            "cannot order incomparable register types"
        );
        assert_eq!(
            Error::type_error("SUM requires an integer column").to_string(),
            "type error: SUM requires an integer column"
        );
    }

    #[test]
    fn test_error_classification() {
        assert!(Error::column_index_out_of_bounds(1, 1).is_schema_violation());
        assert!(Error::value_too_long(16, 17).is_schema_violation());
        assert!(!Error::IncomparableTypes.is_schema_violation());
    }

    #[test]
    fn test_error_equality() {
        assert_eq!(
            Error::column_index_out_of_bounds(3, 2),
            Error::column_index_out_of_bounds(3, 2)
        );
        assert_ne!(
            Error::column_index_out_of_bounds(3, 2),
            Error::column_index_out_of_bounds(4, 2)
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "sink closed");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io { .. }));
        assert!(err.to_string().contains("sink closed"));
    }
}
