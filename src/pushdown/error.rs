use thiserror::Error;

use super::coerce::CoerceError;
use crate::schema::DataType;

/// Errors raised while converting a [`TupleDomain`](crate::TupleDomain).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConvertError {
    /// The column's type has no storage literal.
    #[error("Unsupported type for column '{column}': {source}")]
    UnsupportedType {
        /// Column name.
        column: String,
        /// Coercion failure.
        source: CoerceError,
    },
    /// A literal could not be coerced.
    #[error("Invalid literal for column '{column}': {source}")]
    InvalidLiteral {
        /// Column name.
        column: String,
        /// Coercion failure.
        source: CoerceError,
    },
    /// The domain is malformed, such as an empty range list.
    #[error("Unsupported domain shape for column '{column}': {reason}")]
    UnsupportedDomainShape {
        /// Column name.
        column: String,
        /// What is wrong with the domain.
        reason: String,
    },
    /// No schema field has this name.
    #[error("Unknown column: {0}")]
    UnknownColumn(String),
    /// The handle's type differs from the schema field's.
    #[error("Type mismatch for column '{column}': expected {expected}, got {actual}")]
    TypeMismatch {
        /// Column name.
        column: String,
        /// Schema field type.
        expected: DataType,
        /// Handle type.
        actual: DataType,
    },
    /// A predicate leaf does not point at its schema field.
    #[error("Predicate column '{column}' does not match schema field {index}")]
    InvalidFieldIndex {
        /// Name carried by the leaf.
        column: String,
        /// Position carried by the leaf.
        index: usize,
    },
    /// A field position past the end of the schema.
    #[error("Field index {index} is out of range for a schema of {field_count} fields")]
    FieldIndexOutOfRange {
        /// Requested position.
        index: usize,
        /// Fields in the schema.
        field_count: usize,
    },
    /// Several handles constrain the same column name.
    #[error("Column '{0}' is constrained by more than one handle")]
    DuplicateColumn(String),
}

impl ConvertError {
    pub(crate) fn coerce(column: &str, source: CoerceError) -> Self {
        match source {
            CoerceError::UnsupportedType(_) => ConvertError::UnsupportedType {
                column: column.to_string(),
                source,
            },
            _ => ConvertError::InvalidLiteral {
                column: column.to_string(),
                source,
            },
        }
    }

    pub(crate) fn shape(column: &str, reason: impl Into<String>) -> Self {
        ConvertError::UnsupportedDomainShape {
            column: column.to_string(),
            reason: reason.into(),
        }
    }

    /// Errors that only cost filtering precision when the column is dropped.
    pub fn is_skippable(&self) -> bool {
        matches!(
            self,
            ConvertError::UnsupportedType { .. } | ConvertError::UnknownColumn(_)
        )
    }
}
