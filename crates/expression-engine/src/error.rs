use filter_syntax::ComparisonOperator;
use thiserror::Error;

/// A filter referenced a field the mapper cannot resolve.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MappingError {
    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Field '{0}' is excluded from filtering")]
    ExcludedField(String),
}

/// Rejected mapper configuration. Raised while registering, before any
/// filter is compiled.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error("Field '{0}' is already mapped to a different accessor, value type or parser")]
    ConflictingMapping(String),

    #[error("Field '{0}' is excluded and cannot be mapped")]
    ExcludedField(String),
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum BuildError {
    #[error(transparent)]
    Mapping(#[from] MappingError),

    #[error("Cannot convert '{literal}' to {expected} for field '{field}': {reason}")]
    ValueCoercion {
        field: String,
        expected: String,
        literal: String,
        reason: String,
    },

    #[error("Operator '{operator}' is not supported for field '{field}' of type {value_type}")]
    UnsupportedOperator {
        field: String,
        operator: ComparisonOperator,
        value_type: String,
    },
}

pub type Result<T> = std::result::Result<T, BuildError>;
