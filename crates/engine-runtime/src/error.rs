use expression_engine::{BuildError, MappingError};
use filter_syntax::SyntaxError;
use thiserror::Error;

/// Top-level error for compiling or applying a filter string.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FilterError {
    /// The filter string is malformed.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    /// The filter is well formed but does not fit the mapper.
    #[error(transparent)]
    Build(#[from] BuildError),
}

/// Coarse classification of a [`FilterError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterErrorKind {
    Syntax,
    Mapping,
    ValueCoercion,
    UnsupportedOperator,
}

impl FilterError {
    pub fn kind(&self) -> FilterErrorKind {
        match self {
            FilterError::Syntax(_) => FilterErrorKind::Syntax,
            FilterError::Build(BuildError::Mapping(_)) => FilterErrorKind::Mapping,
            FilterError::Build(BuildError::ValueCoercion { .. }) => FilterErrorKind::ValueCoercion,
            FilterError::Build(BuildError::UnsupportedOperator { .. }) => {
                FilterErrorKind::UnsupportedOperator
            }
        }
    }
}

impl From<MappingError> for FilterError {
    fn from(err: MappingError) -> Self {
        FilterError::Build(BuildError::Mapping(err))
    }
}
