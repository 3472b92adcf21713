//! Entry points that turn a filter string into a predicate and attach it to
//! a data source.

pub mod apply;
pub mod cache;
pub mod error;

pub use apply::{FilterIteratorExt, FilterSource, Filtered, apply, compile, is_valid};
pub use cache::PredicateCache;
pub use error::{FilterError, FilterErrorKind};
