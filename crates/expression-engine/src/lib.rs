//! Maps filter field names onto model members and compiles parsed filters
//! into predicates.

pub mod compile;
pub mod error;
pub mod eval;
pub mod mapper;
pub mod types;

pub use compile::build;
pub use error::{BuildError, ConfigurationError, MappingError, Result};
pub use eval::{CompiledPredicate, Predicate};
pub use mapper::{FieldMapping, Mapper, ValueParser, config::MapperConfig};
pub use types::{CoercionResult, coerce};
