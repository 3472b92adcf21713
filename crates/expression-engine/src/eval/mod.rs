pub mod comparison;
pub mod predicate;

pub use predicate::{CompiledPredicate, Predicate};
