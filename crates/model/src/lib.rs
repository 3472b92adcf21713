pub mod core;
pub mod schema;

pub use core::{data_type::ValueType, value::Value};
pub use schema::{Filterable, Member, MemberField, accessor::FieldAccessor, flatten};
