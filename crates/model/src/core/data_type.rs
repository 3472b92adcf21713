use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::{borrow::Cow, collections::HashMap, fmt};

/// Static type of a filterable member. Drives literal coercion and decides
/// which operators a member accepts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ValueType {
    Int,
    Uint,
    Float,
    Decimal,
    String,
    Boolean,
    Uuid,
    Date,
    Timestamp,
    /// Enumeration with its variant names.
    Enum(Vec<String>),
}

lazy_static! {
    static ref TYPE_NAME_MAP: HashMap<&'static str, ValueType> = build_type_name_map();
}

impl ValueType {
    pub fn name(&self) -> Cow<'_, str> {
        match self {
            ValueType::Int => Cow::Borrowed("int"),
            ValueType::Uint => Cow::Borrowed("uint"),
            ValueType::Float => Cow::Borrowed("float"),
            ValueType::Decimal => Cow::Borrowed("decimal"),
            ValueType::String => Cow::Borrowed("string"),
            ValueType::Boolean => Cow::Borrowed("boolean"),
            ValueType::Uuid => Cow::Borrowed("uuid"),
            ValueType::Date => Cow::Borrowed("date"),
            ValueType::Timestamp => Cow::Borrowed("timestamp"),
            ValueType::Enum(variants) if variants.is_empty() => Cow::Borrowed("enum"),
            ValueType::Enum(variants) => Cow::Owned(format!("enum({})", variants.join(","))),
        }
    }

    /// Parses names such as `int`, `DateTime`, `guid` or `enum(Red,Green)`.
    pub fn from_name(type_name: &str) -> Result<Self, String> {
        let trimmed = type_name.trim();
        let is_enum = trimmed
            .get(..5)
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case("enum("));
        if is_enum && trimmed.ends_with(')') {
            // Variant names keep the caller's casing.
            let inner = trimmed[5..trimmed.len() - 1].trim();
            if inner.is_empty() {
                return Ok(ValueType::Enum(Vec::new()));
            }
            return Ok(ValueType::Enum(
                inner.split(',').map(|v| v.trim().to_string()).collect(),
            ));
        }

        let normalized = Self::normalize_type_name(type_name);
        TYPE_NAME_MAP
            .get(normalized.as_str())
            .cloned()
            .ok_or_else(|| format!("Unknown value type: {type_name}"))
    }

    /// Types with a natural total ordering accept `>`, `<`, `>=`, `<=`.
    pub fn supports_ordering(&self) -> bool {
        matches!(
            self,
            ValueType::Int
                | ValueType::Uint
                | ValueType::Float
                | ValueType::Decimal
                | ValueType::String
                | ValueType::Date
                | ValueType::Timestamp
        )
    }

    /// Types that accept the text-matching operators.
    pub fn is_text(&self) -> bool {
        matches!(self, ValueType::String)
    }

    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            ValueType::Int | ValueType::Uint | ValueType::Float | ValueType::Decimal
        )
    }

    fn normalize_type_name(type_name: &str) -> String {
        type_name.trim().to_lowercase()
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl TryFrom<&str> for ValueType {
    type Error = String;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        ValueType::from_name(s)
    }
}

fn build_type_name_map() -> HashMap<&'static str, ValueType> {
    use ValueType::*;

    let entries = [
        ("int", Int),
        ("integer", Int),
        ("long", Int),
        ("i32", Int),
        ("i64", Int),
        ("uint", Uint),
        ("unsigned", Uint),
        ("u32", Uint),
        ("u64", Uint),
        ("usize", Uint),
        ("float", Float),
        ("double", Float),
        ("f32", Float),
        ("f64", Float),
        ("number", Float),
        ("decimal", Decimal),
        ("numeric", Decimal),
        ("string", String),
        ("str", String),
        ("text", String),
        ("varchar", String),
        ("bool", Boolean),
        ("boolean", Boolean),
        ("uuid", Uuid),
        ("guid", Uuid),
        ("date", Date),
        ("timestamp", Timestamp),
        ("datetime", Timestamp),
        ("enum", Enum(Vec::new())),
    ];

    entries.into_iter().collect()
}
