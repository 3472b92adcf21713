use crate::error::CliError;
use expression_engine::{Mapper, MapperConfig, coerce};
use model::{FieldAccessor, Value, ValueType};
use serde_json::{Map, Value as JsonValue};
use std::collections::BTreeMap;
use tracing::{debug, warn};

pub type Record = Map<String, JsonValue>;

/// Field name to value type, as read from a schema file or inferred.
pub type Schema = BTreeMap<String, ValueType>;

/// Parses the records file: a JSON array whose items are all objects.
pub fn parse_records(source: &str) -> Result<Vec<Record>, CliError> {
    let json: JsonValue = serde_json::from_str(source)?;
    let JsonValue::Array(items) = json else {
        return Err(CliError::InvalidInput("expected a JSON array of objects".into()));
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            JsonValue::Object(record) => Ok(record),
            other => Err(CliError::InvalidInput(format!(
                "item {index} is not an object: {other}"
            ))),
        })
        .collect()
}

/// Parses a schema file such as `{"Name": "string", "Id": "int"}`.
pub fn parse_schema(source: &str) -> Result<Schema, CliError> {
    let raw: BTreeMap<String, String> = serde_json::from_str(source)?;
    raw.into_iter()
        .map(|(field, type_name)| {
            ValueType::from_name(&type_name)
                .map(|value_type| (field, value_type))
                .map_err(CliError::InvalidSchema)
        })
        .collect()
}

/// Derives a schema from one record. Nested objects are expanded into dotted
/// names up to `max_depth` levels; nulls and arrays are treated as text.
pub fn infer_schema(record: &Record, max_depth: usize) -> Schema {
    let mut schema = Schema::new();
    infer_into(&mut schema, "", record, max_depth);
    debug!("Inferred {} field(s) from the first record", schema.len());
    schema
}

fn infer_into(schema: &mut Schema, prefix: &str, record: &Record, depth: usize) {
    for (key, value) in record {
        let name = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };

        let value_type = match value {
            JsonValue::Bool(_) => ValueType::Boolean,
            JsonValue::Number(n) if n.is_i64() => ValueType::Int,
            JsonValue::Number(n) if n.is_u64() => ValueType::Uint,
            JsonValue::Number(_) => ValueType::Float,
            JsonValue::Object(inner) => {
                if depth > 0 {
                    infer_into(schema, &name, inner, depth - 1);
                }
                continue;
            }
            JsonValue::String(_) | JsonValue::Array(_) | JsonValue::Null => ValueType::String,
        };
        schema.insert(name, value_type);
    }
}

/// Builds a mapper over JSON records with one keyed accessor per schema field.
pub fn build_mapper(schema: &Schema, config: MapperConfig) -> Result<Mapper<Record>, CliError> {
    let mut mapper = Mapper::with_config(config);

    for (field, value_type) in schema {
        let path: Vec<String> = field.split('.').map(str::to_string).collect();
        let target = value_type.clone();
        let accessor = FieldAccessor::keyed(field, move |record: &Record| {
            read_path(record, &path, &target)
        });
        mapper.register_accessor(field, accessor, value_type.clone(), None)?;
    }

    Ok(mapper)
}

fn read_path(record: &Record, path: &[String], target: &ValueType) -> Value {
    let Some((last, parents)) = path.split_last() else {
        return Value::Null;
    };

    let mut current = record;
    for segment in parents {
        match current.get(segment) {
            Some(JsonValue::Object(inner)) => current = inner,
            _ => return Value::Null,
        }
    }

    current
        .get(last)
        .map(|json| to_value(json, target))
        .unwrap_or(Value::Null)
}

// Text holding a typed value (dates, ids, enum names) is converted to the
// declared type; anything unconvertible is compared as plain text.
fn to_value(json: &JsonValue, target: &ValueType) -> Value {
    match json {
        JsonValue::String(text) if *target != ValueType::String => coerce(text, target)
            .unwrap_or_else(|reason| {
                warn!("Cannot read '{}' as {}: {}", text, target, reason);
                Value::String(text.clone())
            }),
        other => Value::from_json(other),
    }
}
