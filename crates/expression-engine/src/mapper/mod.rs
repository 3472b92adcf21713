//! Field mapper: the registry between names used in filter strings and the
//! members of a model type.

pub mod config;

use crate::{
    error::{ConfigurationError, MappingError},
    types::{CoercionResult, coerce},
};
use config::MapperConfig;
use model::{
    core::{data_type::ValueType, value::Value},
    schema::{Filterable, accessor::FieldAccessor, flatten},
};
use std::{
    any::TypeId,
    collections::{HashMap, HashSet},
    fmt,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};
use tracing::{debug, warn};

static NEXT_MAPPER_ID: AtomicU64 = AtomicU64::new(1);

/// Field-specific literal conversion that replaces the type's default coercion.
#[derive(Clone)]
pub struct ValueParser {
    id: TypeId,
    parse: Arc<dyn Fn(&str) -> CoercionResult + Send + Sync>,
}

impl ValueParser {
    pub fn new<P>(parse: P) -> Self
    where
        P: Fn(&str) -> CoercionResult + Send + Sync + 'static,
    {
        ValueParser {
            id: TypeId::of::<P>(),
            parse: Arc::new(parse),
        }
    }

    pub fn parse(&self, literal: &str) -> CoercionResult {
        (*self.parse)(literal)
    }
}

impl fmt::Debug for ValueParser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ValueParser")
    }
}

pub struct FieldMapping<T> {
    pub name: String,
    pub accessor: FieldAccessor<T>,
    pub value_type: ValueType,
    pub parser: Option<ValueParser>,
}

impl<T: 'static> FieldMapping<T> {
    /// Converts a filter literal for this field, preferring the custom parser.
    pub fn parse_literal(&self, literal: &str) -> CoercionResult {
        match &self.parser {
            Some(parser) => parser.parse(literal),
            None => coerce(literal, &self.value_type),
        }
    }

    pub fn read(&self, model: &T) -> Value {
        self.accessor.get(model)
    }

    fn same_as(&self, other: &FieldMapping<T>) -> bool {
        self.accessor.same_as(&other.accessor)
            && self.value_type == other.value_type
            && self.parser.as_ref().map(|p| p.id) == other.parser.as_ref().map(|p| p.id)
    }
}

impl<T> Clone for FieldMapping<T> {
    fn clone(&self) -> Self {
        FieldMapping {
            name: self.name.clone(),
            accessor: self.accessor.clone(),
            value_type: self.value_type.clone(),
            parser: self.parser.clone(),
        }
    }
}

impl<T> fmt::Debug for FieldMapping<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldMapping")
            .field("name", &self.name)
            .field("value_type", &self.value_type)
            .field("custom_parser", &self.parser.is_some())
            .finish()
    }
}

/// Maps filter field names to members of `T`.
///
/// Every mutation bumps [`Mapper::version`]; together with [`Mapper::id`] it
/// identifies the exact mapping state a predicate was compiled against.
pub struct Mapper<T> {
    id: u64,
    version: u64,
    config: MapperConfig,
    mappings: HashMap<String, FieldMapping<T>>,
    excluded: HashSet<String>,
}

impl<T: 'static> Mapper<T> {
    pub fn new() -> Self {
        Self::with_config(MapperConfig::default())
    }

    pub fn with_config(config: MapperConfig) -> Self {
        Mapper {
            id: NEXT_MAPPER_ID.fetch_add(1, Ordering::Relaxed),
            version: 0,
            config,
            mappings: HashMap::new(),
            excluded: HashSet::new(),
        }
    }

    pub fn config(&self) -> &MapperConfig {
        &self.config
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn register<F>(
        &mut self,
        name: &str,
        accessor: F,
        value_type: ValueType,
    ) -> Result<&mut Self, ConfigurationError>
    where
        F: Fn(&T) -> Value + Send + Sync + 'static,
    {
        self.register_accessor(name, FieldAccessor::new(accessor), value_type, None)
    }

    pub fn register_with_parser<F, P>(
        &mut self,
        name: &str,
        accessor: F,
        value_type: ValueType,
        parser: P,
    ) -> Result<&mut Self, ConfigurationError>
    where
        F: Fn(&T) -> Value + Send + Sync + 'static,
        P: Fn(&str) -> CoercionResult + Send + Sync + 'static,
    {
        self.register_accessor(
            name,
            FieldAccessor::new(accessor),
            value_type,
            Some(ValueParser::new(parser)),
        )
    }

    /// Registers a prebuilt accessor. Repeating an identical registration is a
    /// no-op; a different accessor, type or parser under a taken name is
    /// rejected.
    pub fn register_accessor(
        &mut self,
        name: &str,
        accessor: FieldAccessor<T>,
        value_type: ValueType,
        parser: Option<ValueParser>,
    ) -> Result<&mut Self, ConfigurationError> {
        let key = self.key(name);
        if self.excluded.contains(&key) {
            warn!("Rejected mapping for excluded field '{}'", name);
            return Err(ConfigurationError::ExcludedField(name.to_string()));
        }

        let mapping = FieldMapping {
            name: name.to_string(),
            accessor,
            value_type,
            parser,
        };

        if let Some(existing) = self.mappings.get(&key) {
            if existing.same_as(&mapping) {
                return Ok(self);
            }
            warn!("Rejected conflicting mapping for field '{}'", name);
            return Err(ConfigurationError::ConflictingMapping(name.to_string()));
        }

        debug!("Mapped field '{}' as {}", name, mapping.value_type);
        self.mappings.insert(key, mapping);
        self.version += 1;
        Ok(self)
    }

    /// Replaces whatever is mapped under `name`, lifting an exclusion if one
    /// was set.
    pub fn override_mapping(
        &mut self,
        name: &str,
        accessor: FieldAccessor<T>,
        value_type: ValueType,
        parser: Option<ValueParser>,
    ) -> &mut Self {
        let key = self.key(name);
        self.excluded.remove(&key);
        debug!("Overriding mapping for field '{}' as {}", name, value_type);
        self.mappings.insert(
            key,
            FieldMapping {
                name: name.to_string(),
                accessor,
                value_type,
                parser,
            },
        );
        self.version += 1;
        self
    }

    pub fn remove(&mut self, name: &str) -> bool {
        let removed = self.mappings.remove(&self.key(name)).is_some();
        if removed {
            self.version += 1;
        }
        removed
    }

    /// Drops any mapping for `name` and rejects it from now on.
    pub fn exclude(&mut self, name: &str) -> &mut Self {
        let key = self.key(name);
        self.mappings.remove(&key);
        if self.excluded.insert(key) {
            debug!("Excluded field '{}' from filtering", name);
        }
        self.version += 1;
        self
    }

    pub fn resolve(&self, name: &str) -> Result<&FieldMapping<T>, MappingError> {
        let key = self.key(name);
        if self.excluded.contains(&key) {
            return Err(MappingError::ExcludedField(name.to_string()));
        }
        self.mappings
            .get(&key)
            .ok_or_else(|| MappingError::UnknownField(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.mappings.contains_key(&self.key(name))
    }

    pub fn is_excluded(&self, name: &str) -> bool {
        self.excluded.contains(&self.key(name))
    }

    /// Registered field names in ascending order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.mappings.values().map(|m| m.name.as_str()).collect();
        names.sort_unstable();
        names
    }

    pub fn mappings(&self) -> impl Iterator<Item = &FieldMapping<T>> {
        self.mappings.values()
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }

    fn key(&self, name: &str) -> String {
        if self.config.case_sensitive_fields {
            name.to_string()
        } else {
            name.to_ascii_lowercase()
        }
    }
}

impl<T: Filterable> Mapper<T> {
    /// A mapper holding the default mappings of `T`.
    pub fn generated() -> Self {
        Self::generated_with(MapperConfig::default())
    }

    pub fn generated_with(config: MapperConfig) -> Self {
        let mut mapper = Self::with_config(config);
        mapper.generate_mappings();
        mapper
    }

    /// Maps every declared member of `T` that is not already mapped or
    /// excluded.
    pub fn generate_mappings(&mut self) -> &mut Self {
        self.generate(false)
    }

    /// Like [`generate_mappings`](Self::generate_mappings), but replaces
    /// existing mappings for declared members.
    pub fn generate_mappings_overriding(&mut self) -> &mut Self {
        self.generate(true)
    }

    fn generate(&mut self, overriding: bool) -> &mut Self {
        let mut added = 0usize;

        for field in flatten(T::members(), self.config.max_nesting_depth) {
            let key = self.key(&field.name);
            if self.excluded.contains(&key) {
                continue;
            }
            if field.excluded {
                // Explicit mappings win over the member table.
                if !self.mappings.contains_key(&key) {
                    self.excluded.insert(key);
                }
                continue;
            }
            if !overriding && self.mappings.contains_key(&key) {
                continue;
            }

            self.mappings.insert(
                key,
                FieldMapping {
                    name: field.name,
                    accessor: field.accessor,
                    value_type: field.value_type,
                    parser: None,
                },
            );
            added += 1;
        }

        if added > 0 {
            self.version += 1;
        }
        debug!(
            "Generated {} mapping(s), {} field(s) mapped in total",
            added,
            self.mappings.len()
        );
        self
    }
}

impl<T: 'static> Default for Mapper<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Mapper<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.mappings.values().map(|m| m.name.as_str()).collect();
        names.sort_unstable();
        f.debug_struct("Mapper")
            .field("id", &self.id)
            .field("version", &self.version)
            .field("fields", &names)
            .field("excluded", &self.excluded)
            .finish()
    }
}
