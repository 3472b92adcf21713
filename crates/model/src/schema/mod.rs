//! Statically declared member tables.
//!
//! A model type lists its filterable members once through [`Filterable`];
//! mappers generate their default mappings from that table instead of
//! inspecting the type at runtime.

pub mod accessor;

use crate::{
    core::{data_type::ValueType, value::Value},
    schema::accessor::FieldAccessor,
};
use std::{any::TypeId, sync::Arc};

/// A model type that can describe its own members.
pub trait Filterable: Sized + 'static {
    fn members() -> Vec<Member<Self>>;
}

type Expander<T> = Arc<dyn Fn(usize) -> Vec<MemberField<T>> + Send + Sync>;

/// One entry of a member table.
pub struct Member<T> {
    name: String,
    excluded: bool,
    kind: MemberKind<T>,
}

enum MemberKind<T> {
    Field {
        accessor: FieldAccessor<T>,
        value_type: ValueType,
    },
    Nested(Expander<T>),
}

/// A flattened member: nested paths are already expanded into dotted names.
pub struct MemberField<T> {
    pub name: String,
    pub accessor: FieldAccessor<T>,
    pub value_type: ValueType,
    pub excluded: bool,
}

impl<T: 'static> Member<T> {
    pub fn field<F>(name: &str, accessor: F, value_type: ValueType) -> Self
    where
        F: Fn(&T) -> Value + Send + Sync + 'static,
    {
        Member {
            name: name.to_string(),
            excluded: false,
            kind: MemberKind::Field {
                accessor: FieldAccessor::new(accessor),
                value_type,
            },
        }
    }

    /// Exposes the members of `U` under `name.` through `parent`.
    pub fn nested<U, F>(name: &str, parent: F) -> Self
    where
        U: Filterable,
        F: Fn(&T) -> Option<&U> + Send + Sync + 'static,
    {
        let parent = Arc::new(parent);
        let parent_id = TypeId::of::<F>();
        let prefix = name.to_string();

        let expand = move |depth: usize| -> Vec<MemberField<T>> {
            flatten(U::members(), depth)
                .into_iter()
                .map(|field| MemberField {
                    name: format!("{}.{}", prefix, field.name),
                    accessor: field.accessor.nest(parent_id, Arc::clone(&parent)),
                    value_type: field.value_type,
                    excluded: field.excluded,
                })
                .collect()
        };

        Member {
            name: name.to_string(),
            excluded: false,
            kind: MemberKind::Nested(Arc::new(expand)),
        }
    }

    /// Marks the member (and, for nested members, everything below it) as
    /// not filterable.
    pub fn excluded(mut self) -> Self {
        self.excluded = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_excluded(&self) -> bool {
        self.excluded
    }

    pub fn is_nested(&self) -> bool {
        matches!(self.kind, MemberKind::Nested(_))
    }
}

/// Flattens a member table. Nested members are expanded while `depth` allows;
/// a depth of 0 keeps only the type's own scalar members.
pub fn flatten<T: 'static>(members: Vec<Member<T>>, depth: usize) -> Vec<MemberField<T>> {
    let mut fields = Vec::new();

    for member in members {
        match member.kind {
            MemberKind::Field {
                accessor,
                value_type,
            } => fields.push(MemberField {
                name: member.name,
                accessor,
                value_type,
                excluded: member.excluded,
            }),
            MemberKind::Nested(expand) => {
                if depth == 0 {
                    continue;
                }
                for mut field in (*expand)(depth - 1) {
                    field.excluded |= member.excluded;
                    fields.push(field);
                }
            }
        }
    }

    fields
}
