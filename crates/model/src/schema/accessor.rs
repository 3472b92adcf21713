use crate::core::value::Value;
use std::{any::TypeId, fmt, sync::Arc};

type Getter<T> = Arc<dyn Fn(&T) -> Value + Send + Sync>;

/// Reads one member of a model instance as a [`Value`].
///
/// Accessors are compared by identity: two accessors are the same when they
/// were built from the same function item or closure definition (and, for
/// keyed accessors, the same key). Nested accessors carry the identity of
/// every hop.
pub struct FieldAccessor<T> {
    identity: Vec<(TypeId, Option<String>)>,
    get: Getter<T>,
}

impl<T: 'static> FieldAccessor<T> {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&T) -> Value + Send + Sync + 'static,
    {
        FieldAccessor {
            identity: vec![(TypeId::of::<F>(), None)],
            get: Arc::new(f),
        }
    }

    /// Accessor whose identity also includes `key`, for closures that capture
    /// the member they read (e.g. a map lookup).
    pub fn keyed<F>(key: &str, f: F) -> Self
    where
        F: Fn(&T) -> Value + Send + Sync + 'static,
    {
        FieldAccessor {
            identity: vec![(TypeId::of::<F>(), Some(key.to_string()))],
            get: Arc::new(f),
        }
    }

    pub fn get(&self, model: &T) -> Value {
        (*self.get)(model)
    }

    pub fn same_as(&self, other: &FieldAccessor<T>) -> bool {
        self.identity == other.identity
    }

    /// Reads this member through `parent`; an absent parent reads as `Null`.
    pub fn nest<P, F>(&self, parent_id: TypeId, parent: Arc<F>) -> FieldAccessor<P>
    where
        P: 'static,
        F: Fn(&P) -> Option<&T> + Send + Sync + 'static,
    {
        let child = Arc::clone(&self.get);
        let mut identity = vec![(parent_id, None)];
        identity.extend(self.identity.iter().cloned());

        FieldAccessor {
            identity,
            get: Arc::new(move |p: &P| match (*parent)(p) {
                Some(inner) => (*child)(inner),
                None => Value::Null,
            }),
        }
    }
}

impl<T> Clone for FieldAccessor<T> {
    fn clone(&self) -> Self {
        FieldAccessor {
            identity: self.identity.clone(),
            get: Arc::clone(&self.get),
        }
    }
}

impl<T> fmt::Debug for FieldAccessor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldAccessor")
            .field("hops", &self.identity.len())
            .finish()
    }
}
