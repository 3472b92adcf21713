use crate::{apply::compile, error::FilterError};
use expression_engine::{Mapper, Predicate};
use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex, MutexGuard, OnceLock, PoisonError,
        atomic::{AtomicUsize, Ordering},
    },
};
use tracing::debug;

pub const DEFAULT_CAPACITY: usize = 256;

/// Filter string, mapper id, mapper version.
type CacheKey = (String, u64, u64);
type Slot<T> = Arc<OnceLock<Result<Predicate<T>, FilterError>>>;

/// Memoizes compiled predicates per filter string and mapper state.
///
/// The key includes the mapper's version, so mutating a mapper never serves
/// a predicate compiled against its earlier state. Concurrent requests for
/// the same key compile once; the others wait for that result. Failures are
/// cached as well.
pub struct PredicateCache<T> {
    capacity: usize,
    slots: Mutex<HashMap<CacheKey, Slot<T>>>,
    compilations: AtomicUsize,
}

impl<T: 'static> PredicateCache<T> {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        PredicateCache {
            capacity: capacity.max(1),
            slots: Mutex::new(HashMap::new()),
            compilations: AtomicUsize::new(0),
        }
    }

    pub fn get_or_compile(
        &self,
        filter: &str,
        mapper: &Mapper<T>,
    ) -> Result<Predicate<T>, FilterError> {
        let key = (filter.to_string(), mapper.id(), mapper.version());

        let slot = {
            let mut slots = self.lock();
            match slots.get(&key) {
                Some(slot) => {
                    debug!("Predicate cache hit for '{}'", filter);
                    Arc::clone(slot)
                }
                None => {
                    debug!("Predicate cache miss for '{}'", filter);
                    if slots.len() >= self.capacity {
                        self.evict(&mut slots, mapper);
                    }
                    let slot = Slot::<T>::default();
                    slots.insert(key, Arc::clone(&slot));
                    slot
                }
            }
        };

        // Compiled outside the map lock; other keys are not blocked.
        slot.get_or_init(|| {
            self.compilations.fetch_add(1, Ordering::Relaxed);
            compile(filter, mapper)
        })
        .clone()
    }

    /// Drops every entry compiled against `mapper`, whatever its version.
    pub fn invalidate(&self, mapper: &Mapper<T>) {
        let id = mapper.id();
        self.lock().retain(|(_, mapper_id, _), _| *mapper_id != id);
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// How many times a filter was actually compiled.
    pub fn compilations(&self) -> usize {
        self.compilations.load(Ordering::Relaxed)
    }

    fn evict(&self, slots: &mut HashMap<CacheKey, Slot<T>>, mapper: &Mapper<T>) {
        let (id, version) = (mapper.id(), mapper.version());
        slots.retain(|(_, mapper_id, mapper_version), _| {
            *mapper_id != id || *mapper_version == version
        });

        if slots.len() >= self.capacity {
            debug!("Predicate cache full, clearing {} entries", slots.len());
            slots.clear();
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<CacheKey, Slot<T>>> {
        // Entries are immutable once inserted, so a poisoned map is still valid.
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T: 'static> Default for PredicateCache<T> {
    fn default() -> Self {
        Self::new()
    }
}
