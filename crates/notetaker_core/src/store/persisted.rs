//! A single value bound to one storage key, with explicit hydration.
//!
//! # Invariants
//! - The in-memory value is authoritative; a failed save never rolls it back.
//! - `hydrate` reads storage at most once per instance.
//! - Every write persists the full value, never a partial update.

use super::StoreAdapter;
use log::debug;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Whether the stored value has been read yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// Holding the initial value; storage not read yet.
    Uninitialized,
    /// Holding the stored value (or the initial value if nothing was stored).
    Ready,
}

/// In-memory value mirrored to one key of a store adapter.
pub struct PersistedState<T, S> {
    store: S,
    key: String,
    value: T,
    lifecycle: Lifecycle,
}

impl<T, S> PersistedState<T, S>
where
    T: Serialize + DeserializeOwned + Clone,
    S: StoreAdapter,
{
    /// Creates an uninitialized state holding `initial`.
    pub fn new(store: S, key: impl Into<String>, initial: T) -> Self {
        Self {
            store,
            key: key.into(),
            value: initial,
            lifecycle: Lifecycle::Uninitialized,
        }
    }

    /// Loads the stored value once and marks the state ready.
    pub fn hydrate(&mut self) -> Lifecycle {
        if self.lifecycle == Lifecycle::Ready {
            return self.lifecycle;
        }
        self.value = self.store.load(&self.key, self.value.clone());
        self.lifecycle = Lifecycle::Ready;
        debug!(
            "event=state_hydrate module=store status=ok key={} available={}",
            self.key,
            self.store.is_available()
        );
        self.lifecycle
    }

    /// Replaces the value and persists it.
    pub fn set_value(&mut self, value: T) {
        self.value = value;
        self.store.save(&self.key, &self.value);
    }

    /// Derives the next value from the current one and persists it.
    pub fn update_value(&mut self, update: impl FnOnce(&T) -> T) {
        let next = update(&self.value);
        self.set_value(next);
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn is_ready(&self) -> bool {
        self.lifecycle == Lifecycle::Ready
    }
}

#[cfg(test)]
mod tests {
    use super::{Lifecycle, PersistedState};
    use crate::store::{JsonStoreAdapter, MemoryBackend, StorageBackend};

    #[test]
    fn hydrate_reads_storage_once() {
        let mut backend = MemoryBackend::new();
        backend.set_item("n", "5").unwrap();
        let mut state = PersistedState::new(JsonStoreAdapter::new(backend.clone()), "n", 0_u32);
        assert_eq!(state.lifecycle(), Lifecycle::Uninitialized);
        assert_eq!(*state.get(), 0);

        assert_eq!(state.hydrate(), Lifecycle::Ready);
        assert_eq!(*state.get(), 5);

        backend.set_item("n", "9").unwrap();
        state.hydrate();
        assert_eq!(*state.get(), 5);
    }

    #[test]
    fn set_and_update_persist_full_value() {
        let backend = MemoryBackend::new();
        let mut state =
            PersistedState::new(JsonStoreAdapter::new(backend.clone()), "list", vec![1_u32]);
        state.hydrate();

        state.set_value(vec![1, 2]);
        assert_eq!(backend.get_item("list").unwrap().as_deref(), Some("[1,2]"));

        state.update_value(|current| current.iter().map(|n| n * 10).collect());
        assert_eq!(state.get(), &vec![10, 20]);
        assert_eq!(backend.get_item("list").unwrap().as_deref(), Some("[10,20]"));
    }
}
