//! JSON store adapter over a pluggable storage backend.
//!
//! # Responsibility
//! - Serialize values to JSON text and write them under one key.
//! - Read and decode stored text, falling back to a caller-supplied value.
//! - Behave as a no-op when the host has no storage backend.
//!
//! # Invariants
//! - `load` never writes; a malformed value stays in storage untouched.
//! - An empty stored string is treated the same as a missing key.
//! - Logged events carry keys and sizes only, never stored contents.

use super::{StorageBackend, StorageReadError, StorageWriteError, StoreAdapter};
use log::{debug, error, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Store adapter encoding values as JSON text.
pub struct JsonStoreAdapter {
    backend: Option<Box<dyn StorageBackend>>,
}

impl JsonStoreAdapter {
    pub fn new(backend: impl StorageBackend + 'static) -> Self {
        Self {
            backend: Some(Box::new(backend)),
        }
    }

    /// Creates an adapter for hosts without storage: every `load` yields the
    /// initial value and every `save` is skipped.
    pub fn detached() -> Self {
        Self { backend: None }
    }

    /// Label of the attached backend, or `none` when detached.
    pub fn backend_name(&self) -> &'static str {
        self.backend.as_ref().map_or("none", |backend| backend.name())
    }

    /// Reads and decodes the value under `key`.
    ///
    /// Returns `Ok(None)` when the key is missing or holds an empty string.
    ///
    /// # Errors
    /// - `Unavailable` when detached.
    /// - `Backend` when the backend read fails.
    /// - `Decode` when the stored text does not decode as `T`.
    pub fn try_load<T: DeserializeOwned>(
        &self,
        key: &str,
    ) -> Result<Option<T>, StorageReadError> {
        let backend = self.backend.as_ref().ok_or(StorageReadError::Unavailable)?;
        let raw = match backend.get_item(key)? {
            Some(raw) if !raw.is_empty() => raw,
            _ => return Ok(None),
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StorageReadError::Decode {
                key: key.to_string(),
                source,
            })
    }

    /// Encodes `value`, writes it under `key` and returns the encoded size.
    ///
    /// # Errors
    /// - `Unavailable` when detached.
    /// - `Encode` when `value` cannot be serialized.
    /// - `Backend` or `QuotaExceeded` when the write is refused.
    pub fn try_save<T: Serialize>(
        &mut self,
        key: &str,
        value: &T,
    ) -> Result<usize, StorageWriteError> {
        let backend = self
            .backend
            .as_mut()
            .ok_or(StorageWriteError::Unavailable)?;
        let encoded = serde_json::to_string(value).map_err(|source| StorageWriteError::Encode {
            key: key.to_string(),
            source,
        })?;
        backend.set_item(key, &encoded)?;
        Ok(encoded.len())
    }
}

impl StoreAdapter for JsonStoreAdapter {
    fn is_available(&self) -> bool {
        self.backend.is_some()
    }

    fn load<T: DeserializeOwned>(&self, key: &str, initial: T) -> T {
        if !self.is_available() {
            debug!("event=store_load module=store status=skipped key={key} backend=none");
            return initial;
        }

        match self.try_load(key) {
            Ok(Some(value)) => {
                debug!(
                    "event=store_load module=store status=ok key={key} backend={}",
                    self.backend_name()
                );
                value
            }
            Ok(None) => {
                debug!(
                    "event=store_load module=store status=miss key={key} backend={}",
                    self.backend_name()
                );
                initial
            }
            Err(err) => {
                warn!(
                    "event=store_load module=store status=fallback key={key} backend={} error={err}",
                    self.backend_name()
                );
                initial
            }
        }
    }

    fn save<T: Serialize>(&mut self, key: &str, value: &T) {
        if !self.is_available() {
            debug!("event=store_save module=store status=skipped key={key} backend=none");
            return;
        }

        let backend = self.backend_name();
        match self.try_save(key, value) {
            Ok(bytes) => {
                debug!(
                    "event=store_save module=store status=ok key={key} backend={backend} bytes={bytes}"
                );
            }
            Err(err) => {
                error!(
                    "event=store_save module=store status=error key={key} backend={backend} error={err}"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::JsonStoreAdapter;
    use crate::store::{MemoryBackend, StorageBackend, StorageReadError, StoreAdapter};

    #[test]
    fn empty_string_is_treated_as_missing() {
        let mut backend = MemoryBackend::new();
        backend.set_item("k", "").unwrap();
        let adapter = JsonStoreAdapter::new(backend);
        assert_eq!(adapter.try_load::<Vec<u32>>("k").unwrap(), None);
        assert_eq!(adapter.load("k", vec![9_u32]), vec![9]);
    }

    #[test]
    fn detached_try_load_reports_unavailable() {
        let adapter = JsonStoreAdapter::detached();
        assert!(!adapter.is_available());
        assert_eq!(adapter.backend_name(), "none");
        assert!(matches!(
            adapter.try_load::<u32>("k"),
            Err(StorageReadError::Unavailable)
        ));
    }

    #[test]
    fn try_save_reports_encoded_size() {
        let backend = MemoryBackend::new();
        let mut adapter = JsonStoreAdapter::new(backend.clone());
        let bytes = adapter.try_save("k", &vec![1_u8, 2, 3]).unwrap();
        assert_eq!(bytes, "[1,2,3]".len());
        assert_eq!(backend.get_item("k").unwrap().as_deref(), Some("[1,2,3]"));
    }
}
