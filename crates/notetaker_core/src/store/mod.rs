//! Persistence boundary between in-memory state and the host key-value store.
//!
//! # Responsibility
//! - Define the raw text key-value seam (`StorageBackend`).
//! - Define the typed, never-failing load/save contract (`StoreAdapter`).
//! - Provide the value-plus-lifecycle wrapper used by controllers.
//!
//! # Invariants
//! - Storage failures never escape `StoreAdapter::load` / `StoreAdapter::save`.
//! - A value is always written as a full snapshot under a single key.

use crate::db::DbError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod adapter;
pub mod memory;
pub mod persisted;
pub mod sqlite;

pub use adapter::JsonStoreAdapter;
pub use memory::MemoryBackend;
pub use persisted::{Lifecycle, PersistedState};
pub use sqlite::SqliteBackend;

/// Failure while reading or decoding a stored value.
#[derive(Debug)]
pub enum StorageReadError {
    /// No storage backend exists in this host.
    Unavailable,
    Backend(DbError),
    /// Stored text is not a valid encoding of the requested type.
    Decode {
        key: String,
        source: serde_json::Error,
    },
}

impl Display for StorageReadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable => write!(f, "storage backend is unavailable"),
            Self::Backend(err) => write!(f, "storage read failed: {err}"),
            Self::Decode { key, source } => {
                write!(f, "stored value under `{key}` is malformed: {source}")
            }
        }
    }
}

impl Error for StorageReadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Unavailable => None,
            Self::Backend(err) => Some(err),
            Self::Decode { source, .. } => Some(source),
        }
    }
}

impl From<DbError> for StorageReadError {
    fn from(value: DbError) -> Self {
        Self::Backend(value)
    }
}

impl From<rusqlite::Error> for StorageReadError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Backend(DbError::Sqlite(value))
    }
}

/// Failure while encoding or writing a value.
#[derive(Debug)]
pub enum StorageWriteError {
    /// No storage backend exists in this host.
    Unavailable,
    Backend(DbError),
    /// The write would grow the store past its byte quota.
    QuotaExceeded {
        key: String,
        requested_bytes: usize,
        quota_bytes: usize,
    },
    Encode {
        key: String,
        source: serde_json::Error,
    },
}

impl Display for StorageWriteError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable => write!(f, "storage backend is unavailable"),
            Self::Backend(err) => write!(f, "storage write failed: {err}"),
            Self::QuotaExceeded {
                key,
                requested_bytes,
                quota_bytes,
            } => write!(
                f,
                "writing `{key}` needs {requested_bytes} bytes, quota is {quota_bytes}"
            ),
            Self::Encode { key, source } => {
                write!(f, "value for `{key}` could not be encoded: {source}")
            }
        }
    }
}

impl Error for StorageWriteError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Unavailable | Self::QuotaExceeded { .. } => None,
            Self::Backend(err) => Some(err),
            Self::Encode { source, .. } => Some(source),
        }
    }
}

impl From<DbError> for StorageWriteError {
    fn from(value: DbError) -> Self {
        Self::Backend(value)
    }
}

impl From<rusqlite::Error> for StorageWriteError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Backend(DbError::Sqlite(value))
    }
}

/// Raw text key-value store provided by the host.
pub trait StorageBackend: Send {
    /// Short backend label used in log events.
    fn name(&self) -> &'static str;
    /// Returns the text stored under `key`, if any.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageReadError>;
    /// Stores `value` under `key`, replacing any previous value.
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageWriteError>;
    /// Removes `key`. Removing a missing key succeeds.
    fn remove_item(&mut self, key: &str) -> Result<(), StorageWriteError>;
}

/// Typed load/save contract that never fails outward.
pub trait StoreAdapter {
    /// Whether a storage backend is attached.
    fn is_available(&self) -> bool;
    /// Returns the value stored under `key`, or `initial` when it is absent
    /// or unreadable. Storage is left untouched either way.
    fn load<T: DeserializeOwned>(&self, key: &str, initial: T) -> T;
    /// Persists `value` under `key`. Failures are logged and dropped.
    fn save<T: Serialize>(&mut self, key: &str, value: &T);
}
