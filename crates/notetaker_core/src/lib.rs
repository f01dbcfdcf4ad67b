//! Core domain logic for notetaker.
//! This crate is the single source of truth for note list invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;

pub use config::{ConfigError, NotesConfig};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::note::{default_notes, Draft, Note, NoteId, NoteList, NoteValidationError};
pub use service::note_controller::{
    NoteListController, NotesView, ADD_NOTE_LABEL, DEFAULT_STORAGE_KEY, UPDATE_NOTE_LABEL,
};
pub use store::{
    JsonStoreAdapter, Lifecycle, MemoryBackend, PersistedState, SqliteBackend, StorageBackend,
    StorageReadError, StorageWriteError, StoreAdapter,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
