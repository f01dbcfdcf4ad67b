//! Domain model for the note list.
//!
//! # Responsibility
//! - Define the persisted `Note` record and the transient form state.
//! - Provide the default seed used when nothing is stored yet.
//!
//! # Invariants
//! - Every note in a list is identified by a unique `NoteId`.
//! - Drafts are never persisted.

pub mod note;
