//! Use-case layer driving the note list.
//!
//! # Responsibility
//! - Own the authoritative in-memory note list and form state.
//! - Push every list mutation through the injected store adapter.

pub mod note_controller;
