//! Flutter-facing bindings for notetaker core.

pub mod api;
