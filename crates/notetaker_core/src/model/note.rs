//! Note domain model.
//!
//! # Responsibility
//! - Define the canonical `Note` record stored as one JSON array.
//! - Define `Draft`, the form state used for create and update.
//! - Assign creation-time identifiers.
//!
//! # Invariants
//! - `id` is unique within a list and never reused by a later note.
//! - Notes accepted through a draft have non-blank `title` and `content`.
//! - Wire field names are exactly `id`, `title`, `content`.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};

/// Identifier for a note, derived from its creation time in epoch milliseconds.
pub type NoteId = i64;

/// Full note list snapshot as persisted under one storage key.
pub type NoteList = Vec<Note>;

/// A user-authored title/content pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub content: String,
}

impl Note {
    pub fn new(id: NoteId, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            content: content.into(),
        }
    }
}

/// Rejection reasons for a draft that cannot become a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteValidationError {
    EmptyTitle,
    EmptyContent,
}

impl Display for NoteValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "note title must not be blank"),
            Self::EmptyContent => write!(f, "note content must not be blank"),
        }
    }
}

impl Error for NoteValidationError {}

/// Transient form input for composing a new note or editing an existing one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub title: String,
    pub content: String,
}

impl Draft {
    /// Builds a draft prefilled from an existing note.
    pub fn from_note(note: &Note) -> Self {
        Self {
            title: note.title.clone(),
            content: note.content.clone(),
        }
    }

    /// Checks that both fields contain something other than whitespace.
    ///
    /// Fields are validated trimmed but stored as typed.
    pub fn validate(&self) -> Result<(), NoteValidationError> {
        if self.title.trim().is_empty() {
            return Err(NoteValidationError::EmptyTitle);
        }
        if self.content.trim().is_empty() {
            return Err(NoteValidationError::EmptyContent);
        }
        Ok(())
    }

    pub fn is_submittable(&self) -> bool {
        self.validate().is_ok()
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.content.is_empty()
    }

    pub fn clear(&mut self) {
        self.title.clear();
        self.content.clear();
    }

    /// Converts the draft into a note carrying `id`.
    pub fn to_note(&self, id: NoteId) -> Note {
        Note::new(id, self.title.clone(), self.content.clone())
    }
}

/// Returns the two notes shown when storage holds nothing yet.
///
/// Text is kept exactly as first shipped, typo and double space included,
/// so existing installs see the same seed.
pub fn default_notes() -> NoteList {
    vec![
        Note::new(1, "Note 1", "This is the cosntent of  Note 1."),
        Note::new(2, "Note 2", "This is the content of Note 2."),
    ]
}

/// Picks the id for a note created at `now_ms`.
///
/// Uses the timestamp when it is newer than every existing id, otherwise
/// the next integer after the current maximum. Returns `None` when the
/// maximum is already `i64::MAX` and no larger id exists.
pub fn next_note_id(notes: &[Note], now_ms: i64) -> Option<NoteId> {
    match notes.iter().map(|note| note.id).max() {
        Some(max_id) if now_ms <= max_id => max_id.checked_add(1),
        _ => Some(now_ms),
    }
}

/// Current wall-clock time in epoch milliseconds.
pub fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}
