//! Note list controller: the add/edit/delete state machine.
//!
//! # Responsibility
//! - Hold the note list, the draft and the editing target.
//! - Validate drafts and apply add/update/delete to the list.
//! - Persist the full list after every successful mutation.
//!
//! # Invariants
//! - After every mutation the persisted snapshot equals the in-memory list,
//!   unless the storage write itself failed.
//! - Rejected actions (blank draft, unknown id, wrong mode) change nothing.
//! - List mutations are ignored until the controller has been hydrated.
//! - `editing` never points at a note removed by `delete_note`.

use crate::model::note::{
    default_notes, next_note_id, now_epoch_ms, Draft, Note, NoteId, NoteList,
};
use crate::store::{Lifecycle, PersistedState, StoreAdapter};
use log::{debug, info, warn};

/// Storage key holding the serialized note list.
pub const DEFAULT_STORAGE_KEY: &str = "notes";

/// Submit button label while composing a new note.
pub const ADD_NOTE_LABEL: &str = "Add Note";
/// Submit button label while editing an existing note.
pub const UPDATE_NOTE_LABEL: &str = "Update Note";

/// Render snapshot of the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotesView {
    pub notes: NoteList,
    pub draft: Draft,
    pub editing: Option<NoteId>,
    pub submit_label: &'static str,
}

/// Owner of the note list and the form state around it.
pub struct NoteListController<S> {
    notes: PersistedState<NoteList, S>,
    draft: Draft,
    editing: Option<NoteId>,
    clock: fn() -> i64,
}

impl<S: StoreAdapter> NoteListController<S> {
    /// Creates a controller over `store` using the default storage key.
    pub fn new(store: S) -> Self {
        Self::with_key(store, DEFAULT_STORAGE_KEY)
    }

    /// Creates a controller persisting under `key`.
    ///
    /// The controller starts `Uninitialized`, holding the default seed.
    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            notes: PersistedState::new(store, key, default_notes()),
            draft: Draft::default(),
            editing: None,
            clock: now_epoch_ms,
        }
    }

    /// Replaces the clock used to derive new note ids.
    pub fn with_clock(mut self, clock: fn() -> i64) -> Self {
        self.clock = clock;
        self
    }

    /// Loads the stored list once. Later calls are no-ops.
    pub fn hydrate(&mut self) -> Lifecycle {
        let was_ready = self.notes.is_ready();
        let lifecycle = self.notes.hydrate();
        if !was_ready {
            info!(
                "event=notes_hydrate module=controller status=ok key={} count={}",
                self.notes.key(),
                self.notes.get().len()
            );
        }
        lifecycle
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.notes.lifecycle()
    }

    pub fn is_ready(&self) -> bool {
        self.notes.is_ready()
    }

    pub fn notes(&self) -> &[Note] {
        self.notes.get()
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn editing(&self) -> Option<NoteId> {
        self.editing
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    pub fn storage_key(&self) -> &str {
        self.notes.key()
    }

    pub fn set_draft_title(&mut self, title: impl Into<String>) {
        self.draft.title = title.into();
    }

    pub fn set_draft_content(&mut self, content: impl Into<String>) {
        self.draft.content = content.into();
    }

    /// Appends the draft as a new note.
    ///
    /// Returns the new id, or `None` when not in create mode or the draft
    /// has a blank field.
    pub fn add_note(&mut self) -> Option<NoteId> {
        if !self.accepts_mutation("note_add") {
            return None;
        }
        if self.editing.is_some() {
            debug!("event=note_add module=controller status=ignored reason=editing");
            return None;
        }
        if let Err(err) = self.draft.validate() {
            debug!("event=note_add module=controller status=ignored reason=invalid_draft error={err}");
            return None;
        }

        let Some(id) = next_note_id(self.notes.get(), (self.clock)()) else {
            warn!("event=note_add module=controller status=ignored reason=id_exhausted");
            return None;
        };
        let note = self.draft.to_note(id);
        self.notes.update_value(|notes| {
            let mut next = notes.clone();
            next.push(note);
            next
        });
        self.draft.clear();
        info!(
            "event=note_add module=controller status=ok note_id={id} count={}",
            self.notes.get().len()
        );
        Some(id)
    }

    /// Enters update mode for `id`, copying its fields into the draft.
    ///
    /// Unknown ids leave the draft and editing target untouched.
    pub fn begin_edit(&mut self, id: NoteId) -> bool {
        if !self.accepts_mutation("note_edit_begin") {
            return false;
        }
        let Some(note) = self.notes.get().iter().find(|note| note.id == id) else {
            debug!("event=note_edit_begin module=controller status=ignored reason=not_found note_id={id}");
            return false;
        };
        self.draft = Draft::from_note(note);
        self.editing = Some(id);
        debug!("event=note_edit_begin module=controller status=ok note_id={id}");
        true
    }

    /// Writes the draft over the note being edited, keeping its position.
    pub fn update_note(&mut self) -> bool {
        if !self.accepts_mutation("note_update") {
            return false;
        }
        let Some(id) = self.editing else {
            debug!("event=note_update module=controller status=ignored reason=not_editing");
            return false;
        };
        if let Err(err) = self.draft.validate() {
            debug!("event=note_update module=controller status=ignored reason=invalid_draft error={err}");
            return false;
        }
        let Some(position) = self.position_of(id) else {
            warn!("event=note_update module=controller status=ignored reason=target_missing note_id={id}");
            self.reset_form();
            return false;
        };

        let replacement = self.draft.to_note(id);
        self.notes.update_value(|notes| {
            let mut next = notes.clone();
            next[position] = replacement;
            next
        });
        self.reset_form();
        info!("event=note_update module=controller status=ok note_id={id}");
        true
    }

    /// Removes the note with `id`, leaving every other note in order.
    ///
    /// Deleting the note under edit also leaves update mode and clears the draft.
    pub fn delete_note(&mut self, id: NoteId) -> bool {
        if !self.accepts_mutation("note_delete") {
            return false;
        }
        if self.position_of(id).is_none() {
            debug!("event=note_delete module=controller status=ignored reason=not_found note_id={id}");
            return false;
        }

        self.notes.update_value(|notes| {
            notes
                .iter()
                .filter(|note| note.id != id)
                .cloned()
                .collect()
        });
        if self.editing == Some(id) {
            self.reset_form();
        }
        info!(
            "event=note_delete module=controller status=ok note_id={id} count={}",
            self.notes.get().len()
        );
        true
    }

    /// Handles the single Add/Update button according to the current mode.
    pub fn submit(&mut self) -> bool {
        if self.editing.is_some() {
            self.update_note()
        } else {
            self.add_note().is_some()
        }
    }

    /// Leaves update mode without touching the list.
    pub fn cancel_edit(&mut self) {
        if self.editing.is_some() {
            self.reset_form();
        }
    }

    pub fn submit_label(&self) -> &'static str {
        if self.editing.is_some() {
            UPDATE_NOTE_LABEL
        } else {
            ADD_NOTE_LABEL
        }
    }

    /// Returns what the UI should render, or `None` before hydration so the
    /// default seed is never shown in place of stored notes.
    pub fn view(&self) -> Option<NotesView> {
        if !self.is_ready() {
            return None;
        }
        Some(NotesView {
            notes: self.notes.get().clone(),
            draft: self.draft.clone(),
            editing: self.editing,
            submit_label: self.submit_label(),
        })
    }

    fn position_of(&self, id: NoteId) -> Option<usize> {
        self.notes.get().iter().position(|note| note.id == id)
    }

    fn reset_form(&mut self) {
        self.draft.clear();
        self.editing = None;
    }

    fn accepts_mutation(&self, event: &str) -> bool {
        if self.is_ready() {
            return true;
        }
        debug!("event={event} module=controller status=ignored reason=not_ready");
        false
    }
}
