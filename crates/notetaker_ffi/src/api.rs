//! FFI use-case API for the note list screen.
//!
//! # Responsibility
//! - Expose the note list controller to Dart via FRB as sync calls.
//! - Own the single process-wide controller and its storage.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Every call that changes state returns the view to render next.
//! - Before `notes_bootstrap` the view reports `ready = false` and no notes.

use log::{error, warn};
use notetaker_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    JsonStoreAdapter, NoteListController, NotesConfig, NotesView, SqliteBackend, ADD_NOTE_LABEL,
};
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock, PoisonError};

type Controller = NoteListController<JsonStoreAdapter>;

static CONTROLLER: OnceLock<Mutex<Controller>> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// One note row as rendered by the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteItem {
    pub id: i64,
    pub title: String,
    pub content: String,
}

/// Everything the note screen needs to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotesViewDto {
    /// `false` until storage has been read; render nothing in that case.
    pub ready: bool,
    pub notes: Vec<NoteItem>,
    pub draft_title: String,
    pub draft_content: String,
    /// Set while the form edits an existing note.
    pub editing_id: Option<i64>,
    /// `Add Note` or `Update Note`.
    pub submit_label: String,
}

/// Result envelope for list-changing actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotesActionResponse {
    /// Whether the action changed anything.
    pub ok: bool,
    /// Human-readable outcome for diagnostics.
    pub message: String,
    pub view: NotesViewDto,
}

/// Opens storage, loads the saved list and returns the first view.
///
/// `db_path` overrides `NOTETAKER_DB_PATH`. When storage cannot be opened
/// the screen still works, but changes last only for this process.
///
/// # FFI contract
/// - Only the first call opens storage; later calls return the current view.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_bootstrap(db_path: Option<String>) -> NotesViewDto {
    let cell = CONTROLLER.get_or_init(|| Mutex::new(build_controller(db_path)));
    let mut controller = cell.lock().unwrap_or_else(PoisonError::into_inner);
    controller.hydrate();
    to_view_dto(controller.view())
}

/// Returns the current view without changing state.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_view() -> NotesViewDto {
    with_controller(|controller| to_view_dto(controller.view())).unwrap_or_else(not_ready_view)
}

/// Mirrors the form fields into the draft.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_set_draft(title: String, content: String) -> NotesViewDto {
    with_controller(|controller| {
        controller.set_draft_title(title);
        controller.set_draft_content(content);
        to_view_dto(controller.view())
    })
    .unwrap_or_else(not_ready_view)
}

/// Adds or updates a note from the draft, depending on the form mode.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_submit() -> NotesActionResponse {
    run_action(|controller| {
        let updating = controller.is_editing();
        match (controller.submit(), updating) {
            (true, true) => (true, "Note updated."),
            (true, false) => (true, "Note added."),
            (false, _) => (false, "Title and content are required."),
        }
    })
}

/// Switches the form into edit mode for `id`.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_begin_edit(id: i64) -> NotesActionResponse {
    run_action(|controller| {
        if controller.begin_edit(id) {
            (true, "Editing note.")
        } else {
            (false, "Note not found.")
        }
    })
}

/// Deletes the note with `id`.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_delete(id: i64) -> NotesActionResponse {
    run_action(|controller| {
        if controller.delete_note(id) {
            (true, "Note deleted.")
        } else {
            (false, "Note not found.")
        }
    })
}

/// Leaves edit mode and clears the form.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_cancel_edit() -> NotesViewDto {
    with_controller(|controller| {
        controller.cancel_edit();
        to_view_dto(controller.view())
    })
    .unwrap_or_else(not_ready_view)
}

fn build_controller(db_path: Option<String>) -> Controller {
    let config = NotesConfig::from_env().unwrap_or_else(|err| {
        warn!("event=ffi_bootstrap module=ffi status=fallback reason=config error={err}");
        NotesConfig::default()
    });
    let path = db_path
        .map(|raw| raw.trim().to_string())
        .filter(|raw| !raw.is_empty())
        .map_or(config.db_path, PathBuf::from);

    let adapter = match SqliteBackend::open(&path) {
        Ok(backend) => JsonStoreAdapter::new(backend),
        Err(err) => {
            error!(
                "event=ffi_bootstrap module=ffi status=degraded reason=storage_unavailable error={err}"
            );
            JsonStoreAdapter::detached()
        }
    };
    NoteListController::with_key(adapter, config.storage_key)
}

fn with_controller<R>(f: impl FnOnce(&mut Controller) -> R) -> Option<R> {
    let cell = CONTROLLER.get()?;
    let mut controller = cell.lock().unwrap_or_else(PoisonError::into_inner);
    Some(f(&mut controller))
}

fn run_action(f: impl FnOnce(&mut Controller) -> (bool, &'static str)) -> NotesActionResponse {
    with_controller(|controller| {
        let (ok, message) = f(controller);
        NotesActionResponse {
            ok,
            message: message.to_string(),
            view: to_view_dto(controller.view()),
        }
    })
    .unwrap_or_else(|| NotesActionResponse {
        ok: false,
        message: "notes_bootstrap has not been called.".to_string(),
        view: not_ready_view(),
    })
}

fn to_view_dto(view: Option<NotesView>) -> NotesViewDto {
    let Some(view) = view else {
        return not_ready_view();
    };
    NotesViewDto {
        ready: true,
        notes: view
            .notes
            .into_iter()
            .map(|note| NoteItem {
                id: note.id,
                title: note.title,
                content: note.content,
            })
            .collect(),
        draft_title: view.draft.title,
        draft_content: view.draft.content,
        editing_id: view.editing,
        submit_label: view.submit_label.to_string(),
    }
}

fn not_ready_view() -> NotesViewDto {
    NotesViewDto {
        ready: false,
        notes: Vec::new(),
        draft_title: String::new(),
        draft_content: String::new(),
        editing_id: None,
        submit_label: ADD_NOTE_LABEL.to_string(),
    }
}
