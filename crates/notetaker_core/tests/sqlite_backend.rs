use notetaker_core::db::migrations::{current_user_version, latest_version};
use notetaker_core::db::{open_db, DbError};
use notetaker_core::{
    default_notes, JsonStoreAdapter, Note, NoteListController, SqliteBackend, StorageBackend,
};
use rusqlite::Connection;

#[test]
fn open_creates_schema_and_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.sqlite3");

    let conn = open_db(&path).unwrap();
    assert_eq!(current_user_version(&conn).unwrap(), latest_version());
    drop(conn);

    let conn = open_db(&path).unwrap();
    assert_eq!(current_user_version(&conn).unwrap(), latest_version());
    let tables: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'kv_store';",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(tables, 1);
}

#[test]
fn newer_schema_version_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");
    {
        let conn = Connection::open(&path).unwrap();
        conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version() + 1))
            .unwrap();
    }

    let err = SqliteBackend::open(&path).err().expect("newer schema must fail");
    assert!(matches!(
        err,
        DbError::UnsupportedSchemaVersion { latest_supported, .. } if latest_supported == latest_version()
    ));
}

#[test]
fn set_item_upserts_and_remove_deletes() {
    let mut backend = SqliteBackend::open_in_memory().unwrap();
    assert_eq!(backend.get_item("k").unwrap(), None);

    backend.set_item("k", "one").unwrap();
    backend.set_item("k", "two").unwrap();
    assert_eq!(backend.get_item("k").unwrap().as_deref(), Some("two"));

    let rows: i64 = backend
        .connection()
        .query_row("SELECT COUNT(*) FROM kv_store;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);

    backend.remove_item("k").unwrap();
    assert_eq!(backend.get_item("k").unwrap(), None);
}

#[test]
fn from_connection_migrates_raw_connection() {
    let conn = Connection::open_in_memory().unwrap();
    let mut backend = SqliteBackend::from_connection(conn).unwrap();
    backend.set_item("k", "v").unwrap();
    assert_eq!(backend.get_item("k").unwrap().as_deref(), Some("v"));
}

#[test]
fn notes_survive_reopening_the_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.sqlite3");

    {
        let backend = SqliteBackend::open(&path).unwrap();
        let mut controller = NoteListController::new(JsonStoreAdapter::new(backend));
        controller.hydrate();
        controller.set_draft_title("X");
        controller.set_draft_content("Y");
        controller.add_note().unwrap();
        assert!(controller.begin_edit(1));
        controller.set_draft_title("First, edited");
        assert!(controller.update_note());
    }

    let backend = SqliteBackend::open(&path).unwrap();
    let mut controller = NoteListController::new(JsonStoreAdapter::new(backend));
    controller.hydrate();

    let notes = controller.notes();
    assert_eq!(notes.len(), 3);
    assert_eq!(
        notes[0],
        Note::new(1, "First, edited", "This is the cosntent of  Note 1.")
    );
    assert_eq!(notes[1], default_notes()[1]);
    assert_eq!((notes[2].title.as_str(), notes[2].content.as_str()), ("X", "Y"));
}
