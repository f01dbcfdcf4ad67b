use notetaker_core::{
    default_notes, JsonStoreAdapter, MemoryBackend, NoteList, NoteListController,
    PersistedState, StorageBackend, StorageReadError, StorageWriteError, StoreAdapter,
};

struct BrokenBackend;

impl StorageBackend for BrokenBackend {
    fn name(&self) -> &'static str {
        "broken"
    }

    fn get_item(&self, _key: &str) -> Result<Option<String>, StorageReadError> {
        Err(StorageReadError::Unavailable)
    }

    fn set_item(&mut self, _key: &str, _value: &str) -> Result<(), StorageWriteError> {
        Err(StorageWriteError::Unavailable)
    }

    fn remove_item(&mut self, _key: &str) -> Result<(), StorageWriteError> {
        Err(StorageWriteError::Unavailable)
    }
}

#[test]
fn load_missing_key_returns_initial() {
    let adapter = JsonStoreAdapter::new(MemoryBackend::new());
    assert_eq!(adapter.load("notes", default_notes()), default_notes());
}

#[test]
fn malformed_value_falls_back_and_is_left_untouched() {
    let mut backend = MemoryBackend::new();
    backend.set_item("notes", "{not json").unwrap();
    let adapter = JsonStoreAdapter::new(backend.clone());

    assert!(matches!(
        adapter.try_load::<NoteList>("notes"),
        Err(StorageReadError::Decode { .. })
    ));
    assert_eq!(adapter.load("notes", default_notes()), default_notes());
    assert_eq!(
        backend.get_item("notes").unwrap().as_deref(),
        Some("{not json")
    );
}

#[test]
fn wrong_shape_counts_as_malformed() {
    let mut backend = MemoryBackend::new();
    backend
        .set_item("notes", r#"[{"id":"one","title":"t"}]"#)
        .unwrap();
    let adapter = JsonStoreAdapter::new(backend);
    assert_eq!(adapter.load("notes", default_notes()), default_notes());
}

#[test]
fn read_failure_falls_back_to_initial() {
    let adapter = JsonStoreAdapter::new(BrokenBackend);
    assert!(adapter.is_available());
    assert_eq!(adapter.load("notes", vec![7_u8]), vec![7]);
}

#[test]
fn save_serializes_note_wire_fields() {
    let backend = MemoryBackend::new();
    let mut adapter = JsonStoreAdapter::new(backend.clone());
    adapter.save("notes", &default_notes());

    let raw = backend.get_item("notes").unwrap().unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json[0]["id"], 1);
    assert_eq!(json[0]["title"], "Note 1");
    assert_eq!(json[1]["content"], "This is the content of Note 2.");
    assert_eq!(json[0].as_object().unwrap().len(), 3);
}

#[test]
fn detached_adapter_loads_initial_and_skips_writes() {
    let mut adapter = JsonStoreAdapter::detached();
    assert!(!adapter.is_available());
    assert_eq!(adapter.load("notes", vec![1_u8]), vec![1]);

    adapter.save("notes", &vec![2_u8]);
    assert!(matches!(
        adapter.try_save("notes", &vec![2_u8]),
        Err(StorageWriteError::Unavailable)
    ));
}

#[test]
fn detached_controller_keeps_working_in_memory() {
    let mut controller = NoteListController::new(JsonStoreAdapter::detached());
    controller.hydrate();
    assert!(controller.view().is_some());

    controller.set_draft_title("offline");
    controller.set_draft_content("only in memory");
    assert!(controller.add_note().is_some());
    assert_eq!(controller.notes().len(), 3);
}

#[test]
fn quota_exceeded_keeps_memory_authoritative() {
    let seed_bytes = "notes".len() + serde_json::to_string(&default_notes()).unwrap().len();
    let backend = MemoryBackend::with_quota(seed_bytes + 8);
    let mut controller = NoteListController::new(JsonStoreAdapter::new(backend.clone()));
    controller.hydrate();

    assert!(controller.delete_note(2));
    let after_delete = backend.get_item("notes").unwrap().unwrap();

    controller.set_draft_title("a title long enough to blow the quota");
    controller.set_draft_content("and a body to match");
    let id = controller.add_note().expect("add succeeds in memory");

    assert!(controller.notes().iter().any(|note| note.id == id));
    assert!(controller.draft().is_empty());
    assert_eq!(backend.get_item("notes").unwrap().unwrap(), after_delete);
}

#[test]
fn write_failure_does_not_roll_back_state() {
    let mut state = PersistedState::new(JsonStoreAdapter::new(BrokenBackend), "n", 1_u32);
    state.hydrate();
    state.set_value(2);
    state.update_value(|n| n + 1);
    assert_eq!(*state.get(), 3);
}
