use std::path::PathBuf;

use peoria_core::test_helpers::make_state;
use peoria_core::{CompetitionConfig, HOLE_COUNT, SavedCompetition, rank};
use peoria_store::{HistoryStore, StateStore, StoreError, export_to_file, import_from_file};

/// Fresh scratch directory removed on drop.
struct ScratchDir(PathBuf);

impl ScratchDir {
    fn new() -> Self {
        let dir = std::env::temp_dir().join(format!("peoria-test-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        Self(dir)
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.0);
    }
}

#[test]
fn state_round_trip() {
    let dir = ScratchDir::new();
    let store = StateStore::new(&dir.0);
    assert!(store.load().is_none());

    let state = make_state(4);
    store.save(&state).unwrap();
    assert_eq!(store.load(), Some(state.clone()));

    store.clear().unwrap();
    assert!(store.load().is_none());
    // Clearing twice is fine
    store.clear().unwrap();
}

#[test]
fn state_with_invalid_config_is_ignored() {
    let dir = ScratchDir::new();
    let store = StateStore::new(&dir.0);
    let mut state = make_state(1);
    state.config.par.0[0] = 7;
    store.save(&state).unwrap();
    assert!(store.load().is_none());
    assert_eq!(store.load_or_default(), Default::default());
}

#[test]
fn malformed_state_is_ignored() {
    let dir = ScratchDir::new();
    let store = StateStore::new(&dir.0);
    std::fs::write(store.path(), "{\"config\": 12}").unwrap();
    assert!(store.load().is_none());
}

#[test]
fn ranking_survives_state_round_trip() {
    let dir = ScratchDir::new();
    let store = StateStore::new(&dir.0);
    let state = make_state(5);
    let before = rank(&state.players, &state.config, None);

    store.save(&state).unwrap();
    let loaded = store.load().unwrap();
    let after = rank(&loaded.players, &loaded.config, None);
    assert_eq!(before, after);
}

#[test]
fn history_prepends_and_deletes() {
    let dir = ScratchDir::new();
    let history = HistoryStore::new(&dir.0);
    assert!(history.list().unwrap().is_empty());

    let first = SavedCompetition::new("Spring", &make_state(2));
    let second = SavedCompetition::new("Autumn", &make_state(3));
    history.save(first.clone()).unwrap();
    history.save(second.clone()).unwrap();

    let names: Vec<String> = history.list().unwrap().into_iter().map(|c| c.name).collect();
    assert_eq!(names, vec!["Autumn", "Spring"]);
    assert_eq!(history.get(&first.id).unwrap(), first);

    assert!(history.delete(&second.id).unwrap());
    assert!(!history.delete(&second.id).unwrap());
    assert!(matches!(history.get(&second.id), Err(StoreError::NotFound(_))));
    assert_eq!(history.list().unwrap().len(), 1);
}

#[test]
fn history_skips_unusable_entries() {
    let dir = ScratchDir::new();
    let history = HistoryStore::new(&dir.0);
    let good = SavedCompetition::new("Club day", &make_state(2));
    let mut nameless = SavedCompetition::new("", &make_state(1));
    nameless.id = "nameless".to_string();
    let json = serde_json::json!([good, nameless, { "id": "junk" }]);
    std::fs::write(history.path(), json.to_string()).unwrap();

    let entries = history.list().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].name, "Club day");
    assert_eq!(
        entries[0].winner_summary().as_deref(),
        Some("Player1 (Net 72.0)")
    );
}

#[test]
fn history_file_that_is_not_a_list_reads_empty() {
    let dir = ScratchDir::new();
    let history = HistoryStore::new(&dir.0);
    std::fs::write(history.path(), "{}").unwrap();
    assert!(history.list().unwrap().is_empty());
}

#[test]
fn export_and_import_files() {
    let dir = ScratchDir::new();
    let path = dir.0.join("exports").join("cup.json");
    let mut state = make_state(2);
    state.players[0].scores = vec![0; HOLE_COUNT];
    export_to_file(&state, &path).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains('\n'), "export should be pretty-printed");
    assert_eq!(import_from_file(&path).unwrap(), state);
}

#[test]
fn import_missing_file_is_read_error() {
    let dir = ScratchDir::new();
    let err = import_from_file(&dir.0.join("missing.json")).unwrap_err();
    assert!(matches!(err, StoreError::Read { .. }));
    assert!(err.to_string().contains("missing.json"));
}

#[test]
fn import_source_application_export() {
    let dir = ScratchDir::new();
    let path = dir.0.join("legacy.json");
    let scores = vec![5; HOLE_COUNT];
    let json = serde_json::json!({
        "config": {
            "par": [4, 4, 3, 5, 4, 4, 3, 5, 4, 4, 4, 3, 5, 4, 4, 3, 5, 4],
            "hiddenHoles": [0, 2, 4, 6, 8, 10, 9, 11, 13, 15, 16, 17],
            "hiddenWeight": 1.5,
            "multiplier": 0.8,
            "limits": { "doubleParCut": true, "maxHdcp": 999 },
            "roundingMode": "round"
        },
        "players": [
            { "id": "player-1700000000000", "name": "Sato", "scores": scores }
        ]
    });
    std::fs::write(&path, json.to_string()).unwrap();

    let state = import_from_file(&path).unwrap();
    assert_eq!(state.config, CompetitionConfig::default());
    let results = rank(&state.players, &state.config, None);
    assert_eq!(results.len(), 1);
    assert!((results[0].net - 75.6).abs() < 1e-9);
}
