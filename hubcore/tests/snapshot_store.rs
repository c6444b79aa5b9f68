use hubcore::persist::SnapshotStore;
use hubcore::{ModelRecord, Snapshot};
use std::fs;
use tempfile::tempdir;

fn snapshot(date: &str) -> Snapshot {
    Snapshot {
        date: date.into(),
        timestamp: format!("{date}T09:00:00Z"),
        trending_models: vec![ModelRecord {
            id: "acme/foo".into(),
            downloads: 1_500,
            likes: 10,
            ..Default::default()
        }],
        ..Default::default()
    }
}

#[test]
fn save_writes_dated_file_and_latest_mirror() {
    let dir = tempdir().unwrap();
    let store = SnapshotStore::new(dir.path());
    store.save(&snapshot("2026-08-01")).unwrap();

    assert!(store.dated_path("2026-08-01").exists());
    assert!(store.latest_path().exists());

    let loaded = store.load_latest().unwrap();
    assert_eq!(loaded.date, "2026-08-01");
    assert_eq!(loaded.trending_models[0].id, "acme/foo");

    // no temp files left behind
    let leftovers: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .flatten()
        .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty());
}

#[test]
fn latest_mirrors_the_most_recent_save() {
    let dir = tempdir().unwrap();
    let store = SnapshotStore::new(dir.path());
    store.save(&snapshot("2026-08-01")).unwrap();
    store.save(&snapshot("2026-08-02")).unwrap();

    assert_eq!(store.load_latest().unwrap().date, "2026-08-02");
    // the earlier archive is still intact
    assert_eq!(store.load_date("2026-08-01").unwrap().date, "2026-08-01");
}

#[test]
fn archive_dates_are_sorted_and_exclude_latest() {
    let dir = tempdir().unwrap();
    let store = SnapshotStore::new(dir.path());
    for date in ["2026-08-03", "2026-08-01", "2026-08-02"] {
        store.save(&snapshot(date)).unwrap();
    }
    fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

    let dates = store.archive_dates().unwrap();
    assert_eq!(dates, vec!["2026-08-01", "2026-08-02", "2026-08-03"]);
}

#[test]
fn history_returns_last_n_and_skips_unreadable_files() {
    let dir = tempdir().unwrap();
    let store = SnapshotStore::new(dir.path());
    for date in ["2026-08-01", "2026-08-02", "2026-08-03"] {
        store.save(&snapshot(date)).unwrap();
    }
    fs::write(store.dated_path("2026-08-04"), "{ not json").unwrap();

    let history = store.load_history(3).unwrap();
    let dates: Vec<&str> = history.iter().map(|s| s.date.as_str()).collect();
    assert_eq!(dates, vec!["2026-08-02", "2026-08-03"]);
}

#[test]
fn missing_directory_is_an_empty_archive() {
    let dir = tempdir().unwrap();
    let store = SnapshotStore::new(dir.path().join("does-not-exist"));
    assert!(store.archive_dates().unwrap().is_empty());
    assert!(store.load_history(30).unwrap().is_empty());
    assert!(store.load_latest().is_err());
}
