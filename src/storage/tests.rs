use crate::catalog::models::RoundLocation;
use crate::geo::models::{GeoPoint, GuessResult};
use crate::geocoding::accuracy::AdminAccuracy;
use crate::geocoding::models::AdminRegions;
use crate::sessions::models::{Averages, FinalSummary, RoundEntry, SessionProgress};
use crate::sessions::session::Session;
use crate::storage::interface::{SessionAccess, SessionRepo};
use crate::storage::results::FileResultStore;
use crate::storage::sessions::HashMapSessionsStorage;
use std::fs;
use std::time::Duration;

fn fake_entry() -> RoundEntry {
    RoundEntry {
        result: GuessResult {
            distance_km: 343.5,
            score: 3972.25,
        },
        guess: GeoPoint::new(51.5, -0.125),
        elapsed_secs: 4.5,
    }
}

fn fake_session() -> Session {
    Session::new(vec![RoundLocation {
        image_id: String::from("paris"),
        latitude: 48.8566,
        longitude: 2.3522,
        admin: AdminRegions::default(),
    }])
    .expect("Failed to create a session.")
}

#[test]
fn test_round_file_is_named_after_round_number() {
    let dir = tempfile::tempdir().expect("Failed to create a temporary directory.");
    let store = FileResultStore::new(dir.path(), "abc");

    store
        .record_round(1, &fake_entry())
        .expect("Failed to record round.");

    let contents = fs::read_to_string(dir.path().join("abc").join("01.txt"))
        .expect("Round file should exist.");
    assert_eq!(contents, "3972.25, 343.5, 51.5, -0.125, 4.5\n");
}

#[test]
fn test_final_summary_file_lists_times() {
    let dir = tempfile::tempdir().expect("Failed to create a temporary directory.");
    let store = FileResultStore::new(dir.path(), "abc");
    let summary = FinalSummary {
        averages: Averages {
            score: 2500.4,
            distance_km: 1034.6,
        },
        accuracy: AdminAccuracy::default(),
        times: vec![1.5, 2.0],
    };

    store
        .record_final(&summary)
        .expect("Failed to record summary.");

    let contents = fs::read_to_string(store.dir().join("full.txt"))
        .expect("Summary file should exist.");
    assert!(contents.starts_with("Average GeoScore: 2500  \nAverage distance: 1035 km"));
    assert!(contents.contains("City Acc: n/a"));
    assert!(contents.ends_with("\n Times: 1.5, 2.0\n"));
}

#[test]
fn test_progress_round_trip() {
    let dir = tempfile::tempdir().expect("Failed to create a temporary directory.");
    let store = FileResultStore::new(dir.path(), "abc");
    assert_eq!(store.load_progress().expect("Failed to load progress."), None);

    let mut session = fake_session();
    session
        .guess(GeoPoint::new(48.0, 2.0))
        .expect("Failed to guess.");
    let progress = session.progress();
    store
        .save_progress(&progress)
        .expect("Failed to save progress.");

    let loaded: SessionProgress = store
        .load_progress()
        .expect("Failed to load progress.")
        .expect("Progress should be saved.");
    assert_eq!(loaded.image_ids, vec![String::from("paris")]);
    assert_eq!(loaded.next_round, 1);
    assert_eq!(loaded.record.len(), 1);
    assert_eq!(
        loaded.record.entries()[0].guess,
        progress.record.entries()[0].guess
    );
}

#[test]
fn test_corrupted_progress_is_an_error() {
    let dir = tempfile::tempdir().expect("Failed to create a temporary directory.");
    let store = FileResultStore::new(dir.path(), "abc");
    fs::create_dir_all(store.dir()).expect("Failed to create session directory.");
    fs::write(store.dir().join("progress.json"), b"{not json").expect("Failed to write.");

    assert!(store.load_progress().is_err());
}

#[tokio::test]
async fn test_hash_map_storage_access() {
    let storage = HashMapSessionsStorage::default();
    storage.insert("abc", fake_session()).await;

    assert!(storage.exists("abc").await);
    assert!(!storage.exists("xyz").await);
    assert_eq!(storage.count().await, 1);

    let outcome = storage
        .update("abc", |session| session.guess(GeoPoint::new(48.8566, 2.3522)))
        .await
        .expect("Session should exist.")
        .expect("Guess should be accepted.");
    assert_eq!(outcome.result.score, 5000.0);

    let guessed = storage
        .read("abc", |session| session.current_round().guessed)
        .await;
    assert_eq!(guessed, Some(true));
    assert_eq!(storage.read("xyz", |session| session.total_rounds()).await, None);
}

#[test]
fn test_whole_numbers_keep_a_decimal_point() {
    let dir = tempfile::tempdir().expect("Failed to create a temporary directory.");
    let store = FileResultStore::new(dir.path(), "abc");
    let entry = RoundEntry {
        result: GuessResult {
            distance_km: 0.0,
            score: 5000.0,
        },
        guess: GeoPoint::new(48.0, 2.0),
        elapsed_secs: 3.0,
    };

    store.record_round(12, &entry).expect("Failed to record round.");

    let contents =
        fs::read_to_string(store.dir().join("12.txt")).expect("Round file should exist.");
    assert_eq!(contents, "5000.0, 0.0, 48.0, 2.0, 3.0\n");
}

#[tokio::test]
async fn test_idle_sessions_are_evicted() {
    let storage = HashMapSessionsStorage::default();
    storage.insert("abc", fake_session()).await;
    storage.insert("def", fake_session()).await;

    assert_eq!(storage.evict_idle(Duration::from_secs(3600)).await, 0);
    assert_eq!(storage.count().await, 2);

    assert_eq!(storage.evict_idle(Duration::ZERO).await, 2);
    assert_eq!(storage.count().await, 0);
    assert!(!storage.exists("abc").await);
}

#[tokio::test]
async fn test_update_of_one_session_leaves_others_readable() {
    let storage = HashMapSessionsStorage::default();
    storage.insert("slow", fake_session()).await;
    storage.insert("fast", fake_session()).await;
    let (started_tx, started_rx) = std::sync::mpsc::channel();
    let (release_tx, release_rx) = std::sync::mpsc::channel::<()>();

    let slow_storage = storage.clone();
    let slow_update = tokio::spawn(async move {
        slow_storage
            .update("slow", move |session| {
                started_tx.send(()).expect("Failed to signal start.");
                release_rx.recv().expect("Failed to wait for release.");
                session.total_rounds()
            })
            .await
    });
    tokio::task::spawn_blocking(move || started_rx.recv())
        .await
        .expect("Failed to join.")
        .expect("Update should start.");

    let rounds = tokio::time::timeout(
        Duration::from_secs(5),
        storage.read("fast", |session| session.total_rounds()),
    )
    .await
    .expect("Reading another session should not wait for the update.");
    assert_eq!(rounds, Some(1));

    release_tx.send(()).expect("Failed to release the update.");
    assert_eq!(slow_update.await.expect("Failed to join."), Some(1));
}
