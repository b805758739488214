#![allow(clippy::unwrap_used, clippy::expect_used)]

use moodbot::history::MAX_HISTORY;
use moodbot::{Exchange, HistoryBuffer, HistoryStore, Sentiment};
use std::path::PathBuf;

fn store_in(dir: &tempfile::TempDir) -> (HistoryStore, PathBuf) {
    let path = dir.path().join("chat_history.json");
    (HistoryStore::new(&path), path)
}

fn exchange(n: usize) -> Exchange {
    let sentiment = Sentiment::ALL[n % 3];
    Exchange::new(format!("utterance {n}"), format!("response {n}"), sentiment)
}

#[test]
fn missing_file_loads_empty() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (store, _) = store_in(&dir);
    assert!(store.load().is_empty());
}

#[test]
fn empty_file_loads_empty() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (store, path) = store_in(&dir);
    std::fs::write(&path, "").unwrap();
    assert!(store.load().is_empty());

    std::fs::write(&path, "  \n").unwrap();
    assert!(store.load().is_empty());
}

#[test]
fn invalid_json_loads_empty() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (store, path) = store_in(&dir);
    std::fs::write(&path, r#"[["I am sad", "I understand", 0"#).unwrap();
    assert!(store.load().is_empty());
}

#[test]
fn malformed_records_are_dropped() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (store, path) = store_in(&dir);
    std::fs::write(
        &path,
        r#"[
            ["I am sad", "I understand. 🤗", 0],
            ["only two", "fields"]
        ]"#,
    )
    .unwrap();

    let buffer = store.load();
    assert_eq!(buffer.len(), 1);
    assert_eq!(
        buffer.iter().next().unwrap(),
        &Exchange::new("I am sad", "I understand. 🤗", Sentiment::Negative)
    );
}

#[test]
fn dictionary_schema_is_not_accepted() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (store, path) = store_in(&dir);
    std::fs::write(&path, r#"[{"hello": "Hi there!"}, ["hey", "Got it!", 2]]"#).unwrap();

    let buffer = store.load();
    assert_eq!(buffer.len(), 1);
    assert_eq!(buffer.iter().next().unwrap().sentiment, Sentiment::Neutral);
}

#[test]
fn round_trip_preserves_every_size_up_to_capacity() {
    for size in 0..=MAX_HISTORY {
        let dir = tempfile::tempdir().expect("tempdir");
        let (store, _) = store_in(&dir);

        let mut buffer = HistoryBuffer::new();
        for n in 0..size {
            buffer.push(exchange(n));
        }
        store.save(&buffer).expect("save history");

        let reloaded = store.load();
        assert_eq!(reloaded, buffer, "round trip of {size} exchanges");

        store.save(&reloaded).expect("save again");
        assert_eq!(store.load(), buffer);
    }
}

#[test]
fn sixth_append_evicts_first() {
    let mut buffer = HistoryBuffer::new();
    for n in 0..6 {
        buffer.push(exchange(n));
    }
    assert_eq!(buffer.len(), MAX_HISTORY);
    assert!(!buffer.iter().any(|e| e == &exchange(0)));
    let kept: Vec<Exchange> = buffer.iter().cloned().collect();
    assert_eq!(kept, (1..6).map(exchange).collect::<Vec<_>>());
}

#[test]
fn save_replaces_previous_contents() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (store, path) = store_in(&dir);

    let mut first = HistoryBuffer::new();
    first.push(exchange(1));
    first.push(exchange(2));
    store.save(&first).unwrap();

    let mut second = HistoryBuffer::new();
    second.push(exchange(9));
    store.save(&second).unwrap();

    assert_eq!(store.load(), second);
    let raw: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap())
        .expect("saved file is JSON");
    assert_eq!(raw, serde_json::json!([["utterance 9", "response 9", 0]]));
}
