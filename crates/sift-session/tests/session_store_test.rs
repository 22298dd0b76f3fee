use std::sync::Arc;
use std::thread;

use proptest::prelude::*;
use sift_core::session::Role;
use sift_session::{Session, SessionStore, MAX_TURNS};
use tempfile::TempDir;

fn open_store(dir: &TempDir) -> SessionStore {
    SessionStore::open(dir.path().join("sessions.json"))
}

// ── Creation and naming ───────────────────────────────────────────────────

#[test]
fn create_generates_id_and_default_name() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir);

    let id = store.create("");
    let session = store.get(&id).unwrap();
    assert_eq!(session.session_id, id);
    assert!(session.name.starts_with("会话-"));
    assert!(session.turns.is_empty());

    let named = store.create("  项目讨论  ");
    assert_eq!(store.get(&named).unwrap().name, "项目讨论");
}

#[test]
fn append_provisions_unknown_sessions_lazily() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir);

    store.append_turn("fresh-id", Role::User, "你好");
    let session = store.get("fresh-id").unwrap();
    assert_eq!(session.name, "会话-fresh-id");
    assert_eq!(session.turns.len(), 1);
}

// ── Read paths never error ────────────────────────────────────────────────

#[test]
fn history_of_unknown_id_is_empty_and_provisions_nothing() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir);

    assert!(store.history("ghost").is_empty());
    assert!(store.get("ghost").is_none());
    assert_eq!(store.session_count(), 0);
}

// ── Turn window ───────────────────────────────────────────────────────────

#[test]
fn window_keeps_exactly_the_most_recent_turns() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir);

    let id = store.create("窗口");
    for i in 1..=35 {
        store.append_turn(&id, Role::User, format!("第{i}轮"));
    }

    let history = store.history(&id);
    assert_eq!(history.len(), MAX_TURNS);
    assert_eq!(history[0].content, "第6轮");
    assert_eq!(history[MAX_TURNS - 1].content, "第35轮");
}

// ── Listing and clearing ──────────────────────────────────────────────────

#[test]
fn list_sorts_by_recency() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir);

    let older = store.create("旧");
    thread::sleep(std::time::Duration::from_millis(5));
    let newer = store.create("新");
    thread::sleep(std::time::Duration::from_millis(5));
    store.append_turn(&older, Role::User, "让旧会话变新");

    let rows = store.list();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].session_id, older);
    assert_eq!(rows[0].turn_count, 1);
    assert_eq!(rows[1].session_id, newer);
}

#[test]
fn clear_removes_entirely() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir);

    let id = store.create("短命");
    assert!(store.clear(&id));
    assert!(store.get(&id).is_none());
    assert!(!store.clear(&id));
}

// ── Persistence ───────────────────────────────────────────────────────────

#[test]
fn snapshot_round_trips_the_full_session_set() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("sessions.json");

    let first = SessionStore::open(&path);
    let id = first.create("持久会话");
    first.append_turn(&id, Role::User, "问题一");
    first.append_turn(&id, Role::Assistant, "回答一");
    let before = first.get(&id).unwrap();
    drop(first);

    let reopened = SessionStore::open(&path);
    assert_eq!(reopened.session_count(), 1);
    let after = reopened.get(&id).unwrap();
    assert_eq!(after, before);
}

#[test]
fn snapshot_is_written_after_each_mutation() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested/sessions.json");

    let store = SessionStore::open(&path);
    let id = store.create("落盘");
    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(raw.contains(&id));

    store.append_turn(&id, Role::User, "独特的内容串");
    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(raw.contains("独特的内容串"));
}

#[test]
fn corrupt_snapshot_starts_empty() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("sessions.json");
    std::fs::write(&path, "not valid json {").unwrap();

    let store = SessionStore::open(&path);
    assert_eq!(store.session_count(), 0);

    // The store still works and overwrites the bad snapshot.
    let id = store.create("恢复");
    drop(store);
    let reopened = SessionStore::open(&path);
    assert!(reopened.get(&id).is_some());
}

// ── Concurrency ───────────────────────────────────────────────────────────

#[test]
fn concurrent_appends_do_not_corrupt_sessions() {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(open_store(&dir));

    let mut handles = vec![];
    for t in 0..4 {
        let store = Arc::clone(&store);
        handles.push(thread::spawn(move || {
            let id = format!("sess{t}");
            for i in 0..50 {
                store.append_turn(&id, Role::User, format!("t{t}-{i}"));
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }

    for t in 0..4 {
        let history = store.history(&format!("sess{t}"));
        assert_eq!(history.len(), MAX_TURNS);
        assert_eq!(history[MAX_TURNS - 1].content, format!("t{t}-49"));
    }
}

// ── Window property ───────────────────────────────────────────────────────

proptest! {
    #[test]
    fn window_never_exceeds_cap(n in 0usize..200) {
        let mut session = Session::new("prop".to_string(), "prop".to_string());
        for i in 0..n {
            session.push_turn(Role::User, format!("{i}"));
        }
        prop_assert_eq!(session.turns.len(), n.min(MAX_TURNS));
        if n > 0 {
            prop_assert_eq!(&session.turns.last().unwrap().content, &format!("{}", n - 1));
        }
    }
}
