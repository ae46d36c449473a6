use pdf_picker_store::{KeyValueStore, LocalStore, MemoryStore, RedbStore};

#[test]
fn test_redb_store_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("store.redb");

    let mut store = RedbStore::open(&db_path).unwrap();
    store.set("a", "alpha").unwrap();
    store.set("b", "beta").unwrap();
    store.remove("b").unwrap();
    drop(store);

    let store2 = RedbStore::open(&db_path).unwrap();
    assert_eq!(store2.get("a").unwrap().as_deref(), Some("alpha"));
    assert!(store2.get("b").unwrap().is_none());
}

#[test]
fn test_local_store_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("local.redb");

    let mut store = LocalStore::open(&db_path);
    assert!(store.is_persistent());
    store.set("key", "value").unwrap();
    drop(store);

    let store2 = LocalStore::open(&db_path);
    assert_eq!(store2.get("key").unwrap().as_deref(), Some("value"));
}

#[test]
fn test_fallback_store_does_not_persist() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, b"file in the way").unwrap();
    let db_path = blocker.join("store.redb");

    let mut store = LocalStore::open(&db_path);
    assert!(!store.is_persistent());
    store.set("key", "value").unwrap();
    drop(store);

    let store2 = LocalStore::open(&db_path);
    assert!(store2.get("key").unwrap().is_none());
}

fn exercise(store: &mut dyn KeyValueStore) {
    assert!(store.get("k").unwrap().is_none());
    store.set("k", "1").unwrap();
    store.set("k", "2").unwrap();
    assert_eq!(store.get("k").unwrap().as_deref(), Some("2"));
    store.remove("k").unwrap();
    store.remove("k").unwrap();
    assert!(store.get("k").unwrap().is_none());
}

#[test]
fn test_backends_share_semantics() {
    let dir = tempfile::tempdir().unwrap();

    let mut memory = MemoryStore::new();
    exercise(&mut memory);

    let mut redb = RedbStore::open(&dir.path().join("semantics.redb")).unwrap();
    exercise(&mut redb);

    let mut boxed: Box<dyn KeyValueStore> = Box::new(MemoryStore::new());
    exercise(&mut boxed);
}
