use authentix_core::error::AuthentixError;
use authentix_core::store::{FileStore, KeyValueStore, MemoryStore, SharedStore};

#[test]
fn test_memory_store_requires_open() {
    let mut store = MemoryStore::new();
    assert!(!store.is_open());
    assert!(matches!(store.get("k"), Err(AuthentixError::StoreClosed)));
    assert!(matches!(store.set("k", "v"), Err(AuthentixError::StoreClosed)));

    store.open().unwrap();
    store.set("k", "  v  ").unwrap();
    assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));

    store.close().unwrap();
    assert!(store.get("k").is_err());
    store.open().unwrap();
    assert_eq!(store.get("k").unwrap(), None);
}

#[test]
fn test_blank_value_clears_key() {
    let mut store = MemoryStore::new();
    store.open().unwrap();
    store.set("k", "v").unwrap();
    store.set("k", "   ").unwrap();
    assert_eq!(store.get("k").unwrap(), None);

    store.set("k", "v").unwrap();
    store.clear("k").unwrap();
    store.clear("missing").unwrap();
    assert_eq!(store.get("k").unwrap(), None);
}

#[test]
fn test_file_store_persists_across_sessions() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("prefs.toml");

    let mut store = FileStore::new(&path);
    store.open().unwrap();
    store.set("guest_zip", "10115").unwrap();
    store.set("weird key", "a \"quoted\" value").unwrap();
    store.close().unwrap();
    assert!(path.exists());

    let mut reopened = FileStore::new(&path);
    reopened.open().unwrap();
    assert_eq!(reopened.get("guest_zip").unwrap().as_deref(), Some("10115"));
    assert_eq!(
        reopened.get("weird key").unwrap().as_deref(),
        Some("a \"quoted\" value")
    );

    reopened.clear("guest_zip").unwrap();
    let mut third = FileStore::new(&path);
    third.open().unwrap();
    assert_eq!(third.get("guest_zip").unwrap(), None);
}

#[test]
fn test_file_store_rejects_corrupt_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prefs.toml");
    std::fs::write(&path, "this is = = not toml").unwrap();

    let mut store = FileStore::new(&path);
    assert!(matches!(store.open(), Err(AuthentixError::Store(_))));
    assert!(!store.is_open());
}

#[test]
fn test_shared_store_sees_same_entries() {
    let mut a = SharedStore::new(MemoryStore::new());
    let b = a.clone();
    a.open().unwrap();
    a.set("auth_token", "abc").unwrap();
    assert!(b.is_open());
    assert_eq!(b.get("auth_token").unwrap().as_deref(), Some("abc"));
}

#[test]
fn test_file_store_failed_write_keeps_previous_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.toml");
    let mut store = FileStore::new(&path);
    store.open().unwrap();
    store.set("a", "1").unwrap();

    // A directory where the temp file goes makes every flush fail.
    let blocker = dir.path().join("store.toml.tmp");
    std::fs::create_dir(&blocker).unwrap();

    assert!(store.set("a", "2").is_err());
    assert_eq!(store.get("a").unwrap().as_deref(), Some("1"));
    assert!(store.set("b", "x").is_err());
    assert_eq!(store.get("b").unwrap(), None);
    assert!(store.clear("a").is_err());
    assert_eq!(store.get("a").unwrap().as_deref(), Some("1"));
    assert!(store.set("a", "").is_err());
    assert_eq!(store.get("a").unwrap().as_deref(), Some("1"));

    std::fs::remove_dir(&blocker).unwrap();
    store.close().unwrap();

    let mut reopened = FileStore::new(&path);
    reopened.open().unwrap();
    assert_eq!(reopened.get("a").unwrap().as_deref(), Some("1"));
    assert_eq!(reopened.get("b").unwrap(), None);
}
