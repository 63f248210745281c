use club_site::client::{FileTokenStore, TokenStore};
use std::path::PathBuf;

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir()
        .join(format!("club_site_{}_{}", std::process::id(), name))
        .join("session.json")
}

#[test]
fn test_file_store_round_trips_token() {
    let path = temp_path("roundtrip");
    let store = FileTokenStore::new(&path);

    assert_eq!(store.load().unwrap(), None);

    store.save("abc.def.ghi").unwrap();
    assert_eq!(store.load().unwrap().as_deref(), Some("abc.def.ghi"));

    // A fresh handle on the same file sees the token
    let reopened = FileTokenStore::new(&path);
    assert_eq!(reopened.load().unwrap().as_deref(), Some("abc.def.ghi"));

    reopened.clear().unwrap();
    assert_eq!(store.load().unwrap(), None);

    let _ = std::fs::remove_dir_all(path.parent().unwrap());
}

#[test]
fn test_file_store_keeps_unrelated_entries() {
    let path = temp_path("entries");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, r#"{"theme":"dark"}"#).unwrap();

    let store = FileTokenStore::new(&path);
    store.save("token").unwrap();
    store.clear().unwrap();

    let raw: serde_json::Value = serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
    assert_eq!(raw, serde_json::json!({ "theme": "dark" }));

    let _ = std::fs::remove_dir_all(path.parent().unwrap());
}

#[test]
fn test_corrupt_file_is_a_storage_error() {
    let path = temp_path("corrupt");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "not json").unwrap();

    let store = FileTokenStore::new(&path);
    assert!(store.load().is_err());

    let _ = std::fs::remove_dir_all(path.parent().unwrap());
}
