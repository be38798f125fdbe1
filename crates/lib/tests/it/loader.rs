//! Initial-state loading tests

use roz::{Store, loader};
use serde_json::json;
use tempfile::{NamedTempFile, TempDir};

use crate::helpers::gameworld_state;

#[test]
fn test_load_valid_file() {
    let file = NamedTempFile::new().unwrap();
    std::fs::write(file.path(), gameworld_state().to_string()).unwrap();

    assert_eq!(loader::try_load(file.path()).unwrap(), gameworld_state());
    assert_eq!(loader::load_initial_state(file.path()), gameworld_state());
}

#[test]
fn test_missing_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing.json");

    let err = loader::try_load(&path).unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.module(), "io");

    assert_eq!(loader::load_initial_state(&path), json!({}));
}

#[test]
fn test_invalid_json() {
    let file = NamedTempFile::new().unwrap();
    std::fs::write(file.path(), "{\"app_version\": ").unwrap();

    let err = loader::try_load(file.path()).unwrap_err();
    assert!(!err.is_not_found());
    assert_eq!(err.module(), "serialize");

    assert_eq!(loader::load_initial_state(file.path()), json!({}));
}

#[test]
fn test_empty_file_is_invalid() {
    let file = NamedTempFile::new().unwrap();

    assert_eq!(loader::try_load(file.path()).unwrap_err().module(), "serialize");
    assert_eq!(loader::load_initial_state(file.path()), json!({}));
}

#[test]
fn test_unreadable_path_falls_back_to_empty() {
    // A directory cannot be read as a file
    let dir = TempDir::new().unwrap();

    let err = loader::try_load(dir.path()).unwrap_err();
    assert!(err.is_io_error());
    assert!(!err.is_not_found());

    assert_eq!(loader::load_initial_state(dir.path()), json!({}));
}

#[test]
fn test_non_object_root_is_kept() {
    let file = NamedTempFile::new().unwrap();
    std::fs::write(file.path(), "[1, 2, 3]").unwrap();

    assert_eq!(loader::load_initial_state(file.path()), json!([1, 2, 3]));
}

#[test]
fn test_store_open() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("state.json");
    std::fs::write(&path, r#"{"user_settings": {"theme": "dark"}}"#).unwrap();

    let store = Store::open(&path);
    assert!(!store.is_running());
    assert_eq!(store.get("user_settings.theme"), Some(json!("dark")));

    let empty = Store::open(dir.path().join("other.json"));
    assert_eq!(empty.snapshot(), json!({}));
}
