//! Unit tests for the database layer (connection, migrations, key-value store).

use autoclick::database::migrations::{get_schema_version, CURRENT_SCHEMA_VERSION};
use autoclick::database::{Database, KeyValueStore};
use serde_json::json;
use tempfile::TempDir;

#[test]
fn test_open_in_memory_succeeds() {
    assert!(Database::open_in_memory().is_ok());
}

#[test]
fn test_migrations_create_kv_store_and_record_version() {
    let db = Database::open_in_memory().expect("open_in_memory failed");
    let conn = db.connection();

    let exists: bool = conn
        .query_row(
            "SELECT COUNT(*) > 0 FROM sqlite_master WHERE type='table' AND name='kv_store'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert!(exists, "kv_store table should exist after migrations");
    assert_eq!(get_schema_version(conn), CURRENT_SCHEMA_VERSION);
}

#[test]
fn test_get_missing_key_returns_none() {
    let db = Database::open_in_memory().unwrap();
    assert_eq!(db.get("nothing-here").unwrap(), None);
}

#[test]
fn test_set_overwrites_previous_value() {
    let db = Database::open_in_memory().unwrap();
    db.set("k", &json!([1, 2])).unwrap();
    db.set("k", &json!({"a": "b"})).unwrap();
    assert_eq!(db.get("k").unwrap(), Some(json!({"a": "b"})));
}

#[test]
fn test_remove_ignores_missing_keys() {
    let db = Database::open_in_memory().unwrap();
    db.set("a", &json!("x")).unwrap();
    db.set("b", &json!("y")).unwrap();

    db.remove(&["a", "never-set"]).unwrap();

    assert_eq!(db.get("a").unwrap(), None);
    assert_eq!(db.get("b").unwrap(), Some(json!("y")));
}

#[test]
fn test_values_survive_reopen_and_migrations_are_idempotent() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("store.db");

    {
        let db = Database::open(&path).unwrap();
        db.set("autoClickRules", &json!([{"domain": "a.com", "selector": "#b", "id": 1}]))
            .unwrap();
    }

    let db = Database::open(&path).unwrap();
    assert_eq!(get_schema_version(db.connection()), CURRENT_SCHEMA_VERSION);
    assert_eq!(
        db.get("autoClickRules").unwrap(),
        Some(json!([{"domain": "a.com", "selector": "#b", "id": 1}]))
    );
}
