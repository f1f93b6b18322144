//! Local key-value storage.
//!
//! Values are JSON documents stored whole under a string key. Every write is
//! a single upsert statement, so replacing a value is atomic.

use rusqlite::{params, OptionalExtension};
use serde_json::Value;
use std::time::{SystemTime, UNIX_EPOCH};

use super::connection::Database;
use crate::types::errors::StorageError;

/// Trait defining key-value storage operations.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StorageError>;
    fn set(&self, key: &str, value: &Value) -> Result<(), StorageError>;
    /// Removes the given keys. Missing keys are ignored.
    fn remove(&self, keys: &[&str]) -> Result<(), StorageError>;
}

impl KeyValueStore for Database {
    fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
        let raw: Option<String> = self
            .connection()
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;

        match raw {
            Some(text) => Ok(Some(serde_json::from_str(&text)?)),
            None => Ok(None),
        }
    }

    fn set(&self, key: &str, value: &Value) -> Result<(), StorageError> {
        let text = serde_json::to_string(value)?;
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs() as i64;
        self.connection().execute(
            "INSERT OR REPLACE INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)",
            params![key, text, now],
        )?;
        Ok(())
    }

    fn remove(&self, keys: &[&str]) -> Result<(), StorageError> {
        for key in keys {
            self.connection()
                .execute("DELETE FROM kv_store WHERE key = ?1", params![key])?;
        }
        Ok(())
    }
}
