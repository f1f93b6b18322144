//! Autoclick database layer.
//!
//! Provides SQLite connection management, schema migrations and the
//! key-value storage the rule list and input drafts live in.
//!
//! # Usage
//!
//! ```no_run
//! use autoclick::database::{Database, KeyValueStore};
//!
//! // Open a persistent database
//! let db = Database::open("autoclick.db").expect("failed to open database");
//!
//! // Or use an in-memory database for testing
//! let db = Database::open_in_memory().expect("failed to open in-memory database");
//!
//! db.set("example", &serde_json::json!([1, 2, 3])).expect("write failed");
//! ```

pub mod connection;
pub mod kv_store;
pub mod migrations;

pub use connection::Database;
pub use kv_store::KeyValueStore;
