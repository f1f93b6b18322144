//! Draft Manager: remembers the last-typed domain and selector so an
//! interrupted rule entry can be restored. Drafts are scratch state and never
//! part of the rule set.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::database::KeyValueStore;
use crate::types::errors::StorageError;

pub const DRAFT_DOMAIN_KEY: &str = "tempDomainInput";
pub const DRAFT_SELECTOR_KEY: &str = "tempSelectorInput";

/// Restored draft inputs. Missing values come back as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draft {
    pub domain: String,
    pub selector: String,
}

pub struct DraftManager<'a> {
    store: &'a dyn KeyValueStore,
}

impl<'a> DraftManager<'a> {
    pub fn new(store: &'a dyn KeyValueStore) -> Self {
        Self { store }
    }

    pub fn save_domain(&self, domain: &str) -> Result<(), StorageError> {
        self.store
            .set(DRAFT_DOMAIN_KEY, &Value::String(domain.trim().to_string()))
    }

    pub fn save_selector(&self, selector: &str) -> Result<(), StorageError> {
        self.store
            .set(DRAFT_SELECTOR_KEY, &Value::String(selector.trim().to_string()))
    }

    /// Reads both drafts. Storage faults degrade to empty strings.
    pub fn restore(&self) -> Draft {
        Draft {
            domain: self.read(DRAFT_DOMAIN_KEY),
            selector: self.read(DRAFT_SELECTOR_KEY),
        }
    }

    pub fn clear(&self) -> Result<(), StorageError> {
        self.store.remove(&[DRAFT_DOMAIN_KEY, DRAFT_SELECTOR_KEY])
    }

    fn read(&self, key: &str) -> String {
        match self.store.get(key) {
            Ok(Some(Value::String(s))) => s,
            Ok(_) => String::new(),
            Err(e) => {
                warn!(key, error = %e, "failed to read draft input");
                String::new()
            }
        }
    }
}
