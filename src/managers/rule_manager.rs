//! Rule Manager for autoclick.
//!
//! Implements `RuleManagerTrait`: the persisted list of domain→selector
//! rules, stored as a single JSON array in key-value storage. Every mutation
//! is a read-modify-write of the whole list.

use serde_json::Value;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, info, warn};

use crate::database::KeyValueStore;
use crate::services::validation::{compile_selector, is_valid_domain, normalize_domain};
use crate::types::errors::{RuleError, StorageError};
use crate::types::rule::{Rule, RULES_KEY};

/// Trait defining rule store operations.
pub trait RuleManagerTrait {
    /// Returns the stored rules in insertion order. A storage fault yields
    /// an empty list and a logged warning.
    fn list_rules(&self) -> Vec<Rule>;
    fn add_rule(&mut self, domain: &str, selector: &str) -> Result<Rule, RuleError>;
    /// Removes the rule with `id`. Absent ids are a no-op.
    fn remove_rule(&mut self, id: u64) -> Result<(), RuleError>;
    fn clear_all(&mut self);
}

/// Rule manager backed by a key-value store.
pub struct RuleManager<'a> {
    store: &'a dyn KeyValueStore,
}

impl<'a> RuleManager<'a> {
    /// Creates a new `RuleManager` over the provided store.
    pub fn new(store: &'a dyn KeyValueStore) -> Self {
        Self { store }
    }

    /// Current UNIX time in milliseconds.
    fn now_millis() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }

    /// Picks an id that is time-based but strictly above every existing id.
    fn next_id(rules: &[Rule]) -> u64 {
        let now = Self::now_millis();
        match rules.iter().map(|r| r.id).max() {
            Some(max) if max >= now => max + 1,
            _ => now,
        }
    }

    /// Reads the stored list, failing on storage faults.
    ///
    /// Records that do not deserialize are skipped, never repaired.
    fn load_rules(&self) -> Result<Vec<Rule>, StorageError> {
        let Some(value) = self.store.get(RULES_KEY)? else {
            return Ok(Vec::new());
        };
        let Value::Array(items) = value else {
            warn!(key = RULES_KEY, "stored rule list is not an array, ignoring it");
            return Ok(Vec::new());
        };

        let mut rules = Vec::with_capacity(items.len());
        for item in items {
            match serde_json::from_value::<Rule>(item) {
                Ok(rule) => rules.push(rule),
                Err(e) => warn!(error = %e, "skipping malformed rule record"),
            }
        }
        Ok(rules)
    }

    fn save_rules(&self, rules: &[Rule]) -> Result<(), StorageError> {
        let value = serde_json::to_value(rules)?;
        self.store.set(RULES_KEY, &value)
    }
}

impl<'a> RuleManagerTrait for RuleManager<'a> {
    fn list_rules(&self) -> Vec<Rule> {
        match self.load_rules() {
            Ok(rules) => rules,
            Err(e) => {
                warn!(error = %e, "failed to read rules, returning an empty list");
                Vec::new()
            }
        }
    }

    /// Validates and appends a rule, returning the stored record.
    fn add_rule(&mut self, domain: &str, selector: &str) -> Result<Rule, RuleError> {
        let raw_domain = domain.trim();
        if raw_domain.is_empty() {
            return Err(RuleError::InvalidDomain("domain is empty".to_string()));
        }
        let domain = normalize_domain(raw_domain);
        if !is_valid_domain(&domain) {
            return Err(RuleError::InvalidDomain(raw_domain.to_string()));
        }

        let selector = selector.trim();
        compile_selector(selector).map_err(|reason| RuleError::InvalidSelector {
            selector: selector.to_string(),
            reason,
        })?;

        let mut rules = self.load_rules()?;
        if rules.iter().any(|r| r.same_target(&domain, selector)) {
            return Err(RuleError::DuplicateRule {
                domain,
                selector: selector.to_string(),
            });
        }

        let rule = Rule {
            domain,
            selector: selector.to_string(),
            id: Self::next_id(&rules),
        };
        rules.push(rule.clone());
        self.save_rules(&rules)?;

        info!(id = rule.id, domain = %rule.domain, selector = %rule.selector, "rule added");
        Ok(rule)
    }

    fn remove_rule(&mut self, id: u64) -> Result<(), RuleError> {
        let mut rules = self.load_rules()?;
        let before = rules.len();
        rules.retain(|r| r.id != id);

        if rules.len() == before {
            debug!(id, "no rule with this id, nothing removed");
            return Ok(());
        }

        self.save_rules(&rules)?;
        info!(id, "rule removed");
        Ok(())
    }

    fn clear_all(&mut self) {
        match self.save_rules(&[]) {
            Ok(()) => info!("all rules cleared"),
            Err(e) => warn!(error = %e, "failed to clear rules"),
        }
    }
}
