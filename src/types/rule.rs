use serde::{Deserialize, Serialize};

/// Storage key holding the persisted rule list.
pub const RULES_KEY: &str = "autoClickRules";

/// A persisted auto-click rule: click `selector` on pages of `domain`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// Lowercase hostname without a leading `www.`.
    pub domain: String,
    pub selector: String,
    /// Creation-time identifier, used only to target deletion.
    pub id: u64,
}

impl Rule {
    /// Returns true if this rule has the same `(domain, selector)` pair.
    ///
    /// Domain comparison is case-insensitive; selectors compare exactly.
    pub fn same_target(&self, domain: &str, selector: &str) -> bool {
        self.domain.eq_ignore_ascii_case(domain) && self.selector == selector
    }
}
