use serde::{Deserialize, Serialize};

/// Reference to an element inside a page context, addressed by its
/// position among all elements in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementHandle {
    pub index: usize,
    pub tag: String,
    pub dom_id: Option<String>,
}

/// Outcome of checking a selector against the active page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectorStatus {
    /// Blank input; nothing to check.
    Empty,
    /// The selector does not parse.
    Invalid,
    /// No page is open, the page is not scriptable, or it did not answer.
    Unavailable,
    /// At least one visible element matches.
    Found,
    /// The selector parses but no visible element matches.
    NotFound,
}
