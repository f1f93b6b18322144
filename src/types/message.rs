//! Messages exchanged between the coordinator and page contexts.

use serde::{Deserialize, Serialize};

use super::rule::Rule;

/// Request sent across the coordinator/page boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Message {
    /// Coordinator → page: is a visible element matching `selector` present?
    CheckSelectorExists { selector: String },
    /// Coordinator → page: click the first visible match of `selector`.
    TryClickElement { selector: String },
    /// Page → coordinator: fetch the stored rule list.
    GetRules,
    /// Page → coordinator: an element was clicked. Fire-and-forget.
    ElementClicked {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        selector: Option<String>,
    },
}

impl Message {
    /// Wire name of the message kind.
    pub fn action(&self) -> &'static str {
        match self {
            Message::CheckSelectorExists { .. } => "checkSelectorExists",
            Message::TryClickElement { .. } => "tryClickElement",
            Message::GetRules => "getRules",
            Message::ElementClicked { .. } => "elementClicked",
        }
    }
}

/// Reply to a [`Message`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Response {
    Exists { exists: bool },
    Clicked { clicked: bool },
    Rules { rules: Vec<Rule> },
    Ack {},
}
