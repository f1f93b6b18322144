//! Page-side message handling: what a content script answers when the
//! coordinator asks about its document.

use tracing::debug;

use crate::page::PageContext;
use crate::services::click_executor::try_click;
use crate::services::page_matcher::selector_exists;
use crate::types::errors::MessagingError;
use crate::types::message::{Message, Response};

/// Answers a coordinator request against `page`.
///
/// Only `checkSelectorExists` and `tryClickElement` are served here; other
/// kinds belong to the coordinator.
pub fn handle_page_message(
    page: &mut dyn PageContext,
    message: &Message,
) -> Result<Response, MessagingError> {
    debug!(action = message.action(), url = page.url(), "page received message");
    match message {
        Message::CheckSelectorExists { selector } => Ok(Response::Exists {
            exists: selector_exists(selector, &*page),
        }),
        Message::TryClickElement { selector } => Ok(Response::Clicked {
            clicked: try_click(selector, page),
        }),
        Message::GetRules | Message::ElementClicked { .. } => {
            Err(MessagingError::Unsupported(message.action().to_string()))
        }
    }
}
