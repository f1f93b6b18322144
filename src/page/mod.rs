//! Page contexts: the document a content script queries and clicks in.

pub mod html_page;

pub use html_page::HtmlPage;

use crate::types::errors::PageError;
use crate::types::page::ElementHandle;

/// A live document that supports selector queries and synthetic clicks.
pub trait PageContext {
    /// URL the document was loaded from.
    fn url(&self) -> &str;
    /// All elements matching `selector`, in document order.
    fn query_selector_all(&self, selector: &str) -> Result<Vec<ElementHandle>, PageError>;
    /// True if the element has a rendered box and is not hidden by styling.
    fn is_visible(&self, element: &ElementHandle) -> bool;
    /// Dispatches one synthetic activation on the element.
    fn click(&mut self, element: &ElementHandle) -> Result<(), PageError>;
}
