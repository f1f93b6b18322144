//! Click Executor: single-shot activation of the first visible match.

use tracing::{debug, info, warn};

use crate::page::PageContext;
use crate::services::page_matcher::first_visible;

/// Clicks the first visible element matching `selector`, in document order.
///
/// At most one element is clicked per call. Returns false, without acting,
/// when nothing visible matches or the selector is malformed.
pub fn try_click(selector: &str, page: &mut dyn PageContext) -> bool {
    let elements = match page.query_selector_all(selector) {
        Ok(elements) => elements,
        Err(e) => {
            warn!(selector, url = page.url(), error = %e, "click skipped, query failed");
            return false;
        }
    };

    let Some(target) = first_visible(&*page, &elements) else {
        debug!(selector, matched = elements.len(), "no visible element to click");
        return false;
    };

    match page.click(&target) {
        Ok(()) => {
            info!(selector, url = page.url(), index = target.index, "element clicked");
            true
        }
        Err(e) => {
            warn!(selector, error = %e, "click failed");
            false
        }
    }
}
