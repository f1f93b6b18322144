//! Page Matcher: decides which rules apply to a page and whether their
//! target element is present and visible.

use tracing::{debug, warn};
use url::Url;

use crate::page::PageContext;
use crate::services::validation::compile_selector;
use crate::types::errors::PageError;
use crate::types::page::{ElementHandle, SelectorStatus};
use crate::types::rule::Rule;

fn strip_www(host: &str) -> &str {
    host.strip_prefix("www.").unwrap_or(host)
}

/// True if `page_hostname` equals `rule_domain` or is a strict subdomain of
/// it. Both sides are compared case-insensitively after stripping `www.`.
pub fn domain_matches(rule_domain: &str, page_hostname: &str) -> bool {
    let rule = rule_domain.trim().to_ascii_lowercase();
    let page = page_hostname.trim().to_ascii_lowercase();
    let rule = strip_www(&rule);
    let page = strip_www(&page);

    if rule.is_empty() {
        return false;
    }
    page == rule || page.ends_with(&format!(".{}", rule))
}

/// Hostname of an http(s) URL; `None` for anything a content script cannot
/// run on (`chrome://`, `file://`, `about:` …) or that does not parse.
pub fn scriptable_hostname(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return None;
    }
    parsed.host_str().map(|h| h.to_ascii_lowercase())
}

/// Rules whose domain matches the page at `url`, in list order.
pub fn rules_for_url<'r>(rules: &'r [Rule], url: &str) -> Vec<&'r Rule> {
    let Some(host) = scriptable_hostname(url) else {
        return Vec::new();
    };
    rules
        .iter()
        .filter(|rule| domain_matches(&rule.domain, &host))
        .collect()
}

/// First visible element of `elements`, scanning in the given order.
pub fn first_visible(page: &dyn PageContext, elements: &[ElementHandle]) -> Option<ElementHandle> {
    elements.iter().find(|el| page.is_visible(el)).cloned()
}

/// Status decidable without a page: `Empty` for blank input, `Invalid` when
/// the selector does not parse. `None` means the page has to be asked.
pub fn syntax_status(selector: &str) -> Option<SelectorStatus> {
    if selector.trim().is_empty() {
        return Some(SelectorStatus::Empty);
    }
    if let Err(reason) = compile_selector(selector) {
        debug!(selector, %reason, "selector does not parse");
        return Some(SelectorStatus::Invalid);
    }
    None
}

/// Checks a selector, keeping "does not parse" apart from "not on the page".
pub fn check_selector(selector: &str, page: &dyn PageContext) -> SelectorStatus {
    if let Some(status) = syntax_status(selector) {
        return status;
    }
    match page.query_selector_all(selector) {
        Ok(elements) => {
            if first_visible(page, &elements).is_some() {
                SelectorStatus::Found
            } else {
                SelectorStatus::NotFound
            }
        }
        Err(PageError::InvalidSelector { .. }) => SelectorStatus::Invalid,
        Err(e) => {
            warn!(selector, url = page.url(), error = %e, "selector query failed");
            SelectorStatus::NotFound
        }
    }
}

/// True if at least one visible element matches. Fails closed: blank,
/// invalid or failing selectors read as absent.
pub fn selector_exists(selector: &str, page: &dyn PageContext) -> bool {
    check_selector(selector, page) == SelectorStatus::Found
}
