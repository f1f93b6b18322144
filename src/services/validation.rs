//! Input validation shared by the rule store and page contexts.
//!
//! Domains are checked against a strict hostname grammar; selectors are
//! checked for syntactic parseability only.

use scraper::Selector;

/// Lowercases, trims and strips one leading `www.`.
pub fn normalize_domain(domain: &str) -> String {
    let lower = domain.trim().to_ascii_lowercase();
    match lower.strip_prefix("www.") {
        Some(rest) => rest.to_string(),
        None => lower,
    }
}

/// Checks a hostname against the rule grammar.
///
/// At least two labels; each label is 1–63 ASCII alphanumerics or hyphens,
/// not starting or ending with a hyphen; the final label is alphabetic with
/// length ≥ 2.
pub fn is_valid_domain(domain: &str) -> bool {
    let labels: Vec<&str> = domain.split('.').collect();
    let Some((tld, rest)) = labels.split_last() else {
        return false;
    };
    if rest.is_empty() {
        return false;
    }
    if tld.len() < 2 || !tld.chars().all(|c| c.is_ascii_alphabetic()) {
        return false;
    }
    rest.iter().all(|label| is_valid_label(label))
}

fn is_valid_label(label: &str) -> bool {
    if label.is_empty() || label.len() > 63 {
        return false;
    }
    if label.starts_with('-') || label.ends_with('-') {
        return false;
    }
    label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

/// Parses a CSS selector, returning the parser's reason on failure.
pub fn compile_selector(selector: &str) -> Result<Selector, String> {
    if selector.trim().is_empty() {
        return Err("selector is empty".to_string());
    }
    Selector::parse(selector).map_err(|e| e.to_string())
}

/// Returns true if the selector is syntactically valid.
pub fn is_valid_selector(selector: &str) -> bool {
    compile_selector(selector).is_ok()
}
