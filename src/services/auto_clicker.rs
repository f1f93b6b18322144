//! Auto Clicker: applies stored rules to a freshly loaded page.

use tracing::{debug, info};

use crate::page::PageContext;
use crate::services::click_executor::try_click;
use crate::services::page_matcher::rules_for_url;
use crate::types::rule::Rule;
use crate::types::settings::AutoClickSettings;

/// What happened when rules were applied to a page.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct AutoClickOutcome {
    /// Rules whose domain matched the page.
    pub matched: usize,
    /// Rules that clicked an element, in the order they fired.
    pub clicked: Vec<Rule>,
}

/// Runs `try_click` for every rule matching the page, in list order.
///
/// With `stop_after_first_click` the first rule that clicks ends the pass,
/// so at most one click happens per page load.
pub fn apply_rules(
    page: &mut dyn PageContext,
    rules: &[Rule],
    settings: &AutoClickSettings,
) -> AutoClickOutcome {
    let mut outcome = AutoClickOutcome::default();
    if !settings.enabled {
        debug!(url = page.url(), "auto-click disabled");
        return outcome;
    }

    let url = page.url().to_string();
    let matching = rules_for_url(rules, &url);
    outcome.matched = matching.len();

    for rule in matching {
        if try_click(&rule.selector, page) {
            outcome.clicked.push(rule.clone());
            if settings.stop_after_first_click {
                break;
            }
        }
    }

    info!(
        url = %url,
        matched = outcome.matched,
        clicked = outcome.clicked.len(),
        "rules applied"
    );
    outcome
}
