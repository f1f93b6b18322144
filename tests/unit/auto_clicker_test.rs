//! Unit tests for applying stored rules on page load.

use autoclick::page::HtmlPage;
use autoclick::services::auto_clicker::apply_rules;
use autoclick::types::rule::Rule;
use autoclick::types::settings::AutoClickSettings;

const BODY: &str = r#"<html><body>
    <button id="cookie">Accept cookies</button>
    <button id="newsletter">No thanks</button>
    <button id="gone" style="display:none">Hidden</button>
</body></html>"#;

fn rule(id: u64, domain: &str, selector: &str) -> Rule {
    Rule {
        domain: domain.to_string(),
        selector: selector.to_string(),
        id,
    }
}

fn rules() -> Vec<Rule> {
    vec![
        rule(1, "other.org", "#cookie"),
        rule(2, "example.com", "#gone"),
        rule(3, "example.com", "#cookie"),
        rule(4, "example.com", "#newsletter"),
    ]
}

fn clicked_ids(page: &HtmlPage) -> Vec<String> {
    page.clicks().iter().filter_map(|c| c.dom_id.clone()).collect()
}

#[test]
fn first_clicking_rule_wins_by_default() {
    let mut page = HtmlPage::parse("https://www.example.com/", BODY);
    let outcome = apply_rules(&mut page, &rules(), &AutoClickSettings::default());

    assert_eq!(outcome.matched, 3);
    assert_eq!(outcome.clicked.iter().map(|r| r.id).collect::<Vec<_>>(), vec![3]);
    assert_eq!(clicked_ids(&page), vec!["cookie"]);
}

#[test]
fn every_matching_rule_fires_when_configured() {
    let settings = AutoClickSettings {
        enabled: true,
        stop_after_first_click: false,
    };
    let mut page = HtmlPage::parse("https://shop.example.com/", BODY);
    let outcome = apply_rules(&mut page, &rules(), &settings);

    assert_eq!(outcome.clicked.iter().map(|r| r.id).collect::<Vec<_>>(), vec![3, 4]);
    assert_eq!(clicked_ids(&page), vec!["cookie", "newsletter"]);
}

#[test]
fn disabled_does_nothing() {
    let settings = AutoClickSettings {
        enabled: false,
        stop_after_first_click: true,
    };
    let mut page = HtmlPage::parse("https://example.com/", BODY);
    let outcome = apply_rules(&mut page, &rules(), &settings);

    assert_eq!(outcome.matched, 0);
    assert!(outcome.clicked.is_empty());
    assert!(page.clicks().is_empty());
}

#[test]
fn unmatched_domain_does_nothing() {
    let mut page = HtmlPage::parse("https://unrelated.net/", BODY);
    let outcome = apply_rules(&mut page, &rules(), &AutoClickSettings::default());
    assert_eq!(outcome.matched, 0);
    assert!(page.clicks().is_empty());
}

#[test]
fn unscriptable_url_does_nothing() {
    let mut page = HtmlPage::parse("chrome://example.com/", BODY);
    let outcome = apply_rules(&mut page, &rules(), &AutoClickSettings::default());
    assert_eq!(outcome.matched, 0);
    assert!(page.clicks().is_empty());
}

#[test]
fn empty_rule_list_does_nothing() {
    let mut page = HtmlPage::parse("https://example.com/", BODY);
    let outcome = apply_rules(&mut page, &[], &AutoClickSettings::default());
    assert_eq!(outcome, Default::default());
}
