use autoclick::page::{HtmlPage, PageContext};
use autoclick::services::click_executor::try_click;

fn three_buttons() -> HtmlPage {
    HtmlPage::parse(
        "https://example.com/",
        r#"<html><body>
            <button class="accept" id="e1">one</button>
            <button class="accept" id="e2" style="visibility:hidden">two</button>
            <button class="accept" id="e3">three</button>
        </body></html>"#,
    )
}

fn clicked_ids(page: &HtmlPage) -> Vec<String> {
    page.clicks()
        .iter()
        .filter_map(|c| c.dom_id.clone())
        .collect()
}

#[test]
fn clicks_only_the_first_visible_match() {
    let mut page = three_buttons();
    assert!(try_click(".accept", &mut page));
    assert_eq!(clicked_ids(&page), vec!["e1"]);
}

#[test]
fn repeated_calls_click_the_same_element() {
    let mut page = three_buttons();
    assert!(try_click(".accept", &mut page));
    assert!(try_click(".accept", &mut page));
    assert_eq!(clicked_ids(&page), vec!["e1", "e1"]);
}

#[test]
fn skips_hidden_leading_matches() {
    let mut page = HtmlPage::parse(
        "https://example.com/",
        r#"<body><a class="go" id="h" style="display:none"></a><a class="go" id="v"></a></body>"#,
    );
    assert!(try_click(".go", &mut page));
    assert_eq!(clicked_ids(&page), vec!["v"]);
}

#[test]
fn nothing_visible_means_no_click() {
    let mut page = HtmlPage::parse(
        "https://example.com/",
        r#"<body><button id="x" hidden>x</button></body>"#,
    );
    assert!(!try_click("#x", &mut page));
    assert!(!try_click("#missing", &mut page));
    assert!(page.clicks().is_empty());
}

#[test]
fn malformed_selector_means_no_click() {
    let mut page = three_buttons();
    assert!(!try_click("[[", &mut page));
    assert!(page.clicks().is_empty());
    assert_eq!(page.url(), "https://example.com/");
}

#[test]
fn clicks_in_document_order_after_table_reparenting() {
    // The stray button is moved in front of the table while parsing.
    let mut page = HtmlPage::parse(
        "https://example.com/",
        r#"<table><tr><td><button class="x" id="inner"></button></td></tr><button class="x" id="outer"></button></table>"#,
    );
    let order: Vec<_> = page
        .query_selector_all(".x")
        .unwrap()
        .into_iter()
        .filter_map(|h| h.dom_id)
        .collect();
    assert_eq!(order, vec!["outer", "inner"]);

    assert!(try_click(".x", &mut page));
    assert_eq!(clicked_ids(&page), vec!["outer"]);
}

#[test]
fn uppercase_important_still_hides() {
    let mut page = HtmlPage::parse(
        "https://example.com/",
        r#"<body><button class="y" id="h" style="display: none !IMPORTANT"></button><button class="y" id="v"></button></body>"#,
    );
    assert!(try_click(".y", &mut page));
    assert_eq!(clicked_ids(&page), vec!["v"]);
}
