//! Tests for the JSON-RPC method dispatcher.

use autoclick::app::App;
use autoclick::database::Database;
use autoclick::rpc_handler::{handle_method, RpcState};
use autoclick::services::settings_engine::SettingsEngine;
use serde_json::{json, Value};
use tempfile::TempDir;

const PAGE_HTML: &str = r#"<html><body>
    <div class="banner"><button id="accept">Accept</button></div>
    <button id="ghost" hidden>Ghost</button>
</body></html>"#;

fn setup() -> (TempDir, RpcState) {
    let dir = TempDir::new().unwrap();
    let settings_path = dir.path().join("settings.json").to_string_lossy().to_string();
    let app = App::with_database(
        Database::open_in_memory().unwrap(),
        SettingsEngine::new(Some(settings_path)),
    );
    (dir, RpcState::new(app))
}

async fn call(state: &RpcState, method: &str, params: Value) -> Result<Value, String> {
    handle_method(state, method, &params).await
}

async fn open(state: &RpcState, url: &str) -> Value {
    call(state, "page.open", json!({"url": url, "html": PAGE_HTML}))
        .await
        .unwrap()
}

#[tokio::test]
async fn test_ping() {
    let (_dir, state) = setup();
    assert_eq!(call(&state, "ping", json!({})).await, Ok(json!({"pong": true})));
}

#[tokio::test]
async fn test_unknown_method() {
    let (_dir, state) = setup();
    assert_eq!(
        call(&state, "rule.explode", json!({})).await,
        Err("unknown method: rule.explode".to_string())
    );
}

#[tokio::test]
async fn test_rule_add_list_delete() {
    let (_dir, state) = setup();

    let added = call(&state, "rule.add", json!({"domain": "www.Example.com", "selector": "#accept"}))
        .await
        .unwrap();
    assert_eq!(added["rule"]["domain"], "example.com");
    assert_eq!(added["clicked"], false);

    let listed = call(&state, "rule.list", json!({})).await.unwrap();
    assert_eq!(listed["rules"].as_array().unwrap().len(), 1);

    // ids are accepted as strings too
    let id = added["rule"]["id"].as_u64().unwrap().to_string();
    assert_eq!(
        call(&state, "rule.delete", json!({"id": id})).await,
        Ok(json!({"ok": true}))
    );
    let listed = call(&state, "rule.list", json!({})).await.unwrap();
    assert!(listed["rules"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_rule_add_errors() {
    let (_dir, state) = setup();

    assert_eq!(
        call(&state, "rule.add", json!({"selector": "#a"})).await,
        Err("missing domain".to_string())
    );
    let err = call(&state, "rule.add", json!({"domain": "nope", "selector": "#a"}))
        .await
        .unwrap_err();
    assert!(err.starts_with("Invalid domain"), "{err}");

    let err = call(&state, "rule.add", json!({"domain": "a.com", "selector": "[["}))
        .await
        .unwrap_err();
    assert!(err.starts_with("Invalid CSS selector"), "{err}");

    call(&state, "rule.add", json!({"domain": "a.com", "selector": "#a"}))
        .await
        .unwrap();
    let err = call(&state, "rule.add", json!({"domain": "A.com", "selector": "#a"}))
        .await
        .unwrap_err();
    assert!(err.starts_with("Rule already exists"), "{err}");
}

#[tokio::test]
async fn test_rule_delete_bad_ids() {
    let (_dir, state) = setup();
    assert_eq!(
        call(&state, "rule.delete", json!({})).await,
        Err("missing id".to_string())
    );
    assert_eq!(
        call(&state, "rule.delete", json!({"id": "abc"})).await,
        Err("invalid id: abc".to_string())
    );
    assert_eq!(
        call(&state, "rule.delete", json!({"id": 12345})).await,
        Ok(json!({"ok": true}))
    );
}

#[tokio::test]
async fn test_drafts_round_trip_and_clear_on_add() {
    let (_dir, state) = setup();

    call(&state, "draft.save", json!({"domain": " example.com "}))
        .await
        .unwrap();
    call(&state, "draft.save", json!({"selector": "#accept"}))
        .await
        .unwrap();
    assert_eq!(
        call(&state, "draft.restore", json!({})).await,
        Ok(json!({"domain": "example.com", "selector": "#accept"}))
    );

    call(&state, "rule.add", json!({"domain": "example.com", "selector": "#accept"}))
        .await
        .unwrap();
    assert_eq!(
        call(&state, "draft.restore", json!({})).await,
        Ok(json!({"domain": "", "selector": ""}))
    );
}

#[tokio::test]
async fn test_rule_clear_also_clears_drafts() {
    let (_dir, state) = setup();
    call(&state, "rule.add", json!({"domain": "a.com", "selector": "#a"}))
        .await
        .unwrap();
    call(&state, "draft.save", json!({"domain": "b.com"}))
        .await
        .unwrap();

    assert_eq!(call(&state, "rule.clear", json!({})).await, Ok(json!({"ok": true})));
    let listed = call(&state, "rule.list", json!({})).await.unwrap();
    assert!(listed["rules"].as_array().unwrap().is_empty());
    assert_eq!(
        call(&state, "draft.restore", json!({})).await.unwrap()["domain"],
        ""
    );
}

#[tokio::test]
async fn test_page_open_applies_matching_rule() {
    let (_dir, state) = setup();
    call(&state, "rule.add", json!({"domain": "example.com", "selector": ".banner button"}))
        .await
        .unwrap();

    let opened = open(&state, "https://shop.example.com/").await;
    assert_eq!(opened["matched"], 1);
    assert_eq!(opened["clicked"].as_array().unwrap().len(), 1);

    let opened = open(&state, "https://elsewhere.org/").await;
    assert_eq!(opened["matched"], 0);
}

#[tokio::test]
async fn test_rule_add_clicks_on_open_page() {
    let (_dir, state) = setup();
    open(&state, "https://example.com/").await;

    let added = call(&state, "rule.add", json!({"domain": "example.com", "selector": "#accept"}))
        .await
        .unwrap();
    assert_eq!(added["clicked"], true);

    let added = call(&state, "rule.add", json!({"domain": "other.org", "selector": "#accept"}))
        .await
        .unwrap();
    assert_eq!(added["clicked"], false);
}

#[tokio::test]
async fn test_check_selector_statuses() {
    let (_dir, state) = setup();
    let status = |v: Result<Value, String>| v.unwrap()["status"].as_str().unwrap().to_string();

    assert_eq!(status(call(&state, "page.check_selector", json!({"selector": "  "})).await), "empty");
    assert_eq!(status(call(&state, "page.check_selector", json!({"selector": "[["})).await), "invalid");
    assert_eq!(status(call(&state, "page.check_selector", json!({"selector": "#accept"})).await), "unavailable");

    open(&state, "https://example.com/").await;
    assert_eq!(status(call(&state, "page.check_selector", json!({"selector": "#accept"})).await), "found");
    assert_eq!(status(call(&state, "page.check_selector", json!({"selector": "#ghost"})).await), "not_found");

    open(&state, "chrome://settings").await;
    assert_eq!(status(call(&state, "page.check_selector", json!({"selector": "#accept"})).await), "unavailable");
}

#[tokio::test]
async fn test_try_click_and_close() {
    let (_dir, state) = setup();
    assert_eq!(
        call(&state, "page.try_click", json!({"selector": "#accept"})).await,
        Err("no active page".to_string())
    );

    open(&state, "https://example.com/").await;
    assert_eq!(
        call(&state, "page.try_click", json!({"selector": "#accept"})).await,
        Ok(json!({"clicked": true}))
    );
    assert_eq!(
        call(&state, "page.try_click", json!({"selector": "#ghost"})).await,
        Ok(json!({"clicked": false}))
    );

    assert_eq!(call(&state, "page.close", json!({})).await, Ok(json!({"closed": true})));
    assert_eq!(call(&state, "page.close", json!({})).await, Ok(json!({"closed": false})));
}

#[tokio::test]
async fn test_settings_get_and_set() {
    let (_dir, state) = setup();

    let settings = call(&state, "settings.get", json!({})).await.unwrap();
    assert_eq!(settings["auto_click"]["enabled"], true);

    call(&state, "settings.set", json!({"key": "auto_click.enabled", "value": false}))
        .await
        .unwrap();
    let settings = call(&state, "settings.get", json!({})).await.unwrap();
    assert_eq!(settings["auto_click"]["enabled"], false);

    call(&state, "rule.add", json!({"domain": "example.com", "selector": "#accept"}))
        .await
        .unwrap();
    let opened = open(&state, "https://example.com/").await;
    assert_eq!(opened["matched"], 0);

    let err = call(&state, "settings.set", json!({"key": "nope.key", "value": 1}))
        .await
        .unwrap_err();
    assert!(err.starts_with("Invalid settings key"), "{err}");
    assert_eq!(
        call(&state, "settings.set", json!({"key": "auto_click.enabled"})).await,
        Err("missing value".to_string())
    );
}
