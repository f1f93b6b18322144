//! RPC method handler for the autoclick JSON-RPC protocol.
//!
//! Kept apart from `rpc_server.rs` so it can be unit-tested independently.
//! `handle_method` dispatches method calls to the rule store, the draft
//! store, the settings engine and the active page context.

use std::sync::{Arc, Mutex};

use serde_json::{json, Value};
use tracing::warn;

use crate::app::App;
use crate::managers::rule_manager::RuleManagerTrait;
use crate::services::auto_clicker::AutoClickOutcome;
use crate::services::background::{spawn_background, BackgroundClient};
use crate::services::page_channel::{spawn_page, PageClient};
use crate::services::page_matcher::{domain_matches, scriptable_hostname, syntax_status};
use crate::services::settings_engine::SettingsEngineTrait;
use crate::types::page::SelectorStatus;

/// Shared state behind every RPC call.
pub struct RpcState {
    pub app: Arc<Mutex<App>>,
    pub background: BackgroundClient,
}

impl RpcState {
    /// Wraps `app` and starts the coordinator task page contexts talk to.
    ///
    /// Must be called within a tokio runtime.
    pub fn new(app: App) -> Self {
        let app = Arc::new(Mutex::new(app));
        let background = spawn_background(app.clone());
        Self { app, background }
    }

    fn active_page(&self) -> Result<Option<PageClient>, String> {
        let a = self.app.lock().map_err(|e| e.to_string())?;
        Ok(a.active_page.clone())
    }
}

fn str_param<'p>(params: &'p Value, name: &str) -> Result<&'p str, String> {
    params
        .get(name)
        .and_then(|v| v.as_str())
        .ok_or_else(|| format!("missing {}", name))
}

/// Rule ids arrive as numbers or as numeric strings.
fn id_param(params: &Value) -> Result<u64, String> {
    match params.get("id") {
        Some(Value::Number(n)) => n.as_u64().ok_or_else(|| format!("invalid id: {}", n)),
        Some(Value::String(s)) => s.trim().parse().map_err(|_| format!("invalid id: {}", s)),
        _ => Err("missing id".to_string()),
    }
}

/// Checks `selector` locally, then against the active page.
async fn check_selector_status(state: &RpcState, selector: &str) -> Result<SelectorStatus, String> {
    if let Some(status) = syntax_status(selector) {
        return Ok(status);
    }
    let Some(page) = state.active_page()? else {
        return Ok(SelectorStatus::Unavailable);
    };
    if scriptable_hostname(page.url()).is_none() {
        return Ok(SelectorStatus::Unavailable);
    }
    match page.check_selector_exists(selector).await {
        Ok(true) => Ok(SelectorStatus::Found),
        Ok(false) => Ok(SelectorStatus::NotFound),
        Err(e) => {
            warn!(url = page.url(), selector, error = %e, "selector check inconclusive");
            Ok(SelectorStatus::Unavailable)
        }
    }
}

/// Dispatch a JSON-RPC method call to the appropriate handler.
///
/// Returns `Ok(Value)` on success or `Err(String)` with an error message.
pub async fn handle_method(state: &RpcState, method: &str, params: &Value) -> Result<Value, String> {
    match method {
        // ─── Rules ───
        "rule.list" => {
            let a = state.app.lock().map_err(|e| e.to_string())?;
            let rules = a.rules().list_rules();
            Ok(json!({"rules": rules}))
        }
        "rule.add" => {
            let domain = str_param(params, "domain")?;
            let selector = str_param(params, "selector")?;
            let (rule, page) = {
                let a = state.app.lock().map_err(|e| e.to_string())?;
                let mut rules = a.rules();
                let rule = rules.add_rule(domain, selector).map_err(|e| e.to_string())?;
                if let Err(e) = a.drafts().clear() {
                    warn!(error = %e, "failed to clear drafts after adding a rule");
                }
                (rule, a.active_page.clone())
            };

            // Give the page that is already open a chance to act on the new rule.
            let clicked = match page {
                Some(page)
                    if scriptable_hostname(page.url())
                        .is_some_and(|host| domain_matches(&rule.domain, &host)) =>
                {
                    page.try_click_element(&rule.selector).await
                }
                _ => false,
            };
            Ok(json!({"rule": rule, "clicked": clicked}))
        }
        "rule.delete" => {
            let id = id_param(params)?;
            let a = state.app.lock().map_err(|e| e.to_string())?;
            let mut rules = a.rules();
            rules.remove_rule(id).map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }
        "rule.clear" => {
            let a = state.app.lock().map_err(|e| e.to_string())?;
            let mut rules = a.rules();
            rules.clear_all();
            a.drafts().clear().map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }

        // ─── Drafts ───
        "draft.save" => {
            let a = state.app.lock().map_err(|e| e.to_string())?;
            let drafts = a.drafts();
            if let Some(domain) = params.get("domain").and_then(|v| v.as_str()) {
                drafts.save_domain(domain).map_err(|e| e.to_string())?;
            }
            if let Some(selector) = params.get("selector").and_then(|v| v.as_str()) {
                drafts.save_selector(selector).map_err(|e| e.to_string())?;
            }
            Ok(json!({"ok": true}))
        }
        "draft.restore" => {
            let a = state.app.lock().map_err(|e| e.to_string())?;
            let draft = a.drafts().restore();
            serde_json::to_value(draft).map_err(|e| e.to_string())
        }

        // ─── Page ───
        "page.open" => {
            let url = str_param(params, "url")?;
            let html = str_param(params, "html")?;
            let settings = {
                let a = state.app.lock().map_err(|e| e.to_string())?;
                a.settings().clone()
            };
            let handle = spawn_page(url, html.to_string(), state.background.clone(), &settings)
                .map_err(|e| e.to_string())?;
            {
                let mut a = state.app.lock().map_err(|e| e.to_string())?;
                a.active_page = Some(handle.client.clone());
            }

            let timeout = settings.messaging.response_timeout();
            let outcome = match tokio::time::timeout(timeout, handle.loaded).await {
                Ok(Ok(outcome)) => outcome,
                _ => {
                    warn!(url, "page did not report its load outcome");
                    AutoClickOutcome::default()
                }
            };
            Ok(json!({"url": url, "matched": outcome.matched, "clicked": outcome.clicked}))
        }
        "page.close" => {
            let mut a = state.app.lock().map_err(|e| e.to_string())?;
            let closed = a.active_page.take().is_some();
            Ok(json!({"closed": closed}))
        }
        "page.check_selector" => {
            let selector = str_param(params, "selector")?.trim();
            let status = check_selector_status(state, selector).await?;
            Ok(json!({"status": status}))
        }
        "page.try_click" => {
            let selector = str_param(params, "selector")?.trim();
            let page = state.active_page()?.ok_or("no active page")?;
            let clicked = page.try_click_element(selector).await;
            Ok(json!({"clicked": clicked}))
        }

        // ─── Settings ───
        "settings.get" => {
            let a = state.app.lock().map_err(|e| e.to_string())?;
            serde_json::to_value(a.settings()).map_err(|e| e.to_string())
        }
        "settings.set" => {
            let key = str_param(params, "key")?;
            let value = params.get("value").cloned().ok_or("missing value")?;
            let mut a = state.app.lock().map_err(|e| e.to_string())?;
            a.settings_engine.set_value(key, value).map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }

        // ─── Ping ───
        "ping" => Ok(json!({"pong": true})),

        _ => Err(format!("unknown method: {}", method)),
    }
}
