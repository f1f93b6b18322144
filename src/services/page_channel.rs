//! Request/response transport between the coordinator and a page context.
//!
//! Each page context runs on a dedicated thread that owns its document.
//! The coordinator reaches it through a [`PageClient`]: every request
//! carries a oneshot reply and is bounded by a timeout, so a page that went
//! away reads as inconclusive instead of hanging the caller.

use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

use crate::page::HtmlPage;
use crate::services::auto_clicker::{apply_rules, AutoClickOutcome};
use crate::services::background::BackgroundClient;
use crate::services::content_script::handle_page_message;
use crate::types::errors::MessagingError;
use crate::types::message::{Message, Response};
use crate::types::settings::AppSettings;

const PAGE_QUEUE: usize = 8;

/// A coordinator → page request awaiting its reply.
pub struct PageEnvelope {
    pub message: Message,
    pub reply: oneshot::Sender<Result<Response, MessagingError>>,
}

/// Coordinator-side handle to one page context.
#[derive(Debug, Clone)]
pub struct PageClient {
    url: String,
    sender: mpsc::Sender<PageEnvelope>,
    timeout: Duration,
}

impl PageClient {
    pub fn new(url: &str, sender: mpsc::Sender<PageEnvelope>, timeout: Duration) -> Self {
        Self {
            url: url.to_string(),
            sender,
            timeout,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Sends `message` and waits for the page's reply.
    ///
    /// # Errors
    /// `Timeout` if the page does not answer in time, `Disconnected` if it
    /// was torn down.
    pub async fn request(&self, message: Message) -> Result<Response, MessagingError> {
        let (reply, receiver) = oneshot::channel();
        let exchange = async {
            self.sender
                .send(PageEnvelope { message, reply })
                .await
                .map_err(|_| MessagingError::Disconnected)?;
            match receiver.await {
                Ok(result) => result,
                Err(_) => Err(MessagingError::Disconnected),
            }
        };

        match tokio::time::timeout(self.timeout, exchange).await {
            Ok(result) => result,
            Err(_) => Err(MessagingError::Timeout(self.timeout)),
        }
    }

    /// Asks whether a visible element matches `selector`.
    pub async fn check_selector_exists(&self, selector: &str) -> Result<bool, MessagingError> {
        let message = Message::CheckSelectorExists {
            selector: selector.to_string(),
        };
        match self.request(message).await? {
            Response::Exists { exists } => Ok(exists),
            _ => Err(MessagingError::UnexpectedResponse(
                "checkSelectorExists".to_string(),
            )),
        }
    }

    /// Asks the page to click `selector`. Any messaging failure reads as
    /// "not clicked".
    pub async fn try_click_element(&self, selector: &str) -> bool {
        let message = Message::TryClickElement {
            selector: selector.to_string(),
        };
        match self.request(message).await {
            Ok(Response::Clicked { clicked }) => clicked,
            Ok(_) => {
                warn!(url = %self.url, selector, "unexpected reply to tryClickElement");
                false
            }
            Err(e) => {
                warn!(url = %self.url, selector, error = %e, "could not reach page");
                false
            }
        }
    }
}

/// A freshly spawned page context.
pub struct PageHandle {
    pub client: PageClient,
    /// Resolves once stored rules have been applied to the page.
    pub loaded: oneshot::Receiver<AutoClickOutcome>,
}

/// Loads `html` as the page at `url` on a new thread.
///
/// On start the page fetches rules from the coordinator, applies the
/// matching ones, reports each click, then serves requests until every
/// [`PageClient`] is dropped.
pub fn spawn_page(
    url: &str,
    html: String,
    background: BackgroundClient,
    settings: &AppSettings,
) -> Result<PageHandle, MessagingError> {
    let (sender, receiver) = mpsc::channel(PAGE_QUEUE);
    let (loaded_tx, loaded_rx) = oneshot::channel();
    let timeout = settings.messaging.response_timeout();
    let auto_click = settings.auto_click.clone();
    let page_url = url.to_string();

    std::thread::Builder::new()
        .name("page-context".to_string())
        .spawn(move || {
            let mut page = HtmlPage::parse(&page_url, &html);

            let rules = match background.blocking_request(Message::GetRules, &page_url) {
                Ok(Response::Rules { rules }) => rules,
                Ok(_) => {
                    warn!(url = %page_url, "unexpected reply to getRules");
                    Vec::new()
                }
                Err(e) => {
                    warn!(url = %page_url, error = %e, "could not fetch rules");
                    Vec::new()
                }
            };

            let outcome = apply_rules(&mut page, &rules, &auto_click);
            for rule in &outcome.clicked {
                background.notify(
                    Message::ElementClicked {
                        selector: Some(rule.selector.clone()),
                    },
                    &page_url,
                );
            }
            let _ = loaded_tx.send(outcome);

            serve_page(&mut page, receiver);
            debug!(url = %page_url, "page context closed");
        })
        .map_err(|e| MessagingError::Spawn(e.to_string()))?;

    Ok(PageHandle {
        client: PageClient::new(url, sender, timeout),
        loaded: loaded_rx,
    })
}

fn serve_page(page: &mut HtmlPage, mut receiver: mpsc::Receiver<PageEnvelope>) {
    while let Some(envelope) = receiver.blocking_recv() {
        let result = handle_page_message(page, &envelope.message);
        let _ = envelope.reply.send(result);
    }
}
