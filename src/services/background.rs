//! Coordinator-side message handling: requests that page contexts send up
//! to the extension-wide coordinator.
//!
//! Page contexts run on their own threads and talk to the coordinator
//! through a [`BackgroundClient`]; a tokio task owns the receiving end and
//! answers from the rule store.

use std::sync::{Arc, Mutex};

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use crate::app::App;
use crate::database::KeyValueStore;
use crate::managers::rule_manager::{RuleManager, RuleManagerTrait};
use crate::types::errors::MessagingError;
use crate::types::message::{Message, Response};

const BACKGROUND_QUEUE: usize = 32;

/// A page → coordinator request awaiting its reply.
pub struct BackgroundEnvelope {
    pub message: Message,
    pub sender_url: String,
    pub reply: oneshot::Sender<Result<Response, MessagingError>>,
}

/// Handle page contexts use to reach the coordinator.
#[derive(Debug, Clone)]
pub struct BackgroundClient {
    sender: mpsc::Sender<BackgroundEnvelope>,
}

impl BackgroundClient {
    pub fn new(sender: mpsc::Sender<BackgroundEnvelope>) -> Self {
        Self { sender }
    }

    /// Sends a request and blocks for the reply.
    ///
    /// Must be called from outside the async runtime, e.g. a page thread.
    pub fn blocking_request(
        &self,
        message: Message,
        sender_url: &str,
    ) -> Result<Response, MessagingError> {
        let (reply, receiver) = oneshot::channel();
        self.sender
            .blocking_send(BackgroundEnvelope {
                message,
                sender_url: sender_url.to_string(),
                reply,
            })
            .map_err(|_| MessagingError::Disconnected)?;
        receiver
            .blocking_recv()
            .map_err(|_| MessagingError::Disconnected)?
    }

    /// Fire-and-forget: enqueue without waiting for a reply.
    pub fn notify(&self, message: Message, sender_url: &str) {
        let (reply, _) = oneshot::channel();
        let action = message.action();
        let envelope = BackgroundEnvelope {
            message,
            sender_url: sender_url.to_string(),
            reply,
        };
        if let Err(e) = self.sender.try_send(envelope) {
            warn!(action, error = %e, "dropped notification to coordinator");
        }
    }
}

/// Answers a page request from the rule store.
pub fn handle_background_message(
    store: &dyn KeyValueStore,
    message: &Message,
    sender_url: &str,
) -> Result<Response, MessagingError> {
    match message {
        Message::GetRules => {
            let rules = RuleManager::new(store).list_rules();
            debug!(url = sender_url, count = rules.len(), "serving rules to page");
            Ok(Response::Rules { rules })
        }
        Message::ElementClicked { selector } => {
            info!(url = sender_url, selector = ?selector, "element clicked on page");
            Ok(Response::Ack {})
        }
        Message::CheckSelectorExists { .. } | Message::TryClickElement { .. } => {
            Err(MessagingError::Unsupported(message.action().to_string()))
        }
    }
}

/// Starts the coordinator task serving page requests.
///
/// Must be called within a tokio runtime. The task ends when every
/// [`BackgroundClient`] has been dropped.
pub fn spawn_background(app: Arc<Mutex<App>>) -> BackgroundClient {
    let (sender, mut receiver) = mpsc::channel::<BackgroundEnvelope>(BACKGROUND_QUEUE);

    tokio::spawn(async move {
        while let Some(envelope) = receiver.recv().await {
            let result = match app.lock() {
                Ok(state) => {
                    handle_background_message(&state.db, &envelope.message, &envelope.sender_url)
                }
                Err(e) => {
                    warn!(error = %e, "application state poisoned");
                    Err(MessagingError::Disconnected)
                }
            };
            let _ = envelope.reply.send(result);
        }
        debug!("background task stopped");
    });

    BackgroundClient::new(sender)
}
