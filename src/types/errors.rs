use std::time::Duration;

use thiserror::Error;

// === RuleError ===

/// Errors reported when creating or removing rules.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuleError {
    /// The domain fails the hostname grammar.
    #[error("Invalid domain: {0}")]
    InvalidDomain(String),
    /// The selector does not parse.
    #[error("Invalid CSS selector '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },
    /// An identical `(domain, selector)` pair is already stored.
    #[error("Rule already exists: {domain} {selector}")]
    DuplicateRule { domain: String, selector: String },
    /// The rule list could not be read or written.
    #[error("Rule storage error: {0}")]
    StorageError(String),
}

impl From<StorageError> for RuleError {
    fn from(err: StorageError) -> Self {
        RuleError::StorageError(err.to_string())
    }
}

// === StorageError ===

/// Errors from the key-value storage layer.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("Storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

// === PageError ===

/// Errors raised by a page context while querying or clicking.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PageError {
    #[error("Invalid CSS selector '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },
    /// The handle does not refer to an element of this page.
    #[error("Unknown element: #{0}")]
    UnknownElement(usize),
}

// === MessagingError ===

/// Errors on the coordinator ↔ page messaging channel.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MessagingError {
    /// The peer did not answer within the allotted time.
    #[error("Page did not respond within {0:?}")]
    Timeout(Duration),
    /// The peer was torn down before answering.
    #[error("Message channel disconnected")]
    Disconnected,
    /// The receiving side does not handle this message kind.
    #[error("Unsupported message: {0}")]
    Unsupported(String),
    /// The peer answered with a reply of the wrong shape.
    #[error("Unexpected response to {0}")]
    UnexpectedResponse(String),
    /// The page context could not be started.
    #[error("Failed to start page context: {0}")]
    Spawn(String),
}

// === SettingsError ===

/// Errors related to settings management.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// An I/O error occurred while reading or writing settings.
    #[error("Settings I/O error: {0}")]
    IoError(String),
    /// Failed to serialize or deserialize settings.
    #[error("Settings serialization error: {0}")]
    SerializationError(String),
    /// The provided settings key is invalid.
    #[error("Invalid settings key: {0}")]
    InvalidKey(String),
    /// The provided settings value is invalid.
    #[error("Invalid settings value: {0}")]
    InvalidValue(String),
}
