//! Error types for the Telegram approval channel.

use thiserror::Error;

/// Errors from Bot API calls.
#[derive(Error, Debug)]
pub enum TelegramError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Bot API returned a non-success HTTP status
    #[error("Telegram API error: status {status}")]
    ApiStatus { status: u16 },

    /// Bot API answered with `ok: false`
    #[error("Telegram API rejected the call: {description}")]
    NotOk { description: String },

    /// Expected result payload was missing
    #[error("Telegram API response missing result")]
    MissingResult,
}

/// Result type alias using TelegramError.
pub type TelegramResult<T> = Result<T, TelegramError>;
