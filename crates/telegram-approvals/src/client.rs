//! Bot API client.

use crate::api::{
    AnswerCallbackParams, ApiResponse, EditMessageParams, GetUpdatesParams, InlineKeyboardButton,
    InlineKeyboardMarkup, MessageRef, SendMessageParams, Update,
};
use crate::error::{TelegramError, TelegramResult};
use decision_race::Decision;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

const API_BASE: &str = "https://api.telegram.org";
/// Upper bound on any single API call, long polls included.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Client for the Telegram Bot API, scoped to one bot token.
#[derive(Debug, Clone)]
pub struct TelegramClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl TelegramClient {
    /// Create a client for the given bot token.
    pub fn new(bot_token: &str) -> Self {
        Self::with_base_url(format!("{API_BASE}/bot{bot_token}"))
    }

    /// Create a client against a custom API base (self-hosted Bot API
    /// server, or a local fixture in tests).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();

        Self {
            http_client,
            base_url: base_url.into(),
        }
    }

    /// Send the permission prompt with inline Allow/Deny buttons.
    ///
    /// The buttons' callback data embeds the session id so replies can be
    /// correlated. Returns the sent message id.
    pub async fn send_permission_prompt(
        &self,
        chat_id: &str,
        session_id: &str,
        tool_name: &str,
        display: &str,
    ) -> TelegramResult<i64> {
        let params = SendMessageParams {
            chat_id: chat_id.to_string(),
            text: prompt_text(tool_name, display),
            parse_mode: "Markdown".to_string(),
            reply_markup: InlineKeyboardMarkup {
                inline_keyboard: vec![vec![
                    InlineKeyboardButton {
                        text: "Allow".to_string(),
                        callback_data: allow_callback_data(session_id),
                    },
                    InlineKeyboardButton {
                        text: "Deny".to_string(),
                        callback_data: deny_callback_data(session_id),
                    },
                ]],
            },
        };

        let message: MessageRef = self.call("sendMessage", &params).await?;
        Ok(message.message_id)
    }

    /// Fetch the most recent update id, used to prime the polling cursor so
    /// button presses that predate this session are skipped.
    pub async fn latest_update_id(&self) -> TelegramResult<Option<i64>> {
        let params = GetUpdatesParams {
            offset: -1,
            limit: Some(1),
            timeout: None,
            allowed_updates: None,
        };

        let updates: Vec<Update> = self.call("getUpdates", &params).await?;
        Ok(updates.last().map(|update| update.update_id))
    }

    /// Long-poll for callback-query updates at the given cursor.
    ///
    /// Passing the cursor acknowledges everything before it; Telegram will
    /// not redeliver those updates.
    pub async fn poll_callback_updates(
        &self,
        offset: i64,
        timeout_secs: u64,
    ) -> TelegramResult<Vec<Update>> {
        let params = GetUpdatesParams {
            offset,
            limit: None,
            timeout: Some(timeout_secs),
            allowed_updates: Some(vec!["callback_query".to_string()]),
        };

        self.call("getUpdates", &params).await
    }

    /// Answer a callback query (clears the client-side spinner).
    pub async fn answer_callback(&self, callback_id: &str, text: &str) -> TelegramResult<()> {
        let params = AnswerCallbackParams {
            callback_query_id: callback_id.to_string(),
            text: text.to_string(),
        };

        let _: serde_json::Value = self.call("answerCallbackQuery", &params).await?;
        Ok(())
    }

    /// Edit the prompt message to show the resolved outcome.
    pub async fn edit_message_resolved(
        &self,
        chat_id: &str,
        message_id: i64,
        decision: Decision,
    ) -> TelegramResult<()> {
        let params = EditMessageParams {
            chat_id: chat_id.to_string(),
            message_id,
            text: resolved_text(decision),
        };

        let _: serde_json::Value = self.call("editMessageText", &params).await?;
        Ok(())
    }

    async fn call<P: Serialize, R: DeserializeOwned>(
        &self,
        method: &str,
        params: &P,
    ) -> TelegramResult<R> {
        let url = format!("{}/{}", self.base_url, method);
        let response = self.http_client.post(&url).json(params).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            tracing::debug!(method, status, "Telegram API call failed");
            return Err(TelegramError::ApiStatus { status });
        }

        let envelope: ApiResponse<R> = response.json().await?;
        if !envelope.ok {
            return Err(TelegramError::NotOk {
                description: envelope.description.unwrap_or_default(),
            });
        }

        envelope.result.ok_or(TelegramError::MissingResult)
    }
}

/// Callback data for the Allow button of a session.
pub(crate) fn allow_callback_data(session_id: &str) -> String {
    format!("perm_allow_{session_id}")
}

/// Callback data for the Deny button of a session.
pub(crate) fn deny_callback_data(session_id: &str) -> String {
    format!("perm_deny_{session_id}")
}

fn prompt_text(tool_name: &str, display: &str) -> String {
    format!("\u{1f510} *Permission Request*\n\nTool: `{tool_name}`\n```\n{display}\n```")
}

fn resolved_text(decision: Decision) -> String {
    let result = match decision {
        Decision::Allow => "\u{2705} Allowed",
        _ => "\u{274c} Denied",
    };
    format!("\u{1f510} Permission Request\n\nResult: {result}")
}
