//! The remote-approval response channel.

use crate::client::{allow_callback_data, deny_callback_data};
use crate::TelegramClient;
use async_trait::async_trait;
use decision_race::{CancelSignal, Decision, DecisionSlot, ResponseChannel};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

/// Bounded wait per `getUpdates` long poll.
const POLL_TIMEOUT_SECS: u64 = 5;
/// Pause after a transient poll failure before retrying.
const TRANSIENT_BACKOFF: Duration = Duration::from_secs(2);

/// Remote-approval channel backed by a Telegram chat.
pub struct TelegramChannel {
    client: TelegramClient,
    chat_id: String,
    session_id: String,
    tool_name: String,
    display: String,
}

impl TelegramChannel {
    /// Create a channel for one pending permission request.
    pub fn new(
        client: TelegramClient,
        chat_id: impl Into<String>,
        session_id: impl Into<String>,
        tool_name: impl Into<String>,
        display: impl Into<String>,
    ) -> Self {
        Self {
            client,
            chat_id: chat_id.into(),
            session_id: session_id.into(),
            tool_name: tool_name.into(),
            display: display.into(),
        }
    }
}

#[async_trait]
impl ResponseChannel for TelegramChannel {
    fn name(&self) -> &'static str {
        "telegram"
    }

    async fn run(self: Box<Self>, slot: DecisionSlot, mut cancel: CancelSignal) {
        // If the prompt cannot be published there is nothing to poll for;
        // the race simply has one fewer participant.
        let message_id = match self
            .client
            .send_permission_prompt(&self.chat_id, &self.session_id, &self.tool_name, &self.display)
            .await
        {
            Ok(message_id) => message_id,
            Err(err) => {
                debug!(error = %err, "telegram prompt not delivered, channel inactive");
                return;
            }
        };

        // Prime the cursor past anything already queued so stale button
        // presses from earlier sessions are never replayed.
        let mut cursor = match self.client.latest_update_id().await {
            Ok(Some(update_id)) => update_id + 1,
            Ok(None) => 0,
            Err(err) => {
                debug!(error = %err, "could not prime update cursor, starting at 0");
                0
            }
        };

        loop {
            if cancel.is_set() {
                debug!(session_id = %self.session_id, "telegram channel cancelled");
                return;
            }

            let updates = tokio::select! {
                _ = cancel.cancelled() => return,
                result = self.client.poll_callback_updates(cursor, POLL_TIMEOUT_SECS) => {
                    match result {
                        Ok(updates) => updates,
                        Err(err) => {
                            debug!(error = %err, "transient telegram poll failure");
                            tokio::select! {
                                _ = cancel.cancelled() => return,
                                _ = sleep(TRANSIENT_BACKOFF) => {}
                            }
                            continue;
                        }
                    }
                }
            };

            for update in updates {
                // Monotonic watermark: polling at this cursor acknowledges
                // everything before it, so it must never move backwards.
                cursor = cursor.max(update.update_id + 1);

                let Some(callback) = update.callback_query else {
                    continue;
                };
                let Some(decision) = decision_for_callback(&callback.data, &self.session_id)
                else {
                    continue;
                };

                let ack_text = match decision {
                    Decision::Allow => "Allowed",
                    _ => "Denied",
                };
                if let Err(err) = self.client.answer_callback(&callback.id, ack_text).await {
                    warn!(error = %err, "failed to answer callback query");
                }

                let edit_target = callback
                    .message
                    .map(|message| message.message_id)
                    .unwrap_or(message_id);
                if let Err(err) = self
                    .client
                    .edit_message_resolved(&self.chat_id, edit_target, decision)
                    .await
                {
                    warn!(error = %err, "failed to edit prompt message");
                }

                slot.commit(decision);
                return;
            }
        }
    }
}

/// Decode a callback payload into a decision, requiring an exact session
/// match. Uncorrelated payloads yield `None` and must not resolve the race.
pub fn decision_for_callback(data: &str, session_id: &str) -> Option<Decision> {
    if data == allow_callback_data(session_id) {
        Some(Decision::Allow)
    } else if data == deny_callback_data(session_id) {
        Some(Decision::Deny)
    } else {
        None
    }
}
