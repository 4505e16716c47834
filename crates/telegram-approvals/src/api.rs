//! Bot API request and response types (only the fields the hook touches).

use serde::{Deserialize, Serialize};

/// Generic Bot API envelope.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiResponse<T> {
    pub ok: bool,
    #[serde(default)]
    pub description: Option<String>,
    pub result: Option<T>,
}

/// One item from `getUpdates`.
#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    #[serde(default)]
    pub callback_query: Option<CallbackQuery>,
}

/// An inline-button press.
#[derive(Debug, Clone, Deserialize)]
pub struct CallbackQuery {
    pub id: String,
    #[serde(default)]
    pub data: String,
    #[serde(default)]
    pub message: Option<MessageRef>,
}

/// The message a callback query originated from.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageRef {
    pub message_id: i64,
}

#[derive(Debug, Serialize)]
pub(crate) struct SendMessageParams {
    pub chat_id: String,
    pub text: String,
    pub parse_mode: String,
    pub reply_markup: InlineKeyboardMarkup,
}

#[derive(Debug, Serialize)]
pub(crate) struct InlineKeyboardMarkup {
    pub inline_keyboard: Vec<Vec<InlineKeyboardButton>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct InlineKeyboardButton {
    pub text: String,
    pub callback_data: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct GetUpdatesParams {
    pub offset: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_updates: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct AnswerCallbackParams {
    pub callback_query_id: String,
    pub text: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct EditMessageParams {
    pub chat_id: String,
    pub message_id: i64,
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_parses_callback_query() {
        let json = r#"{
            "update_id": 7,
            "callback_query": {
                "id": "cb-1",
                "data": "perm_allow_abc",
                "message": {"message_id": 99}
            }
        }"#;

        let update: Update = serde_json::from_str(json).unwrap();
        assert_eq!(update.update_id, 7);
        let callback = update.callback_query.unwrap();
        assert_eq!(callback.id, "cb-1");
        assert_eq!(callback.data, "perm_allow_abc");
        assert_eq!(callback.message.unwrap().message_id, 99);
    }

    #[test]
    fn update_without_callback_query() {
        let update: Update = serde_json::from_str(r#"{"update_id": 3}"#).unwrap();
        assert!(update.callback_query.is_none());
    }

    #[test]
    fn envelope_carries_description_on_failure() {
        let json = r#"{"ok": false, "description": "Unauthorized"}"#;
        let response: ApiResponse<Vec<Update>> = serde_json::from_str(json).unwrap();
        assert!(!response.ok);
        assert_eq!(response.description.as_deref(), Some("Unauthorized"));
        assert!(response.result.is_none());
    }

    #[test]
    fn get_updates_params_omit_absent_fields() {
        let params = GetUpdatesParams {
            offset: 12,
            limit: None,
            timeout: Some(5),
            allowed_updates: Some(vec!["callback_query".to_string()]),
        };

        let json = serde_json::to_string(&params).unwrap();
        assert!(json.contains("\"offset\":12"));
        assert!(json.contains("\"timeout\":5"));
        assert!(json.contains("\"allowed_updates\":[\"callback_query\"]"));
        assert!(!json.contains("\"limit\""));
    }
}
