//! Dashboard socket protocol.
//!
//! One JSON request describing the pending permission, answered by at most
//! one JSON reply carrying the decision, on the same connection.

use serde::{Deserialize, Serialize};

/// Message type tag for permission requests sent to the dashboard.
pub const PERMISSION_REQUEST_TYPE: &str = "permission_request";

/// Request sent to the dashboard when a permission is pending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionRequestMessage {
    #[serde(rename = "type")]
    pub message_type: String,
    pub session_id: String,
    pub tool_name: String,
    pub display: String,
    /// Stringified raw tool parameters (the dashboard re-parses as needed).
    pub tool_input: String,
}

impl PermissionRequestMessage {
    /// Create a new permission request message.
    pub fn new(
        session_id: impl Into<String>,
        tool_name: impl Into<String>,
        display: impl Into<String>,
        tool_input: impl Into<String>,
    ) -> Self {
        Self {
            message_type: PERMISSION_REQUEST_TYPE.to_string(),
            session_id: session_id.into(),
            tool_name: tool_name.into(),
            display: display.into(),
            tool_input: tool_input.into(),
        }
    }

    /// Serialize to a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Reply read back from the dashboard.
///
/// Only `"allow"`, `"deny"`, and `"terminal"` are honored by the channel;
/// anything else is treated as no answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionReply {
    #[serde(default)]
    pub decision: String,
}

impl DecisionReply {
    /// Deserialize from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
