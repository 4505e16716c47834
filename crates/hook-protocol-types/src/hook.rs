//! Stdin request and stdout output types for the hook process boundary.

use serde::{Deserialize, Serialize};

/// Hook event name echoed back in every decision output.
pub const HOOK_EVENT_NAME: &str = "PermissionRequest";

/// The permission request the CLI writes to the hook's stdin.
///
/// Every field is tolerant of absence: a malformed or partial request
/// should degrade to empty strings rather than fail the hook.
#[derive(Debug, Clone, Deserialize)]
pub struct HookRequest {
    /// Name of the tool awaiting permission (e.g. "Bash", "Edit").
    #[serde(default)]
    pub tool_name: String,
    /// Raw tool parameters, shape depends on the tool.
    #[serde(default = "empty_object")]
    pub tool_input: serde_json::Value,
    /// Correlation key for this pending request.
    #[serde(default)]
    pub session_id: String,
    /// Hook event name as sent by the CLI.
    #[serde(default)]
    pub hook_event_name: String,
}

fn empty_object() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

impl HookRequest {
    /// Deserialize from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// The decision object written to stdout when a channel answers.
///
/// On timeout or an explicit terminal decision nothing is written at all,
/// which tells the CLI to fall back to its own permission dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HookOutput {
    pub hook_specific_output: HookSpecificOutput,
}

/// Inner envelope carrying the event name and the decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HookSpecificOutput {
    pub hook_event_name: String,
    pub decision: DecisionOutput,
}

/// Behavior plus an optional user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionOutput {
    pub behavior: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl HookOutput {
    /// Build an "allow" output.
    pub fn allow() -> Self {
        Self::new("allow", None)
    }

    /// Build a "deny" output with a user-facing message.
    pub fn deny(message: impl Into<String>) -> Self {
        Self::new("deny", Some(message.into()))
    }

    fn new(behavior: &str, message: Option<String>) -> Self {
        Self {
            hook_specific_output: HookSpecificOutput {
                hook_event_name: HOOK_EVENT_NAME.to_string(),
                decision: DecisionOutput {
                    behavior: behavior.to_string(),
                    message,
                },
            },
        }
    }

    /// Serialize to a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
