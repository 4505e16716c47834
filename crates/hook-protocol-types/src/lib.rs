//! Protocol types for the permission hook.
//!
//! This crate defines every wire boundary the hook touches:
//! - The `PermissionRequest` JSON the Claude Code CLI writes to our stdin
//! - The hook-specific decision JSON we write back to stdout
//! - The JSON exchanged with the claude-monitor dashboard socket
//!
//! It also derives the human-readable display summary shown in both the
//! Telegram prompt and the dashboard.

mod display;
mod hook;
mod monitor;

pub use display::{display_summary, MAX_DISPLAY_BYTES};
pub use hook::{DecisionOutput, HookOutput, HookRequest, HookSpecificOutput, HOOK_EVENT_NAME};
pub use monitor::{DecisionReply, PermissionRequestMessage, PERMISSION_REQUEST_TYPE};
