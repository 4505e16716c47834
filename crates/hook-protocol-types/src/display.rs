//! Human-readable summary of a pending tool call.

use serde_json::Value;

/// Maximum byte length of a display summary.
pub const MAX_DISPLAY_BYTES: usize = 300;

/// Derive the one-line summary shown in approval prompts.
///
/// Bash shows the command, file tools show the path, everything else falls
/// back to the serialized input. Truncation never splits a UTF-8 character.
pub fn display_summary(tool_name: &str, tool_input: &Value) -> String {
    match tool_name {
        "Bash" => truncate_utf8(
            tool_input
                .get("command")
                .and_then(Value::as_str)
                .unwrap_or(""),
            MAX_DISPLAY_BYTES,
        ),
        "Edit" | "Write" | "Read" => tool_input
            .get("file_path")
            .and_then(Value::as_str)
            .unwrap_or("")
            .to_string(),
        _ => truncate_utf8(
            &serde_json::to_string(tool_input).unwrap_or_default(),
            MAX_DISPLAY_BYTES,
        ),
    }
}

fn truncate_utf8(content: &str, max_bytes: usize) -> String {
    if content.len() <= max_bytes {
        return content.to_string();
    }

    let mut end = max_bytes;
    while end > 0 && !content.is_char_boundary(end) {
        end -= 1;
    }
    content[..end].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bash_uses_command() {
        let summary = display_summary("Bash", &json!({"command": "ls -la"}));
        assert_eq!(summary, "ls -la");
    }

    #[test]
    fn bash_truncates_long_command() {
        let command = "x".repeat(500);
        let summary = display_summary("Bash", &json!({ "command": command }));
        assert_eq!(summary.len(), MAX_DISPLAY_BYTES);
    }

    #[test]
    fn file_tools_use_file_path() {
        for tool in ["Edit", "Write", "Read"] {
            let summary = display_summary(tool, &json!({"file_path": "/tmp/a.rs"}));
            assert_eq!(summary, "/tmp/a.rs");
        }
    }

    #[test]
    fn unknown_tool_serializes_input() {
        let summary = display_summary("WebFetch", &json!({"url": "https://example.com"}));
        assert!(summary.contains("\"url\""));
        assert!(summary.contains("example.com"));
    }

    #[test]
    fn missing_fields_yield_empty_summary() {
        assert_eq!(display_summary("Bash", &json!({})), "");
        assert_eq!(display_summary("Edit", &json!({})), "");
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let command = "é".repeat(MAX_DISPLAY_BYTES); // 2 bytes each
        let summary = display_summary("Bash", &json!({ "command": command }));
        assert!(summary.len() <= MAX_DISPLAY_BYTES);
        assert!(std::str::from_utf8(summary.as_bytes()).is_ok());
    }
}
