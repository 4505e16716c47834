//! Configuration for the hook.
//!
//! Telegram credentials come from a `KEY=VALUE` file next to the monitor
//! data (`~/.claude/monitor/.env`), with the process environment as a
//! fallback. Their absence is normal and simply disables the Telegram
//! channel.

use crate::{CoreResult, Paths};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Well-known dashboard socket address.
pub const DEFAULT_SOCKET_PATH: &str = "/tmp/claude-monitor.sock";

/// Global race timeout (5 min max wait).
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Default log level.
const DEFAULT_LOG_LEVEL: &str = "info";

const BOT_TOKEN_KEY: &str = "TELEGRAM_BOT_TOKEN";
const CHAT_ID_KEY: &str = "TELEGRAM_CHAT_ID";

/// Runtime configuration for one hook invocation.
#[derive(Debug, Clone)]
pub struct Config {
    /// Telegram bot token; `None` disables the Telegram channel.
    pub telegram_bot_token: Option<String>,
    /// Telegram chat to send the prompt to; `None` disables the channel.
    pub telegram_chat_id: Option<String>,
    /// Dashboard socket address.
    pub socket_path: PathBuf,
    /// Global race timeout in seconds.
    pub timeout_secs: u64,
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            telegram_bot_token: None,
            telegram_chat_id: None,
            socket_path: PathBuf::from(DEFAULT_SOCKET_PATH),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl Config {
    /// Load configuration: defaults, then the `.env` file, then the process
    /// environment for any key the file did not provide.
    pub fn load(paths: &Paths) -> CoreResult<Self> {
        let mut config = Self::default();

        let file_values = read_env_file(&paths.env_file())?;
        config.telegram_bot_token = resolve(&file_values, BOT_TOKEN_KEY);
        config.telegram_chat_id = resolve(&file_values, CHAT_ID_KEY);

        Ok(config)
    }

    /// Both Telegram credentials, if present and non-empty.
    pub fn telegram_credentials(&self) -> Option<(&str, &str)> {
        match (&self.telegram_bot_token, &self.telegram_chat_id) {
            (Some(token), Some(chat_id)) if !token.is_empty() && !chat_id.is_empty() => {
                Some((token, chat_id))
            }
            _ => None,
        }
    }
}

fn resolve(file_values: &HashMap<String, String>, key: &str) -> Option<String> {
    file_values
        .get(key)
        .cloned()
        .or_else(|| std::env::var(key).ok())
        .filter(|value| !value.is_empty())
}

/// Parse a `KEY=VALUE` file. Blank lines and `#` comments are skipped,
/// keys and values are trimmed. A missing file yields an empty map.
fn read_env_file(path: &Path) -> CoreResult<HashMap<String, String>> {
    let mut values = HashMap::new();
    if !path.exists() {
        return Ok(values);
    }

    let content = std::fs::read_to_string(path)?;
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((key, value)) = line.split_once('=') {
            values.insert(key.trim().to_string(), value.trim().to_string());
        }
    }

    Ok(values)
}
