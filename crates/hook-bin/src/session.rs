//! One permission request end-to-end.
//!
//! Parse the stdin request, register the pending record for the dashboard,
//! race the response channels, then clean up unconditionally and map the
//! decision to the hook's output (or to silence, which tells the CLI to
//! fall back to its own dialog).

use anyhow::Context;
use decision_race::{Decision, DecisionArbiter, ResponseChannel};
use hook_config_and_utils::{Config, Paths};
use hook_protocol_types::{display_summary, HookOutput, HookRequest, PermissionRequestMessage};
use monitor_socket_channel::MonitorSocketChannel;
use pending_permission_store::{PendingRecord, PendingStore};
use std::time::Duration;
use telegram_approvals::{TelegramChannel, TelegramClient};
use tracing::{info, warn};

/// Message shown to the CLI user when a remote channel denies the action.
const DENY_MESSAGE: &str = "Denied from remote";

/// Orchestrates one hook invocation.
pub struct SessionLifecycle {
    config: Config,
    store: PendingStore,
}

impl SessionLifecycle {
    /// Create a lifecycle from loaded configuration.
    pub fn new(config: Config, paths: &Paths) -> Self {
        Self {
            store: PendingStore::new(paths.sessions_dir()),
            config,
        }
    }

    /// Handle one raw request, returning the output to print (if any).
    pub async fn handle(&self, raw_request: &str) -> anyhow::Result<Option<HookOutput>> {
        let request =
            HookRequest::from_json(raw_request).context("invalid permission request on stdin")?;

        let display = display_summary(&request.tool_name, &request.tool_input);
        let tool_input = serde_json::to_string(&request.tool_input).unwrap_or_default();

        // Advisory only: the dashboard shows this file while we wait. A
        // store failure must never abort the session.
        let record = PendingRecord {
            session_id: request.session_id.clone(),
            tool_name: request.tool_name.clone(),
            display: display.clone(),
            tool_input: tool_input.clone(),
            timestamp: request.hook_event_name.clone(),
        };
        if let Err(err) = self.store.register(&record) {
            warn!(error = %err, "could not register pending record");
        }

        let channels = self.build_channels(&request, &display, &tool_input);
        let arbiter = DecisionArbiter::new(Duration::from_secs(self.config.timeout_secs));
        let decision = arbiter.race(channels).await;

        if let Err(err) = self.store.remove(&request.session_id) {
            warn!(error = %err, "could not remove pending record");
        }

        info!(session_id = %request.session_id, decision = %decision, "session resolved");
        Ok(output_for(decision))
    }

    /// Construct every channel whose prerequisites are met. The Telegram
    /// channel needs credentials; the socket channel is always attempted
    /// and self-disables if no dashboard is listening.
    fn build_channels(
        &self,
        request: &HookRequest,
        display: &str,
        tool_input: &str,
    ) -> Vec<Box<dyn ResponseChannel>> {
        let mut channels: Vec<Box<dyn ResponseChannel>> = Vec::new();

        channels.push(Box::new(MonitorSocketChannel::new(
            self.config.socket_path.clone(),
            PermissionRequestMessage::new(
                &request.session_id,
                &request.tool_name,
                display,
                tool_input,
            ),
        )));

        if let Some((bot_token, chat_id)) = self.config.telegram_credentials() {
            channels.push(Box::new(TelegramChannel::new(
                TelegramClient::new(bot_token),
                chat_id,
                &request.session_id,
                &request.tool_name,
                display,
            )));
        }

        channels
    }
}

/// Map a race outcome to the process boundary. Terminal and Undecided
/// produce no output at all, deferring to the CLI's fallback dialog.
fn output_for(decision: Decision) -> Option<HookOutput> {
    match decision {
        Decision::Allow => Some(HookOutput::allow()),
        Decision::Deny => Some(HookOutput::deny(DENY_MESSAGE)),
        Decision::Terminal | Decision::Undecided => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::Instant;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::UnixListener;

    fn test_setup(base_dir: PathBuf, socket_path: PathBuf, timeout_secs: u64) -> SessionLifecycle {
        let paths = Paths::with_base_dir(base_dir);
        let config = Config {
            telegram_bot_token: None,
            telegram_chat_id: None,
            socket_path,
            timeout_secs,
            ..Config::default()
        };
        SessionLifecycle::new(config, &paths)
    }

    fn raw_request(session_id: &str) -> String {
        format!(
            r#"{{"tool_name":"Bash","tool_input":{{"command":"ls"}},"session_id":"{session_id}","hook_event_name":"PermissionRequest"}}"#
        )
    }

    /// Dashboard stand-in: accept one connection and reply with `reply`.
    fn spawn_dashboard(listener: UnixListener, reply: &'static str) {
        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut buffer = vec![0u8; 4096];
            let _ = stream.read(&mut buffer).await.unwrap();
            stream.write_all(reply.as_bytes()).await.unwrap();
        });
    }

    #[test]
    fn decision_to_output_mapping() {
        let allow = output_for(Decision::Allow).unwrap().to_json().unwrap();
        assert!(allow.contains("\"behavior\":\"allow\""));

        let deny = output_for(Decision::Deny).unwrap().to_json().unwrap();
        assert!(deny.contains("\"behavior\":\"deny\""));
        assert!(deny.contains("\"message\":\"Denied from remote\""));

        assert!(output_for(Decision::Terminal).is_none());
        assert!(output_for(Decision::Undecided).is_none());
    }

    #[tokio::test]
    async fn dashboard_deny_produces_deny_output() {
        let dir = tempfile::tempdir().unwrap();
        let socket_path = dir.path().join("monitor.sock");
        let listener = UnixListener::bind(&socket_path).unwrap();
        spawn_dashboard(listener, "{\"decision\":\"deny\"}");

        let lifecycle = test_setup(dir.path().to_path_buf(), socket_path, 10);
        let output = lifecycle.handle(&raw_request("abc")).await.unwrap();

        let json = output.unwrap().to_json().unwrap();
        assert!(json.contains("\"behavior\":\"deny\""));
        assert!(json.contains("Denied from remote"));

        // Pending record cleaned up after the race.
        assert!(!lifecycle.store.record_path("abc").exists());
    }

    #[tokio::test]
    async fn dashboard_allow_produces_allow_output() {
        let dir = tempfile::tempdir().unwrap();
        let socket_path = dir.path().join("monitor.sock");
        let listener = UnixListener::bind(&socket_path).unwrap();
        spawn_dashboard(listener, "{\"decision\":\"allow\"}");

        let lifecycle = test_setup(dir.path().to_path_buf(), socket_path, 10);
        let output = lifecycle.handle(&raw_request("abc")).await.unwrap();

        let json = output.unwrap().to_json().unwrap();
        assert!(json.contains("\"hookEventName\":\"PermissionRequest\""));
        assert!(json.contains("\"behavior\":\"allow\""));
        assert!(!json.contains("message"));
    }

    #[tokio::test]
    async fn terminal_reply_is_silent_and_beats_the_timeout() {
        let dir = tempfile::tempdir().unwrap();
        let socket_path = dir.path().join("monitor.sock");
        let listener = UnixListener::bind(&socket_path).unwrap();
        spawn_dashboard(listener, "{\"decision\":\"terminal\"}");

        let lifecycle = test_setup(dir.path().to_path_buf(), socket_path, 60);
        let start = Instant::now();
        let output = lifecycle.handle(&raw_request("abc")).await.unwrap();

        assert!(output.is_none());
        assert!(start.elapsed() < Duration::from_secs(30));
    }

    #[tokio::test]
    async fn timeout_is_silent_and_record_is_removed() {
        let dir = tempfile::tempdir().unwrap();
        // No dashboard listening, no Telegram credentials.
        let socket_path = dir.path().join("missing.sock");

        let lifecycle = test_setup(dir.path().to_path_buf(), socket_path, 1);
        let output = lifecycle.handle(&raw_request("abc")).await.unwrap();

        assert!(output.is_none());
        assert!(!lifecycle.store.record_path("abc").exists());
    }

    #[tokio::test]
    async fn pending_record_is_visible_during_the_race() {
        let dir = tempfile::tempdir().unwrap();
        let socket_path = dir.path().join("monitor.sock");
        let listener = UnixListener::bind(&socket_path).unwrap();

        let store_path = dir.path().join("sessions").join("abc.permission");
        let probe_path = store_path.clone();
        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut buffer = vec![0u8; 4096];
            let _ = stream.read(&mut buffer).await.unwrap();
            // While we hold the connection open, the record must exist.
            assert!(probe_path.exists());
            stream
                .write_all(b"{\"decision\":\"allow\"}")
                .await
                .unwrap();
        });

        let lifecycle = test_setup(dir.path().to_path_buf(), socket_path, 10);
        lifecycle.handle(&raw_request("abc")).await.unwrap();

        assert!(!store_path.exists());
    }

    #[tokio::test]
    async fn store_failure_does_not_abort_the_session() {
        let dir = tempfile::tempdir().unwrap();
        // Make the sessions dir impossible to create by occupying its path
        // with a regular file.
        let base_dir = dir.path().join("base");
        std::fs::create_dir_all(&base_dir).unwrap();
        std::fs::write(base_dir.join("sessions"), "not a directory").unwrap();

        let lifecycle = test_setup(base_dir, dir.path().join("missing.sock"), 1);
        let output = lifecycle.handle(&raw_request("abc")).await.unwrap();

        assert!(output.is_none());
    }

    #[tokio::test]
    async fn malformed_stdin_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let lifecycle = test_setup(dir.path().to_path_buf(), dir.path().join("m.sock"), 1);

        assert!(lifecycle.handle("not json").await.is_err());
    }
}
