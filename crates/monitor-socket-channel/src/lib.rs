//! Local-control response channel over the monitor dashboard socket.
//!
//! One connection attempt, one request, at most one reply. An absent socket
//! is the normal "dashboard not running" state, not an error. Reads are
//! bounded so the cancellation signal is observed between them, and the
//! stream is owned by the task so every exit path releases it.

use async_trait::async_trait;
use decision_race::{CancelSignal, Decision, DecisionSlot, ResponseChannel};
use hook_protocol_types::{DecisionReply, PermissionRequestMessage};
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::UnixStream;
use tokio::time::timeout;
use tracing::debug;

/// Bounded wait per read so cancellation is noticed promptly.
const READ_TIMEOUT: Duration = Duration::from_secs(1);
/// Reply buffer size; dashboard replies are a short JSON object.
const REPLY_BUFFER_BYTES: usize = 4096;

/// Local-control channel talking to the claude-monitor dashboard.
pub struct MonitorSocketChannel {
    socket_path: PathBuf,
    request: PermissionRequestMessage,
}

impl MonitorSocketChannel {
    /// Create a channel for one pending permission request.
    pub fn new(socket_path: PathBuf, request: PermissionRequestMessage) -> Self {
        Self {
            socket_path,
            request,
        }
    }
}

#[async_trait]
impl ResponseChannel for MonitorSocketChannel {
    fn name(&self) -> &'static str {
        "monitor-socket"
    }

    async fn run(self: Box<Self>, slot: DecisionSlot, cancel: CancelSignal) {
        let mut stream = match UnixStream::connect(&self.socket_path).await {
            Ok(stream) => stream,
            Err(err) => {
                // Expected when no dashboard is listening.
                debug!(path = %self.socket_path.display(), error = %err, "dashboard not active");
                return;
            }
        };

        let payload = match self.request.to_json() {
            Ok(payload) => payload,
            Err(err) => {
                debug!(error = %err, "failed to serialize permission request");
                return;
            }
        };
        if let Err(err) = stream.write_all(payload.as_bytes()).await {
            debug!(error = %err, "failed to send permission request");
            return;
        }

        let mut buffer = vec![0u8; REPLY_BUFFER_BYTES];
        loop {
            if cancel.is_set() {
                debug!(session_id = %self.request.session_id, "monitor channel cancelled");
                return;
            }

            match timeout(READ_TIMEOUT, stream.read(&mut buffer)).await {
                // Read timed out; loop around and check the signal again.
                Err(_) => continue,
                // Connection closed without an answer.
                Ok(Ok(0)) => return,
                Ok(Ok(bytes_read)) => {
                    if let Some(decision) = decode_reply(&buffer[..bytes_read]) {
                        slot.commit(decision);
                    }
                    // First reply concludes the exchange either way.
                    return;
                }
                Ok(Err(err)) => {
                    debug!(error = %err, "socket read failed");
                    return;
                }
            }
        }
    }
}

/// Decode a dashboard reply. Only the three recognized terminal decisions
/// count; anything else is "no answer".
fn decode_reply(raw: &[u8]) -> Option<Decision> {
    let text = std::str::from_utf8(raw).ok()?;
    let reply = DecisionReply::from_json(text.trim()).ok()?;
    reply.decision.parse().ok()
}
