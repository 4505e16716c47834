//! The race coordinator.

use crate::{CancelSignal, Decision, DecisionSlot, ResponseChannel};
use std::time::Duration;
use tracing::{debug, info};

/// Races a set of response channels for a single decision.
#[derive(Debug, Clone)]
pub struct DecisionArbiter {
    timeout: Duration,
}

impl DecisionArbiter {
    /// Create an arbiter with the given global timeout.
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Run the race: spawn every channel, wait for the first commit or the
    /// timeout, return whatever the slot holds.
    ///
    /// Channels still running when the race concludes are abandoned, not
    /// joined; their later writes are rejected by the slot. An empty channel
    /// set resolves immediately to `Undecided`.
    pub async fn race(&self, channels: Vec<Box<dyn ResponseChannel>>) -> Decision {
        let (slot, cancel) = DecisionSlot::new();

        if channels.is_empty() {
            debug!("no response channels available, resolving undecided");
            return Decision::Undecided;
        }

        for channel in channels {
            debug!(channel = channel.name(), "starting response channel");
            spawn_channel(channel, slot.clone(), cancel.clone());
        }

        let mut waiter = cancel.clone();
        match tokio::time::timeout(self.timeout, waiter.cancelled()).await {
            Ok(()) => {
                info!(decision = %slot.get(), "race resolved");
            }
            Err(_) => {
                info!(timeout_secs = self.timeout.as_secs(), "race timed out");
            }
        }

        slot.get()
    }
}

fn spawn_channel(channel: Box<dyn ResponseChannel>, slot: DecisionSlot, cancel: CancelSignal) {
    tokio::spawn(async move {
        channel.run(slot, cancel).await;
    });
}
