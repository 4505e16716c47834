//! Shared decision slot and cancellation signal.
//!
//! Both sides are views over one `tokio::sync::watch` channel, so a commit
//! and the resulting "stop" broadcast happen under a single lock: no channel
//! can ever observe the signal set while the slot is still undecided, and no
//! second writer can slip in between the two.

use crate::Decision;
use tokio::sync::watch;

/// Write side: a cell holding at most one final decision.
#[derive(Debug, Clone)]
pub struct DecisionSlot {
    tx: watch::Sender<Decision>,
}

/// Read side: the broadcast "stop requested" flag channels observe.
///
/// The signal is set exactly when a final decision is committed, and it
/// never reverts.
#[derive(Debug, Clone)]
pub struct CancelSignal {
    rx: watch::Receiver<Decision>,
}

impl DecisionSlot {
    /// Create a fresh slot (holding `Undecided`) and its paired signal.
    pub fn new() -> (Self, CancelSignal) {
        let (tx, rx) = watch::channel(Decision::Undecided);
        (Self { tx }, CancelSignal { rx })
    }

    /// Try to commit a final decision, first writer wins.
    ///
    /// Returns `true` if this call resolved the race. Returns `false` if
    /// another channel already committed, or if `decision` is not final.
    pub fn commit(&self, decision: Decision) -> bool {
        if !decision.is_final() {
            return false;
        }
        self.tx.send_if_modified(|current| {
            if current.is_final() {
                false
            } else {
                *current = decision;
                true
            }
        })
    }

    /// Read the current value.
    pub fn get(&self) -> Decision {
        *self.tx.borrow()
    }
}

impl CancelSignal {
    /// Whether some channel has already committed a decision.
    pub fn is_set(&self) -> bool {
        self.rx.borrow().is_final()
    }

    /// Wait until the signal is set.
    ///
    /// Also resolves if every slot handle has been dropped, since no commit
    /// can happen after that and waiting forever would strand the caller.
    pub async fn cancelled(&mut self) {
        let _ = self.rx.wait_for(|decision| decision.is_final()).await;
    }
}
