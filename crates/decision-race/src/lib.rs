//! Decision arbitration for pending permission requests.
//!
//! This crate provides:
//! - A single-writer-wins decision slot fused with a cancellation signal
//! - The `ResponseChannel` seam implemented by each approval source
//! - The arbiter that races all channels under one global timeout
//!
//! The first channel to commit a final decision wins; every other channel
//! observes the cancellation signal and stops on its own. The arbiter never
//! joins the losers — their late answers are discarded by the slot.

mod arbiter;
mod channel;
mod decision;
mod slot;

pub use arbiter::DecisionArbiter;
pub use channel::ResponseChannel;
pub use decision::Decision;
pub use slot::{CancelSignal, DecisionSlot};
