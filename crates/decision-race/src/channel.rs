//! The seam each approval source implements.

use crate::{CancelSignal, DecisionSlot};
use async_trait::async_trait;

/// One independent path by which a decision can arrive.
///
/// A channel runs as its own tokio task. It reaches out to its external
/// source, and on an answer calls `slot.commit(..)` — which also broadcasts
/// the stop signal to every competitor. A channel must:
///
/// - observe `cancel` between suspension points and stop promptly once set
/// - treat unreachable prerequisites as a silent no-op, not an error
/// - release any acquired resource on every exit path (the arbiter never
///   joins channel tasks)
#[async_trait]
pub trait ResponseChannel: Send + 'static {
    /// Short name used in log fields.
    fn name(&self) -> &'static str;

    /// Run until a decision is committed, the signal is set, or the source
    /// proves unavailable.
    async fn run(self: Box<Self>, slot: DecisionSlot, cancel: CancelSignal);
}
