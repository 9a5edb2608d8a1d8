//! Actions a worker performs, one per dispatch.

use tracing::debug;

use crate::error::SimResult;
use crate::payload::Payload;
use crate::simulation::SimulationContext;

use super::Worker;

// ── DelayedAction ─────────────────────────────────────────────────────

/// A stage that takes `delay` ticks of virtual time.
///
/// Performing it posts the rest of the job back into the simulator at
/// `now + delay`. The simulator it posts to is the one dispatching the
/// worker, reached through the [`SimulationContext`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct DelayedAction {
    delay: u64,
}

impl DelayedAction {
    pub fn new(delay: u64) -> Self {
        DelayedAction { delay }
    }

    /// Processing time of this stage, in ticks.
    pub fn delay(&self) -> u64 {
        self.delay
    }

    /// Post `continuation` at `ctx.now() + delay`.
    pub fn perform(&self, ctx: &mut SimulationContext<'_>, continuation: Worker) -> SimResult<()> {
        debug!(
            job = continuation.name().unwrap_or("-"),
            from = %ctx.now(),
            delay = self.delay,
            remaining = continuation.remaining(),
            "continuation"
        );
        ctx.post_after(self.delay, Payload::Worker(continuation))
    }
}

// ── Action ────────────────────────────────────────────────────────────

/// One unit of a worker's load.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum Action {
    /// Wait a fixed number of ticks before the job resumes.
    Delay(DelayedAction),
}

impl Action {
    /// Shorthand for `Action::Delay(DelayedAction::new(ticks))`.
    pub fn delay(ticks: u64) -> Self {
        Action::Delay(DelayedAction::new(ticks))
    }

    /// Perform the action. `continuation` is the owning worker with this
    /// action already removed from its load; the action decides when (and
    /// whether) it resumes.
    pub fn perform(&self, ctx: &mut SimulationContext<'_>, continuation: Worker) -> SimResult<()> {
        match self {
            Action::Delay(delayed) => delayed.perform(ctx, continuation),
        }
    }
}

impl From<DelayedAction> for Action {
    fn from(action: DelayedAction) -> Self {
        Action::Delay(action)
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Delay(delayed) => write!(f, "Delay({})", delayed.delay),
        }
    }
}
