//! Error types for the simulation kernel.
//!
//! Fallible kernel APIs return `SimResult<T>`. Every variant marks a
//! misuse of the kernel rather than a condition a correctly built run
//! is expected to hit, so nothing here is retried.

use thiserror::Error;

use crate::time::VirtualTime;

/// The error type for the simulation kernel.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimError {
    /// `pull` was called on a queue with no pending events.
    #[error("event queue is empty")]
    EmptyQueue,

    /// An event was posted (or surfaced) earlier than the simulator clock.
    #[error("cannot dispatch event at {requested} when current time is {current}")]
    NonCausalEvent {
        requested: VirtualTime,
        current: VirtualTime,
    },

    /// `now + delay` does not fit in a `VirtualTime`.
    #[error("virtual time overflow: {now} + {delay} ticks")]
    TimeOverflow { now: VirtualTime, delay: u64 },

    /// `simulate` was called on a simulator that already ran to completion.
    #[error("simulator has already terminated")]
    AlreadyTerminated,
}

/// Convenience alias for `Result<T, SimError>`.
pub type SimResult<T> = Result<T, SimError>;
