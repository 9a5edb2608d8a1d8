//! Workers: one simulated job moving through a chain of timed stages.
//!
//! A worker holds its remaining load as an ordered list of [`Action`]s.
//! Each dispatch performs exactly the front action and hands the rest of
//! the worker to it as a continuation. A [`DelayedAction`] re-posts that
//! continuation after its delay, so a job posted once unfolds into one
//! event per action without the simulator knowing the job's shape.
//!
//! | Sub-module | Contents |
//! |---|---|
//! | [`action`] | [`Action`], [`DelayedAction`] |

pub mod action;

use std::collections::VecDeque;

use tracing::debug;

use crate::error::SimResult;
use crate::simulation::SimulationContext;

pub use action::{Action, DelayedAction};

/// The remaining work of one simulated job.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct Worker {
    name: Option<String>,
    load: VecDeque<Action>,
}

impl Worker {
    /// Create a worker that performs `load` in order.
    pub fn new(load: impl IntoIterator<Item = Action>) -> Self {
        Worker {
            name: None,
            load: load.into_iter().collect(),
        }
    }

    /// Like [`Worker::new`], with a name that shows up in logs.
    pub fn named(name: impl Into<String>, load: impl IntoIterator<Item = Action>) -> Self {
        Worker {
            name: Some(name.into()),
            load: load.into_iter().collect(),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Actions not yet performed, front first.
    pub fn load(&self) -> &VecDeque<Action> {
        &self.load
    }

    pub fn remaining(&self) -> usize {
        self.load.len()
    }

    /// A worker with an empty load has finished its job.
    pub fn is_complete(&self) -> bool {
        self.load.is_empty()
    }

    /// Perform the next action at `ctx.now()`.
    ///
    /// The worker is consumed: what is left of it travels with the
    /// action as the continuation. An empty load does nothing.
    pub fn run(mut self, ctx: &mut SimulationContext<'_>) -> SimResult<()> {
        let Some(action) = self.load.pop_front() else {
            debug!(job = self.name().unwrap_or("-"), time = %ctx.now(), "job complete");
            return Ok(());
        };
        action.perform(ctx, self)
    }
}

impl std::fmt::Display for Worker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Worker({}", self.name.as_deref().unwrap_or("-"))?;
        for action in &self.load {
            write!(f, ", {}", action)?;
        }
        write!(f, ")")
    }
}
