//! Simulation execution loop.
//!
//! Drains the event queue in time order, advances the virtual clock to
//! each event and dispatches its payload. The loop is synchronous and
//! single-threaded; continuations posted during a dispatch go through
//! [`SimulationContext`], which borrows the queue for that dispatch only.

use tracing::{debug, info, warn};

use crate::error::{SimError, SimResult};
use crate::event::Event;
use crate::payload::Payload;
use crate::queue::EventQueue;
use crate::time::VirtualTime;

// ── Simulation Context ───────────────────────────────────────────────

/// Handle passed to a payload while it is being dispatched.
///
/// Gives the payload the current time and a way to post follow-up
/// events back into the simulator that is dispatching it.
pub struct SimulationContext<'a> {
    pub(crate) queue: &'a mut EventQueue<Payload>,
    pub(crate) now: VirtualTime,
}

impl<'a> SimulationContext<'a> {
    /// Wrap a queue directly. Useful to drive a payload outside a run.
    pub fn new(queue: &'a mut EventQueue<Payload>, now: VirtualTime) -> Self {
        SimulationContext { queue, now }
    }

    /// Current virtual time.
    #[inline]
    pub fn now(&self) -> VirtualTime {
        self.now
    }

    /// Post an event at an absolute time.
    ///
    /// Rejects events scheduled before `now`, which would move the clock
    /// backward.
    pub fn post(&mut self, event: Event<Payload>) -> SimResult<()> {
        if event.time < self.now {
            return Err(SimError::NonCausalEvent {
                requested: event.time,
                current: self.now,
            });
        }
        self.queue.post(event);
        Ok(())
    }

    /// Post `payload` to be dispatched `delay` ticks from now.
    pub fn post_after(&mut self, delay: u64, payload: Payload) -> SimResult<()> {
        let at = self.now.plus(delay).ok_or(SimError::TimeOverflow {
            now: self.now,
            delay,
        })?;
        self.post(Event::new(at, payload))
    }

    /// Number of events still waiting in the queue.
    pub fn pending_count(&self) -> usize {
        self.queue.len()
    }
}

// ── Simulator ────────────────────────────────────────────────────────

/// Lifecycle of a [`Simulator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimState {
    /// Constructed; events may already be posted.
    Idle,
    /// Inside `simulate`, draining the queue.
    Running,
    /// `simulate` returned, after draining the queue or on a failed dispatch.
    Terminated,
}

/// Top-level simulation driver.
///
/// Owns the event queue and the virtual clock. Seed it with `post`, then
/// call `simulate` once to run until no events remain.
#[derive(Debug, Clone)]
pub struct Simulator {
    queue: EventQueue<Payload>,
    current_time: VirtualTime,
    events_processed: u64,
    state: SimState,
}

impl Simulator {
    /// Create a simulator at time zero with an empty queue.
    pub fn new() -> Self {
        Simulator {
            queue: EventQueue::new(),
            current_time: VirtualTime::ZERO,
            events_processed: 0,
            state: SimState::Idle,
        }
    }

    /// Queue an event.
    ///
    /// Events posted after the run terminated are kept but never
    /// dispatched, since `simulate` does not restart.
    pub fn post(&mut self, event: Event<Payload>) {
        if self.state == SimState::Terminated {
            warn!(time = %event.time, "event posted to a terminated simulator");
        }
        self.queue.post(event);
    }

    /// Current virtual time.
    pub fn current_time(&self) -> VirtualTime {
        self.current_time
    }

    /// Total events dispatched so far.
    pub fn events_processed(&self) -> u64 {
        self.events_processed
    }

    /// Events waiting to be dispatched.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn state(&self) -> SimState {
        self.state
    }

    /// Returns `true` if there is nothing left to dispatch.
    pub fn is_finished(&self) -> bool {
        self.queue.is_empty()
    }

    /// Run until the event queue is empty.
    ///
    /// Returns the number of events dispatched. Fails with
    /// [`SimError::AlreadyTerminated`] when called a second time, and
    /// propagates the first error raised by a dispatch. The simulator is
    /// terminated either way; events left in the queue after a failed
    /// dispatch are never run.
    pub fn simulate(&mut self) -> SimResult<u64> {
        if self.state == SimState::Terminated {
            return Err(SimError::AlreadyTerminated);
        }
        self.state = SimState::Running;

        let start = self.events_processed;
        let result = self.drain();
        self.state = SimState::Terminated;

        if let Err(err) = result {
            warn!(
                error = %err,
                time = %self.current_time,
                pending = self.queue.len(),
                "simulation aborted"
            );
            return Err(err);
        }

        let dispatched = self.events_processed - start;
        info!(
            events = dispatched,
            time = %self.current_time,
            "simulation finished"
        );
        Ok(dispatched)
    }

    fn drain(&mut self) -> SimResult<()> {
        while !self.queue.is_empty() {
            self.step()?;
        }
        Ok(())
    }

    /// Pull one event, advance the clock, dispatch.
    fn step(&mut self) -> SimResult<()> {
        let event = self.queue.pull()?;

        if event.time < self.current_time {
            return Err(SimError::NonCausalEvent {
                requested: event.time,
                current: self.current_time,
            });
        }
        self.current_time = event.time;
        self.events_processed += 1;
        debug!(time = %event.time, payload = %event.payload, "dispatch");

        let mut ctx = SimulationContext {
            queue: &mut self.queue,
            now: self.current_time,
        };
        event.payload.dispatch(&mut ctx)
    }
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new()
    }
}
