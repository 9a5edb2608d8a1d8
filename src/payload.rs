//! What an event carries, and how the simulator dispatches it.

use tracing::trace;

use crate::error::SimResult;
use crate::simulation::SimulationContext;
use crate::worker::Worker;

/// The closed set of payloads the [`crate::Simulator`] knows how to dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub enum Payload {
    /// A job with remaining work; dispatching runs its next action.
    Worker(Worker),

    /// Plain data. Dispatching it only advances the clock.
    Inert(u64),
}

impl Payload {
    /// Dispatch this payload at `ctx.now()`.
    pub fn dispatch(self, ctx: &mut SimulationContext<'_>) -> SimResult<()> {
        match self {
            Payload::Worker(worker) => worker.run(ctx),
            Payload::Inert(value) => {
                trace!(value, time = %ctx.now(), "inert payload");
                Ok(())
            }
        }
    }
}

impl From<Worker> for Payload {
    fn from(worker: Worker) -> Self {
        Payload::Worker(worker)
    }
}

impl std::fmt::Display for Payload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Payload::Worker(worker) => write!(f, "{}", worker),
            Payload::Inert(value) => write!(f, "Inert({})", value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Event;
    use crate::worker::Action;

    #[test]
    fn test_display() {
        let worker = Worker::named("j", vec![Action::delay(3)]);
        assert_eq!(Payload::from(worker).to_string(), "Worker(j, Delay(3))");
        assert_eq!(Payload::Inert(4).to_string(), "Inert(4)");
    }

    #[cfg(feature = "serialize")]
    #[test]
    fn test_serde_json_round_trip() {
        let events = vec![
            Event::at(
                3,
                Payload::Worker(Worker::named("c", vec![Action::delay(2), Action::delay(9)])),
            ),
            Event::at(7, Payload::Worker(Worker::new(vec![Action::delay(3)]))),
            Event::at(9, Payload::Inert(1)),
        ];

        let json = serde_json::to_string(&events).unwrap();
        let back: Vec<Event<Payload>> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, events);
    }
}
