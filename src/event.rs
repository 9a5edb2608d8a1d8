//! Events: a virtual timestamp paired with a payload.

use crate::time::VirtualTime;

/// A single scheduled event.
///
/// Events are generic over their payload so the queue can be exercised
/// with plain values; the simulator itself uses [`crate::Payload`].
///
/// Equality compares both `time` and `payload`. Dispatch order is not a
/// property of the event: it is decided by [`crate::EventQueue`], which
/// orders by `time` and breaks ties by post order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct Event<P> {
    /// Virtual time at which the payload is dispatched.
    pub time: VirtualTime,

    /// What gets dispatched.
    pub payload: P,
}

impl<P> Event<P> {
    pub fn new(time: VirtualTime, payload: P) -> Self {
        Event { time, payload }
    }

    /// Shorthand for `Event::new(VirtualTime::new(ticks), payload)`.
    pub fn at(ticks: u64, payload: P) -> Self {
        Event::new(VirtualTime::new(ticks), payload)
    }

    /// Split the event into its parts.
    pub fn into_parts(self) -> (VirtualTime, P) {
        (self.time, self.payload)
    }
}

impl<P: std::fmt::Display> std::fmt::Display for Event<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.time, self.payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_compares_time_and_payload() {
        assert_eq!(Event::at(1, 1), Event::at(1, 1));
        assert_ne!(Event::at(1, 1), Event::at(1, 2));
        assert_ne!(Event::at(1, 1), Event::at(2, 1));
    }

    #[test]
    fn test_into_parts() {
        let (time, payload) = Event::at(7, "seven").into_parts();
        assert_eq!(time, VirtualTime::new(7));
        assert_eq!(payload, "seven");
    }

    #[test]
    fn test_display() {
        assert_eq!(Event::at(5, "x").to_string(), "[T=5] x");
    }
}
