//! Virtual time for the simulation kernel.
//!
//! The clock is a plain tick counter. It only moves when the simulator
//! dispatches an event, never from wall-clock observation.

/// A logical timestamp, measured in ticks since the start of a run.
///
/// Being unsigned, a `VirtualTime` can never be negative.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct VirtualTime(u64);

impl VirtualTime {
    /// Start of every run.
    pub const ZERO: VirtualTime = VirtualTime(0);

    #[inline]
    pub fn new(ticks: u64) -> Self {
        VirtualTime(ticks)
    }

    /// Raw tick value.
    #[inline]
    pub fn ticks(self) -> u64 {
        self.0
    }

    /// The time `delay` ticks after `self`, or `None` on overflow.
    #[inline]
    pub fn plus(self, delay: u64) -> Option<VirtualTime> {
        self.0.checked_add(delay).map(VirtualTime)
    }

    /// Ticks elapsed from `earlier` to `self`, or `None` if `earlier` is later.
    #[inline]
    pub fn since(self, earlier: VirtualTime) -> Option<u64> {
        self.0.checked_sub(earlier.0)
    }
}

impl From<u64> for VirtualTime {
    fn from(ticks: u64) -> Self {
        VirtualTime(ticks)
    }
}

impl std::fmt::Display for VirtualTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "T={}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_is_default() {
        assert_eq!(VirtualTime::default(), VirtualTime::ZERO);
        assert_eq!(VirtualTime::ZERO.ticks(), 0);
    }

    #[test]
    fn test_plus() {
        assert_eq!(VirtualTime::new(3).plus(2), Some(VirtualTime::new(5)));
        assert_eq!(VirtualTime::new(3).plus(0), Some(VirtualTime::new(3)));
        assert!(VirtualTime::new(u64::MAX).plus(1).is_none());
    }

    #[test]
    fn test_since() {
        let early = VirtualTime::new(4);
        let late = VirtualTime::new(11);
        assert_eq!(late.since(early), Some(7));
        assert_eq!(early.since(late), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(VirtualTime::from(42).to_string(), "T=42");
    }
}
