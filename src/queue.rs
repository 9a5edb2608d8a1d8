//! Time-ordered event queue.
//!
//! A `BinaryHeap` with a reversed `Ord` on the internal entry acts as a
//! min-heap keyed by `(time, seq)`. The sequence number is taken from a
//! counter at `post` time, so events sharing a timestamp come out in the
//! order they were posted and every run over the same posts is identical.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::error::{SimError, SimResult};
use crate::event::Event;

/// Heap entry: the event plus the post-order sequence that breaks ties.
#[derive(Debug, Clone)]
struct Entry<P> {
    seq: u64,
    event: Event<P>,
}

impl<P> PartialEq for Entry<P> {
    fn eq(&self, other: &Self) -> bool {
        self.seq == other.seq && self.event.time == other.event.time
    }
}

impl<P> Eq for Entry<P> {}

/// Smallest `(time, seq)` first.
///
/// `BinaryHeap` is a max-heap, so the natural ordering is reversed.
impl<P> Ord for Entry<P> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .event
            .time
            .cmp(&self.event.time)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl<P> PartialOrd for Entry<P> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Priority container of pending events; the sole ordering authority.
#[derive(Debug, Clone)]
pub struct EventQueue<P> {
    heap: BinaryHeap<Entry<P>>,
    next_seq: u64,
}

impl<P> EventQueue<P> {
    pub fn new() -> Self {
        EventQueue {
            heap: BinaryHeap::new(),
            next_seq: 0,
        }
    }

    /// Insert an event. Never fails.
    pub fn post(&mut self, event: Event<P>) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Entry { seq, event });
    }

    /// Remove and return the earliest event (ties in post order).
    ///
    /// Fails with [`SimError::EmptyQueue`] when nothing is pending.
    pub fn pull(&mut self) -> SimResult<Event<P>> {
        self.heap
            .pop()
            .map(|entry| entry.event)
            .ok_or(SimError::EmptyQueue)
    }

    /// The event `pull` would return next, without removing it.
    pub fn peek(&self) -> Option<&Event<P>> {
        self.heap.peek().map(|entry| &entry.event)
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Pull everything, in dispatch order.
    pub fn drain_ordered(&mut self) -> Vec<Event<P>> {
        let mut events = Vec::with_capacity(self.heap.len());
        while let Some(entry) = self.heap.pop() {
            events.push(entry.event);
        }
        events
    }
}

impl<P> Default for EventQueue<P> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_what_goes_in_comes_out() {
        let mut eq = EventQueue::new();
        eq.post(Event::at(1, 1));
        assert_eq!(eq.pull(), Ok(Event::at(1, 1)));
        assert!(eq.is_empty());
    }

    #[test]
    fn test_smallest_of_two_comes_out_first() {
        let mut eq = EventQueue::new();
        eq.post(Event::at(1, 1));
        eq.post(Event::at(3, 3));
        assert_eq!(eq.pull(), Ok(Event::at(1, 1)));
    }

    #[test]
    fn test_smallest_is_always_first() {
        let mut eq = EventQueue::new();
        eq.post(Event::at(3, 3));
        eq.post(Event::at(1, 1));
        eq.post(Event::at(7, 7));
        assert_eq!(eq.pull(), Ok(Event::at(1, 1)));

        eq.post(Event::at(9, 9));
        eq.post(Event::at(5, 5));
        assert_eq!(eq.pull(), Ok(Event::at(3, 3)));
        assert_eq!(eq.pull(), Ok(Event::at(5, 5)));
        assert_eq!(eq.len(), 2);
    }

    #[test]
    fn test_pull_on_fresh_queue_fails() {
        let mut eq: EventQueue<u32> = EventQueue::new();
        assert_eq!(eq.pull(), Err(SimError::EmptyQueue));
    }

    #[test]
    fn test_pull_after_drain_fails() {
        let mut eq = EventQueue::new();
        eq.post(Event::at(2, "a"));
        assert!(eq.pull().is_ok());
        assert_eq!(eq.pull(), Err(SimError::EmptyQueue));
    }

    #[test]
    fn test_fifo_at_same_time() {
        let mut eq = EventQueue::new();
        eq.post(Event::at(10, "first"));
        eq.post(Event::at(10, "second"));
        eq.post(Event::at(10, "third"));

        let payloads: Vec<_> = eq.drain_ordered().into_iter().map(|e| e.payload).collect();
        assert_eq!(payloads, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_peek_matches_pull() {
        let mut eq = EventQueue::new();
        assert!(eq.peek().is_none());
        eq.post(Event::at(4, 'b'));
        eq.post(Event::at(2, 'a'));
        assert_eq!(eq.peek(), Some(&Event::at(2, 'a')));
        assert_eq!(eq.pull(), Ok(Event::at(2, 'a')));
        assert_eq!(eq.peek(), Some(&Event::at(4, 'b')));
    }

    proptest! {
        #[test]
        fn prop_pulls_are_time_ordered(times in prop::collection::vec(0u64..50, 0..64)) {
            let mut eq = EventQueue::new();
            for (i, t) in times.iter().enumerate() {
                eq.post(Event::at(*t, i));
            }
            let events = eq.drain_ordered();
            prop_assert_eq!(events.len(), times.len());
            for pair in events.windows(2) {
                prop_assert!(pair[0].time <= pair[1].time);
            }
        }

        #[test]
        fn prop_equal_times_keep_post_order(times in prop::collection::vec(0u64..8, 0..64)) {
            let mut eq = EventQueue::new();
            for (i, t) in times.iter().enumerate() {
                eq.post(Event::at(*t, i));
            }
            let events = eq.drain_ordered();
            for pair in events.windows(2) {
                if pair[0].time == pair[1].time {
                    prop_assert!(pair[0].payload < pair[1].payload);
                }
            }
        }

        #[test]
        fn prop_interleaved_posts_never_go_backward(
            batches in prop::collection::vec(prop::collection::vec(0u64..20, 1..6), 1..10)
        ) {
            // Posts only ever land at or after the last pulled time, as in a run.
            let mut eq = EventQueue::new();
            let mut now = 0u64;
            let mut last = 0u64;
            for batch in &batches {
                for d in batch {
                    eq.post(Event::at(now + d, ()));
                }
                let event = eq.pull().unwrap();
                prop_assert!(event.time.ticks() >= last);
                last = event.time.ticks();
                now = last;
            }
        }
    }
}
