//! # minisim — minimal discrete-event simulation kernel
//!
//! Events carry a virtual timestamp and a payload. The simulator drains
//! them in time order, and a payload that is a worker schedules the rest
//! of its job as a continuation event. No async, no threads and no
//! wall-clock time.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────┐
//! │        Simulator          │ ← dispatch loop, virtual clock
//! │  ┌────────────────────┐  │
//! │  │    EventQueue       │  │ ← min-heap on (time, post order)
//! │  └────────────────────┘  │
//! │  ┌────────────────────┐  │
//! │  │ Payload::Worker     │  │ ← job load: [DelayedAction, ...]
//! │  │ Payload::Inert      │  │
//! │  └────────────────────┘  │
//! └──────────────────────────┘
//! ```
//!
//! ```rust
//! use minisim::{Action, Event, Payload, Simulator, VirtualTime, Worker};
//!
//! let mut sim = Simulator::new();
//! let job = Worker::new(vec![Action::delay(2), Action::delay(9)]);
//! sim.post(Event::at(3, Payload::Worker(job)));
//!
//! assert_eq!(sim.simulate().unwrap(), 3);
//! assert_eq!(sim.current_time(), VirtualTime::new(14));
//! ```
//!
//! The [`backup`] module is a separate utility that copies keys between a
//! coordination store and local dump files.

pub mod backup;
pub mod config;
pub mod error;
pub mod event;
pub mod payload;
pub mod queue;
pub mod simulation;
pub mod time;
pub mod worker;

// Re-exports for convenience.
pub use error::{SimError, SimResult};
pub use event::Event;
pub use payload::Payload;
pub use queue::EventQueue;
pub use simulation::{SimState, SimulationContext, Simulator};
pub use time::VirtualTime;
pub use worker::{Action, DelayedAction, Worker};
