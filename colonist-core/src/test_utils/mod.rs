//! In-memory doubles for testing.
//!
//! Available behind the `test-utils` feature flag. These are minimal
//! implementations that prove the protocol traits are usable and let
//! tests observe the exact order the engine calls them in.

mod counting_producer;
mod event_log;
mod fixed_selector;
mod recording_acceptor;

pub use counting_producer::CountingProducer;
pub use event_log::{EventLog, Step};
pub use fixed_selector::FixedSelector;
pub use recording_acceptor::RecordingAcceptor;
