//! # Adapters Layer (Outer Hexagon)
//!
//! In-process implementations of the driven ports, used by the test suites
//! and by embedders that keep state in memory.

pub mod event_log;
pub mod memory_store;

pub use event_log::InMemoryEventLog;
pub use memory_store::InMemoryAccountStore;
