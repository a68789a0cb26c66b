//! # Integration Tests
//!
//! End-to-end flows through the program service over in-memory adapters.

pub mod atomicity;
