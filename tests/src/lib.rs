//! # Ekonos Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs       # Shared harness: funded keys, unique assets, addresses
//! ├── benchmarks/       # Criterion benchmarks (derivation, transitions)
//! ├── exploits/         # Attack simulations against custody and issuance
//! └── integration/      # End-to-end lifecycle and atomicity flows
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p ek-tests
//!
//! # By category
//! cargo test -p ek-tests integration::
//! cargo test -p ek-tests exploits::
//!
//! # Benchmarks
//! cargo bench -p ek-tests
//! ```

#![allow(dead_code)]

pub mod benchmarks;
pub mod exploits;
pub mod fixtures;
pub mod integration;
