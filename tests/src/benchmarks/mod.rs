//! # Benchmarks
//!
//! Criterion benchmark bodies, registered by `benches/partnership_benchmarks.rs`.

pub mod derivation;
