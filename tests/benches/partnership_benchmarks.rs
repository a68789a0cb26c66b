//! # Partnership Program Benchmarks
//!
//! | Group | Measures |
//! |-------|----------|
//! | derivation | Program-derived and associated token address search |
//! | transitions | Initialize, deposit and issue through the service |
//! | transitions/signature | Instruction signature verification |

use criterion::{criterion_group, criterion_main, Criterion};
use ek_tests::benchmarks::{derivation, transitions};

fn derivation_benchmarks(c: &mut Criterion) {
    derivation::register_benchmarks(c);
}

fn transition_benchmarks(c: &mut Criterion) {
    transitions::register_benchmarks(c);
}

criterion_group!(benches, derivation_benchmarks, transition_benchmarks);
criterion_main!(benches);
