//! # Address Derivation Benchmarks
//!
//! Every transition derives at least one address, and the bump search
//! hashes once per rejected bump, so derivation cost bounds transition cost.

use criterion::{black_box, BenchmarkId, Criterion, Throughput};
use ek_partnership::domain::derivation::{
    associated_token_address, create_program_address, find_program_address, partnership_address,
};
use ek_partnership::prelude::*;
use rand::Rng;
use std::time::Duration;

fn random_key() -> Pubkey {
    Pubkey::new(rand::thread_rng().gen())
}

pub fn bench_create_program_address(c: &mut Criterion) {
    let mut group = c.benchmark_group("derivation/create_program_address");
    group.measurement_time(Duration::from_secs(5));

    let program_id = random_key();
    let seed = random_key();
    group.bench_function("single_seed", |b| {
        b.iter(|| black_box(create_program_address(&[seed.as_ref()], &program_id).is_ok()))
    });

    group.finish();
}

pub fn bench_find_program_address(c: &mut Criterion) {
    let mut group = c.benchmark_group("derivation/find_program_address");
    group.measurement_time(Duration::from_secs(5));

    let program_id = random_key();
    let authority = random_key();

    group.bench_function("partnership_record", |b| {
        b.iter(|| black_box(partnership_address(&program_id, &authority, 1)))
    });

    let mint = random_key();
    group.bench_function("associated_token_account", |b| {
        b.iter(|| black_box(associated_token_address(&authority, &mint)))
    });

    for count in [1usize, 4, 16] {
        let seeds: Vec<[u8; 32]> = (0..count).map(|_| rand::thread_rng().gen()).collect();
        let refs: Vec<&[u8]> = seeds.iter().map(|seed| seed.as_slice()).collect();
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("seeds", count), &refs, |b, refs| {
            b.iter(|| black_box(find_program_address(refs, &program_id)))
        });
    }

    group.finish();
}

pub fn register_benchmarks(c: &mut Criterion) {
    bench_create_program_address(c);
    bench_find_program_address(c);
}
