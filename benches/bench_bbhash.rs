/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use bbhash::prelude::*;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use dsi_progress_logger::no_logging;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::hint::black_box;

const NUM_KEYS: usize = 1_000_000;
const NUM_QUERIES: usize = 10_000;

fn keys(n: usize) -> Vec<u64> {
    let mut rng = SmallRng::seed_from_u64(0);
    let mut keys = (0..n).map(|_| rng.random::<u64>()).collect::<Vec<_>>();
    keys.sort_unstable();
    keys.dedup();
    keys
}

fn bench_build(c: &mut Criterion) {
    let keys = keys(NUM_KEYS);
    let mut group = c.benchmark_group("build");
    group.sample_size(10);
    group.throughput(Throughput::Elements(keys.len() as u64));
    for gamma in [1.0, 2.0, 5.0] {
        group.bench_with_input(BenchmarkId::from_parameter(gamma), &gamma, |b, &gamma| {
            b.iter(|| {
                BBHashBuilder::default()
                    .gamma(gamma)
                    .try_build(keys.iter().copied(), no_logging![])
                    .unwrap()
            })
        });
    }
    group.finish();
}

fn bench_get(c: &mut Criterion) {
    let keys = keys(NUM_KEYS);
    let mut rng = SmallRng::seed_from_u64(1);
    let queries = (0..NUM_QUERIES)
        .map(|_| keys[rng.random_range(0..keys.len())])
        .collect::<Vec<_>>();

    let mut group = c.benchmark_group("get");
    group.throughput(Throughput::Elements(NUM_QUERIES as u64));
    for gamma in [1.0, 2.0, 5.0] {
        let mph = BBHash::new(gamma, keys.iter().copied()).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(gamma), &mph, |b, mph| {
            b.iter(|| {
                for &key in &queries {
                    black_box(mph.get(key));
                }
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_build, bench_get);
criterion_main!(benches);
