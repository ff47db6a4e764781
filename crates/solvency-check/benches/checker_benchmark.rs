// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use solvency_check::checker::SafetyChecker;
use solvency_model::state::ResourceState;
use solvency_scenario::{
    config::{QuantityRange, ScenarioConfig},
    generator::ScenarioGenerator,
};
use std::hint::black_box;

const SEED: u64 = 0x5EED;
const STATES_PER_SIZE: usize = 32;

fn generate_states(num_resources: usize, num_processes: usize) -> Vec<ResourceState<i64>> {
    // Pools scale with the process count so that a useful share of the
    // generated states is safe and the scan runs to completion.
    let pool = num_processes as i64 / 2;
    let config = ScenarioConfig::builder()
        .num_resources(num_resources)
        .num_processes(num_processes)
        .available(QuantityRange::new(pool, pool + 5))
        .assigned(QuantityRange::new(0, 2))
        .total_demand(QuantityRange::new(4, 8))
        .build()
        .unwrap_or_else(|e| panic!("Benchmark configuration error: {}", e));

    let mut generator = ScenarioGenerator::from_seed(config, SEED);
    (0..STATES_PER_SIZE)
        .map(|_| {
            generator
                .generate()
                .unwrap_or_else(|e| panic!("Failed to generate state: {}", e))
        })
        .collect()
}

fn bench_generated_states(c: &mut Criterion) {
    let mut group = c.benchmark_group("checker_benchmark");

    for &(num_resources, num_processes) in &[(5, 10), (20, 20), (20, 100), (50, 500)] {
        let states = generate_states(num_resources, num_processes);
        let mut checker = SafetyChecker::preallocated(num_resources, num_processes);
        let safe = states.iter().filter(|s| checker.is_safe(s)).count();
        let label = format!("{}x{}", num_resources, num_processes);

        group.throughput(Throughput::Elements(states.len() as u64));
        group.bench_with_input(
            BenchmarkId::new(&label, format!("{}_of_{}_safe", safe, states.len())),
            &states,
            |b, states| {
                b.iter(|| {
                    for state in states {
                        black_box(checker.evaluate(black_box(state)));
                    }
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_generated_states);
criterion_main!(benches);
