//! Criterion benchmarks for state enumeration and matrix construction.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use thunt_bench::{label, profiles};
use thunt_core::{Action, ReducedAction};
use thunt_model::{build_omega, build_phi, StateSet, TaskModel};

fn bench_enumerate(c: &mut Criterion) {
    let mut group = c.benchmark_group("enumerate_states");
    for params in profiles() {
        group.bench_with_input(BenchmarkId::from_parameter(label(&params)), &params, |b, p| {
            b.iter(|| black_box(StateSet::enumerate(p)));
        });
    }
    group.finish();
}

fn bench_phi(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_phi_east");
    for params in profiles() {
        let states = StateSet::enumerate(&params);
        group.bench_with_input(BenchmarkId::from_parameter(label(&params)), &states, |b, s| {
            b.iter(|| black_box(build_phi(s, Action::East).ok()));
        });
    }
    group.finish();
}

fn bench_omega(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_omega_step");
    for params in profiles() {
        let states = StateSet::enumerate(&params);
        group.bench_with_input(BenchmarkId::from_parameter(label(&params)), &states, |b, s| {
            b.iter(|| black_box(build_omega(s, ReducedAction::Step).ok()));
        });
    }
    group.finish();
}

fn bench_full_model(c: &mut Criterion) {
    let params = thunt_core::TaskParams::new(4, 2).unwrap();
    c.bench_function("task_model_build_d4_h2", |b| {
        b.iter(|| black_box(TaskModel::build(&params).ok()));
    });
}

criterion_group!(benches, bench_enumerate, bench_phi, bench_omega, bench_full_model);
criterion_main!(benches);
