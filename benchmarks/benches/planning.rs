//! Engine throughput over the harness worlds.
//!
//! Three dimensions: goal fan-out (rooms fleets as unigoal lists), the
//! multigoal split-and-reappend loop (same fleets as one multigoal), and
//! refinement depth (blocks towers). Plus the actor end-to-end on a
//! converging fleet. Run via `cargo bench --bench planning`.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use wayfinder_benchmarks::{fleet_multigoal_scenario, fleet_scenario, tower_scenario};
use wayfinder_planner::actor::run_lazy_lookahead;
use wayfinder_planner::policy::PlanPolicy;
use wayfinder_planner::search::find_plan;

fn bench_unigoal_fleets(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_plan_unigoal_fleet");
    for &n in &[1usize, 4, 16, 64] {
        let (domain, state, todo) = fleet_scenario(n);
        let policy = PlanPolicy::silent();
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| {
                find_plan(&domain, &state, &todo, &policy)
                    .expect("no fatal domain errors")
                    .expect("fleet is solvable")
            });
        });
    }
    group.finish();
}

fn bench_multigoal_fleets(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_plan_multigoal_fleet");
    for &n in &[1usize, 4, 16] {
        let (domain, state, todo) = fleet_multigoal_scenario(n);
        let policy = PlanPolicy::silent();
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| {
                find_plan(&domain, &state, &todo, &policy)
                    .expect("no fatal domain errors")
                    .expect("fleet is solvable")
            });
        });
    }
    group.finish();
}

fn bench_block_towers(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_plan_block_tower");
    for &n in &[2usize, 4, 8] {
        let (domain, state, todo) = tower_scenario(n);
        let policy = PlanPolicy::silent();
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| {
                find_plan(&domain, &state, &todo, &policy)
                    .expect("no fatal domain errors")
                    .expect("tower is solvable")
            });
        });
    }
    group.finish();
}

fn bench_actor_end_to_end(c: &mut Criterion) {
    let mut group = c.benchmark_group("run_lazy_lookahead_fleet");
    for &n in &[1usize, 8] {
        let (domain, state, todo) = fleet_scenario(n);
        let policy = PlanPolicy::silent();
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| {
                run_lazy_lookahead(&domain, state.clone(), &todo, &policy, 10)
                    .expect("no fatal domain errors")
            });
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_unigoal_fleets,
    bench_multigoal_fleets,
    bench_block_towers,
    bench_actor_end_to_end
);
criterion_main!(benches);
