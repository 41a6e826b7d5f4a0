#[macro_use]
extern crate criterion;

use criterion::{Benchmark, Criterion};

use sokoban_planner::config::{Method, SolverConfig};
use sokoban_planner::level::Level;
use sokoban_planner::solver::Solver;
use sokoban_planner::LoadLevel;

// allowing unused so i can bench just one or few
// and still notice other warnings if there are any
#[allow(unused)]
fn bench_microban_1(c: &mut Criterion) {
    bench_level(c, Method::AStar, 1, 100);
}

#[allow(unused)]
fn bench_microban_3(c: &mut Criterion) {
    // boxes have to go around the pillar
    bench_level(c, Method::AStar, 3, 100);
}

#[allow(unused)]
fn bench_microban_3_ida(c: &mut Criterion) {
    bench_level(c, Method::IdaStar, 3, 100);
}

#[allow(unused)]
fn bench_microban_3_rbfs(c: &mut Criterion) {
    bench_level(c, Method::Rbfs, 3, 100);
}

#[allow(unused)]
fn bench_microban_5(c: &mut Criterion) {
    // 4 boxes around the player
    bench_level(c, Method::AStar, 5, 50);
}

fn microban(index: usize) -> Level {
    let mut levels = "levels/microban.txt".load_levels().unwrap();
    levels.swap_remove(index - 1)
}

fn bench_level(c: &mut Criterion, method: Method, index: usize, samples: usize) {
    let level = microban(index);
    let solver = Solver::new(&level).unwrap();
    let config = SolverConfig::new(method);

    c.bench(
        &format!("{}", method),
        Benchmark::new(format!("microban {}", index), move |b| {
            b.iter(|| criterion::black_box(solver.solve(criterion::black_box(&config))))
        })
        .sample_size(samples),
    );
}

criterion_group!(
    benches,
    bench_microban_1,
    bench_microban_3,
    bench_microban_3_ida,
    bench_microban_3_rbfs,
    //bench_microban_5,
);
criterion_main!(benches);
