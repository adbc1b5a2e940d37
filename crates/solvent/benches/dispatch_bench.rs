//! Benchmarks for routing and solving whole problems.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use solvent::{detect_category, Category, Route, Solver};

const PROBLEMS: &[(&str, &str)] = &[
    ("equation", "solve for x: 2x + 3 = 7"),
    ("quadratic", "solve for x: x^2 - 5x + 6 = 0"),
    ("derivative", "find the derivative of f(x) = x^3 + sin(x)"),
    ("integral", "integrate x*exp(x)"),
    ("factor", "factor x^3 - 6x^2 + 11x - 6"),
    ("simplify", "simplify sin(x)^2 + cos(x)^2"),
    ("limit", "limit of sin(x)/x as x approaches 0"),
    ("area", "area of a circle with radius 5"),
    ("arithmetic", "what is 2^10 + 3*7"),
];

fn bench_routing(c: &mut Criterion) {
    let mut group = c.benchmark_group("routing");
    for (name, text) in PROBLEMS {
        group.bench_with_input(BenchmarkId::new("select", name), text, |b, text| {
            b.iter(|| (Route::select(black_box(text)), detect_category(black_box(text))));
        });
    }
    group.finish();
}

fn bench_solve(c: &mut Criterion) {
    let solver = Solver::default();
    let mut group = c.benchmark_group("solve");
    for (name, text) in PROBLEMS {
        group.bench_with_input(BenchmarkId::new("problem", name), text, |b, text| {
            b.iter(|| solver.solve_detailed(black_box(text), Category::General));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_routing, bench_solve);
criterion_main!(benches);
