//! Performance benchmarks for the finite-difference schemes
//!
//! # What We're Measuring
//!
//! 1. **Tridiagonal solve** (Thomas algorithm):
//!    - factorization once, then one forward/backward sweep per solve
//!    - linear in the number of unknowns
//!
//! 2. **Diffusion, explicit vs implicit**:
//!    - FTCS does one stencil pass per step
//!    - Crank-Nicolson does one matrix-vector product and one sweep per step
//!
//! 3. **Shallow-water waves**:
//!    - three-level scheme, one operator evaluation per step
//!
//! # Running Benchmarks
//!
//! ```bash
//! # Run all benchmarks
//! cargo bench --bench scheme_performance
//!
//! # Only the diffusion comparison
//! cargo bench --bench scheme_performance diffusion
//!
//! # With rayon on large grids
//! cargo bench --bench scheme_performance --features parallel
//! ```
//!
//! # Expected Results
//!
//! Per step, Crank-Nicolson costs a small constant factor more than FTCS,
//! but it accepts time steps far above the explicit limit. At equal
//! simulated time the implicit run is usually the faster one.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, SamplingMode, Throughput};
use nalgebra::DVector;
use std::hint::black_box;
use std::time::Duration;

use fdm_rs::models::{Diffusion1D, ShallowWater1D};
use fdm_rs::physics::{Grid1D, PhysicalModel, PhysicalQuantity};
use fdm_rs::solver::{
    DomainBoundaries, EulerSolver, ImplicitSolver, Scenario, SnapshotSchedule, Solver,
    SolverConfiguration, SpatialBoundaries, TridiagonalMatrix, TridiagonalSolver, WaveSolver,
};

fn diffusion_scenario(points: usize) -> Scenario {
    let grid = Grid1D::new(0.0, 1.0, points).unwrap();
    let bump = grid.sample(|x| (-((x - 0.5) / 0.05).powi(2)).exp());
    let model = Diffusion1D::from_grid(grid, 1.0).unwrap().with_initial_profile(bump).unwrap();

    let initial = model.setup_initial_state();
    let rules = SpatialBoundaries::dirichlet(PhysicalQuantity::Concentration, 0.0, 0.0);
    Scenario::new(Box::new(model), DomainBoundaries::space_time(rules, initial))
}

fn wave_scenario(points: usize) -> Scenario {
    let grid = Grid1D::new(0.0, 10_000.0, points).unwrap();
    let depth = grid.sample(|x| 50.0 - 49.0 * x / 10_000.0);
    let surface = grid.sample(|x| (-((x - 3000.0) / 200.0).powi(2)).exp());
    let model = ShallowWater1D::new(grid, depth, surface).unwrap();

    let initial = model.setup_initial_state();
    let rules = SpatialBoundaries::copy_interior(PhysicalQuantity::WaveHeight, 2);
    Scenario::new(Box::new(model), DomainBoundaries::space_time(rules, initial))
}

fn benchmark_tridiagonal(c: &mut Criterion) {
    let mut group = c.benchmark_group("Tridiagonal Solve");

    for n in [100, 1_000, 10_000, 100_000] {
        let matrix = TridiagonalMatrix::constant(n, -1.0, 4.0, -1.0);
        let rhs = DVector::from_fn(n, |i, _| (i as f64).sin());
        let factorization = TridiagonalSolver::factorize(&matrix).unwrap();
        let mut x = DVector::zeros(n);

        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::new("factorize", n), &matrix, |b, matrix| {
            b.iter(|| TridiagonalSolver::factorize(black_box(matrix)).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("solve_into", n), &rhs, |b, rhs| {
            b.iter(|| factorization.solve_into(black_box(rhs), &mut x).unwrap());
        });
    }

    group.finish();
}

fn benchmark_diffusion(c: &mut Criterion) {
    let mut group = c.benchmark_group("Diffusion 1D");
    group.sampling_mode(SamplingMode::Flat);
    group.measurement_time(Duration::from_secs(10));

    for points in [101, 1_001, 10_001] {
        let scenario = diffusion_scenario(points);
        let dx = 1.0 / (points - 1) as f64;
        let time_steps = 200;

        // Same dt for both: the explicit limit
        let config = SolverConfiguration::fixed_step(0.4 * dx * dx, time_steps)
            .with_snapshots(SnapshotSchedule::Endpoints);

        group.throughput(Throughput::Elements((points * time_steps) as u64));
        group.bench_with_input(BenchmarkId::new("ftcs", points), &config, |b, config| {
            let solver = EulerSolver::new();
            b.iter(|| solver.solve(black_box(&scenario), black_box(config)).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("crank_nicolson", points), &config, |b, config| {
            let solver = ImplicitSolver::crank_nicolson();
            b.iter(|| solver.solve(black_box(&scenario), black_box(config)).unwrap());
        });
    }

    group.finish();
}

fn benchmark_equal_simulated_time(c: &mut Criterion) {
    let mut group = c.benchmark_group("Diffusion to t = 0.01");
    group.sample_size(20);

    let points = 1_001;
    let dx = 1.0 / (points - 1) as f64;
    let scenario = diffusion_scenario(points);
    let total_time = 0.01;

    let explicit_dt = 0.4 * dx * dx;
    let explicit_steps = (total_time / explicit_dt).ceil() as usize;
    let explicit = SolverConfiguration::time_evolution(total_time, explicit_steps)
        .with_snapshots(SnapshotSchedule::Endpoints);
    let implicit = SolverConfiguration::time_evolution(total_time, 100)
        .with_snapshots(SnapshotSchedule::Endpoints);

    group.bench_function(format!("ftcs {} steps", explicit_steps), |b| {
        let solver = EulerSolver::new();
        b.iter(|| solver.solve(black_box(&scenario), black_box(&explicit)).unwrap());
    });
    group.bench_function("crank_nicolson 100 steps", |b| {
        let solver = ImplicitSolver::crank_nicolson();
        b.iter(|| solver.solve(black_box(&scenario), black_box(&implicit)).unwrap());
    });

    group.finish();
}

fn benchmark_waves(c: &mut Criterion) {
    let mut group = c.benchmark_group("Shallow Water 1D");

    for points in [201, 2_001, 20_001] {
        let scenario = wave_scenario(points);
        let dx = 10_000.0 / (points - 1) as f64;
        let dt = 0.5 * dx / (9.81f64 * 50.0).sqrt();
        let time_steps = 200;
        let config = SolverConfiguration::fixed_step(dt, time_steps)
            .with_snapshots(SnapshotSchedule::Every(50));

        group.throughput(Throughput::Elements((points * time_steps) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(points), &config, |b, config| {
            let solver = WaveSolver::new();
            b.iter(|| solver.solve(black_box(&scenario), black_box(config)).unwrap());
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_tridiagonal,
    benchmark_diffusion,
    benchmark_equal_simulated_time,
    benchmark_waves,
);
criterion_main!(benches);
