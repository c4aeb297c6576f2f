//! Finite differences on sampled data, then on a projectile
//!
//! Part 1: forward, backward and centered estimates of d(sin x)/dx
//! Part 2: forward Euler on y'' = -g against the exact parabola

use fdm_rs::analysis::{estimate_all, max_abs_error};
use fdm_rs::output::{CsvConfig, CsvExporter, Exporter};
use fdm_rs::prelude::*;
use std::error::Error;
use std::f64::consts::TAU;
use std::fs;
use std::path::Path;

fn derivatives() -> Result<(), Box<dyn Error>> {
    println!("--- Derivative of sin(x) over one period ---\n");
    println!("{:>8} {:>12} {:>12} {:>12}", "points", "forward", "backward", "centered");

    for points in [11, 21, 41, 81, 161] {
        let grid = Grid1D::new(0.0, TAU, points)?;
        let samples = grid.sample(f64::sin);
        let exact = grid.sample(f64::cos);

        let estimates = estimate_all(samples.as_slice(), grid.spacing());
        let mut row = format!("{:>8}", points);
        for (_, estimate) in estimates.iter() {
            row.push_str(&format!(" {:>12.3e}", max_abs_error(estimate, &exact)?));
        }
        println!("{}", row);
    }

    Ok(())
}

fn ballistics() -> Result<(), Box<dyn Error>> {
    println!("\n--- Projectile: 20 m/s at 60 degrees ---\n");

    let projectile = Ballistic::from_launch(20.0, 60.0);
    let flight_time = projectile.flight_time();
    println!("  Flight time: {:.3} s", flight_time);
    println!("  Range: {:.3} m", projectile.range());
    println!("  Max height: {:.3} m\n", projectile.max_height());

    println!("{:>8} {:>12} {:>14}", "steps", "dt (s)", "height error");

    let mut finest = None;
    for steps in [10, 100, 1000] {
        let initial = projectile.setup_initial_state();
        let scenario = Scenario::new(Box::new(projectile.clone()), DomainBoundaries::temporal(initial));
        let config = SolverConfiguration::time_evolution(flight_time, steps);
        let result = EulerSolver::new().solve(&scenario, &config)?;

        let height = result.final_state.field(PhysicalQuantity::Position)?[1];
        let error = (height - projectile.analytical_height(flight_time)).abs();
        println!("{:>8} {:>12.4} {:>14.4e}", steps, config.dt(), error);

        finest = Some(result);
    }

    if let Some(result) = finest {
        let output = Path::new("output");
        fs::create_dir_all(output)?;
        let path = output.join("ballistic_height.csv");
        CsvExporter::new(CsvConfig::default())
            .export_series(&result, PhysicalQuantity::Position, 1, &path)?;
        println!("\n✓ Height series written to {}", path.display());
    }

    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    println!("=== Derivatives and Ballistics ===\n");
    derivatives()?;
    ballistics()
}
