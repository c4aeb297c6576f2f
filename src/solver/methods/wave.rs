//! Second-order-in-time wave solver
//!
//! # Mathematical Background
//!
//! Wave models are second order in time:
//!
//! ```text
//! d²η/dt² = L(η)
//! ```
//!
//! where `L` is the spatial operator returned by
//! [`PhysicalModel::compute_physics`](crate::physics::PhysicalModel::compute_physics).
//! Centered differences in time give a three-level scheme:
//!
//! ```text
//! η^{n+1} = 2 η^n - η^{n-1} + dt² L(η^n)
//! ```
//!
//! The first step has no `η^{-1}`. Starting from rest, the centered
//! velocity `(η^1 - η^{-1}) / 2dt = 0` gives `η^{-1} = η^1` and
//!
//! ```text
//! η^1 = η^0 + dt²/2 L(η^0)
//! ```
//!
//! # Buffers
//!
//! Three vectors hold `η^{n-1}`, `η^n` and `η^{n+1}`. After each step they
//! are rotated with `std::mem::swap`, never copied.
//!
//! # Stability
//!
//! Courant number `c dt / dx <= 1` with `c` the fastest wave speed. Above
//! the limit the solver logs a warning and keeps going.

use std::mem;

use nalgebra::DVector;

use crate::solver;
use crate::solver::methods::{prepare_initial_state, SnapshotRecorder};
use crate::solver::stencil::{leapfrog_first_step, leapfrog_step};
use crate::solver::{Scenario, SimulationResult, Solver, SolverConfiguration};

/// Three-level explicit solver for second-order-in-time models
///
/// Needs spatial boundary rules: they name the evolving quantity and fix the
/// two end points after every step. Other quantities of the state are
/// carried unchanged.
///
/// # Example
///
/// ```rust
/// use fdm_rs::models::ShallowWater1D;
/// use fdm_rs::physics::{Grid1D, PhysicalModel, PhysicalQuantity};
/// use fdm_rs::solver::{DomainBoundaries, Scenario, Solver, SolverConfiguration, SpatialBoundaries, WaveSolver};
///
/// let grid = Grid1D::new(0.0, 1000.0, 101).unwrap();
/// let depth = grid.sample(|_| 10.0);
/// let bump = grid.sample(|x| (-((x - 500.0) / 50.0).powi(2)).exp());
/// let model = ShallowWater1D::new(grid, depth, bump).unwrap();
///
/// let initial = model.setup_initial_state();
/// let rules = SpatialBoundaries::copy_interior(PhysicalQuantity::WaveHeight, 2);
/// let scenario = Scenario::new(Box::new(model), DomainBoundaries::space_time(rules, initial));
///
/// let result = WaveSolver::new()
///     .solve(&scenario, &SolverConfiguration::fixed_step(0.5, 100))
///     .unwrap();
/// assert_eq!(result.len(), 101);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct WaveSolver;

impl WaveSolver {
    /// Create a new wave solver
    pub fn new() -> Self {
        Self
    }
}

impl Solver for WaveSolver {

    fn solve(&self, scenario: &Scenario, config: &SolverConfiguration) -> Result<SimulationResult, String> {

        // ====== Step 1: Validation ======

        config.validate()?;
        scenario.validate()?;

        let spatial = *scenario
            .conditions
            .spatial()
            .ok_or_else(|| format!("{} needs spatial boundary rules", self.name()))?;
        let quantity = spatial.quantity;

        // ====== Step 2: Setup ======

        let dt = config.dt();
        let time_steps = config.time_steps();

        log::debug!(
            "{} on '{}': dt = {}, {} steps, quantity {}",
            self.name(),
            scenario.get_model_name(),
            dt,
            time_steps,
            quantity
        );
        solver::report_stability(scenario, dt, self.name());

        // `state` owns η^n, the two other levels live beside it
        let mut state = prepare_initial_state(scenario)?;
        let points = state.field(quantity)?.len();
        let mut previous = DVector::zeros(points);
        let mut next = DVector::zeros(points);

        let mut recorder = SnapshotRecorder::new(config);
        recorder.offer(0, &state)?;

        // ====== Step 3: Time Integration ======

        for step in 1..=time_steps {
            let operator_state = scenario.model.compute_physics(&state);
            let operator = operator_state.field(quantity)?;
            let current = state.field(quantity)?;

            if step == 1 {
                leapfrog_first_step(current, operator, dt, &spatial, &mut next)?;
            } else {
                leapfrog_step(&previous, current, operator, dt, &spatial, &mut next)?;
            }

            // (previous, current, next) <- (current, next, previous)
            mem::swap(state.field_mut(quantity)?, &mut next);
            mem::swap(&mut previous, &mut next);

            solver::validate_state(&state, step)?;
            recorder.offer(step, &state)?;
        }

        // ====== Step 4: Build Result ======

        let final_time = config.solver_type.time_at(time_steps);
        let mut result = SimulationResult::new(recorder.finish(), state, final_time);

        result.add_metadata("solver", self.name());
        result.add_metadata("model", scenario.get_model_name());
        result.add_metadata("time steps", &time_steps.to_string());
        result.add_metadata("dt", &dt.to_string());
        result.add_metadata("total time", &final_time.to_string());
        result.add_metadata("left boundary", &spatial.left.to_string());
        result.add_metadata("right boundary", &spatial.right.to_string());
        if let Some(estimate) = scenario.model.stability(dt) {
            result.add_metadata(estimate.label, &estimate.value.to_string());
        }

        Ok(result)
    }

    fn name(&self) -> &str {
        "Leapfrog Wave"
    }
}

// =================================================================================================
// Tests
// =================================================================================================
