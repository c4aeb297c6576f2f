//! Finite-difference time-stepping methods
//!
//! This module contains concrete implementations of the [`Solver`](crate::solver::Solver) trait.
//!
//! # Available Methods
//!
//! - **[`EulerSolver`]**: forward Euler on `dy/dt = f(y)`
//!   - FTCS when the model is a spatial diffusion operator
//!   - plain forward Euler for ODE models (ballistics)
//!   - stable for diffusion number `D dt / dx² <= 0.5`
//!
//! - **[`WaveSolver`]**: centered second-order scheme on `d²y/dt² = L(y)`
//!   - three time levels, rotated without copies
//!   - stable for Courant number `c dt / dx <= 1`
//!
//! - **[`ImplicitSolver`]**: theta scheme on `du/dt = L u`
//!   - `theta = 1`: backward Euler, `theta = 0.5`: Crank-Nicolson
//!   - one tridiagonal factorisation per run, one O(n) solve per step
//!   - unconditionally stable for `theta >= 0.5`
//!
//! # Example
//!
//! ```rust
//! use fdm_rs::solver::{EulerSolver, ImplicitSolver};
//! use fdm_rs::solver::{Scenario, DomainBoundaries, Solver, SolverConfiguration, SpatialBoundaries};
//! use fdm_rs::models::Diffusion1D;
//! use fdm_rs::physics::{PhysicalModel, PhysicalQuantity};
//!
//! fn main() -> Result<(), String> {
//!     let model = Diffusion1D::new(1.0, 0.0, 1.0, 21)?;
//!     let initial = model.setup_initial_state();
//!     let rules = SpatialBoundaries::dirichlet(PhysicalQuantity::Concentration, 1.0, 0.0);
//!     let scenario = Scenario::new(Box::new(model), DomainBoundaries::space_time(rules, initial));
//!
//!     // Explicit: alpha = 0.4
//!     let explicit = EulerSolver::new().solve(&scenario, &SolverConfiguration::fixed_step(1.0e-3, 200))?;
//!
//!     // Implicit: alpha = 4, ten times fewer steps
//!     let implicit = ImplicitSolver::backward_euler().solve(&scenario, &SolverConfiguration::fixed_step(1.0e-2, 20))?;
//!
//!     assert!((explicit.final_time - implicit.final_time).abs() < 1e-12);
//!     Ok(())
//! }
//! ```
//!
//! # Shared contract
//!
//! Every solver:
//! - validates the configuration and the scenario before the first step,
//! - applies the boundary rules to the initial state (step 0),
//! - checks the state for NaN/Inf after every step,
//! - records the steps selected by the snapshot schedule,
//! - returns the final state even when the schedule skips it.

pub mod euler;
mod implicit;
mod wave;

// Re-exports for convenience
pub use euler::{euler_step, EulerSolver};
pub use implicit::ImplicitSolver;
pub use wave::WaveSolver;

use crate::physics::PhysicalState;
use crate::solver::{Scenario, SnapshotBuffer, SolverConfiguration};

/// Initial condition of the scenario with the boundary rules already applied
pub(crate) fn prepare_initial_state(scenario: &Scenario) -> Result<PhysicalState, String> {
    let mut state = scenario
        .conditions
        .initial_condition()
        .cloned()
        .ok_or_else(|| "No initial condition found in domain boundaries".to_string())?;

    scenario.conditions.apply(&mut state)?;
    crate::solver::validate_state(&state, 0)?;
    Ok(state)
}

/// Collects the snapshots selected by a configuration
pub(crate) struct SnapshotRecorder<'a> {
    config: &'a SolverConfiguration,
    buffer: SnapshotBuffer,
}

impl<'a> SnapshotRecorder<'a> {
    pub(crate) fn new(config: &'a SolverConfiguration) -> Self {
        let capacity = config.snapshots.capacity(config.time_steps());
        Self {
            config,
            buffer: SnapshotBuffer::with_capacity(capacity),
        }
    }

    /// Save `state` if the schedule selects `step`
    pub(crate) fn offer(&mut self, step: usize, state: &PhysicalState) -> Result<(), String> {
        if self.config.snapshots.contains(step, self.config.time_steps()) {
            self.buffer.record(step, self.config.solver_type.time_at(step), state)?;
        }
        Ok(())
    }

    pub(crate) fn finish(self) -> SnapshotBuffer {
        self.buffer
    }
}
