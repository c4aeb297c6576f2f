//! Implicit theta-scheme solver
//!
//! # Mathematical Background
//!
//! For a linear spatial operator `L` (`du/dt = L u`), the theta scheme reads
//!
//! ```text
//! (I - θ dt L) u^{n+1} = (I + (1 - θ) dt L) u^n
//! ```
//!
//! - `θ = 1`: backward Euler, first order, unconditionally stable
//! - `θ = 0.5`: Crank-Nicolson, second order, unconditionally stable
//! - `θ = 0`: forward Euler written as a (diagonal) linear system
//!
//! For diffusion (`L = D/dx² · [1, -2, 1]`) and `θ = 1` the system matrix
//! has `-alpha` off the diagonal and `1 + 2 alpha` on it.
//!
//! # Boundary rows
//!
//! Boundary rules are encoded in the system itself:
//!
//! ```text
//! Dirichlet(v)             row 0: [ 1  0 ...]   rhs v
//! CopyInterior{offset: 1}  row 0: [ 1 -1 ...]   rhs 0
//! ```
//!
//! Wider copy offsets would leave the tridiagonal band and are rejected.
//!
//! # Cost
//!
//! The matrix does not change during a run: it is factorised once (Thomas
//! forward elimination) and every step costs one O(n) substitution.

use std::mem;

use nalgebra::DVector;

use crate::solver;
use crate::solver::methods::{prepare_initial_state, SnapshotRecorder};
use crate::solver::{
    BoundaryCondition, Scenario, SimulationResult, Solver, SolverConfiguration, SpatialBoundaries,
    TridiagonalMatrix, TridiagonalSolver,
};

/// Theta-scheme solver for models exposing a tridiagonal operator
///
/// # Example
///
/// ```rust
/// use fdm_rs::solver::{ImplicitSolver, Solver};
///
/// assert_eq!(ImplicitSolver::backward_euler().name(), "Backward Euler");
/// assert_eq!(ImplicitSolver::crank_nicolson().name(), "Crank-Nicolson");
/// assert_eq!(ImplicitSolver::new(0.7).name(), "Theta Scheme");
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImplicitSolver {
    theta: f64,
}

impl Default for ImplicitSolver {
    fn default() -> Self {
        Self::backward_euler()
    }
}

impl ImplicitSolver {
    /// Theta scheme with the given implicitness, validated in `solve`
    pub fn new(theta: f64) -> Self {
        Self { theta }
    }

    /// Fully implicit scheme (`θ = 1`)
    pub fn backward_euler() -> Self {
        Self::new(1.0)
    }

    /// Centered-in-time scheme (`θ = 0.5`)
    pub fn crank_nicolson() -> Self {
        Self::new(0.5)
    }

    /// Implicitness parameter
    pub fn theta(&self) -> f64 {
        self.theta
    }

    fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.theta) {
            return Err(format!("Theta must lie in [0, 1], got {}", self.theta));
        }
        Ok(())
    }

    /// Left-hand matrix `I - θ dt L` with the boundary rows replaced
    pub fn system_matrix(
        &self,
        operator: &TridiagonalMatrix,
        dt: f64,
        boundaries: &SpatialBoundaries,
    ) -> Result<TridiagonalMatrix, String> {
        let mut system = operator.shifted_identity(-self.theta * dt);
        let last = system.len() - 1;

        match boundaries.left {
            BoundaryCondition::Dirichlet(_) => system.set_row(0, 0.0, 1.0, 0.0),
            BoundaryCondition::CopyInterior { offset: 1 } => system.set_row(0, 0.0, 1.0, -1.0),
            rule => return Err(unsupported_rule("left", rule)),
        }

        match boundaries.right {
            BoundaryCondition::Dirichlet(_) => system.set_row(last, 0.0, 1.0, 0.0),
            BoundaryCondition::CopyInterior { offset: 1 } => system.set_row(last, -1.0, 1.0, 0.0),
            rule => return Err(unsupported_rule("right", rule)),
        }

        Ok(system)
    }
}

fn unsupported_rule(side: &str, rule: BoundaryCondition) -> String {
    format!(
        "Implicit solver cannot encode {} boundary rule {} in a tridiagonal system \
         (only Dirichlet and CopyInterior (1) are supported)",
        side, rule
    )
}

/// Right-hand side value of a boundary row
fn boundary_rhs(rule: BoundaryCondition) -> f64 {
    match rule {
        BoundaryCondition::Dirichlet(value) => value,
        BoundaryCondition::CopyInterior { .. } => 0.0,
    }
}

impl Solver for ImplicitSolver {

    fn solve(&self, scenario: &Scenario, config: &SolverConfiguration) -> Result<SimulationResult, String> {

        // ====== Step 1: Validation ======

        self.validate()?;
        config.validate()?;
        scenario.validate()?;

        let spatial = *scenario
            .conditions
            .spatial()
            .ok_or_else(|| format!("{} needs spatial boundary rules", self.name()))?;
        let quantity = spatial.quantity;

        let operator = scenario.model.linear_operator().ok_or_else(|| {
            format!(
                "Model '{}' does not provide a linear operator for the implicit solver",
                scenario.get_model_name()
            )
        })?;

        // ====== Step 2: Setup ======

        let dt = config.dt();
        let time_steps = config.time_steps();

        let mut state = prepare_initial_state(scenario)?;
        let points = state.field(quantity)?.len();

        if operator.len() != points {
            return Err(format!(
                "Linear operator has size {} but {} has {} points",
                operator.len(),
                quantity,
                points
            ));
        }

        let system = self.system_matrix(&operator, dt, &spatial)?;
        let factorization = TridiagonalSolver::factorize(&system)?;
        let explicit_part = operator.shifted_identity((1.0 - self.theta) * dt);

        log::debug!(
            "{} on '{}': theta = {}, dt = {}, {} steps, {} unknowns",
            self.name(),
            scenario.get_model_name(),
            self.theta,
            dt,
            time_steps,
            points
        );
        if let Some(estimate) = scenario.model.stability(dt) {
            log::debug!("{}: {} = {:.4}", self.name(), estimate.label, estimate.value);
        }
        if self.theta < 0.5 {
            solver::report_stability(scenario, dt, self.name());
        }

        let last = points - 1;
        let left_rhs = boundary_rhs(spatial.left);
        let right_rhs = boundary_rhs(spatial.right);
        let mut next = DVector::zeros(points);

        let mut recorder = SnapshotRecorder::new(config);
        recorder.offer(0, &state)?;

        // ====== Step 3: Time Integration ======

        for step in 1..=time_steps {
            let current = state.field(quantity)?;

            let mut rhs = explicit_part.mul_vector(current);
            rhs[0] = left_rhs;
            rhs[last] = right_rhs;

            factorization.solve_into(&rhs, &mut next)?;

            // Copy rows hold up to rounding; snap them to the exact copy
            if let BoundaryCondition::CopyInterior { offset } = spatial.left {
                next[0] = next[offset];
            }
            if let BoundaryCondition::CopyInterior { offset } = spatial.right {
                next[last] = next[last - offset];
            }

            mem::swap(state.field_mut(quantity)?, &mut next);

            solver::validate_state(&state, step)?;
            recorder.offer(step, &state)?;
        }

        // ====== Step 4: Build Result ======

        let final_time = config.solver_type.time_at(time_steps);
        let mut result = SimulationResult::new(recorder.finish(), state, final_time);

        result.add_metadata("solver", self.name());
        result.add_metadata("model", scenario.get_model_name());
        result.add_metadata("theta", &self.theta.to_string());
        result.add_metadata("time steps", &time_steps.to_string());
        result.add_metadata("dt", &dt.to_string());
        result.add_metadata("total time", &final_time.to_string());
        if let Some(estimate) = scenario.model.stability(dt) {
            result.add_metadata(estimate.label, &estimate.value.to_string());
        }

        Ok(result)
    }

    fn name(&self) -> &str {
        if self.theta == 1.0 {
            "Backward Euler"
        } else if self.theta == 0.5 {
            "Crank-Nicolson"
        } else {
            "Theta Scheme"
        }
    }
}

// =================================================================================================
// Tests
// =================================================================================================
