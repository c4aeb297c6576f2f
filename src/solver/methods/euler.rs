//! Forward Euler numerical solver
//!
//! # Mathematical Background
//!
//! The Forward Euler method is the simplest explicit time-stepping scheme
//! for solving ordinary differential equations (ODEs):
//!
//! ```text
//! dy/dt = f(y)
//! ```
//!
//! The scheme approximates the solution at time t_{n+1} = t_n + dt using:
//!
//! ```text
//! y_{n+1} = y_n + dt * f(y_n)
//! ```
//!
//! # Spatial models: FTCS
//!
//! When `f` is a centered second difference (diffusion), forward Euler in
//! time is the classic Forward-Time Centered-Space scheme:
//!
//! ```text
//! u_i^{n+1} = u_i^n + alpha (u_{i+1}^n - 2 u_i^n + u_{i-1}^n),   alpha = D dt / dx²
//! ```
//!
//! The boundary rules overwrite both end points after every update.
//!
//! # Characteristics
//!
//! - **Order**: First-order in time (error ~ O(dt))
//! - **Stability**: FTCS requires `alpha <= 0.5`; above that the solver
//!   logs a warning and keeps going
//! - **Complexity**: 1 function evaluation per step
//!
//! # Example
//!
//! ```rust
//! use fdm_rs::models::Ballistic;
//! use fdm_rs::physics::PhysicalQuantity;
//! use fdm_rs::solver::{EulerSolver, Scenario, Solver, SolverConfiguration};
//!
//! let model = Ballistic::from_launch(20.0, 45.0);
//! let flight_time = model.flight_time();
//! let scenario = Scenario::from_model(Box::new(model));
//!
//! let config = SolverConfiguration::time_evolution(flight_time, 1000);
//! let result = EulerSolver::new().solve(&scenario, &config).unwrap();
//!
//! let heights = result.snapshots.series(PhysicalQuantity::Position, 1).unwrap();
//! assert_eq!(heights.len(), 1001);
//! ```

use crate::physics::{PhysicalModel, PhysicalState};
use crate::solver;
use crate::solver::methods::{prepare_initial_state, SnapshotRecorder};
use crate::solver::{DomainBoundaries, Scenario, SimulationResult, Solver, SolverConfiguration};

// =================================================================================================
// Single step
// =================================================================================================

/// One forward Euler step followed by the boundary rules
///
/// Builds a fresh state from the frozen `state`: the model never sees a
/// partially updated level.
///
/// # Example
///
/// ```rust
/// use fdm_rs::models::Diffusion1D;
/// use fdm_rs::physics::{PhysicalModel, PhysicalQuantity, PhysicalState};
/// use fdm_rs::solver::{euler_step, DomainBoundaries, SpatialBoundaries};
/// use nalgebra::DVector;
///
/// let model = Diffusion1D::new(1.0, 0.0, 4.0, 5).unwrap();
/// let state = PhysicalState::from_field(
///     PhysicalQuantity::Concentration,
///     DVector::from_vec(vec![0.0, 0.0, 1.0, 0.0, 0.0]),
/// );
/// let rules = SpatialBoundaries::dirichlet(PhysicalQuantity::Concentration, 0.0, 0.0);
/// let boundaries = DomainBoundaries::space_time(rules, state.clone());
///
/// // dx = 1, dt = 0.25: alpha = 0.25
/// let next = euler_step(&model, &state, 0.25, &boundaries).unwrap();
/// let field = next.field(PhysicalQuantity::Concentration).unwrap();
/// assert_eq!(field.as_slice(), &[0.0, 0.25, 0.5, 0.25, 0.0]);
/// ```
pub fn euler_step(
    model: &dyn PhysicalModel,
    state: &PhysicalState,
    dt: f64,
    boundaries: &DomainBoundaries,
) -> Result<PhysicalState, String> {
    // f(y_n): right-hand side of dy/dt = f(y)
    let physics = model.compute_physics(state);

    // Every field owned by spatial rules must receive a rate
    if let Some(spatial) = boundaries.spatial()
        && physics.get(spatial.quantity).is_none()
    {
        return Err(format!(
            "Model '{}' computes no rate for {}, the quantity held by the boundary rules",
            model.name(),
            spatial.quantity
        ));
    }

    // y_{n+1} = y_n + dt * f(y_n)
    let mut next = state.clone() + physics * dt;

    boundaries.apply(&mut next)?;
    Ok(next)
}

// =================================================================================================
// Forward Euler Solver
// =================================================================================================

/// Forward Euler solver (FTCS on spatial diffusion models)
#[derive(Debug, Clone, Copy, Default)]
pub struct EulerSolver;

impl EulerSolver {
    /// Create a new Forward Euler solver
    ///
    /// # Example
    ///
    /// ```rust
    /// use fdm_rs::solver::{EulerSolver, Solver};
    ///
    /// let solver = EulerSolver::new();
    /// assert_eq!(solver.name(), "Forward Euler");
    /// ```
    pub fn new() -> Self {
        Self
    }
}

impl Solver for EulerSolver {

    fn solve(&self, scenario: &Scenario, config: &SolverConfiguration) -> Result<SimulationResult, String> {

        // ====== Step 1: Validation ======

        config.validate()?;
        scenario.validate()?;

        // ====== Step 2: Setup ======

        let dt = config.dt();
        let time_steps = config.time_steps();

        log::debug!(
            "{} on '{}': dt = {}, {} steps",
            self.name(),
            scenario.get_model_name(),
            dt,
            time_steps
        );
        solver::report_stability(scenario, dt, self.name());

        let mut state = prepare_initial_state(scenario)?;
        let mut recorder = SnapshotRecorder::new(config);
        recorder.offer(0, &state)?;

        // ====== Step 3: Time Integration ======

        for step in 1..=time_steps {
            state = euler_step(scenario.model.as_ref(), &state, dt, &scenario.conditions)?;

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
        if let Some(estimate) = scenario.model.stability(dt) {
            result.add_metadata(estimate.label, &estimate.value.to_string());
        }

        Ok(result)
    }

    fn name(&self) -> &str {
        "Forward Euler"
    }
}

// =================================================================================================
// Tests
// =================================================================================================
