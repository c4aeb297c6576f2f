//! Numerical solvers
//!
//! A numerical solver applies a finite-difference scheme to the equations
//! provided by a physical model within a specific scenario.
//!
//! # Core Concepts
//!
//! The solver architecture separates concerns into three layers:
//!
//! 1. **Scenario** (`Scenario`) - WHAT to solve
//!    - Physical model (equations)
//!    - Domain boundaries (initial condition and boundary rules)
//!
//! 2. **Configuration** (`SolverConfiguration`) - HOW to march in time
//!    - Time step and number of steps
//!    - Snapshot schedule
//!
//! 3. **Solver** (`Solver` trait) - The numerical method
//!    - `EulerSolver`: forward Euler, FTCS on spatial models
//!    - `WaveSolver`: centered second-order time stepping (three time levels)
//!    - `ImplicitSolver`: theta scheme with a tridiagonal solve per step
//!
//! # Module Organization
//!
//! - **`traits`**: `Solver`, `SolverType`, `SolverConfiguration`, `SimulationResult`
//! - **`boundary`**: `BoundaryCondition`, `SpatialBoundaries`, `DomainBoundaries`
//! - **`scenario`**: `Scenario` (model + boundaries)
//! - **`snapshot`**: `SnapshotSchedule`, `SnapshotBuffer`
//! - **`stencil`**: pure stencil updates on plain vectors
//! - **`tridiagonal`**: `TridiagonalMatrix`, `TridiagonalSolver` (Thomas algorithm)
//! - **`methods`**: the three solver implementations
//!
//! # Workflow Diagram
//!
//! ```text
//! ┌─────────────────┐
//! │  Physical Model │  (equations)
//! └────────┬────────┘
//!          │
//!          ├──────────────┐
//!          │              │
//! ┌────────▼────────┐ ┌──▼──────────────┐
//! │ Domain          │ │ Scenario        │ ← WHAT to solve
//! │ Boundaries      │ │ (model + bounds)│
//! └─────────────────┘ └────────┬────────┘
//!                              │
//!                     ┌────────▼─────────────┐
//!                     │ Solver Configuration │ ← HOW to march
//!                     │ (dt, steps, saves)   │
//!                     └────────┬─────────────┘
//!                              │
//!                     ┌────────▼────────┐
//!                     │ Numerical Solver│ ← The method
//!                     │ (FTCS, wave...) │
//!                     └────────┬────────┘
//!                              │
//!                     ┌────────▼────────────┐
//!                     │ Simulation Result   │ ← The solution
//!                     │ (snapshots + meta)  │
//!                     └─────────────────────┘
//! ```
//!
//! # Quick Start Example
//!
//! ```rust
//! use fdm_rs::models::Diffusion1D;
//! use fdm_rs::physics::{PhysicalModel, PhysicalQuantity};
//! use fdm_rs::solver::{
//!     DomainBoundaries, EulerSolver, Scenario, SnapshotSchedule, Solver,
//!     SolverConfiguration, SpatialBoundaries,
//! };
//!
//! let model = Diffusion1D::new(1.0, 0.0, 1.0, 51).unwrap();
//! let initial = model.setup_initial_state();
//! let rules = SpatialBoundaries::dirichlet(PhysicalQuantity::Concentration, 0.0, 0.0);
//! let scenario = Scenario::new(Box::new(model), DomainBoundaries::space_time(rules, initial));
//!
//! // dt chosen so that D·dt/dx² = 0.4
//! let config = SolverConfiguration::fixed_step(1.6e-4, 500)
//!     .with_snapshots(SnapshotSchedule::Every(100));
//!
//! let result = EulerSolver::new().solve(&scenario, &config).unwrap();
//! assert_eq!(result.snapshots.steps(), &[0, 100, 200, 300, 400, 500]);
//! ```
//!
//! # Error Handling
//!
//! All solver methods return `Result<T, String>`. Common errors:
//! - Invalid configuration (non-positive dt, zero steps)
//! - Invalid scenario (missing initial condition, boundary rule too wide
//!   for the field, point count mismatch)
//! - Model capability missing (no tridiagonal operator for the implicit solver)
//! - Numerical instability (NaN or Inf in the state)
//!
//! A time step above the explicit stability limit is **not** an error: it is
//! logged with `log::warn!` and the run goes on.

// =================================================================================================
// Module Declarations
// =================================================================================================
mod traits;
mod boundary;
mod scenario;
mod snapshot;
pub mod stencil;
mod tridiagonal;
mod methods;

// =================================================================================================
// Parallel Execution Threshold
// =================================================================================================
//
// The threshold lives in an AtomicUsize and can be changed at runtime
// (benchmarks and tests). Reads and writes use Relaxed ordering.
// =================================================================================================

use std::sync::atomic::{AtomicUsize, Ordering};

/// Default number of grid points above which stencil updates and
/// [`PhysicalData::apply()`](crate::physics::PhysicalData::apply) switch to
/// parallel iteration.
const DEFAULT_PARALLEL_THRESHOLD: usize = 999;

/// Runtime-configurable parallel-execution threshold.
///
/// Read via [`parallel_threshold()`], written via [`set_parallel_threshold()`].
static PARALLEL_THRESHOLD: AtomicUsize = AtomicUsize::new(DEFAULT_PARALLEL_THRESHOLD);

/// Return the current parallel-execution threshold.
///
/// Fields with fewer points than this value are updated sequentially. Larger
/// fields go through rayon, but only when the crate is compiled with the
/// `parallel` feature.
///
/// # Example
///
/// ```rust
/// use fdm_rs::solver::parallel_threshold;
///
/// assert!(parallel_threshold() > 0);
/// ```
pub fn parallel_threshold() -> usize {
    PARALLEL_THRESHOLD.load(Ordering::Relaxed)
}

/// Set the parallel-execution threshold to a new value.
///
/// # Panics
///
/// Panics when `threshold == 0`.
///
/// # Example
///
/// ```rust
/// use fdm_rs::solver::{parallel_threshold, set_parallel_threshold};
///
/// let previous = parallel_threshold();
/// set_parallel_threshold(2048);
/// assert_eq!(parallel_threshold(), 2048);
///
/// // Restore so other tests are not affected.
/// set_parallel_threshold(previous);
/// ```
pub fn set_parallel_threshold(threshold: usize) {
    assert!(threshold > 0, "parallel threshold must be at least 1");
    PARALLEL_THRESHOLD.store(threshold, Ordering::Relaxed);
}

/// Serialises tests that touch the global threshold
#[cfg(test)]
static THRESHOLD_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

/// RAII guard that saves the current threshold on construction and restores
/// it on drop.
///
/// Only compiled in test builds. The outermost guard holds a process-wide
/// lock until it is dropped, so tests changing the threshold run one at a
/// time.
///
/// ```rust,ignore
/// let _guard = crate::solver::ThresholdGuard::save(50);
/// // threshold is now 50 …
/// // … and is automatically restored when _guard is dropped.
/// ```
#[cfg(test)]
pub(crate) struct ThresholdGuard {
    previous: usize,
    _lock: Option<std::sync::MutexGuard<'static, ()>>,
}

#[cfg(test)]
impl ThresholdGuard {
    /// Set the threshold to `new_value` and return a guard that will
    /// restore the previous value on drop.
    pub(crate) fn save(new_value: usize) -> Self {
        let lock = THRESHOLD_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        let previous = parallel_threshold();
        set_parallel_threshold(new_value);
        Self { previous, _lock: Some(lock) }
    }

    /// Change the threshold again under the lock this guard already holds
    pub(crate) fn nested(&self, new_value: usize) -> Self {
        let previous = parallel_threshold();
        set_parallel_threshold(new_value);
        Self { previous, _lock: None }
    }
}

// Restores before the lock field is released
#[cfg(test)]
impl Drop for ThresholdGuard {
    fn drop(&mut self) {
        PARALLEL_THRESHOLD.store(self.previous, Ordering::Relaxed);
    }
}

// =================================================================================================
// Public Re-exports
// =================================================================================================

pub use traits::{
    SimulationResult,
    Solver,
    SolverConfiguration,
    SolverType,
};

pub use boundary::{BoundaryCondition, DomainBoundaries, SpatialBoundaries};
pub use scenario::Scenario;
pub use snapshot::{SnapshotBuffer, SnapshotSchedule};
pub use tridiagonal::{TridiagonalMatrix, TridiagonalSolver};

pub use methods::{euler_step, EulerSolver, ImplicitSolver, WaveSolver};

// =================================================================================================
// Helper Functions
// =================================================================================================

use crate::physics::PhysicalState;

/// Validate physical state for numerical issues
///
/// Checks that the state does not contain NaN or Inf values, which would
/// indicate numerical instability or errors in the physics computation.
///
/// # Example
///
/// ```rust,ignore
/// validate_state(&state, 42)?;  // Validates state at step 42
/// ```
pub(crate) fn validate_state(state: &PhysicalState, step: usize) -> Result<(), String> {
    for (quantity, data) in state.iter() {
        // NaN arises from 0/0, Inf - Inf and friends
        if data.has_nan() {
            return Err(format!(
                "NaN detected in {} at step {}. This indicates numerical instability. \
                 Try reducing the time step.",
                quantity, step
            ));
        }

        if !data.is_finite() {
            return Err(format!(
                "Infinity detected in {} at step {}. This indicates numerical overflow. \
                 Try reducing the time step or check the model for division by zero.",
                quantity, step
            ));
        }
    }

    Ok(())
}

/// Log the stability number of the explicit scheme and warn above its limit
pub(crate) fn report_stability(scenario: &Scenario, dt: f64, solver: &str) {
    if let Some(estimate) = scenario.model.stability(dt) {
        if estimate.is_within_limit() {
            log::debug!(
                "{}: {} = {:.4} (limit {})",
                solver,
                estimate.label,
                estimate.value,
                estimate.explicit_limit
            );
        } else {
            log::warn!(
                "{}: {} = {:.4} exceeds the explicit limit {}; the solution may grow without bound",
                solver,
                estimate.label,
                estimate.value,
                estimate.explicit_limit
            );
        }
    }
}

// =================================================================================================
// Tests
// =================================================================================================
