//! Numerical solver traits and types
//!
//! # Design Philosophy
//!
//! - Central enum `SolverType` defines how the time axis is discretised
//! - `SolverConfiguration` adds the snapshot schedule
//! - `SimulationResult` carries the saved snapshots, the final state and
//!   metadata for reproducibility
//!
//! All schemes in this crate march a fixed number of equal steps: no
//! adaptive stepping, no early exit.

use std::collections::HashMap;

use crate::physics::PhysicalState;
use crate::solver::Scenario;
use crate::solver::snapshot::{SnapshotBuffer, SnapshotSchedule};

// ============================================================================
// Central Solver Type Enumeration
// ============================================================================

/// Time discretisation of a run
///
/// # Examples
///
/// ```rust
/// use fdm_rs::solver::SolverType;
///
/// // 10 s split into 1000 steps: dt = 0.01
/// let by_duration = SolverType::TimeEvolution { total_time: 10.0, time_steps: 1000 };
///
/// // dt = 0.01 repeated 1000 times
/// let by_step = SolverType::FixedStep { dt: 0.01, time_steps: 1000 };
///
/// assert!((by_duration.dt() - by_step.dt()).abs() < 1e-15);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum SolverType {

    /// Total duration split into equal steps (`dt = total_time / time_steps`)
    TimeEvolution {
        total_time: f64,
        time_steps: usize,
    },

    /// Given step size repeated a given number of times
    FixedStep {
        dt: f64,
        time_steps: usize,
    },
}

impl SolverType {
    /// Get name identifier
    pub fn name(&self) -> &str {
        match self {
            SolverType::TimeEvolution { .. } => "TimeEvolution",
            SolverType::FixedStep { .. } => "FixedStep",
        }
    }

    /// Time step size
    pub fn dt(&self) -> f64 {
        match self {
            SolverType::TimeEvolution { total_time, time_steps } => total_time / (*time_steps as f64),
            SolverType::FixedStep { dt, .. } => *dt,
        }
    }

    /// Number of steps
    pub fn time_steps(&self) -> usize {
        match self {
            SolverType::TimeEvolution { time_steps, .. } | SolverType::FixedStep { time_steps, .. } => {
                *time_steps
            }
        }
    }

    /// Simulated duration
    pub fn total_time(&self) -> f64 {
        match self {
            SolverType::TimeEvolution { total_time, .. } => *total_time,
            SolverType::FixedStep { dt, time_steps } => dt * (*time_steps as f64),
        }
    }

    /// Time reached after `step` steps
    ///
    /// Computed from the index, not accumulated, so the last time point is
    /// `total_time` up to machine precision.
    pub fn time_at(&self, step: usize) -> f64 {
        match self {
            SolverType::TimeEvolution { total_time, time_steps } => {
                total_time * (step as f64) / (*time_steps as f64)
            }
            SolverType::FixedStep { dt, .. } => dt * step as f64,
        }
    }

    /// Validate that parameters are physically meaningful
    pub fn validate(&self) -> Result<(), String> {
        match self {
            SolverType::TimeEvolution { total_time, time_steps } => {
                if *total_time <= 0.0 || !total_time.is_finite() {
                    return Err("Total time must be positive".to_string());
                }
                if *time_steps == 0 {
                    return Err("TimeSteps must be greater than 0".to_string());
                }
                Ok(())
            }
            SolverType::FixedStep { dt, time_steps } => {
                if *dt <= 0.0 || !dt.is_finite() {
                    return Err("Time step dt must be positive".to_string());
                }
                if *time_steps == 0 {
                    return Err("TimeSteps must be greater than 0".to_string());
                }
                Ok(())
            }
        }
    }
}

// =================================================================================================
// Solver configuration
// =================================================================================================

/// Configuration for numerical solver
///
/// # Examples
///
/// ```rust
/// use fdm_rs::solver::{SolverConfiguration, SnapshotSchedule};
///
/// let config = SolverConfiguration::fixed_step(0.1, 3000)
///     .with_snapshots(SnapshotSchedule::Every(500));
///
/// assert!(config.validate().is_ok());
/// assert!((config.total_time() - 300.0).abs() < 1e-9);
/// ```
#[derive(Clone, Debug)]
pub struct SolverConfiguration {
    /// Type of solver and its parameters
    pub solver_type: SolverType,

    /// Steps saved in the result
    pub snapshots: SnapshotSchedule,
}

impl SolverConfiguration {
    /// Create a new configuration with a given solver type
    pub fn new(solver_type: SolverType) -> Self {
        Self {
            solver_type,
            snapshots: SnapshotSchedule::default(),
        }
    }

    /// Create a time evolution configuration from a duration
    pub fn time_evolution(total_time: f64, time_steps: usize) -> Self {
        Self::new(SolverType::TimeEvolution { total_time, time_steps })
    }

    /// Create a time evolution configuration from a step size
    pub fn fixed_step(dt: f64, time_steps: usize) -> Self {
        Self::new(SolverType::FixedStep { dt, time_steps })
    }

    /// Builder pattern: set the snapshot schedule
    pub fn with_snapshots(mut self, snapshots: SnapshotSchedule) -> Self {
        self.snapshots = snapshots;
        self
    }

    /// Time step size
    pub fn dt(&self) -> f64 {
        self.solver_type.dt()
    }

    /// Number of steps
    pub fn time_steps(&self) -> usize {
        self.solver_type.time_steps()
    }

    /// Simulated duration
    pub fn total_time(&self) -> f64 {
        self.solver_type.total_time()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        self.solver_type.validate()?;
        self.snapshots.validate()
    }
}

// =================================================================================================
// Simulation result
// =================================================================================================

/// Result of a run
///
/// Holds the snapshots selected by the configuration, the final state
/// (always kept, even when the schedule skips the last step) and string
/// metadata describing the run.
#[derive(Clone, Debug)]
pub struct SimulationResult {
    /// Saved snapshots
    pub snapshots: SnapshotBuffer,

    /// State after the last step
    pub final_state: PhysicalState,

    /// Time reached after the last step
    pub final_time: f64,

    metadata: HashMap<String, String>,
}

impl SimulationResult {
    /// Create a result
    pub fn new(snapshots: SnapshotBuffer, final_state: PhysicalState, final_time: f64) -> Self {
        Self {
            snapshots,
            final_state,
            final_time,
            metadata: HashMap::new(),
        }
    }

    /// Number of saved snapshots
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// True when no snapshot was saved
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Times of the saved snapshots
    pub fn time_points(&self) -> &[f64] {
        self.snapshots.time_points()
    }

    /// Add a metadata entry
    pub fn add_metadata(&mut self, key: &str, value: &str) {
        self.metadata.insert(key.to_string(), value.to_string());
    }

    /// Get a metadata entry
    pub fn get_metadata(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(String::as_str)
    }

    /// All metadata entries
    pub fn metadata(&self) -> &HashMap<String, String> {
        &self.metadata
    }
}

// =================================================================================================
// Solver trait
// =================================================================================================

/// Numerical method applied to a scenario
///
/// A solver never owns the problem: the same scenario can be solved by
/// several methods and a solver can be reused for several scenarios.
pub trait Solver {
    /// Run the method over the configured number of steps
    fn solve(&self, scenario: &Scenario, config: &SolverConfiguration) -> Result<SimulationResult, String>;

    /// Display name
    fn name(&self) -> &str;
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_time_evolution_parameters() {
        let config = SolverConfiguration::time_evolution(10.0, 100);

        assert_relative_eq!(config.dt(), 0.1);
        assert_eq!(config.time_steps(), 100);
        assert_relative_eq!(config.total_time(), 10.0);
        assert_relative_eq!(config.solver_type.time_at(100), 10.0);
        assert_eq!(config.solver_type.name(), "TimeEvolution");
    }

    #[test]
    fn test_fixed_step_parameters() {
        let config = SolverConfiguration::fixed_step(0.5, 8);

        assert_relative_eq!(config.dt(), 0.5);
        assert_relative_eq!(config.total_time(), 4.0);
        assert_relative_eq!(config.solver_type.time_at(3), 1.5);
        assert_eq!(config.solver_type.name(), "FixedStep");
    }

    #[test]
    fn test_invalid_configurations() {
        assert!(SolverConfiguration::time_evolution(0.0, 10).validate().is_err());
        assert!(SolverConfiguration::time_evolution(1.0, 0).validate().is_err());
        assert!(SolverConfiguration::fixed_step(-0.1, 10).validate().is_err());
        assert!(SolverConfiguration::fixed_step(f64::NAN, 10).validate().is_err());
        assert!(
            SolverConfiguration::fixed_step(0.1, 10)
                .with_snapshots(SnapshotSchedule::Every(0))
                .validate()
                .is_err()
        );
    }

    #[test]
    fn test_result_metadata() {
        let mut result = SimulationResult::new(SnapshotBuffer::new(), PhysicalState::empty(), 1.0);
        result.add_metadata("solver", "Forward Euler");

        assert_eq!(result.get_metadata("solver"), Some("Forward Euler"));
        assert!(result.get_metadata("dt").is_none());
        assert!(result.is_empty());
    }
}
