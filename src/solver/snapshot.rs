//! Snapshot schedule and buffer
//!
//! Long runs only keep a handful of time levels for later inspection. The
//! [`SnapshotSchedule`] decides which step indices are saved, the
//! [`SnapshotBuffer`] stores them in increasing step order, once each.

use std::collections::BTreeSet;

use nalgebra::DVector;
use ndarray::Array2;

use crate::physics::{PhysicalQuantity, PhysicalState};

// =================================================================================================
// Snapshot Schedule
// =================================================================================================

/// Which step indices are saved during a run
///
/// Step `0` is the initial condition, step `n` the state after `n` updates.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SnapshotSchedule {
    /// Every step (full trajectory)
    #[default]
    All,

    /// Every `k`-th step, plus the last one
    Every(usize),

    /// Explicit list of step indices
    At(BTreeSet<usize>),

    /// Initial and final steps only
    Endpoints,
}

impl SnapshotSchedule {
    /// Schedule from any list of step indices
    pub fn at<I>(steps: I) -> Self
    where
        I: IntoIterator<Item = usize>,
    {
        SnapshotSchedule::At(steps.into_iter().collect())
    }

    /// True when `step` must be saved in a run of `total_steps` steps
    pub fn contains(&self, step: usize, total_steps: usize) -> bool {
        match self {
            SnapshotSchedule::All => true,
            SnapshotSchedule::Every(k) => step % k == 0 || step == total_steps,
            SnapshotSchedule::At(steps) => steps.contains(&step),
            SnapshotSchedule::Endpoints => step == 0 || step == total_steps,
        }
    }

    /// Upper bound of the number of snapshots, used to preallocate
    pub fn capacity(&self, total_steps: usize) -> usize {
        match self {
            SnapshotSchedule::All => total_steps + 1,
            SnapshotSchedule::Every(k) => total_steps / k + 2,
            SnapshotSchedule::At(steps) => steps.len(),
            SnapshotSchedule::Endpoints => 2,
        }
    }

    /// Validate the schedule
    pub fn validate(&self) -> Result<(), String> {
        match self {
            SnapshotSchedule::Every(0) => Err("Snapshot interval must be greater than 0".to_string()),
            _ => Ok(()),
        }
    }
}

// =================================================================================================
// Snapshot Buffer
// =================================================================================================

/// Sparse, ordered collection of saved states
///
/// Each step index is written at most once and indices must increase.
///
/// # Example
///
/// ```rust
/// use fdm_rs::physics::{PhysicalQuantity, PhysicalState, PhysicalData};
/// use fdm_rs::solver::SnapshotBuffer;
///
/// let state = PhysicalState::new(PhysicalQuantity::Concentration, PhysicalData::from_vec(vec![1.0, 2.0]));
/// let mut buffer = SnapshotBuffer::new();
///
/// buffer.record(0, 0.0, &state).unwrap();
/// buffer.record(10, 0.5, &state).unwrap();
/// assert!(buffer.record(10, 0.5, &state).is_err());
/// assert_eq!(buffer.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SnapshotBuffer {
    steps: Vec<usize>,
    time_points: Vec<f64>,
    states: Vec<PhysicalState>,
}

impl SnapshotBuffer {
    /// Empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty buffer with room for `capacity` snapshots
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            steps: Vec::with_capacity(capacity),
            time_points: Vec::with_capacity(capacity),
            states: Vec::with_capacity(capacity),
        }
    }

    /// Save a copy of `state` for `step`
    pub fn record(&mut self, step: usize, time: f64, state: &PhysicalState) -> Result<(), String> {
        if let Some(&last) = self.steps.last()
            && step <= last
        {
            return Err(format!(
                "Snapshot for step {} cannot be recorded after step {}",
                step, last
            ));
        }

        log::trace!("snapshot recorded at step {} (t = {})", step, time);

        self.steps.push(step);
        self.time_points.push(time);
        self.states.push(state.clone());
        Ok(())
    }

    /// Number of snapshots
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// True when nothing was recorded
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Recorded step indices
    pub fn steps(&self) -> &[usize] {
        &self.steps
    }

    /// Recorded times
    pub fn time_points(&self) -> &[f64] {
        &self.time_points
    }

    /// Recorded states
    pub fn states(&self) -> &[PhysicalState] {
        &self.states
    }

    /// State saved for `step`, if any
    pub fn get(&self, step: usize) -> Option<&PhysicalState> {
        self.steps
            .binary_search(&step)
            .ok()
            .map(|index| &self.states[index])
    }

    /// Last saved state
    pub fn last(&self) -> Option<&PhysicalState> {
        self.states.last()
    }

    /// Iterate over `(step, time, state)`
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64, &PhysicalState)> {
        self.steps
            .iter()
            .zip(self.time_points.iter())
            .zip(self.states.iter())
            .map(|((&step, &time), state)| (step, time, state))
    }

    /// Fields of `quantity`, one per snapshot
    pub fn fields(&self, quantity: PhysicalQuantity) -> Result<Vec<&DVector<f64>>, String> {
        self.states.iter().map(|state| state.field(quantity)).collect()
    }

    /// Value of `quantity` at component `index`, one per snapshot
    ///
    /// For a projectile, `series(Position, 1)` is the height over time.
    pub fn series(&self, quantity: PhysicalQuantity, index: usize) -> Result<Vec<f64>, String> {
        self.states
            .iter()
            .map(|state| {
                let field = state.field(quantity)?;
                field.get(index).copied().ok_or_else(|| {
                    format!("Index {} out of bounds for {} ({} values)", index, quantity, field.len())
                })
            })
            .collect()
    }

    /// Snapshots of `quantity` stacked as rows of a matrix
    pub fn to_array(&self, quantity: PhysicalQuantity) -> Result<Array2<f64>, String> {
        let fields = self.fields(quantity)?;
        let columns = fields.first().map(|f| f.len()).unwrap_or(0);

        if fields.iter().any(|f| f.len() != columns) {
            return Err(format!("Snapshots of {} do not share the same length", quantity));
        }

        Ok(Array2::from_shape_fn((fields.len(), columns), |(row, column)| {
            fields[row][column]
        }))
    }
}

// =================================================================================================
// Tests
// =================================================================================================
