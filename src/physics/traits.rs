//! Physical models traits and types
//!
//! This module defines the core API for physical models:
//! - `PhysicalModel`: trait for all physical models
//! - `PhysicalState`: flexible state container
//! - `PhysicalQuantity`: type-safe quantity identifiers
//! - `StabilityEstimate`: dimensionless number bounding explicit schemes

use nalgebra::DVector;
use std::collections::HashMap;

use crate::physics::{Grid1D, PhysicalData};
use crate::solver::TridiagonalMatrix;

// =================================================================================================
// Physical quantities (Type-safe Identifiers)
// =================================================================================================

/// Known physical quantities (type-safe enum)
///
/// # Example
/// ```
/// use fdm_rs::physics::{PhysicalQuantity, PhysicalState, PhysicalData};
///
/// let salinity = PhysicalQuantity::Custom("Salinity");
/// let mut state = PhysicalState::empty();
/// state.set(salinity, PhysicalData::uniform_vector(100, 35.0));
/// assert!(state.get(salinity).is_some());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhysicalQuantity {
    /// Concentration of a diffusing substance
    Concentration,

    /// Temperature (K)
    Temperature,

    /// Free-surface elevation of a water column (m)
    WaveHeight,

    /// Position of a body, one component per axis (m)
    Position,

    /// Velocity of a body, one component per axis (m/s)
    Velocity,

    /// Custom quantity (for use extension)
    Custom(&'static str),
}

impl std::fmt::Display for PhysicalQuantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PhysicalQuantity::Concentration => write!(f, "Concentration"),
            PhysicalQuantity::Temperature => write!(f, "Temperature"),
            PhysicalQuantity::WaveHeight => write!(f, "WaveHeight"),
            PhysicalQuantity::Position => write!(f, "Position"),
            PhysicalQuantity::Velocity => write!(f, "Velocity"),
            PhysicalQuantity::Custom(name) => write!(f, "{}", name),
        }
    }
}

// =================================================================================================
// Physical State (Flexible State Container)
// =================================================================================================

/// Physical state of the system
///
/// Contains all physical quantities at one time level.
///
/// # Example
/// ```
/// use fdm_rs::physics::{PhysicalState, PhysicalQuantity, PhysicalData};
///
/// let mut state = PhysicalState::new(
///     PhysicalQuantity::Position,
///     PhysicalData::from_vec(vec![0.0, 10.0]),
/// );
/// state.set(PhysicalQuantity::Velocity, PhysicalData::from_vec(vec![5.0, 0.0]));
/// assert_eq!(state.available_quantities().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PhysicalState {
    /// Physical quantities stored in a dictionary
    quantities: HashMap<PhysicalQuantity, PhysicalData>,

    /// Scalar metadata (optional, e.g. energy, mass, etc.)
    metadata: HashMap<String, f64>,
}

impl PhysicalState {
    /// Create a new state with primary quantity
    pub fn new(quantity: PhysicalQuantity, value: PhysicalData) -> Self {
        let mut quantities = HashMap::new();
        quantities.insert(quantity, value);

        Self {
            quantities,
            metadata: HashMap::new(),
        }
    }

    /// Create a state holding a single field
    pub fn from_field(quantity: PhysicalQuantity, field: DVector<f64>) -> Self {
        Self::new(quantity, PhysicalData::Vector(field))
    }

    /// Create an empty state
    pub fn empty() -> Self {
        Self {
            quantities: HashMap::new(),
            metadata: HashMap::new(),
        }
    }

    /// Get a quantity by type
    pub fn get(&self, quantity: PhysicalQuantity) -> Option<&PhysicalData> {
        self.quantities.get(&quantity)
    }

    /// Get mutable reference to a quantity
    pub fn get_mut(&mut self, quantity: PhysicalQuantity) -> Option<&mut PhysicalData> {
        self.quantities.get_mut(&quantity)
    }

    /// Get a quantity as a field, or explain why it is not one
    pub fn field(&self, quantity: PhysicalQuantity) -> Result<&DVector<f64>, String> {
        self.get(quantity)
            .ok_or_else(|| format!("Quantity {} not found in state", quantity))?
            .try_as_vector()
            .ok_or_else(|| format!("Quantity {} is not a field", quantity))
    }

    /// Mutable counterpart of [`PhysicalState::field`]
    pub fn field_mut(&mut self, quantity: PhysicalQuantity) -> Result<&mut DVector<f64>, String> {
        self.get_mut(quantity)
            .ok_or_else(|| format!("Quantity {} not found in state", quantity))?
            .try_as_vector_mut()
            .ok_or_else(|| format!("Quantity {} is not a field", quantity))
    }

    /// Set a quantity
    pub fn set(&mut self, quantity: PhysicalQuantity, value: PhysicalData) {
        self.quantities.insert(quantity, value);
    }

    /// List of available physical state quantities
    pub fn available_quantities(&self) -> Vec<PhysicalQuantity> {
        self.quantities.keys().cloned().collect()
    }

    /// Iterate over `(quantity, data)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&PhysicalQuantity, &PhysicalData)> {
        self.quantities.iter()
    }

    /// Number of stored quantities
    pub fn len(&self) -> usize {
        self.quantities.len()
    }

    /// True when no quantity is stored
    pub fn is_empty(&self) -> bool {
        self.quantities.is_empty()
    }

    /// Get a metadata
    pub fn get_metadata(&self, key: &str) -> Option<f64> {
        self.metadata.get(key).copied()
    }

    /// Set a metadata
    pub fn set_metadata(&mut self, key: String, value: f64) {
        self.metadata.insert(key, value);
    }
}

// Operator overloading for numerical operations

impl std::ops::Add for PhysicalState {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self::Output {
        for (quantity, value) in rhs.quantities {
            match self.quantities.remove(&quantity) {
                Some(existing_value) => {
                    self.quantities.insert(quantity, existing_value + value);
                }
                None => {
                    self.quantities.insert(quantity, value);
                }
            }
        }
        self
    }
}

impl std::ops::Mul<f64> for PhysicalState {
    type Output = Self;

    fn mul(mut self, scalar: f64) -> Self::Output {
        for data in self.quantities.values_mut() {
            data.apply(|x| x * scalar);
        }
        self
    }
}

// =================================================================================================
// Stability estimate
// =================================================================================================

/// Dimensionless number deciding whether an explicit scheme stays bounded
///
/// The diffusion number `D·dt/dx²` must stay below 0.5 for FTCS, the Courant
/// number `c·dt/dx` below 1 for the leapfrog wave scheme. Solvers only report
/// it; staying below the limit is the caller's responsibility.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StabilityEstimate {
    /// Display name ("diffusion number", "Courant number", ...)
    pub label: &'static str,

    /// Value for the requested time step
    pub value: f64,

    /// Largest stable value for the explicit scheme
    pub explicit_limit: f64,
}

impl StabilityEstimate {
    /// True when the explicit scheme is expected to stay bounded
    pub fn is_within_limit(&self) -> bool {
        self.value <= self.explicit_limit
    }
}

// ==================================================================================================
// Physical Model Trait
// =================================================================================================

/// Trait for physical models
///
/// # Responsibility
/// Computes the physics equations of a system at a given state.
/// Does NOT solve them (that's the Solver's job).
///
/// The model provides the "physics" (equations), the Solver provides
/// the "numerics" (method to solve them).
///
/// Optional capabilities (grid, tridiagonal operator, stability number) are
/// default methods returning `None`, so simple ODE models only implement the
/// four mandatory methods.
pub trait PhysicalModel: Send + Sync {

    /// Number of spatial points
    ///
    /// Used by the solver to check boundary rules against the field length
    fn points(&self) -> usize;

    /// Computes the physics at a given state
    ///
    /// # Physical Interpretation
    ///
    /// - First order in time (diffusion, ballistics): returns `f(y)` of
    ///   `dy/dt = f(y)`
    /// - Second order in time (waves): returns `L(y)` of `d²y/dt² = L(y)`
    ///
    /// Spatial operators return zero on the two boundary points; boundary
    /// values are owned by the boundary rules, never by the interior update.
    fn compute_physics(&self, state: &PhysicalState) -> PhysicalState;

    /// Creates the initial state for this physical model
    fn setup_initial_state(&self) -> PhysicalState;

    /// Name of the model (used to display and logging)
    fn name(&self) -> &str;

    /// Description of the model (option)
    fn description(&self) -> Option<&str> {
        None
    }

    /// Grid the model lives on, if it is spatially discretised
    fn grid(&self) -> Option<&Grid1D> {
        None
    }

    /// Spatial operator `L` of `du/dt = L u` as a tridiagonal matrix
    ///
    /// Required by the implicit solver. Boundary rows are ignored: the
    /// solver replaces them with the boundary rules.
    fn linear_operator(&self) -> Option<TridiagonalMatrix> {
        None
    }

    /// Stability number of the explicit scheme for a time step `dt`
    fn stability(&self, _dt: f64) -> Option<StabilityEstimate> {
        None
    }
}
