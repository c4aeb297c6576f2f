//! Domain boundaries: initial condition and boundary rules
//!
//! # Design Philosophy
//!
//! A domain is described by:
//!
//! - an **initial condition** (the temporal boundary at t = 0),
//! - optionally, **spatial boundary rules** for the two ends of the 1-D grid.
//!
//! Boundary rules are reapplied by every solver after every interior update.
//! The interior update formula never writes the two boundary points.
//!
//! ```text
//!   left rule                                  right rule
//!      ▼                                           ▼
//!      ●────●────●────●─── ... ───●────●────●────●
//!      0    1    2    3          n-4  n-3  n-2  n-1
//!
//!   Dirichlet(v)            : u[0] = v
//!   CopyInterior{offset: 1} : u[0] = u[1]        (zero gradient)
//!   CopyInterior{offset: 2} : u[0] = u[2]        (outflow approximation)
//! ```

use nalgebra::DVector;
use std::fmt;

use crate::physics::{PhysicalQuantity, PhysicalState};

// =================================================================================================
// Boundary Condition
// =================================================================================================

/// Rule fixing the value of one boundary point
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoundaryCondition {
    /// Boundary value fixed to a constant
    Dirichlet(f64),

    /// Boundary value copied from the interior point `offset` positions inward
    ///
    /// `offset = 1` is the usual zero-gradient (Neumann) approximation.
    CopyInterior {
        offset: usize,
    },
}

impl BoundaryCondition {
    /// Zero-gradient rule: copy the nearest interior neighbour
    pub fn zero_gradient() -> Self {
        BoundaryCondition::CopyInterior { offset: 1 }
    }

    /// Validate the rule against a field of `points` values
    pub fn validate(&self, points: usize) -> Result<(), String> {
        match self {
            BoundaryCondition::Dirichlet(value) => {
                if !value.is_finite() {
                    return Err(format!("Dirichlet value {} is not finite", value));
                }
                Ok(())
            }
            BoundaryCondition::CopyInterior { offset } => {
                if *offset == 0 {
                    return Err("CopyInterior offset must be at least 1".to_string());
                }
                // The copied point must be interior: never the opposite boundary
                if offset + 2 > points {
                    return Err(format!(
                        "CopyInterior offset {} needs at least {} points, field has {}",
                        offset,
                        offset + 2,
                        points
                    ));
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for BoundaryCondition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BoundaryCondition::Dirichlet(value) => write!(f, "Dirichlet ({})", value),
            BoundaryCondition::CopyInterior { offset } => write!(f, "CopyInterior ({})", offset),
        }
    }
}

// =================================================================================================
// Spatial Boundaries
// =================================================================================================

/// Boundary rules for both ends of a 1-D field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpatialBoundaries {
    /// Quantity the rules apply to
    pub quantity: PhysicalQuantity,

    /// Rule at index 0
    pub left: BoundaryCondition,

    /// Rule at index n-1
    pub right: BoundaryCondition,
}

impl SpatialBoundaries {
    /// Generic constructor
    pub fn new(quantity: PhysicalQuantity, left: BoundaryCondition, right: BoundaryCondition) -> Self {
        Self { quantity, left, right }
    }

    /// Fixed values on both ends
    pub fn dirichlet(quantity: PhysicalQuantity, left: f64, right: f64) -> Self {
        Self::new(
            quantity,
            BoundaryCondition::Dirichlet(left),
            BoundaryCondition::Dirichlet(right),
        )
    }

    /// Both ends copy the interior value `offset` points inward
    pub fn copy_interior(quantity: PhysicalQuantity, offset: usize) -> Self {
        let rule = BoundaryCondition::CopyInterior { offset };
        Self::new(quantity, rule, rule)
    }

    /// Value the left boundary must take for this field
    fn left_value(&self, field: &DVector<f64>) -> f64 {
        match self.left {
            BoundaryCondition::Dirichlet(value) => value,
            BoundaryCondition::CopyInterior { offset } => field[offset],
        }
    }

    /// Value the right boundary must take for this field
    fn right_value(&self, field: &DVector<f64>) -> f64 {
        let last = field.len() - 1;
        match self.right {
            BoundaryCondition::Dirichlet(value) => value,
            BoundaryCondition::CopyInterior { offset } => field[last - offset],
        }
    }

    /// Overwrite both boundary points with their rule
    ///
    /// Interior points are left untouched. The copied interior points are
    /// never boundary points (see [`BoundaryCondition::validate`]), so the
    /// order of the two writes does not matter. Fails without writing when
    /// the field is too short for the rules.
    pub fn apply(&self, field: &mut DVector<f64>) -> Result<(), String> {
        self.validate(field.len())?;
        let last = field.len() - 1;
        field[0] = self.left_value(field);
        field[last] = self.right_value(field);
        Ok(())
    }

    /// Apply the rules to the matching quantity of a state
    pub fn apply_to_state(&self, state: &mut PhysicalState) -> Result<(), String> {
        let field = state.field_mut(self.quantity)?;
        self.apply(field)
    }

    /// True when both boundary points hold exactly the prescribed values
    ///
    /// A field too short for the rules never satisfies them.
    pub fn is_satisfied(&self, field: &DVector<f64>) -> bool {
        if self.validate(field.len()).is_err() {
            return false;
        }
        let last = field.len() - 1;
        field[0] == self.left_value(field) && field[last] == self.right_value(field)
    }

    /// Validate both rules against a field of `points` values
    pub fn validate(&self, points: usize) -> Result<(), String> {
        if points < 2 {
            return Err(format!("Spatial boundaries need at least 2 points, got {}", points));
        }
        self.left.validate(points).map_err(|e| format!("Left boundary: {}", e))?;
        self.right.validate(points).map_err(|e| format!("Right boundary: {}", e))?;
        Ok(())
    }
}

// =================================================================================================
// Domain Boundaries
// =================================================================================================

/// Initial condition plus optional spatial boundary rules
///
/// # Examples
///
/// ```rust
/// use fdm_rs::physics::{PhysicalQuantity, PhysicalState, PhysicalData};
/// use fdm_rs::solver::{DomainBoundaries, SpatialBoundaries};
///
/// // ODE: temporal only
/// let initial = PhysicalState::new(PhysicalQuantity::Position, PhysicalData::from_vec(vec![0.0, 0.0]));
/// let boundaries = DomainBoundaries::temporal(initial);
/// assert!(boundaries.spatial().is_none());
///
/// // 1-D PDE: fixed ends at 0 and 1
/// let initial = PhysicalState::new(PhysicalQuantity::Concentration, PhysicalData::uniform_vector(11, 0.0));
/// let rules = SpatialBoundaries::dirichlet(PhysicalQuantity::Concentration, 0.0, 1.0);
/// let boundaries = DomainBoundaries::space_time(rules, initial);
/// assert!(boundaries.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default)]
pub struct DomainBoundaries {
    /// State at t = 0
    initial: Option<PhysicalState>,

    /// Rules for the two ends of the grid
    spatial: Option<SpatialBoundaries>,
}

impl DomainBoundaries {

    // ====================================== Factory methods ======================================

    /// Create temporal-only domain (ODE)
    pub fn temporal(initial: PhysicalState) -> Self {
        Self {
            initial: Some(initial),
            spatial: None,
        }
    }

    /// Create 1-D spatial + temporal domain
    pub fn space_time(spatial: SpatialBoundaries, initial: PhysicalState) -> Self {
        Self {
            initial: Some(initial),
            spatial: Some(spatial),
        }
    }

    // ===================================== Query methods =========================================

    /// Initial condition
    pub fn initial_condition(&self) -> Option<&PhysicalState> {
        self.initial.as_ref()
    }

    /// Spatial boundary rules, if any
    pub fn spatial(&self) -> Option<&SpatialBoundaries> {
        self.spatial.as_ref()
    }

    /// True when spatial boundary rules are present
    pub fn is_spatial(&self) -> bool {
        self.spatial.is_some()
    }

    /// Apply the spatial rules (if any) to a state
    pub fn apply(&self, state: &mut PhysicalState) -> Result<(), String> {
        match &self.spatial {
            Some(spatial) => spatial.apply_to_state(state),
            None => Ok(()),
        }
    }

    /// Validate the object contents
    pub fn validate(&self) -> Result<(), String> {
        let initial = self
            .initial
            .as_ref()
            .ok_or_else(|| "No initial condition found in domain boundaries".to_string())?;

        if initial.is_empty() {
            return Err("Initial condition holds no physical quantity".to_string());
        }

        if let Some(spatial) = &self.spatial {
            let field = initial.field(spatial.quantity)?;
            spatial.validate(field.len())?;
        }

        Ok(())
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::PhysicalData;

    fn ramp(n: usize) -> DVector<f64> {
        DVector::from_iterator(n, (0..n).map(|i| i as f64))
    }

    // ==================================== Boundary Condition ====================================

    #[test]
    fn test_boundary_condition_validation() {
        assert!(BoundaryCondition::Dirichlet(1.0).validate(3).is_ok());
        assert!(BoundaryCondition::Dirichlet(f64::NAN).validate(3).is_err());
        assert!(BoundaryCondition::CopyInterior { offset: 0 }.validate(10).is_err());
        assert!(BoundaryCondition::CopyInterior { offset: 2 }.validate(4).is_ok());
        assert!(BoundaryCondition::CopyInterior { offset: 2 }.validate(3).is_err());
    }

    #[test]
    fn test_boundary_condition_display() {
        assert_eq!(BoundaryCondition::Dirichlet(0.5).to_string(), "Dirichlet (0.5)");
        assert_eq!(BoundaryCondition::zero_gradient().to_string(), "CopyInterior (1)");
    }

    // ==================================== Spatial Boundaries ====================================

    #[test]
    fn test_dirichlet_apply() {
        let rules = SpatialBoundaries::dirichlet(PhysicalQuantity::Concentration, -1.0, 5.0);
        let mut field = ramp(6);

        rules.apply(&mut field).unwrap();

        assert_eq!(field.as_slice(), &[-1.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
        assert!(rules.is_satisfied(&field));
    }

    #[test]
    fn test_copy_interior_apply() {
        let rules = SpatialBoundaries::copy_interior(PhysicalQuantity::WaveHeight, 2);
        let mut field = ramp(7);

        rules.apply(&mut field).unwrap();

        // u[0] = u[2], u[6] = u[4]
        assert_eq!(field.as_slice(), &[2.0, 1.0, 2.0, 3.0, 4.0, 5.0, 4.0]);
        assert!(rules.is_satisfied(&field));
    }

    #[test]
    fn test_mixed_rules() {
        let rules = SpatialBoundaries::new(
            PhysicalQuantity::Concentration,
            BoundaryCondition::Dirichlet(10.0),
            BoundaryCondition::zero_gradient(),
        );
        let mut field = ramp(5);

        assert!(!rules.is_satisfied(&field));
        rules.apply(&mut field).unwrap();

        assert_eq!(field[0], 10.0);
        assert_eq!(field[4], 3.0);
        assert_eq!(field[1], 1.0);
    }

    #[test]
    fn test_apply_rejects_fields_too_short_for_the_rules() {
        let mut empty = DVector::zeros(0);
        let dirichlet = SpatialBoundaries::dirichlet(PhysicalQuantity::Concentration, 1.0, 1.0);
        assert!(dirichlet.apply(&mut empty).is_err());
        assert!(!dirichlet.is_satisfied(&empty));

        // u[0] = u[7] does not exist on 5 points; the field stays as it was
        let copy = SpatialBoundaries::copy_interior(PhysicalQuantity::Concentration, 7);
        let mut field = ramp(5);
        let error = copy.apply(&mut field).unwrap_err();
        assert!(error.contains("Left boundary"), "unexpected error: {}", error);
        assert_eq!(field, ramp(5));
        assert!(!copy.is_satisfied(&field));
    }

    #[test]
    fn test_apply_to_state_requires_field() {
        let rules = SpatialBoundaries::dirichlet(PhysicalQuantity::Concentration, 0.0, 0.0);
        let mut state = PhysicalState::new(PhysicalQuantity::WaveHeight, PhysicalData::uniform_vector(4, 1.0));

        assert!(rules.apply_to_state(&mut state).is_err());
    }

    // ===================================== Domain Boundaries ====================================

    #[test]
    fn test_temporal_domain() {
        let initial = PhysicalState::new(PhysicalQuantity::Position, PhysicalData::from_vec(vec![0.0, 1.0]));
        let boundaries = DomainBoundaries::temporal(initial);

        assert!(boundaries.validate().is_ok());
        assert!(!boundaries.is_spatial());
        assert!(boundaries.initial_condition().is_some());
    }

    #[test]
    fn test_default_domain_is_invalid() {
        let boundaries = DomainBoundaries::default();
        let error = boundaries.validate().unwrap_err();

        assert!(error.contains("No initial condition"));
    }

    #[test]
    fn test_space_time_domain_checks_field() {
        let initial = PhysicalState::new(PhysicalQuantity::WaveHeight, PhysicalData::uniform_vector(3, 0.0));

        // Offset 2 on a 3-point field would read the opposite boundary
        let rules = SpatialBoundaries::copy_interior(PhysicalQuantity::WaveHeight, 2);
        let boundaries = DomainBoundaries::space_time(rules, initial.clone());
        assert!(boundaries.validate().is_err());

        // Rules on a quantity the initial state does not carry
        let rules = SpatialBoundaries::dirichlet(PhysicalQuantity::Concentration, 0.0, 0.0);
        let boundaries = DomainBoundaries::space_time(rules, initial);
        assert!(boundaries.validate().unwrap_err().contains("not found"));
    }
}
