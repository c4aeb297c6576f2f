//! One-dimensional linear diffusion
//!
//! # Physical Model
//!
//! ```text
//! ∂u/∂t = D ∂²u/∂x²
//! ```
//!
//! `u` is a concentration (or a temperature for the heat equation) on a
//! uniform grid, `D` a constant diffusivity.
//!
//! # Discretisation
//!
//! Centered second difference on interior points:
//!
//! ```text
//! (∂²u/∂x²)_i ≈ (u_{i+1} - 2 u_i + u_{i-1}) / dx²
//! ```
//!
//! The same operator is exposed twice:
//! - as a right-hand side ([`compute_physics`](PhysicalModel::compute_physics))
//!   for the explicit [`EulerSolver`](crate::solver::EulerSolver) (FTCS),
//! - as a tridiagonal matrix ([`linear_operator`](PhysicalModel::linear_operator))
//!   for the [`ImplicitSolver`](crate::solver::ImplicitSolver).
//!
//! # Stability
//!
//! FTCS is stable for the diffusion number `alpha = D dt / dx² <= 0.5`.

use nalgebra::DVector;

use crate::physics::{Grid1D, PhysicalModel, PhysicalQuantity, PhysicalState, StabilityEstimate};
use crate::solver::stencil::second_difference;
use crate::solver::TridiagonalMatrix;

/// Largest diffusion number for which FTCS stays bounded
pub const FTCS_STABILITY_LIMIT: f64 = 0.5;

/// Linear diffusion on a uniform 1-D grid
///
/// # Example
///
/// ```rust
/// use fdm_rs::models::Diffusion1D;
/// use fdm_rs::physics::PhysicalModel;
///
/// let model = Diffusion1D::new(0.1, 0.0, 1.0, 11).unwrap();
///
/// assert!((model.diffusion_number(0.025) - 0.25).abs() < 1e-12);
/// assert!(model.stability(0.025).unwrap().is_within_limit());
/// assert!(!model.stability(1.0).unwrap().is_within_limit());
/// ```
#[derive(Debug, Clone)]
pub struct Diffusion1D {
    grid: Grid1D,
    diffusivity: f64,
    quantity: PhysicalQuantity,
    initial: DVector<f64>,
}

impl Diffusion1D {
    /// Diffusion of a concentration on `points` points spanning `[start, end]`
    ///
    /// The initial profile is zero; see [`with_initial_profile`](Self::with_initial_profile).
    pub fn new(diffusivity: f64, start: f64, end: f64, points: usize) -> Result<Self, String> {
        Self::from_grid(Grid1D::new(start, end, points)?, diffusivity)
    }

    /// Diffusion on an existing grid
    pub fn from_grid(grid: Grid1D, diffusivity: f64) -> Result<Self, String> {
        if !diffusivity.is_finite() || diffusivity < 0.0 {
            return Err(format!("Diffusivity must be finite and non-negative, got {}", diffusivity));
        }
        if grid.len() < 3 {
            return Err(format!("Diffusion stencil needs at least 3 points, got {}", grid.len()));
        }

        let initial = grid.zeros();
        Ok(Self {
            grid,
            diffusivity,
            quantity: PhysicalQuantity::Concentration,
            initial,
        })
    }

    /// Builder pattern: set the initial profile
    pub fn with_initial_profile(mut self, profile: DVector<f64>) -> Result<Self, String> {
        if profile.len() != self.grid.len() {
            return Err(format!(
                "Initial profile has {} values, grid has {} points",
                profile.len(),
                self.grid.len()
            ));
        }
        self.initial = profile;
        Ok(self)
    }

    /// Builder pattern: diffuse another quantity (e.g. `Temperature`)
    pub fn with_quantity(mut self, quantity: PhysicalQuantity) -> Self {
        self.quantity = quantity;
        self
    }

    /// Diffusivity `D`
    pub fn diffusivity(&self) -> f64 {
        self.diffusivity
    }

    /// Diffused quantity
    pub fn quantity(&self) -> PhysicalQuantity {
        self.quantity
    }

    /// Diffusion number `D dt / dx²`
    pub fn diffusion_number(&self, dt: f64) -> f64 {
        let dx = self.grid.spacing();
        self.diffusivity * dt / (dx * dx)
    }

    /// Largest time step keeping FTCS stable
    pub fn max_stable_dt(&self) -> f64 {
        let dx = self.grid.spacing();
        if self.diffusivity == 0.0 {
            f64::INFINITY
        } else {
            FTCS_STABILITY_LIMIT * dx * dx / self.diffusivity
        }
    }

    fn coefficient(&self) -> f64 {
        let dx = self.grid.spacing();
        self.diffusivity / (dx * dx)
    }
}

impl PhysicalModel for Diffusion1D {
    fn points(&self) -> usize {
        self.grid.len()
    }

    /// `D (u_{i+1} - 2u_i + u_{i-1}) / dx²` on interior points, zero on the ends
    fn compute_physics(&self, state: &PhysicalState) -> PhysicalState {
        let Ok(field) = state.field(self.quantity) else {
            return PhysicalState::empty();
        };

        let mut rate = DVector::zeros(field.len());
        if second_difference(field, &mut rate).is_err() {
            return PhysicalState::empty();
        }
        rate *= self.coefficient();

        PhysicalState::from_field(self.quantity, rate)
    }

    fn setup_initial_state(&self) -> PhysicalState {
        PhysicalState::from_field(self.quantity, self.initial.clone())
    }

    fn name(&self) -> &str {
        "Diffusion 1D"
    }

    fn description(&self) -> Option<&str> {
        Some("Linear diffusion du/dt = D d2u/dx2 on a uniform grid")
    }

    fn grid(&self) -> Option<&Grid1D> {
        Some(&self.grid)
    }

    fn linear_operator(&self) -> Option<TridiagonalMatrix> {
        let c = self.coefficient();
        Some(TridiagonalMatrix::constant(self.grid.len(), c, -2.0 * c, c))
    }

    fn stability(&self, dt: f64) -> Option<StabilityEstimate> {
        Some(StabilityEstimate {
            label: "diffusion number",
            value: self.diffusion_number(dt),
            explicit_limit: FTCS_STABILITY_LIMIT,
        })
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_construction() {
        let model = Diffusion1D::new(2.0, 0.0, 1.0, 11).unwrap();

        assert_eq!(model.points(), 11);
        assert_eq!(model.name(), "Diffusion 1D");
        assert_eq!(model.quantity(), PhysicalQuantity::Concentration);
        assert_relative_eq!(model.grid().unwrap().spacing(), 0.1);
        assert_relative_eq!(model.max_stable_dt(), 0.0025, epsilon = 1e-15);
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(Diffusion1D::new(-1.0, 0.0, 1.0, 11).is_err());
        assert!(Diffusion1D::new(f64::NAN, 0.0, 1.0, 11).is_err());
        assert!(Diffusion1D::new(1.0, 0.0, 1.0, 2).is_err());
        assert!(
            Diffusion1D::new(1.0, 0.0, 1.0, 5)
                .unwrap()
                .with_initial_profile(DVector::zeros(4))
                .is_err()
        );
    }

    #[test]
    fn test_rate_of_parabola() {
        // u = x² has u'' = 2 everywhere
        let grid = Grid1D::new(0.0, 1.0, 21).unwrap();
        let profile = grid.sample(|x| x * x);
        let model = Diffusion1D::from_grid(grid, 0.5).unwrap().with_initial_profile(profile).unwrap();

        let rate = model.compute_physics(&model.setup_initial_state());
        let rate = rate.field(PhysicalQuantity::Concentration).unwrap();

        assert_eq!(rate[0], 0.0);
        assert_eq!(rate[20], 0.0);
        for i in 1..20 {
            assert_relative_eq!(rate[i], 1.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_operator_matches_rate() {
        let grid = Grid1D::new(0.0, 2.0, 9).unwrap();
        let profile = grid.sample(|x| (3.0 * x).sin());
        let model = Diffusion1D::from_grid(grid, 0.3).unwrap().with_initial_profile(profile.clone()).unwrap();

        let rate = model.compute_physics(&model.setup_initial_state());
        let rate = rate.field(PhysicalQuantity::Concentration).unwrap();
        let product = model.linear_operator().unwrap().mul_vector(&profile);

        for i in 1..8 {
            assert_relative_eq!(rate[i], product[i], epsilon = 1e-12);
        }
    }

    #[test]
    fn test_other_quantity() {
        let model = Diffusion1D::new(1.0, 0.0, 1.0, 5).unwrap().with_quantity(PhysicalQuantity::Temperature);
        let state = model.setup_initial_state();

        assert!(state.get(PhysicalQuantity::Temperature).is_some());
        assert!(model.compute_physics(&state).get(PhysicalQuantity::Temperature).is_some());

        // A state without the diffused quantity yields no rate at all
        let other = PhysicalState::from_field(PhysicalQuantity::Concentration, DVector::zeros(5));
        assert!(model.compute_physics(&other).is_empty());
    }

    #[test]
    fn test_stability_estimate() {
        let model = Diffusion1D::new(1.0, 0.0, 1.0, 11).unwrap();
        let estimate = model.stability(0.004).unwrap();

        assert_eq!(estimate.label, "diffusion number");
        assert_relative_eq!(estimate.value, 0.4, epsilon = 1e-12);
        assert_relative_eq!(estimate.explicit_limit, 0.5);
    }
}
