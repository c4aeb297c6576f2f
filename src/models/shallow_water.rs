//! Linear shallow-water waves over variable depth
//!
//! # Physical Model
//!
//! Small surface elevations `η(x, t)` of a water column of still depth
//! `h(x)` obey
//!
//! ```text
//! ∂²η/∂t² = g ∂/∂x ( h ∂η/∂x ) = g ( h ∂²η/∂x² + ∂h/∂x ∂η/∂x )
//! ```
//!
//! The local wave speed is `c = sqrt(g h)`: waves slow down and steepen as
//! they run into shallow water.
//!
//! # Discretisation
//!
//! Centered differences on interior points:
//!
//! ```text
//! L(η)_i = g ( h_i (η_{i+1} - 2η_i + η_{i-1}) / dx²
//!            + (h_{i+1} - h_{i-1}) / 2dx · (η_{i+1} - η_{i-1}) / 2dx )
//! ```
//!
//! `L` is zero on both boundary points. Time stepping is done by the
//! [`WaveSolver`](crate::solver::WaveSolver).
//!
//! The depth profile and the initial surface are inputs: build them with
//! [`Grid1D::sample`](crate::physics::Grid1D::sample).

use nalgebra::DVector;

use crate::models::STANDARD_GRAVITY;
use crate::physics::{Grid1D, PhysicalModel, PhysicalQuantity, PhysicalState, StabilityEstimate};
use crate::solver::stencil::{centered_gradient, second_difference};

/// Largest Courant number for which the explicit wave scheme stays bounded
pub const COURANT_LIMIT: f64 = 1.0;

/// Shallow-water wave equation on a uniform 1-D grid
#[derive(Debug, Clone)]
pub struct ShallowWater1D {
    grid: Grid1D,
    gravity: f64,
    depth: DVector<f64>,
    /// Centered `dh/dx`, zero on both ends
    depth_gradient: DVector<f64>,
    initial: DVector<f64>,
}

impl ShallowWater1D {
    /// Model with standard gravity
    ///
    /// `depth` and `initial_surface` hold one value per grid point; depths
    /// must be finite and non-negative.
    ///
    /// # Example
    ///
    /// ```rust
    /// use fdm_rs::models::ShallowWater1D;
    /// use fdm_rs::physics::Grid1D;
    ///
    /// let grid = Grid1D::from_spacing(0.0, 10.0, 200).unwrap();
    /// // Beach: 50 m deep offshore, 1 m at the shore
    /// let depth = grid.sample(|x| 50.0 - 49.0 * x / 1990.0);
    /// let surface = grid.sample(|x| 0.5 * (-((x - 300.0) / 40.0).powi(2)).exp());
    ///
    /// let model = ShallowWater1D::new(grid, depth, surface).unwrap();
    /// assert!((model.max_depth() - 50.0).abs() < 1e-12);
    /// assert!(model.courant_number(0.1) < 1.0);
    /// ```
    pub fn new(grid: Grid1D, depth: DVector<f64>, initial_surface: DVector<f64>) -> Result<Self, String> {
        let points = grid.len();
        if points < 3 {
            return Err(format!("Wave stencil needs at least 3 points, got {}", points));
        }
        if depth.len() != points {
            return Err(format!("Depth profile has {} values, grid has {} points", depth.len(), points));
        }
        if initial_surface.len() != points {
            return Err(format!(
                "Initial surface has {} values, grid has {} points",
                initial_surface.len(),
                points
            ));
        }
        if depth.iter().any(|h| !h.is_finite() || *h < 0.0) {
            return Err("Depth must be finite and non-negative everywhere".to_string());
        }

        let mut depth_gradient = DVector::zeros(points);
        centered_gradient(&depth, grid.spacing(), &mut depth_gradient)?;

        Ok(Self {
            grid,
            gravity: STANDARD_GRAVITY,
            depth,
            depth_gradient,
            initial: initial_surface,
        })
    }

    /// Builder pattern: set the gravitational acceleration
    pub fn with_gravity(mut self, gravity: f64) -> Result<Self, String> {
        if !gravity.is_finite() || gravity <= 0.0 {
            return Err(format!("Gravity must be positive, got {}", gravity));
        }
        self.gravity = gravity;
        Ok(self)
    }

    /// Gravitational acceleration `g`
    pub fn gravity(&self) -> f64 {
        self.gravity
    }

    /// Still-water depth profile
    pub fn depth(&self) -> &DVector<f64> {
        &self.depth
    }

    /// Largest depth of the profile
    pub fn max_depth(&self) -> f64 {
        self.depth.max()
    }

    /// Fastest wave speed `sqrt(g h_max)`
    pub fn max_wave_speed(&self) -> f64 {
        (self.gravity * self.max_depth()).sqrt()
    }

    /// Courant number `sqrt(g h_max) dt / dx`
    pub fn courant_number(&self, dt: f64) -> f64 {
        self.max_wave_speed() * dt / self.grid.spacing()
    }

    /// Largest time step keeping the explicit scheme stable
    pub fn max_stable_dt(&self) -> f64 {
        let speed = self.max_wave_speed();
        if speed == 0.0 {
            f64::INFINITY
        } else {
            COURANT_LIMIT * self.grid.spacing() / speed
        }
    }
}

impl PhysicalModel for ShallowWater1D {
    fn points(&self) -> usize {
        self.grid.len()
    }

    /// Spatial operator `L(η)` on interior points, zero on the ends
    fn compute_physics(&self, state: &PhysicalState) -> PhysicalState {
        let Ok(eta) = state.field(PhysicalQuantity::WaveHeight) else {
            return PhysicalState::empty();
        };
        if eta.len() != self.depth.len() {
            return PhysicalState::empty();
        }

        let dx = self.grid.spacing();
        let mut curvature = DVector::zeros(eta.len());
        let mut slope = DVector::zeros(eta.len());

        if second_difference(eta, &mut curvature).is_err()
            || centered_gradient(eta, dx, &mut slope).is_err()
        {
            return PhysicalState::empty();
        }

        let operator = (curvature.component_mul(&self.depth) / (dx * dx)
            + slope.component_mul(&self.depth_gradient))
            * self.gravity;

        PhysicalState::from_field(PhysicalQuantity::WaveHeight, operator)
    }

    fn setup_initial_state(&self) -> PhysicalState {
        PhysicalState::from_field(PhysicalQuantity::WaveHeight, self.initial.clone())
    }

    fn name(&self) -> &str {
        "Shallow Water 1D"
    }

    fn description(&self) -> Option<&str> {
        Some("Linear shallow-water waves over a variable depth profile")
    }

    fn grid(&self) -> Option<&Grid1D> {
        Some(&self.grid)
    }

    fn stability(&self, dt: f64) -> Option<StabilityEstimate> {
        Some(StabilityEstimate {
            label: "Courant number",
            value: self.courant_number(dt),
            explicit_limit: COURANT_LIMIT,
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

    fn flat_model(points: usize, depth: f64, surface: impl Fn(f64) -> f64) -> ShallowWater1D {
        let grid = Grid1D::new(0.0, 1.0, points).unwrap();
        let h = grid.sample(|_| depth);
        let eta = grid.sample(surface);
        ShallowWater1D::new(grid, h, eta).unwrap()
    }

    #[test]
    fn test_construction_checks_lengths() {
        let grid = Grid1D::new(0.0, 1.0, 5).unwrap();

        assert!(ShallowWater1D::new(grid.clone(), DVector::zeros(4), DVector::zeros(5)).is_err());
        assert!(ShallowWater1D::new(grid.clone(), DVector::zeros(5), DVector::zeros(6)).is_err());
        assert!(ShallowWater1D::new(grid.clone(), DVector::from_element(5, -1.0), DVector::zeros(5)).is_err());
        assert!(ShallowWater1D::new(grid, DVector::zeros(5), DVector::zeros(5)).is_ok());
    }

    #[test]
    fn test_flat_bottom_reduces_to_wave_equation() {
        // η = x², flat depth h: L = g h · 2
        let model = flat_model(11, 2.0, |x| x * x).with_gravity(10.0).unwrap();

        let operator = model.compute_physics(&model.setup_initial_state());
        let operator = operator.field(PhysicalQuantity::WaveHeight).unwrap();

        assert_eq!(operator[0], 0.0);
        assert_eq!(operator[10], 0.0);
        for i in 1..10 {
            assert_relative_eq!(operator[i], 40.0, epsilon = 1e-8);
        }
    }

    #[test]
    fn test_sloping_bottom_adds_gradient_term() {
        // h = x, η = x: curvature vanishes, L = g · h' · η' = g
        let grid = Grid1D::new(0.0, 1.0, 11).unwrap();
        let depth = grid.sample(|x| x);
        let eta = grid.sample(|x| x);
        let model = ShallowWater1D::new(grid, depth, eta).unwrap().with_gravity(2.0).unwrap();

        let operator = model.compute_physics(&model.setup_initial_state());
        let operator = operator.field(PhysicalQuantity::WaveHeight).unwrap();

        for i in 1..10 {
            assert_relative_eq!(operator[i], 2.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_courant_number() {
        let model = flat_model(11, 10.0, |_| 0.0).with_gravity(10.0).unwrap();

        // c = 10, dx = 0.1
        assert_relative_eq!(model.max_wave_speed(), 10.0);
        assert_relative_eq!(model.courant_number(0.005), 0.5, epsilon = 1e-12);
        assert_relative_eq!(model.max_stable_dt(), 0.01, epsilon = 1e-12);

        let estimate = model.stability(0.02).unwrap();
        assert_eq!(estimate.label, "Courant number");
        assert!(!estimate.is_within_limit());
    }

    #[test]
    fn test_default_gravity() {
        let model = flat_model(5, 1.0, |_| 0.0);
        assert_relative_eq!(model.gravity(), STANDARD_GRAVITY);
        assert!(model.with_gravity(0.0).is_err());
    }
}
