//! Mock physical models for testing
//!
//! Both models start from a single sine mode `sin(kπx)` on [0, 1] with fixed
//! zero ends. That mode is an eigenvector of the discrete second difference,
//! so every scheme only multiplies its amplitude by a known factor per step
//! and the numerical result can be checked to rounding.

use std::f64::consts::PI;

use nalgebra::DVector;

use fdm_rs::physics::{Grid1D, PhysicalModel, PhysicalQuantity, PhysicalState};
use fdm_rs::solver::stencil::second_difference;
use fdm_rs::solver::{DomainBoundaries, Scenario, SpatialBoundaries, TridiagonalMatrix};

/// Eigenvalue of `-[1, -2, 1] / dx²` for mode `k` on a grid of spacing `dx`
fn discrete_eigenvalue(mode: usize, dx: f64) -> f64 {
    let s = (mode as f64 * PI * dx / 2.0).sin();
    4.0 * s * s / (dx * dx)
}

fn sine_profile(grid: &Grid1D, mode: usize) -> DVector<f64> {
    grid.sample(|x| (mode as f64 * PI * x).sin())
}

/// Scenario with zero values held at both ends of `quantity`
fn pinned_scenario(model: Box<dyn PhysicalModel>, quantity: PhysicalQuantity) -> Scenario {
    let initial = model.setup_initial_state();
    let rules = SpatialBoundaries::dirichlet(quantity, 0.0, 0.0);
    Scenario::new(model, DomainBoundaries::space_time(rules, initial))
}

// =================================================================================================
// Sine mode of the diffusion equation: du/dt = D d²u/dx²
// =================================================================================================

/// Diffusion of one sine mode of concentration
///
/// After `n` steps of the theta scheme the field is
/// `((1 - (1-θ) λ dt) / (1 + θ λ dt))^n sin(kπx)`, with `λ` the discrete
/// eigenvalue scaled by `D`. Forward Euler is `θ = 0`.
pub struct SineModeDiffusion {
    pub grid: Grid1D,
    pub diffusivity: f64,
    pub mode: usize,
}

impl SineModeDiffusion {
    pub fn new(points: usize, diffusivity: f64, mode: usize) -> Self {
        let grid = Grid1D::new(0.0, 1.0, points).unwrap();
        Self { grid, diffusivity, mode }
    }

    /// Decay rate of the mode under the semi-discrete equation
    pub fn eigenvalue(&self) -> f64 {
        self.diffusivity * discrete_eigenvalue(self.mode, self.grid.spacing())
    }

    /// Amplitude after `steps` steps of the theta scheme
    pub fn theta_amplitude(&self, theta: f64, dt: f64, steps: usize) -> f64 {
        let z = self.eigenvalue() * dt;
        ((1.0 - (1.0 - theta) * z) / (1.0 + theta * z)).powi(steps as i32)
    }

    /// Amplitude of the exact time integration of the semi-discrete equation
    pub fn semi_discrete_amplitude(&self, t: f64) -> f64 {
        (-self.eigenvalue() * t).exp()
    }

    pub fn profile(&self) -> DVector<f64> {
        sine_profile(&self.grid, self.mode)
    }

    pub fn into_scenario(self) -> Scenario {
        pinned_scenario(Box::new(self), PhysicalQuantity::Concentration)
    }

    fn coefficient(&self) -> f64 {
        let dx = self.grid.spacing();
        self.diffusivity / (dx * dx)
    }
}

impl PhysicalModel for SineModeDiffusion {
    fn points(&self) -> usize {
        self.grid.len()
    }

    fn compute_physics(&self, state: &PhysicalState) -> PhysicalState {
        let Ok(field) = state.field(PhysicalQuantity::Concentration) else {
            return PhysicalState::empty();
        };

        let mut rate = DVector::zeros(field.len());
        second_difference(field, &mut rate).unwrap();
        PhysicalState::from_field(PhysicalQuantity::Concentration, rate * self.coefficient())
    }

    fn setup_initial_state(&self) -> PhysicalState {
        PhysicalState::from_field(PhysicalQuantity::Concentration, self.profile())
    }

    fn name(&self) -> &str {
        "Sine Mode Diffusion"
    }

    fn grid(&self) -> Option<&Grid1D> {
        Some(&self.grid)
    }

    fn linear_operator(&self) -> Option<TridiagonalMatrix> {
        let c = self.coefficient();
        Some(TridiagonalMatrix::constant(self.grid.len(), c, -2.0 * c, c))
    }
}

// =================================================================================================
// Standing wave: d²η/dt² = c² d²η/dx²
// =================================================================================================

/// Standing wave of one sine mode of surface height, released from rest
///
/// The leapfrog scheme with its half first step gives `cos(nφ) sin(kπx)`
/// exactly, with `cos φ = 1 - μ dt² / 2` and `μ` the discrete eigenvalue
/// scaled by `c²`.
pub struct StandingWave {
    pub grid: Grid1D,
    pub speed: f64,
    pub mode: usize,
}

impl StandingWave {
    pub fn new(points: usize, speed: f64, mode: usize) -> Self {
        let grid = Grid1D::new(0.0, 1.0, points).unwrap();
        Self { grid, speed, mode }
    }

    /// Square of the discrete angular frequency
    pub fn eigenvalue(&self) -> f64 {
        self.speed * self.speed * discrete_eigenvalue(self.mode, self.grid.spacing())
    }

    /// Amplitude after `steps` leapfrog steps (needs `μ dt² <= 4`)
    pub fn leapfrog_amplitude(&self, dt: f64, steps: usize) -> f64 {
        let phase = (1.0 - 0.5 * self.eigenvalue() * dt * dt).acos();
        (steps as f64 * phase).cos()
    }

    pub fn profile(&self) -> DVector<f64> {
        sine_profile(&self.grid, self.mode)
    }

    pub fn into_scenario(self) -> Scenario {
        pinned_scenario(Box::new(self), PhysicalQuantity::WaveHeight)
    }
}

impl PhysicalModel for StandingWave {
    fn points(&self) -> usize {
        self.grid.len()
    }

    fn compute_physics(&self, state: &PhysicalState) -> PhysicalState {
        let Ok(field) = state.field(PhysicalQuantity::WaveHeight) else {
            return PhysicalState::empty();
        };

        let dx = self.grid.spacing();
        let mut operator = DVector::zeros(field.len());
        second_difference(field, &mut operator).unwrap();
        operator *= self.speed * self.speed / (dx * dx);
        PhysicalState::from_field(PhysicalQuantity::WaveHeight, operator)
    }

    fn setup_initial_state(&self) -> PhysicalState {
        PhysicalState::from_field(PhysicalQuantity::WaveHeight, self.profile())
    }

    fn name(&self) -> &str {
        "Standing Wave"
    }

    fn grid(&self) -> Option<&Grid1D> {
        Some(&self.grid)
    }
}
