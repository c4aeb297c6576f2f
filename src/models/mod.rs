//! Physical models for finite-difference simulation
//!
//! All models implement the [`PhysicalModel`](crate::physics::PhysicalModel) trait.
//! Models are responsible for the physics (right-hand side or spatial
//! operator), solvers for the time stepping.
//!
//! # Available Models
//!
//! ## [`Diffusion1D`]: linear diffusion
//!
//! `du/dt = D d²u/dx²`. Solved explicitly (FTCS) by the
//! [`EulerSolver`](crate::solver::EulerSolver) or implicitly by the
//! [`ImplicitSolver`](crate::solver::ImplicitSolver), which uses the
//! tridiagonal operator the model exposes.
//!
//! ## [`ShallowWater1D`]: waves over variable depth
//!
//! `d²η/dt² = g d/dx (h dη/dx)`. Second order in time, solved by the
//! [`WaveSolver`](crate::solver::WaveSolver).
//!
//! ## [`Ballistic`]: projectile motion
//!
//! Point mass under gravity, no spatial grid. Solved by the
//! [`EulerSolver`](crate::solver::EulerSolver) and compared with its closed form.

// =================================================================================================
// Module Declarations
// =================================================================================================

pub mod ballistic;
pub mod diffusion;
pub mod shallow_water;

// =================================================================================================
// Public Re-exports
// =================================================================================================

pub use ballistic::Ballistic;
pub use diffusion::{Diffusion1D, FTCS_STABILITY_LIMIT};
pub use shallow_water::{ShallowWater1D, COURANT_LIMIT};

/// Standard gravitational acceleration (m/s²)
pub const STANDARD_GRAVITY: f64 = 9.81;
