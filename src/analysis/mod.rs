//! Residual and comparison stage
//!
//! Tools applied after a run, or to sampled data directly:
//!
//! - **`derivative`**: forward, backward and centered difference estimators
//! - **`norms`**: error norms against a reference field, interior mass
//!
//! # Example
//!
//! ```rust
//! use fdm_rs::analysis::{centered_difference, forward_difference, max_abs_error};
//! use fdm_rs::physics::Grid1D;
//!
//! let grid = Grid1D::new(0.0, std::f64::consts::TAU, 64).unwrap();
//! let samples = grid.sample(f64::sin);
//! let exact = grid.sample(f64::cos);
//!
//! let forward = forward_difference(samples.as_slice(), grid.spacing());
//! let centered = centered_difference(samples.as_slice(), grid.spacing());
//!
//! assert!(max_abs_error(&centered, &exact).unwrap() < max_abs_error(&forward, &exact).unwrap());
//! ```

pub mod derivative;
pub mod norms;

pub use derivative::{
    backward_difference, centered_difference, estimate, estimate_all, forward_difference,
    DerivativeEstimates, DifferenceScheme,
};
pub use norms::{interior_mass, l2_error, max_abs_error, relative_error};
