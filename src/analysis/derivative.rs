//! Finite-difference derivative estimators
//!
//! Three estimates of `f'` from samples `f_i = f(x_i)` on a uniform grid:
//!
//! ```text
//! forward   (f_{i+1} - f_i) / dx            O(dx)
//! backward  (f_i - f_{i-1}) / dx            O(dx)
//! centered  (f_{i+1} - f_{i-1}) / (2 dx)    O(dx²)
//! ```
//!
//! Where a formula would read outside the samples it falls back to the other
//! one-sided formula: the forward estimate uses the backward formula on the
//! last point, the backward estimate the forward formula on the first point,
//! the centered estimate both.
//!
//! Fewer than two samples carry no slope information: the estimate is all
//! zeros, with the same length as the input. The step `dx` is not checked.

use nalgebra::DVector;
use std::fmt;

/// Difference formula used for a derivative estimate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DifferenceScheme {
    Forward,
    Backward,
    Centered,
}

impl DifferenceScheme {
    /// All schemes, in display order
    pub const ALL: [DifferenceScheme; 3] = [
        DifferenceScheme::Forward,
        DifferenceScheme::Backward,
        DifferenceScheme::Centered,
    ];

    /// Order of accuracy on interior points
    pub fn order(&self) -> u32 {
        match self {
            DifferenceScheme::Forward | DifferenceScheme::Backward => 1,
            DifferenceScheme::Centered => 2,
        }
    }
}

impl fmt::Display for DifferenceScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DifferenceScheme::Forward => write!(f, "forward"),
            DifferenceScheme::Backward => write!(f, "backward"),
            DifferenceScheme::Centered => write!(f, "centered"),
        }
    }
}

// =================================================================================================
// Estimators
// =================================================================================================

/// Forward difference, backward formula on the last point
///
/// # Example
///
/// ```rust
/// use fdm_rs::analysis::forward_difference;
///
/// let slope = forward_difference(&[0.0, 1.0, 4.0, 9.0], 1.0);
/// assert_eq!(slope.as_slice(), &[1.0, 3.0, 5.0, 5.0]);
/// ```
pub fn forward_difference(values: &[f64], dx: f64) -> DVector<f64> {
    let n = values.len();
    if n < 2 {
        return DVector::zeros(n);
    }

    DVector::from_fn(n, |i, _| {
        if i + 1 < n {
            (values[i + 1] - values[i]) / dx
        } else {
            (values[i] - values[i - 1]) / dx
        }
    })
}

/// Backward difference, forward formula on the first point
///
/// # Example
///
/// ```rust
/// use fdm_rs::analysis::backward_difference;
///
/// let slope = backward_difference(&[0.0, 1.0, 4.0, 9.0], 1.0);
/// assert_eq!(slope.as_slice(), &[1.0, 1.0, 3.0, 5.0]);
/// ```
pub fn backward_difference(values: &[f64], dx: f64) -> DVector<f64> {
    let n = values.len();
    if n < 2 {
        return DVector::zeros(n);
    }

    DVector::from_fn(n, |i, _| {
        if i > 0 {
            (values[i] - values[i - 1]) / dx
        } else {
            (values[1] - values[0]) / dx
        }
    })
}

/// Centered difference, one-sided formulas on both ends
///
/// # Example
///
/// ```rust
/// use fdm_rs::analysis::centered_difference;
///
/// let slope = centered_difference(&[0.0, 1.0, 4.0, 9.0], 1.0);
/// assert_eq!(slope.as_slice(), &[1.0, 2.0, 4.0, 5.0]);
/// ```
pub fn centered_difference(values: &[f64], dx: f64) -> DVector<f64> {
    let n = values.len();
    if n < 2 {
        return DVector::zeros(n);
    }

    DVector::from_fn(n, |i, _| {
        if i == 0 {
            (values[1] - values[0]) / dx
        } else if i == n - 1 {
            (values[i] - values[i - 1]) / dx
        } else {
            (values[i + 1] - values[i - 1]) / (2.0 * dx)
        }
    })
}

/// Derivative estimate with the chosen scheme
pub fn estimate(scheme: DifferenceScheme, values: &[f64], dx: f64) -> DVector<f64> {
    match scheme {
        DifferenceScheme::Forward => forward_difference(values, dx),
        DifferenceScheme::Backward => backward_difference(values, dx),
        DifferenceScheme::Centered => centered_difference(values, dx),
    }
}

// =================================================================================================
// All estimates at once
// =================================================================================================

/// The three estimates of the same samples
#[derive(Debug, Clone, PartialEq)]
pub struct DerivativeEstimates {
    pub forward: DVector<f64>,
    pub backward: DVector<f64>,
    pub centered: DVector<f64>,
}

impl DerivativeEstimates {
    /// Estimate for one scheme
    pub fn get(&self, scheme: DifferenceScheme) -> &DVector<f64> {
        match scheme {
            DifferenceScheme::Forward => &self.forward,
            DifferenceScheme::Backward => &self.backward,
            DifferenceScheme::Centered => &self.centered,
        }
    }

    /// Iterate over `(scheme, estimate)` in display order
    pub fn iter(&self) -> impl Iterator<Item = (DifferenceScheme, &DVector<f64>)> {
        DifferenceScheme::ALL.into_iter().map(move |scheme| (scheme, self.get(scheme)))
    }
}

/// Forward, backward and centered estimates of the same samples
///
/// # Example
///
/// ```rust
/// use fdm_rs::analysis::{estimate_all, max_abs_error};
/// use fdm_rs::physics::Grid1D;
///
/// let grid = Grid1D::new(0.0, 1.0, 101).unwrap();
/// let values = grid.sample(|x| x * x * x);
/// let exact = grid.sample(|x| 3.0 * x * x);
///
/// let estimates = estimate_all(values.as_slice(), grid.spacing());
/// for (scheme, slope) in estimates.iter() {
///     println!("{}: {:.3e}", scheme, max_abs_error(slope, &exact).unwrap());
/// }
/// ```
pub fn estimate_all(values: &[f64], dx: f64) -> DerivativeEstimates {
    DerivativeEstimates {
        forward: forward_difference(values, dx),
        backward: backward_difference(values, dx),
        centered: centered_difference(values, dx),
    }
}

// =================================================================================================
// Tests
// =================================================================================================
