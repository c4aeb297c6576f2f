//! Stencil kernels on plain vectors
//!
//! Pure functions: each reads frozen input levels and writes a separate
//! output buffer, then lets the boundary rules overwrite the two end points.
//! None of them ever reads a value it has already written for the new level.
//!
//! ```text
//!  level n     ●────●────●────●────●
//!               ╲   │   ╱
//!                ╲  │  ╱
//!  level n+1   ●────●────●────●────●
//!              ▲                   ▲
//!           boundary rule     boundary rule
//! ```
//!
//! Interior loops run through rayon for fields longer than
//! [`parallel_threshold`](crate::solver::parallel_threshold) when the crate
//! is built with the `parallel` feature. Each output point only depends on
//! input values, so the result is identical either way.

use nalgebra::DVector;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::solver::SpatialBoundaries;

// =================================================================================================
// Helpers
// =================================================================================================

/// Write `f(i)` into every interior point of `out`
fn fill_interior<F>(out: &mut DVector<f64>, f: F)
where
    F: Fn(usize) -> f64 + Sync + Send,
{
    let n = out.len();
    if n < 3 {
        return;
    }

    let interior = &mut out.as_mut_slice()[1..n - 1];

    if n > crate::solver::parallel_threshold() {
        #[cfg(feature = "parallel")]
        interior.par_iter_mut().enumerate().for_each(|(k, value)| *value = f(k + 1));
        #[cfg(not(feature = "parallel"))]
        interior.iter_mut().enumerate().for_each(|(k, value)| *value = f(k + 1));
    } else {
        interior.iter_mut().enumerate().for_each(|(k, value)| *value = f(k + 1));
    }
}

fn check_lengths(expected: usize, others: &[(&str, usize)]) -> Result<(), String> {
    if expected < 2 {
        return Err(format!("Stencil needs at least 2 points, got {}", expected));
    }
    for (name, len) in others {
        if *len != expected {
            return Err(format!(
                "Length mismatch: {} has {} points, expected {}",
                name, len, expected
            ));
        }
    }
    Ok(())
}

// =================================================================================================
// Spatial operators
// =================================================================================================

/// `u[i+1] - 2 u[i] + u[i-1]` on interior points, zero on both ends
///
/// Not divided by `dx²`: callers fold the spacing into their coefficient.
pub fn second_difference(field: &DVector<f64>, out: &mut DVector<f64>) -> Result<(), String> {
    check_lengths(field.len(), &[("output", out.len())])?;

    fill_interior(out, |i| field[i + 1] - 2.0 * field[i] + field[i - 1]);

    let last = out.len() - 1;
    out[0] = 0.0;
    out[last] = 0.0;
    Ok(())
}

/// `(u[i+1] - u[i-1]) / (2 dx)` on interior points, zero on both ends
pub fn centered_gradient(field: &DVector<f64>, dx: f64, out: &mut DVector<f64>) -> Result<(), String> {
    check_lengths(field.len(), &[("output", out.len())])?;

    let inv_two_dx = 1.0 / (2.0 * dx);
    fill_interior(out, |i| (field[i + 1] - field[i - 1]) * inv_two_dx);

    let last = out.len() - 1;
    out[0] = 0.0;
    out[last] = 0.0;
    Ok(())
}

// =================================================================================================
// Time-stepping kernels
// =================================================================================================

/// One FTCS diffusion step
///
/// ```text
/// next[i] = u[i] + alpha (u[i+1] - 2 u[i] + u[i-1]),   alpha = D dt / dx²
/// ```
///
/// then the boundary rules. Stable for `alpha <= 0.5`; nothing here checks it.
///
/// # Example
///
/// ```rust
/// use fdm_rs::physics::PhysicalQuantity;
/// use fdm_rs::solver::SpatialBoundaries;
/// use fdm_rs::solver::stencil::ftcs_step;
/// use nalgebra::DVector;
///
/// let current = DVector::from_vec(vec![0.0, 0.0, 1.0, 0.0, 0.0]);
/// let mut next = DVector::zeros(5);
/// let rules = SpatialBoundaries::dirichlet(PhysicalQuantity::Concentration, 0.0, 0.0);
///
/// ftcs_step(&current, 0.25, &rules, &mut next).unwrap();
/// assert_eq!(next.as_slice(), &[0.0, 0.25, 0.5, 0.25, 0.0]);
/// ```
pub fn ftcs_step(
    current: &DVector<f64>,
    alpha: f64,
    boundaries: &SpatialBoundaries,
    next: &mut DVector<f64>,
) -> Result<(), String> {
    check_lengths(current.len(), &[("next", next.len())])?;
    boundaries.validate(current.len())?;

    fill_interior(next, |i| {
        current[i] + alpha * (current[i + 1] - 2.0 * current[i] + current[i - 1])
    });

    let last = next.len() - 1;
    next[0] = current[0];
    next[last] = current[last];
    boundaries.apply(next)
}

/// First step of the second-order wave scheme, from rest
///
/// ```text
/// next = current + dt²/2 · L(current)
/// ```
///
/// With zero initial velocity the ghost level `eta^{-1}` equals `eta^1`,
/// which turns the three-level formula into this one.
pub fn leapfrog_first_step(
    current: &DVector<f64>,
    operator: &DVector<f64>,
    dt: f64,
    boundaries: &SpatialBoundaries,
    next: &mut DVector<f64>,
) -> Result<(), String> {
    check_lengths(current.len(), &[("operator", operator.len()), ("next", next.len())])?;
    boundaries.validate(current.len())?;

    let half_dt2 = 0.5 * dt * dt;
    fill_interior(next, |i| current[i] + half_dt2 * operator[i]);

    let last = next.len() - 1;
    next[0] = current[0];
    next[last] = current[last];
    boundaries.apply(next)
}

/// Regular step of the second-order wave scheme
///
/// ```text
/// next = 2 current - previous + dt² · L(current)
/// ```
pub fn leapfrog_step(
    previous: &DVector<f64>,
    current: &DVector<f64>,
    operator: &DVector<f64>,
    dt: f64,
    boundaries: &SpatialBoundaries,
    next: &mut DVector<f64>,
) -> Result<(), String> {
    check_lengths(
        current.len(),
        &[("previous", previous.len()), ("operator", operator.len()), ("next", next.len())],
    )?;
    boundaries.validate(current.len())?;

    let dt2 = dt * dt;
    fill_interior(next, |i| 2.0 * current[i] - previous[i] + dt2 * operator[i]);

    let last = next.len() - 1;
    next[0] = current[0];
    next[last] = current[last];
    boundaries.apply(next)
}

// =================================================================================================
// Tests
// =================================================================================================
