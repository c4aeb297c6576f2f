//! Helper functions for integration tests

use nalgebra::DVector;

use fdm_rs::models::Diffusion1D;
use fdm_rs::physics::{Grid1D, PhysicalModel};
use fdm_rs::solver::{DomainBoundaries, Scenario, SpatialBoundaries};

/// Assert that two fields are close (within tolerance), element by element
pub fn assert_fields_close(
    actual: &DVector<f64>,
    expected: &DVector<f64>,
    tolerance: f64,
    message: &str,
) {
    assert_eq!(actual.len(), expected.len(), "{}: Dimension mismatch", message);

    for (i, (&a, &e)) in actual.iter().zip(expected.iter()).enumerate() {
        let diff = (a - e).abs();
        assert!(
            diff < tolerance,
            "{}: Element {} differs by {} (tolerance {})",
            message, i, diff, tolerance
        );
    }
}

/// Scenario without spatial rules, started from the model's initial state
pub fn temporal_scenario(model: Box<dyn PhysicalModel>) -> Scenario {
    let initial = model.setup_initial_state();
    Scenario::new(model, DomainBoundaries::temporal(initial))
}

/// Diffusion scenario on [0, 1] with the given profile and end rules
pub fn diffusion_scenario(
    points: usize,
    diffusivity: f64,
    profile: impl Fn(f64) -> f64,
    rules: SpatialBoundaries,
) -> Scenario {
    let grid = Grid1D::new(0.0, 1.0, points).unwrap();
    let initial = grid.sample(profile);
    let model = Diffusion1D::from_grid(grid, diffusivity)
        .unwrap()
        .with_initial_profile(initial)
        .unwrap();

    let state = model.setup_initial_state();
    Scenario::new(Box::new(model), DomainBoundaries::space_time(rules, state))
}

/// Gaussian bump centred at `center`
pub fn gaussian_bump(center: f64, width: f64) -> impl Fn(f64) -> f64 {
    move |x| (-((x - center) / width).powi(2)).exp()
}

/// Compute relative error: |actual - expected| / |expected|
pub fn relative_error(actual: f64, expected: f64) -> f64 {
    if expected.abs() < 1e-10 {
        (actual - expected).abs()
    } else {
        (actual - expected).abs() / expected.abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_error() {
        assert!(relative_error(1.0, 1.0).abs() < 1e-10);
        assert!((relative_error(1.1, 1.0) - 0.1).abs() < 1e-10);
        assert!((relative_error(0.5, 0.0) - 0.5).abs() < 1e-10);
    }

    #[test]
    fn test_gaussian_bump_peak() {
        let bump = gaussian_bump(0.5, 0.1);
        assert!((bump(0.5) - 1.0).abs() < 1e-12);
        assert!(bump(0.0) < 1e-10);
    }
}
