//! Comparison of numerical and reference fields

use nalgebra::DVector;

fn check_lengths(approximation: &DVector<f64>, reference: &DVector<f64>) -> Result<(), String> {
    if approximation.len() != reference.len() {
        return Err(format!(
            "Cannot compare fields of different lengths ({} vs {})",
            approximation.len(),
            reference.len()
        ));
    }
    Ok(())
}

/// Largest pointwise absolute difference
///
/// # Example
///
/// ```rust
/// use fdm_rs::analysis::max_abs_error;
/// use nalgebra::DVector;
///
/// let a = DVector::from_vec(vec![1.0, 2.0, 3.0]);
/// let b = DVector::from_vec(vec![1.0, 2.5, 2.0]);
/// assert_eq!(max_abs_error(&a, &b).unwrap(), 1.0);
/// ```
pub fn max_abs_error(approximation: &DVector<f64>, reference: &DVector<f64>) -> Result<f64, String> {
    check_lengths(approximation, reference)?;
    Ok((approximation - reference).amax())
}

/// Root-mean-square difference
pub fn l2_error(approximation: &DVector<f64>, reference: &DVector<f64>) -> Result<f64, String> {
    check_lengths(approximation, reference)?;
    if reference.is_empty() {
        return Ok(0.0);
    }
    Ok((approximation - reference).norm() / (reference.len() as f64).sqrt())
}

/// `||approximation - reference|| / ||reference||` (Euclidean norms)
///
/// Falls back to the absolute norm of the difference when the reference is
/// identically zero.
pub fn relative_error(approximation: &DVector<f64>, reference: &DVector<f64>) -> Result<f64, String> {
    check_lengths(approximation, reference)?;
    let difference = (approximation - reference).norm();
    let scale = reference.norm();
    if scale == 0.0 {
        Ok(difference)
    } else {
        Ok(difference / scale)
    }
}

/// Sum of the interior values times the spacing
///
/// The two boundary points are excluded: they are owned by the boundary
/// rules and would otherwise count a fixed inflow as mass.
pub fn interior_mass(field: &DVector<f64>, dx: f64) -> f64 {
    let n = field.len();
    if n < 3 {
        return 0.0;
    }
    field.rows(1, n - 2).sum() * dx
}

// =================================================================================================
// Tests
// =================================================================================================
