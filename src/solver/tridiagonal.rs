//! Tridiagonal systems and the Thomas algorithm
//!
//! Implicit 1-D stencils produce matrices whose only non-zero entries sit on
//! the main diagonal and its two neighbours:
//!
//! ```text
//! | b0 c0                |   | x0 |   | d0 |
//! | a1 b1 c1             |   | x1 |   | d1 |
//! |    a2 b2 c2          | · | x2 | = | d2 |
//! |       .. .. ..       |   | .. |   | .. |
//! |          an bn       |   | xn |   | dn |
//! ```
//!
//! Such a system is solved in O(n) by forward elimination and back
//! substitution. The elimination only depends on the matrix, so it is done
//! once in [`TridiagonalSolver::factorize`] and reused for every right-hand
//! side.

use nalgebra::{DMatrix, DVector};

// =================================================================================================
// Tridiagonal Matrix
// =================================================================================================

/// Square tridiagonal matrix stored as three bands of length `n`
///
/// Row `i` reads `lower[i] * x[i-1] + diagonal[i] * x[i] + upper[i] * x[i+1]`.
/// `lower[0]` and `upper[n-1]` fall outside the matrix and are kept at zero.
#[derive(Debug, Clone, PartialEq)]
pub struct TridiagonalMatrix {
    lower: Vec<f64>,
    diagonal: Vec<f64>,
    upper: Vec<f64>,
}

impl TridiagonalMatrix {
    /// Build from the three bands
    pub fn new(mut lower: Vec<f64>, diagonal: Vec<f64>, mut upper: Vec<f64>) -> Result<Self, String> {
        let n = diagonal.len();
        if n == 0 {
            return Err("Tridiagonal matrix cannot be empty".to_string());
        }
        if lower.len() != n || upper.len() != n {
            return Err(format!(
                "Band lengths differ: lower {}, diagonal {}, upper {}",
                lower.len(),
                n,
                upper.len()
            ));
        }

        lower[0] = 0.0;
        upper[n - 1] = 0.0;

        Ok(Self { lower, diagonal, upper })
    }

    /// Same three coefficients on every row
    pub fn constant(n: usize, lower: f64, diagonal: f64, upper: f64) -> Self {
        let mut matrix = Self {
            lower: vec![lower; n],
            diagonal: vec![diagonal; n],
            upper: vec![upper; n],
        };
        if n > 0 {
            matrix.lower[0] = 0.0;
            matrix.upper[n - 1] = 0.0;
        }
        matrix
    }

    /// Identity matrix of size `n`
    pub fn identity(n: usize) -> Self {
        Self::constant(n, 0.0, 1.0, 0.0)
    }

    /// Matrix size
    pub fn len(&self) -> usize {
        self.diagonal.len()
    }

    /// True for a zero-sized matrix
    pub fn is_empty(&self) -> bool {
        self.diagonal.is_empty()
    }

    /// Sub-diagonal band
    pub fn lower(&self) -> &[f64] {
        &self.lower
    }

    /// Main diagonal band
    pub fn diagonal(&self) -> &[f64] {
        &self.diagonal
    }

    /// Super-diagonal band
    pub fn upper(&self) -> &[f64] {
        &self.upper
    }

    /// Overwrite row `i`
    ///
    /// Out-of-matrix coefficients (`lower` on row 0, `upper` on the last row)
    /// are ignored.
    pub fn set_row(&mut self, i: usize, lower: f64, diagonal: f64, upper: f64) {
        let last = self.len() - 1;
        self.lower[i] = if i == 0 { 0.0 } else { lower };
        self.diagonal[i] = diagonal;
        self.upper[i] = if i == last { 0.0 } else { upper };
    }

    /// `I + factor * self`
    pub fn shifted_identity(&self, factor: f64) -> Self {
        Self {
            lower: self.lower.iter().map(|a| factor * a).collect(),
            diagonal: self.diagonal.iter().map(|b| 1.0 + factor * b).collect(),
            upper: self.upper.iter().map(|c| factor * c).collect(),
        }
    }

    /// Matrix-vector product
    pub fn mul_vector(&self, x: &DVector<f64>) -> DVector<f64> {
        let n = self.len();
        assert_eq!(x.len(), n, "Vector length must match matrix size");

        DVector::from_fn(n, |i, _| {
            let mut value = self.diagonal[i] * x[i];
            if i > 0 {
                value += self.lower[i] * x[i - 1];
            }
            if i + 1 < n {
                value += self.upper[i] * x[i + 1];
            }
            value
        })
    }

    /// Dense copy (for inspection and cross-checks)
    pub fn to_dense(&self) -> DMatrix<f64> {
        let n = self.len();
        let mut dense = DMatrix::zeros(n, n);
        for i in 0..n {
            dense[(i, i)] = self.diagonal[i];
            if i > 0 {
                dense[(i, i - 1)] = self.lower[i];
            }
            if i + 1 < n {
                dense[(i, i + 1)] = self.upper[i];
            }
        }
        dense
    }
}

// =================================================================================================
// Thomas Solver
// =================================================================================================

/// Factorised tridiagonal system, reusable for any right-hand side
///
/// # Example
///
/// ```rust
/// use fdm_rs::solver::{TridiagonalMatrix, TridiagonalSolver};
/// use nalgebra::DVector;
///
/// let matrix = TridiagonalMatrix::constant(4, -1.0, 4.0, -1.0);
/// let solver = TridiagonalSolver::factorize(&matrix).unwrap();
///
/// let x = DVector::from_vec(vec![1.0, 2.0, 3.0, 4.0]);
/// let rhs = matrix.mul_vector(&x);
/// let solved = solver.solve(&rhs).unwrap();
///
/// assert!((solved - x).amax() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct TridiagonalSolver {
    lower: Vec<f64>,
    /// Pivots of the forward elimination
    pivots: Vec<f64>,
    /// Super-diagonal divided by the pivot of its row
    upper_scaled: Vec<f64>,
}

impl TridiagonalSolver {
    /// Forward elimination of the matrix
    ///
    /// Fails on a zero pivot, which happens for singular matrices (and for
    /// some non-singular ones that would need pivoting; diagonally dominant
    /// matrices such as implicit diffusion never do).
    pub fn factorize(matrix: &TridiagonalMatrix) -> Result<Self, String> {
        let n = matrix.len();
        if n == 0 {
            return Err("Cannot factorize an empty matrix".to_string());
        }

        let mut pivots = vec![0.0; n];
        let mut upper_scaled = vec![0.0; n];

        for i in 0..n {
            let pivot = if i == 0 {
                matrix.diagonal[0]
            } else {
                matrix.diagonal[i] - matrix.lower[i] * upper_scaled[i - 1]
            };

            if pivot.abs() < f64::MIN_POSITIVE || !pivot.is_finite() {
                return Err(format!(
                    "Zero pivot at row {}: tridiagonal system is singular or needs pivoting",
                    i
                ));
            }

            pivots[i] = pivot;
            upper_scaled[i] = matrix.upper[i] / pivot;
        }

        Ok(Self {
            lower: matrix.lower.clone(),
            pivots,
            upper_scaled,
        })
    }

    /// System size
    pub fn len(&self) -> usize {
        self.pivots.len()
    }

    /// True for a zero-sized system
    pub fn is_empty(&self) -> bool {
        self.pivots.is_empty()
    }

    /// Solve `A x = rhs` into a preallocated vector
    pub fn solve_into(&self, rhs: &DVector<f64>, x: &mut DVector<f64>) -> Result<(), String> {
        let n = self.len();
        if rhs.len() != n || x.len() != n {
            return Err(format!(
                "System of size {} cannot take rhs of length {} into output of length {}",
                n,
                rhs.len(),
                x.len()
            ));
        }

        // Forward substitution
        x[0] = rhs[0] / self.pivots[0];
        for i in 1..n {
            x[i] = (rhs[i] - self.lower[i] * x[i - 1]) / self.pivots[i];
        }

        // Back substitution
        for i in (0..n - 1).rev() {
            x[i] -= self.upper_scaled[i] * x[i + 1];
        }

        Ok(())
    }

    /// Solve `A x = rhs`
    pub fn solve(&self, rhs: &DVector<f64>) -> Result<DVector<f64>, String> {
        let mut x = DVector::zeros(self.len());
        self.solve_into(rhs, &mut x)?;
        Ok(x)
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
    fn test_constant_matrix_bands() {
        let matrix = TridiagonalMatrix::constant(3, -1.0, 2.0, -1.0);

        assert_eq!(matrix.lower(), &[0.0, -1.0, -1.0]);
        assert_eq!(matrix.diagonal(), &[2.0, 2.0, 2.0]);
        assert_eq!(matrix.upper(), &[-1.0, -1.0, 0.0]);
    }

    #[test]
    fn test_new_rejects_mismatched_bands() {
        assert!(TridiagonalMatrix::new(vec![0.0; 2], vec![1.0; 3], vec![0.0; 3]).is_err());
        assert!(TridiagonalMatrix::new(vec![], vec![], vec![]).is_err());
    }

    #[test]
    fn test_set_row_ignores_out_of_matrix_entries() {
        let mut matrix = TridiagonalMatrix::constant(3, -1.0, 2.0, -1.0);
        matrix.set_row(0, 7.0, 1.0, 0.0);
        matrix.set_row(2, -1.0, 1.0, 7.0);

        assert_eq!(matrix.lower()[0], 0.0);
        assert_eq!(matrix.upper()[2], 0.0);
        assert_eq!(matrix.diagonal(), &[1.0, 2.0, 1.0]);
    }

    #[test]
    fn test_dense_and_product_agree() {
        let matrix = TridiagonalMatrix::new(
            vec![0.0, 1.0, 2.0, 3.0],
            vec![5.0, 6.0, 7.0, 8.0],
            vec![-1.0, -2.0, -3.0, 0.0],
        )
        .unwrap();
        let x = DVector::from_vec(vec![1.0, -1.0, 2.0, 0.5]);

        let banded = matrix.mul_vector(&x);
        let dense = matrix.to_dense() * &x;

        for i in 0..4 {
            assert_relative_eq!(banded[i], dense[i], epsilon = 1e-14);
        }
    }

    #[test]
    fn test_shifted_identity() {
        let operator = TridiagonalMatrix::constant(3, 1.0, -2.0, 1.0);
        let system = operator.shifted_identity(-0.5);

        assert_eq!(system.diagonal(), &[2.0, 2.0, 2.0]);
        assert_eq!(system.lower(), &[0.0, -0.5, -0.5]);
        assert_eq!(system.upper(), &[-0.5, -0.5, 0.0]);
    }

    #[test]
    fn test_thomas_matches_dense_lu() {
        let n = 50;
        let alpha = 3.7;
        let mut matrix = TridiagonalMatrix::constant(n, -alpha, 1.0 + 2.0 * alpha, -alpha);
        matrix.set_row(0, 0.0, 1.0, 0.0);
        matrix.set_row(n - 1, 0.0, 1.0, 0.0);

        let rhs = DVector::from_fn(n, |i, _| (i as f64 * 0.3).sin());

        let thomas = TridiagonalSolver::factorize(&matrix).unwrap().solve(&rhs).unwrap();
        let dense = matrix.to_dense().lu().solve(&rhs).unwrap();

        for i in 0..n {
            assert_relative_eq!(thomas[i], dense[i], epsilon = 1e-12);
        }
    }

    #[test]
    fn test_factorization_is_reusable() {
        let matrix = TridiagonalMatrix::constant(6, -1.0, 3.0, -1.0);
        let solver = TridiagonalSolver::factorize(&matrix).unwrap();

        for shift in 0..3 {
            let x = DVector::from_fn(6, |i, _| (i + shift) as f64);
            let solved = solver.solve(&matrix.mul_vector(&x)).unwrap();
            assert!((solved - x).amax() < 1e-12);
        }
    }

    #[test]
    fn test_singular_matrix_is_reported() {
        let matrix = TridiagonalMatrix::constant(4, 1.0, 0.0, 1.0);
        let error = TridiagonalSolver::factorize(&matrix).unwrap_err();

        assert!(error.contains("Zero pivot at row 0"));
    }

    #[test]
    fn test_solve_length_mismatch() {
        let solver = TridiagonalSolver::factorize(&TridiagonalMatrix::identity(3)).unwrap();
        assert!(solver.solve(&DVector::zeros(4)).is_err());
    }
}
