//! Uniform one-dimensional grid
//!
//! Every scheme in this crate works on the same kind of grid: `N` sample
//! points evenly spaced by a fixed step along one axis.
//!
//! ```text
//!  x_0      x_1      x_2             x_{N-1}
//!   ●────────●────────●─── ... ───────●
//!   |<- dx ->|
//! ```
//!
//! The grid is immutable once created. Fields living on the grid are plain
//! `DVector<f64>` values of the same length.

use nalgebra::DVector;
use ndarray::Array1;

/// Immutable, evenly spaced 1-D grid
///
/// # Example
///
/// ```rust
/// use fdm_rs::physics::Grid1D;
///
/// let grid = Grid1D::new(0.0, 1.0, 11).unwrap();
/// assert_eq!(grid.len(), 11);
/// assert!((grid.spacing() - 0.1).abs() < 1e-12);
///
/// let field = grid.sample(|x| 2.0 * x);
/// assert!((field[10] - 2.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Grid1D {
    coordinates: Array1<f64>,
    spacing: f64,
}

impl Grid1D {
    /// Create a grid with `points` samples covering `[start, end]` (both ends included)
    pub fn new(start: f64, end: f64, points: usize) -> Result<Self, String> {
        if points < 2 {
            return Err(format!("A grid needs at least 2 points, got {}", points));
        }
        if !start.is_finite() || !end.is_finite() {
            return Err("Grid bounds must be finite".to_string());
        }
        if end <= start {
            return Err(format!(
                "Grid end ({}) must be greater than grid start ({})",
                end, start
            ));
        }

        let spacing = (end - start) / (points - 1) as f64;

        Ok(Self {
            coordinates: Array1::linspace(start, end, points),
            spacing,
        })
    }

    /// Create a grid from its first point, its step and its number of points
    ///
    /// `from_spacing(0.0, 0.1, 200)` ends at `x = 19.9`.
    pub fn from_spacing(start: f64, spacing: f64, points: usize) -> Result<Self, String> {
        if spacing <= 0.0 || !spacing.is_finite() {
            return Err(format!("Grid spacing must be positive, got {}", spacing));
        }
        if points < 2 {
            return Err(format!("A grid needs at least 2 points, got {}", points));
        }

        // Index-based coordinates, no accumulated rounding from repeated additions
        let coordinates = Array1::from_shape_fn(points, |i| start + i as f64 * spacing);

        Ok(Self { coordinates, spacing })
    }

    /// Number of grid points
    pub fn len(&self) -> usize {
        self.coordinates.len()
    }

    /// A valid grid always holds at least two points
    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }

    /// Distance between two neighbouring points
    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    /// First coordinate
    pub fn start(&self) -> f64 {
        self.coordinates[0]
    }

    /// Last coordinate
    pub fn end(&self) -> f64 {
        self.coordinates[self.len() - 1]
    }

    /// Length of the covered interval
    pub fn length(&self) -> f64 {
        self.end() - self.start()
    }

    /// Coordinate of point `index`
    ///
    /// # Panics
    ///
    /// Panics when `index` is out of bounds.
    pub fn x(&self, index: usize) -> f64 {
        self.coordinates[index]
    }

    /// All coordinates
    pub fn coordinates(&self) -> &Array1<f64> {
        &self.coordinates
    }

    /// Coordinates as a plain slice (handy for export)
    pub fn as_slice(&self) -> &[f64] {
        // linspace/from_shape_fn always produce a contiguous standard layout
        self.coordinates.as_slice().unwrap_or(&[])
    }

    /// Evaluate `f` at every grid point
    pub fn sample<F>(&self, f: F) -> DVector<f64>
    where
        F: Fn(f64) -> f64,
    {
        DVector::from_iterator(self.len(), self.coordinates.iter().map(|&x| f(x)))
    }

    /// Field of `len()` zeros
    pub fn zeros(&self) -> DVector<f64> {
        DVector::zeros(self.len())
    }
}

// =================================================================================================
// Tests
// =================================================================================================
