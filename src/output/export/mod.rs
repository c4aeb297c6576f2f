//! Export module for simulation results.
//!
//! # Architecture
//!
//! This module defines the [`Exporter`] trait that abstracts the export format.
//! Each format is an independent implementation in its own sub-module; adding
//! a format means adding a file.
//!
//! # Available formats
//!
//! | Format  | Module          |
//! |---------|-----------------|
//! | CSV     | [`csv`]         |
//!
//! # Usage example
//!
//! ```rust,ignore
//! use fdm_rs::output::export::{CsvExporter, Exporter};
//! use std::path::Path;
//!
//! let exporter = CsvExporter::default();
//!
//! // One column per saved snapshot
//! exporter.export_profiles(&result, &grid, PhysicalQuantity::Concentration, Path::new("profiles.csv"))?;
//!
//! // Height of a projectile over time
//! exporter.export_series(&result, PhysicalQuantity::Position, 1, Path::new("height.csv"))?;
//! ```

pub mod csv;

pub use csv::{export_columns_csv, CsvConfig, CsvError, CsvExporter, CsvMetadata};

use std::path::Path;

use crate::physics::{Grid1D, PhysicalQuantity};
use crate::solver::SimulationResult;

/// Abstraction trait for all export formats.
///
/// # Associated type `Error`
///
/// Each format manages its own errors via the associated type, so callers
/// can react precisely to the error kind.
pub trait Exporter {
    /// Error type specific to this export format.
    type Error: std::error::Error;

    /// Exports the saved snapshots of a spatial quantity.
    ///
    /// The file contains the grid coordinates, then one column per snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `result` contains no snapshot
    /// - a snapshot lacks `quantity` or does not match the grid length
    /// - the path is invalid or the directory does not exist
    fn export_profiles(
        &self,
        result: &SimulationResult,
        grid: &Grid1D,
        quantity: PhysicalQuantity,
        path: &Path,
    ) -> Result<(), Self::Error>;

    /// Exports one component of a quantity across the saved snapshots.
    ///
    /// The file contains two columns: time and `quantity[index]`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `result` contains no snapshot
    /// - `quantity` is missing or `index` is out of bounds
    /// - the path is invalid or the directory does not exist
    fn export_series(
        &self,
        result: &SimulationResult,
        quantity: PhysicalQuantity,
        index: usize,
        path: &Path,
    ) -> Result<(), Self::Error>;
}
