//! Output module for simulation results
//!
//! Plotting is left to external tools: this module writes simulation data
//! to files they can read.
//!
//! # Architecture
//!
//! ```text
//! output/
//! ├── mod.rs              ← This file
//! └── export/             ← Data export
//!     ├── mod.rs          ← Exporter trait
//!     └── csv.rs          ← CSV implementation
//! ```
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use fdm_rs::output::{CsvConfig, CsvExporter, CsvMetadata, Exporter};
//!
//! let config = CsvConfig::default().with_metadata(CsvMetadata::from_result(&result));
//! CsvExporter::new(config).export_profiles(&result, &grid, PhysicalQuantity::Concentration, path)?;
//! ```

pub mod export;

// Re-export commonly used items for convenience
pub use export::{CsvConfig, CsvError, CsvExporter, CsvMetadata, Exporter};
