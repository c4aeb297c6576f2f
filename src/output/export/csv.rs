//! CSV export of simulation results
//!
//! CSV files open in any spreadsheet, in pandas or in gnuplot; they are the
//! hand-off point to external plotting.
//!
//! # Layouts
//!
//! ## Profiles
//!
//! One row per grid point, one column per saved snapshot:
//!
//! ```csv
//! x,t=0,t=0.5,t=1
//! 0.000000,0.000000,0.000000,0.000000
//! 0.100000,0.000000,0.012000,0.031000
//! ...
//! ```
//!
//! ## Series
//!
//! One row per saved snapshot, the value of one component over time:
//!
//! ```csv
//! Time (s),Position[1]
//! 0.000000,0.000000
//! 0.010000,0.141321
//! ...
//! ```
//!
//! ## With Metadata
//!
//! ```csv
//! # Finite-Difference Simulation Data
//! # Generated: 2026-10-19T15:30:00+00:00
//! # Model: Diffusion 1D
//! # Solver: Forward Euler
//! # dt: 0.0001
//! # Time Steps: 1000
//! # Total Time: 0.1 s
//! # diffusion number: 0.4
//! #
//! x,t=0,t=0.05,t=0.1
//! ...
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::output::export::Exporter;
use crate::physics::{Grid1D, PhysicalQuantity};
use crate::solver::SimulationResult;

// =============================================================================
// Errors
// =============================================================================

/// Reasons a CSV export can fail
#[derive(Debug)]
pub enum CsvError {
    /// Nothing to write
    EmptyData,

    /// A column does not have the expected number of rows
    LengthMismatch {
        column: String,
        expected: usize,
        found: usize,
    },

    /// NaN or infinity in a column
    NonFinite {
        column: String,
        row: usize,
    },

    /// The requested quantity or component is not in the result
    MissingQuantity(String),

    /// Underlying I/O failure
    Io(io::Error),
}

impl fmt::Display for CsvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CsvError::EmptyData => write!(f, "Empty data: nothing to export"),
            CsvError::LengthMismatch { column, expected, found } => write!(
                f,
                "Data length mismatch: column '{}' has {} rows, expected {}",
                column, found, expected
            ),
            CsvError::NonFinite { column, row } => {
                write!(f, "Invalid data: NaN or Inf in column '{}' at row {}", column, row)
            }
            CsvError::MissingQuantity(message) => write!(f, "Missing quantity: {}", message),
            CsvError::Io(error) => write!(f, "I/O error: {}", error),
        }
    }
}

impl std::error::Error for CsvError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CsvError::Io(error) => Some(error),
            _ => None,
        }
    }
}

impl From<io::Error> for CsvError {
    fn from(error: io::Error) -> Self {
        CsvError::Io(error)
    }
}

// =============================================================================
// Configuration Structures
// =============================================================================

/// Configuration for CSV export
///
/// # Example
///
/// ```rust
/// use fdm_rs::output::export::CsvConfig;
///
/// let config = CsvConfig {
///     delimiter: ';',
///     precision: 10,
///     ..Default::default()
/// };
/// assert_eq!(config.x_header, "x");
/// ```
#[derive(Debug, Clone)]
pub struct CsvConfig {
    /// Column delimiter (default: ',')
    pub delimiter: char,

    /// Decimal separator (default: '.')
    pub decimal_separator: char,

    /// Number of decimal places for floating-point values (default: 6)
    pub precision: usize,

    /// Include metadata header comments (default: false)
    pub include_metadata: bool,

    /// Metadata to include in header
    pub metadata: Option<CsvMetadata>,

    /// Header of the grid coordinate column (default: "x")
    pub x_header: String,

    /// Header of the time column (default: "Time (s)")
    pub time_header: String,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            decimal_separator: '.',
            precision: 6,
            include_metadata: false,
            metadata: None,
            x_header: "x".to_string(),
            time_header: "Time (s)".to_string(),
        }
    }
}

impl CsvConfig {
    /// European CSV format (semicolon, comma for decimal)
    pub fn european() -> Self {
        Self {
            delimiter: ';',
            decimal_separator: ',',
            ..Default::default()
        }
    }

    /// High precision (12 decimal places)
    pub fn high_precision() -> Self {
        Self {
            precision: 12,
            ..Default::default()
        }
    }

    /// Builder pattern: set delimiter
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Builder pattern: set precision
    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Builder pattern: enable metadata
    pub fn with_metadata(mut self, metadata: CsvMetadata) -> Self {
        self.include_metadata = true;
        self.metadata = Some(metadata);
        self
    }
}

/// Metadata for CSV header comments
///
/// Only the fields that are set appear in the header.
#[derive(Debug, Clone, Default)]
pub struct CsvMetadata {
    /// Model name (e.g. "Diffusion 1D")
    pub model_name: Option<String>,

    /// Solver name (e.g. "Forward Euler")
    pub solver_name: Option<String>,

    /// Time step
    pub dt: Option<f64>,

    /// Number of time steps
    pub time_steps: Option<usize>,

    /// Simulated duration (seconds)
    pub total_time: Option<f64>,

    /// Additional parameters, written in insertion order
    pub custom: Vec<(String, String)>,
}

impl CsvMetadata {
    /// Metadata from the main run parameters
    pub fn from_simulation(model: &str, solver: &str, dt: f64, time_steps: usize) -> Self {
        Self {
            model_name: Some(model.to_string()),
            solver_name: Some(solver.to_string()),
            dt: Some(dt),
            time_steps: Some(time_steps),
            total_time: Some(dt * time_steps as f64),
            ..Default::default()
        }
    }

    /// Metadata read back from a result
    ///
    /// Known keys fill the typed fields, every other entry becomes a custom
    /// parameter (sorted by key).
    pub fn from_result(result: &SimulationResult) -> Self {
        let mut metadata = Self::default();
        let sorted: BTreeMap<&String, &String> = result.metadata().iter().collect();

        for (key, value) in sorted {
            match key.as_str() {
                "model" => metadata.model_name = Some(value.clone()),
                "solver" => metadata.solver_name = Some(value.clone()),
                "dt" => metadata.dt = value.parse().ok(),
                "time steps" => metadata.time_steps = value.parse().ok(),
                "total time" => metadata.total_time = value.parse().ok(),
                _ => metadata.add_custom(key, value),
            }
        }

        metadata
    }

    /// Add custom parameter
    pub fn add_custom(&mut self, key: &str, value: &str) {
        self.custom.push((key.to_string(), value.to_string()));
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Write metadata header comments
fn write_metadata_header<W: Write>(writer: &mut W, metadata: &CsvMetadata) -> io::Result<()> {
    writeln!(writer, "# Finite-Difference Simulation Data")?;

    let now = chrono::Utc::now();
    writeln!(writer, "# Generated: {}", now.to_rfc3339())?;

    if let Some(model) = &metadata.model_name {
        writeln!(writer, "# Model: {}", model)?;
    }
    if let Some(solver) = &metadata.solver_name {
        writeln!(writer, "# Solver: {}", solver)?;
    }
    if let Some(dt) = metadata.dt {
        writeln!(writer, "# dt: {}", dt)?;
    }
    if let Some(time_steps) = metadata.time_steps {
        writeln!(writer, "# Time Steps: {}", time_steps)?;
    }
    if let Some(total_time) = metadata.total_time {
        writeln!(writer, "# Total Time: {} s", total_time)?;
    }

    for (key, value) in &metadata.custom {
        writeln!(writer, "# {}: {}", key, value)?;
    }

    writeln!(writer, "#")?;
    Ok(())
}

/// Format number with configured precision and decimal separator
fn format_number(value: f64, config: &CsvConfig) -> String {
    let formatted = format!("{:.prec$}", value, prec = config.precision);

    if config.decimal_separator != '.' {
        formatted.replace('.', &config.decimal_separator.to_string())
    } else {
        formatted
    }
}

/// Check that every column is finite and as long as the first one
fn validate_columns(headers: &[String], columns: &[Vec<f64>]) -> Result<(), CsvError> {
    let Some(first) = columns.first() else {
        return Err(CsvError::EmptyData);
    };
    if first.is_empty() {
        return Err(CsvError::EmptyData);
    }

    if headers.len() != columns.len() {
        return Err(CsvError::LengthMismatch {
            column: "headers".to_string(),
            expected: columns.len(),
            found: headers.len(),
        });
    }

    let rows = first.len();
    for (header, column) in headers.iter().zip(columns) {
        if column.len() != rows {
            return Err(CsvError::LengthMismatch {
                column: header.clone(),
                expected: rows,
                found: column.len(),
            });
        }
        if let Some(row) = column.iter().position(|v| !v.is_finite()) {
            return Err(CsvError::NonFinite {
                column: header.clone(),
                row,
            });
        }
    }

    Ok(())
}

/// Write a validated column table
fn write_table<W: Write>(
    writer: &mut W,
    headers: &[String],
    columns: &[Vec<f64>],
    config: &CsvConfig,
) -> Result<(), CsvError> {
    validate_columns(headers, columns)?;

    if config.include_metadata
        && let Some(metadata) = &config.metadata
    {
        write_metadata_header(writer, metadata)?;
    }

    let delimiter = config.delimiter.to_string();
    writeln!(writer, "{}", headers.join(&delimiter))?;

    let rows = columns[0].len();
    for row in 0..rows {
        let line: Vec<String> = columns
            .iter()
            .map(|column| format_number(column[row], config))
            .collect();
        writeln!(writer, "{}", line.join(&delimiter))?;
    }

    Ok(())
}

// =============================================================================
// Export Functions
// =============================================================================

/// Write arbitrary named columns to a CSV file
///
/// # Errors
///
/// - no column, or empty columns
/// - columns of different lengths, or a header count that does not match
/// - NaN or Inf values
/// - file creation errors
pub fn export_columns_csv(
    headers: &[String],
    columns: &[Vec<f64>],
    path: &Path,
    config: &CsvConfig,
) -> Result<(), CsvError> {
    // Validate before touching the file system
    validate_columns(headers, columns)?;

    let mut writer = BufWriter::new(File::create(path)?);
    write_table(&mut writer, headers, columns, config)?;
    writer.flush()?;

    log::debug!("exported {} columns to {}", columns.len(), path.display());
    Ok(())
}

// =============================================================================
// CSV Exporter
// =============================================================================

/// [`Exporter`] writing CSV files
///
/// # Example
///
/// ```rust,no_run
/// use fdm_rs::output::export::{CsvConfig, CsvExporter, Exporter};
/// # use fdm_rs::physics::{Grid1D, PhysicalQuantity};
/// # use fdm_rs::solver::SimulationResult;
/// use std::path::Path;
/// # fn run(result: &SimulationResult, grid: &Grid1D) -> Result<(), Box<dyn std::error::Error>> {
///
/// let exporter = CsvExporter::new(CsvConfig::high_precision());
/// exporter.export_profiles(result, grid, PhysicalQuantity::Concentration, Path::new("profiles.csv"))?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct CsvExporter {
    config: CsvConfig,
}

impl CsvExporter {
    /// Exporter with the given configuration
    pub fn new(config: CsvConfig) -> Self {
        Self { config }
    }

    /// Current configuration
    pub fn config(&self) -> &CsvConfig {
        &self.config
    }

    /// Column label of a snapshot
    fn snapshot_label(time: f64) -> String {
        format!("t={}", time)
    }
}

impl Exporter for CsvExporter {
    type Error = CsvError;

    fn export_profiles(
        &self,
        result: &SimulationResult,
        grid: &Grid1D,
        quantity: PhysicalQuantity,
        path: &Path,
    ) -> Result<(), Self::Error> {
        if result.is_empty() {
            return Err(CsvError::EmptyData);
        }

        let mut headers = vec![self.config.x_header.clone()];
        let mut columns = vec![grid.as_slice().to_vec()];

        for (_, time, state) in result.snapshots.iter() {
            let field = state
                .field(quantity)
                .map_err(CsvError::MissingQuantity)?;
            headers.push(Self::snapshot_label(time));
            columns.push(field.as_slice().to_vec());
        }

        export_columns_csv(&headers, &columns, path, &self.config)
    }

    fn export_series(
        &self,
        result: &SimulationResult,
        quantity: PhysicalQuantity,
        index: usize,
        path: &Path,
    ) -> Result<(), Self::Error> {
        if result.is_empty() {
            return Err(CsvError::EmptyData);
        }

        let values = result
            .snapshots
            .series(quantity, index)
            .map_err(CsvError::MissingQuantity)?;

        let headers = vec![self.config.time_header.clone(), format!("{}[{}]", quantity, index)];
        let columns = vec![result.time_points().to_vec(), values];

        export_columns_csv(&headers, &columns, path, &self.config)
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::{PhysicalData, PhysicalState};
    use crate::solver::SnapshotBuffer;
    use std::fs;
    use tempfile::NamedTempFile;

    fn profile_result() -> SimulationResult {
        let mut buffer = SnapshotBuffer::new();
        for (step, time, values) in [(0, 0.0, vec![0.0, 1.0, 0.0]), (10, 0.5, vec![0.0, 0.5, 0.0])] {
            let state = PhysicalState::new(PhysicalQuantity::Concentration, PhysicalData::from_vec(values));
            buffer.record(step, time, &state).unwrap();
        }
        let final_state = buffer.last().unwrap().clone();

        let mut result = SimulationResult::new(buffer, final_state, 0.5);
        result.add_metadata("solver", "Forward Euler");
        result.add_metadata("dt", "0.05");
        result.add_metadata("diffusion number", "0.4");
        result
    }

    #[test]
    fn test_export_profiles() {
        let file = NamedTempFile::new().unwrap();
        let grid = Grid1D::new(0.0, 1.0, 3).unwrap();

        CsvExporter::default()
            .export_profiles(&profile_result(), &grid, PhysicalQuantity::Concentration, file.path())
            .unwrap();

        let content = fs::read_to_string(file.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();

        assert_eq!(lines[0], "x,t=0,t=0.5");
        assert_eq!(lines[1], "0.000000,0.000000,0.000000");
        assert_eq!(lines[2], "0.500000,1.000000,0.500000");
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn test_export_series_european() {
        let file = NamedTempFile::new().unwrap();
        let exporter = CsvExporter::new(CsvConfig::european().precision(2));

        exporter
            .export_series(&profile_result(), PhysicalQuantity::Concentration, 1, file.path())
            .unwrap();

        let content = fs::read_to_string(file.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();

        assert_eq!(lines[0], "Time (s);Concentration[1]");
        assert_eq!(lines[1], "0,00;1,00");
        assert_eq!(lines[2], "0,50;0,50");
    }

    #[test]
    fn test_metadata_header() {
        let file = NamedTempFile::new().unwrap();
        let result = profile_result();
        let config = CsvConfig::default().with_metadata(CsvMetadata::from_result(&result));

        CsvExporter::new(config)
            .export_series(&result, PhysicalQuantity::Concentration, 0, file.path())
            .unwrap();

        let content = fs::read_to_string(file.path()).unwrap();

        assert!(content.starts_with("# Finite-Difference Simulation Data\n# Generated: "));
        assert!(content.contains("# Solver: Forward Euler"));
        assert!(content.contains("# dt: 0.05"));
        assert!(content.contains("# diffusion number: 0.4"));
        assert!(content.contains("#\nTime (s),Concentration[0]"));
    }

    #[test]
    fn test_missing_quantity() {
        let file = NamedTempFile::new().unwrap();
        let error = CsvExporter::default()
            .export_series(&profile_result(), PhysicalQuantity::WaveHeight, 0, file.path())
            .unwrap_err();

        assert!(matches!(error, CsvError::MissingQuantity(_)));

        let error = CsvExporter::default()
            .export_series(&profile_result(), PhysicalQuantity::Concentration, 7, file.path())
            .unwrap_err();
        assert!(error.to_string().contains("out of bounds"));
    }

    #[test]
    fn test_profile_length_must_match_grid() {
        let file = NamedTempFile::new().unwrap();
        let grid = Grid1D::new(0.0, 1.0, 4).unwrap();

        let error = CsvExporter::default()
            .export_profiles(&profile_result(), &grid, PhysicalQuantity::Concentration, file.path())
            .unwrap_err();

        match error {
            CsvError::LengthMismatch { column, expected, found } => {
                assert_eq!(column, "t=0");
                assert_eq!(expected, 4);
                assert_eq!(found, 3);
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_invalid_columns() {
        let file = NamedTempFile::new().unwrap();
        let config = CsvConfig::default();
        let headers = vec!["a".to_string(), "b".to_string()];

        let error = export_columns_csv(&headers, &[vec![1.0], vec![f64::NAN]], file.path(), &config).unwrap_err();
        assert!(matches!(error, CsvError::NonFinite { row: 0, .. }));

        let error = export_columns_csv(&[], &[], file.path(), &config).unwrap_err();
        assert!(matches!(error, CsvError::EmptyData));
    }

    #[test]
    fn test_io_error() {
        let config = CsvConfig::default();
        let headers = vec!["a".to_string()];
        let path = Path::new("/nonexistent/directory/out.csv");

        let error = export_columns_csv(&headers, &[vec![1.0]], path, &config).unwrap_err();
        assert!(matches!(error, CsvError::Io(_)));
        assert!(std::error::Error::source(&error).is_some());
    }
}
