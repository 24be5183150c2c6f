//! crediflow-dataset — In-memory CSV table with the accessors the
//! visualization page needs.
//!
//! The dataset is read fresh from disk per view and never mutated. A column
//! is *numeric* when every non-empty cell parses as `f64`; empty cells are
//! missing values and are excluded from that column's statistics.
//!
//! # Example
//!
//! ```rust,no_run
//! use crediflow_dataset::Dataset;
//!
//! fn main() -> anyhow::Result<()> {
//!     let ds = Dataset::from_path("Bank_Personal_Loan.csv")?;
//!     for (name, stats) in ds.describe() {
//!         println!("{name}: count={} mean={:.2}", stats.count, stats.mean);
//!     }
//!     Ok(())
//! }
//! ```

pub mod correlation;
pub mod histogram;
pub mod stats;

pub use correlation::CorrelationMatrix;
pub use histogram::{Histogram, HistogramBin};
pub use stats::ColumnStats;

use std::io;
use std::path::Path;

use anyhow::Context;
use crediflow_common::{CrediflowError, Result};
use tracing::{debug, info};

/// One named column: the raw cells as read, plus the parsed values when the
/// column is numeric (`None` per cell marks an empty/missing entry).
#[derive(Debug, Clone)]
pub struct Column {
    name: String,
    raw: Vec<String>,
    numeric: Option<Vec<Option<f64>>>,
}

impl Column {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_numeric(&self) -> bool {
        self.numeric.is_some()
    }

    /// Raw cell text for table rendering, row-aligned.
    pub fn raw_values(&self) -> &[String] {
        &self.raw
    }

    /// Parsed values with missing entries preserved, row-aligned.
    /// `None` for text columns.
    pub fn numeric_cells(&self) -> Option<&[Option<f64>]> {
        self.numeric.as_deref()
    }

    /// Parsed non-missing values. `None` for text columns.
    pub fn numeric_values(&self) -> Option<Vec<f64>> {
        self.numeric
            .as_ref()
            .map(|cells| cells.iter().filter_map(|c| *c).collect())
    }
}

/// An immutable table loaded from CSV.
#[derive(Debug, Clone)]
pub struct Dataset {
    columns: Vec<Column>,
    row_count: usize,
}

impl Dataset {
    /// Read a CSV file with a header row.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)
            .with_context(|| format!("failed to open dataset {}", path.display()))?;
        debug!("Loading dataset from {}", path.display());
        let dataset = Self::from_reader(file)?;
        info!(
            "Dataset loaded: {} rows, {} columns ({} numeric)",
            dataset.row_count(),
            dataset.columns().len(),
            dataset.numeric_columns().len()
        );
        Ok(dataset)
    }

    /// Read CSV from any reader with a header row.
    pub fn from_reader(reader: impl io::Read) -> Result<Self> {
        let mut csv_reader = csv::Reader::from_reader(reader);

        let headers: Vec<String> = csv_reader.headers()?.iter().map(|s| s.to_string()).collect();
        let mut raw: Vec<Vec<String>> = headers.iter().map(|_| Vec::new()).collect();

        let mut row_count = 0usize;
        for result in csv_reader.records() {
            let record = result?;
            for (i, cell) in record.iter().enumerate() {
                if let Some(column) = raw.get_mut(i) {
                    column.push(cell.trim().to_string());
                }
            }
            row_count += 1;
        }

        let columns = headers
            .into_iter()
            .zip(raw)
            .map(|(name, raw)| {
                let numeric = parse_numeric(&raw);
                Column { name, raw, numeric }
            })
            .collect();

        Ok(Self { columns, row_count })
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Columns whose every non-empty cell is numeric, in dataset order.
    pub fn numeric_columns(&self) -> Vec<&Column> {
        self.columns.iter().filter(|c| c.is_numeric()).collect()
    }

    /// Descriptive statistics for every numeric column, in dataset order.
    pub fn describe(&self) -> Vec<(String, ColumnStats)> {
        self.numeric_columns()
            .into_iter()
            .map(|c| {
                let values = c.numeric_values().unwrap_or_default();
                (c.name.clone(), ColumnStats::from_values(&values))
            })
            .collect()
    }

    /// Equal-width histogram of a numeric column.
    pub fn histogram(&self, column: &str, bins: usize) -> Result<Histogram> {
        let col = self
            .column(column)
            .ok_or_else(|| CrediflowError::Dataset(format!("unknown column: {column}")))?;
        let values = col
            .numeric_values()
            .ok_or_else(|| CrediflowError::Dataset(format!("column {column} is not numeric")))?;
        Histogram::build(column, &values, bins)
    }

    /// Pearson correlation over the numeric columns, pairwise complete.
    pub fn correlation_matrix(&self) -> CorrelationMatrix {
        CorrelationMatrix::from_columns(&self.numeric_columns())
    }
}

/// `Some` when every non-empty cell parses as f64, with empties kept as
/// `None` to preserve row alignment. A literal "NaN" cell counts as
/// missing so downstream statistics never see a NaN value.
fn parse_numeric(raw: &[String]) -> Option<Vec<Option<f64>>> {
    let mut parsed = Vec::with_capacity(raw.len());
    for cell in raw {
        if cell.is_empty() {
            parsed.push(None);
        } else {
            match cell.parse::<f64>() {
                Ok(v) if v.is_nan() => parsed.push(None),
                Ok(v) => parsed.push(Some(v)),
                Err(_) => return None,
            }
        }
    }
    Some(parsed)
}
