//! Simulation result logs
//!
//! A numeric simulator consuming the emitted bindings writes `result.csv`: one header
//! row, then numeric rows. Columns 0 and 1 are the joint angles in radians, columns 2
//! to 4 are the quantities plotted against them.

use std::f64::consts::PI;
use std::io::Read;
use std::path::Path;

use thiserror::Error;

/// Minimum number of columns in a result log
pub const MIN_COLUMNS: usize = 5;

/// Columns holding joint angles
pub const ANGLE_COLUMNS: [usize; 2] = [0, 1];

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResultLogError {
    #[error("CSV error: {0}")]
    Csv(String),
    /// Rows are numbered from 1, not counting the header
    #[error("Row {row} has {found} columns, at least 5 are required")]
    TooFewColumns { row: usize, found: usize },
    #[error("Row {row}, column {column}: '{value}' is not a number")]
    Parse {
        row: usize,
        column: usize,
        value: String,
    },
}

impl From<csv::Error> for ResultLogError {
    fn from(e: csv::Error) -> Self {
        ResultLogError::Csv(e.to_string())
    }
}

/// Numeric table read from a result log
#[derive(Debug, Clone, PartialEq)]
pub struct ResultLog {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<f64>>,
}

impl ResultLog {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ResultLogError> {
        let reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_path(path)?;
        Self::read(reader)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ResultLogError> {
        let reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);
        Self::read(reader)
    }

    fn read<R: Read>(mut reader: csv::Reader<R>) -> Result<Self, ResultLogError> {
        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

        let mut rows = Vec::new();
        for (i, record) in reader.records().enumerate() {
            let record = record?;
            let row = i + 1;
            if record.len() < MIN_COLUMNS {
                return Err(ResultLogError::TooFewColumns {
                    row,
                    found: record.len(),
                });
            }
            let values = record
                .iter()
                .enumerate()
                .map(|(column, cell)| {
                    cell.parse::<f64>().map_err(|_| ResultLogError::Parse {
                        row,
                        column,
                        value: cell.to_string(),
                    })
                })
                .collect::<Result<Vec<f64>, _>>()?;
            rows.push(values);
        }

        tracing::debug!("Read {} rows of {} columns", rows.len(), headers.len());
        Ok(ResultLog { headers, rows })
    }

    /// A copy with the joint angle columns converted from radians to degrees
    pub fn in_degrees(&self) -> Self {
        let mut converted = self.clone();
        for row in &mut converted.rows {
            for &column in &ANGLE_COLUMNS {
                row[column] *= 180.0 / PI;
            }
        }
        converted
    }

    /// Values of one column, or `None` if it is out of range for some row
    pub fn column(&self, index: usize) -> Option<Vec<f64>> {
        self.rows.iter().map(|row| row.get(index).copied()).collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
