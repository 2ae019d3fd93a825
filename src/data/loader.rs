//! Job Posting Loader Module
//! Reads the postings CSV into a Polars DataFrame and reports its shape.

use polars::prelude::*;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Input file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
}

/// Row and column counts of a freshly loaded table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadReport {
    pub rows: usize,
    pub columns: usize,
}

impl LoadReport {
    pub fn from_dataframe(df: &DataFrame) -> Self {
        Self {
            rows: df.height(),
            columns: df.width(),
        }
    }
}

impl fmt::Display for LoadReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rows: {}, Columns: {}", self.rows, self.columns)
    }
}

/// Loads the posting table from a delimited file.
pub struct DataLoader;

impl DataLoader {
    /// Load a CSV file using Polars.
    ///
    /// The whole file is materialized in memory; column names are kept as
    /// written in the header. Column types are inferred from every row, so a
    /// late non-numeric value turns the column into text instead of failing.
    pub fn load_csv(file_path: &Path) -> Result<DataFrame, LoaderError> {
        if !file_path.is_file() {
            return Err(LoaderError::NotFound(file_path.to_path_buf()));
        }

        let df = LazyCsvReader::new(file_path)
            .with_infer_schema_length(None)
            .finish()?
            .collect()?;

        tracing::info!(
            path = %file_path.display(),
            rows = df.height(),
            columns = df.width(),
            "loaded job postings"
        );
        Ok(df)
    }
}
