//! Data Processor Module
//! Handles cleaning of the raw posting table before skill analysis.

use polars::prelude::*;
use std::collections::HashSet;
use thiserror::Error;

/// Column that every cleaned posting table must carry.
pub const DESCRIPTION_COLUMN: &str = "job_description";

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Column '{0}' not found in dataset.")]
    MissingColumn(String),
    #[error("Columns collide after normalization: '{0}'")]
    DuplicateColumn(String),
}

/// Handles data cleaning operations on the posting table.
pub struct DataProcessor;

impl DataProcessor {
    /// Run every cleaning step in order: normalize names, drop duplicate rows,
    /// require the description column, drop rows without a description.
    pub fn clean(mut df: DataFrame) -> Result<DataFrame, ProcessorError> {
        Self::normalize_columns(&mut df)?;

        let before = df.height();
        let df = Self::drop_duplicates(&df)?;
        tracing::debug!(removed = before - df.height(), "dropped duplicate rows");

        Self::require_column(&df, DESCRIPTION_COLUMN)?;

        let before = df.height();
        let df = Self::drop_missing(&df, DESCRIPTION_COLUMN)?;
        tracing::debug!(removed = before - df.height(), "dropped rows without a description");

        tracing::info!(rows = df.height(), "cleaned posting table");
        Ok(df)
    }

    /// Lowercase and trim a single column name.
    pub fn normalize_column_name(name: &str) -> String {
        name.to_lowercase().trim().to_string()
    }

    /// Rename every column to its normalized form.
    ///
    /// A later column whose normalized name is already taken keeps its data
    /// under `<name>_<n>`. Two headers normalizing to the description column
    /// are ambiguous and rejected.
    pub fn normalize_columns(df: &mut DataFrame) -> Result<(), ProcessorError> {
        let normalized: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| Self::normalize_column_name(s))
            .collect();
        let reserved: HashSet<&str> = normalized.iter().map(String::as_str).collect();

        let mut taken: HashSet<String> = HashSet::with_capacity(normalized.len());
        let mut names = Vec::with_capacity(normalized.len());
        for name in &normalized {
            if taken.insert(name.clone()) {
                names.push(name.clone());
                continue;
            }
            if name == DESCRIPTION_COLUMN {
                return Err(ProcessorError::DuplicateColumn(name.clone()));
            }
            let unique = (1..)
                .map(|n| format!("{}_{}", name, n))
                .find(|candidate| !reserved.contains(candidate.as_str()) && !taken.contains(candidate))
                .unwrap_or_else(|| name.clone());
            tracing::warn!(column = %name, renamed = %unique, "duplicate column name after normalization");
            taken.insert(unique.clone());
            names.push(unique);
        }

        df.set_column_names(names.iter().map(String::as_str))?;
        Ok(())
    }

    /// Remove rows equal in every column, keeping the first occurrence.
    pub fn drop_duplicates(df: &DataFrame) -> Result<DataFrame, ProcessorError> {
        let columns = df
            .get_columns()
            .iter()
            .map(|col| col.cast(&DataType::String))
            .collect::<PolarsResult<Vec<Column>>>()?;
        let views = columns
            .iter()
            .map(|col| col.str())
            .collect::<PolarsResult<Vec<&StringChunked>>>()?;

        let mut seen: HashSet<Vec<Option<&str>>> = HashSet::with_capacity(df.height());
        let mask: BooleanChunked = (0..df.height())
            .map(|i| seen.insert(views.iter().map(|ca| ca.get(i)).collect()))
            .collect();

        Ok(df.filter(&mask)?)
    }

    /// Fail unless `column` exists.
    pub fn require_column(df: &DataFrame, column: &str) -> Result<(), ProcessorError> {
        if df.column(column).is_err() {
            return Err(ProcessorError::MissingColumn(column.to_string()));
        }
        Ok(())
    }

    /// Remove rows where `column` is null.
    pub fn drop_missing(df: &DataFrame, column: &str) -> Result<DataFrame, ProcessorError> {
        let values = Self::text_column(df, column)?;
        let mask: BooleanChunked = values.into_iter().map(|v| v.is_some()).collect();
        Ok(df.filter(&mask)?)
    }

    /// Read `column` coerced to text.
    pub fn text_column(df: &DataFrame, column: &str) -> Result<StringChunked, ProcessorError> {
        let col = df
            .column(column)
            .map_err(|_| ProcessorError::MissingColumn(column.to_string()))?;
        let text = col.cast(&DataType::String)?;
        Ok(text.str()?.clone())
    }

    /// Every description joined by single spaces; absent values contribute empty text.
    pub fn description_corpus(df: &DataFrame) -> Result<String, ProcessorError> {
        let descriptions = Self::text_column(df, DESCRIPTION_COLUMN)?;
        let parts: Vec<&str> = descriptions
            .into_iter()
            .map(|v| v.unwrap_or_default())
            .collect();
        Ok(parts.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_postings() -> DataFrame {
        df!(
            " Job_Description " => [Some("Python and SQL"), Some("Python and SQL"), None, Some("AWS")],
            "TITLE" => ["Analyst", "Analyst", "Engineer", "Engineer"]
        )
        .unwrap()
    }

    #[test]
    fn test_normalize_column_name() {
        assert_eq!(DataProcessor::normalize_column_name("  Job_Description "), "job_description");
        assert_eq!(DataProcessor::normalize_column_name("title"), "title");
    }

    #[test]
    fn test_normalize_columns_renames_in_place() {
        let mut df = raw_postings();
        DataProcessor::normalize_columns(&mut df).unwrap();
        let names: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
        assert_eq!(names, vec!["job_description", "title"]);
    }

    #[test]
    fn test_normalize_columns_suffixes_colliding_names() {
        let mut df = df!(
            "Title" => ["a"],
            "title " => ["b"],
            "title_1" => ["c"],
            "job_description" => ["Python"]
        )
        .unwrap();
        DataProcessor::normalize_columns(&mut df).unwrap();

        let names: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
        assert_eq!(names, vec!["title", "title_2", "title_1", "job_description"]);
        let moved: Vec<Option<&str>> = df.column("title_2").unwrap().str().unwrap().into_iter().collect();
        assert_eq!(moved, vec![Some("b")]);
    }

    #[test]
    fn test_colliding_columns_still_count_in_dedup() {
        let df = df!(
            "Title" => ["Analyst", "Analyst"],
            "title " => ["Senior", "Junior"],
            "job_description" => ["Python", "Python"]
        )
        .unwrap();
        assert_eq!(DataProcessor::clean(df).unwrap().height(), 2);
    }

    #[test]
    fn test_normalize_columns_rejects_ambiguous_description() {
        let mut df = df!("Job_Description" => ["a"], "job_description " => ["b"]).unwrap();
        let err = DataProcessor::normalize_columns(&mut df).unwrap_err();
        assert!(matches!(err, ProcessorError::DuplicateColumn(ref c) if c == DESCRIPTION_COLUMN));
    }

    #[test]
    fn test_drop_duplicates_keeps_first_and_order() {
        let df = df!(
            "job_description" => ["b", "a", "b", "a", "c"],
            "id" => [1, 2, 1, 3, 4]
        )
        .unwrap();
        let deduped = DataProcessor::drop_duplicates(&df).unwrap();

        assert_eq!(deduped.height(), 4);
        let ids: Vec<Option<i32>> = deduped.column("id").unwrap().i32().unwrap().into_iter().collect();
        assert_eq!(ids, vec![Some(1), Some(2), Some(3), Some(4)]);
    }

    #[test]
    fn test_drop_duplicates_treats_nulls_as_equal() {
        let df = df!("job_description" => [None::<&str>, None, Some("x")]).unwrap();
        assert_eq!(DataProcessor::drop_duplicates(&df).unwrap().height(), 2);
    }

    #[test]
    fn test_clean_runs_all_steps() {
        let cleaned = DataProcessor::clean(raw_postings()).unwrap();

        assert_eq!(cleaned.height(), 2);
        let descriptions = DataProcessor::text_column(&cleaned, DESCRIPTION_COLUMN).unwrap();
        assert_eq!(descriptions.null_count(), 0);
        let values: Vec<Option<&str>> = descriptions.into_iter().collect();
        assert_eq!(values, vec![Some("Python and SQL"), Some("AWS")]);
    }

    #[test]
    fn test_clean_requires_description_column() {
        let df = df!("Title" => ["Analyst"], "Description" => ["Python"]).unwrap();
        let err = DataProcessor::clean(df).unwrap_err();
        assert!(matches!(err, ProcessorError::MissingColumn(ref c) if c == DESCRIPTION_COLUMN));
        assert_eq!(err.to_string(), "Column 'job_description' not found in dataset.");
    }

    #[test]
    fn test_description_corpus_joins_with_spaces() {
        let df = df!("job_description" => ["Python developer", "SQL"]).unwrap();
        assert_eq!(DataProcessor::description_corpus(&df).unwrap(), "Python developer SQL");
    }

    #[test]
    fn test_numeric_descriptions_are_coerced_to_text() {
        let df = df!("job_description" => [1i64, 2]).unwrap();
        let corpus = DataProcessor::description_corpus(&df).unwrap();
        assert_eq!(corpus, "1 2");
    }
}
