use std::path::PathBuf;

use crate::charts::DEFAULT_TOP_N;
use crate::error::{Error, Result};
use crate::skills::SkillVocabulary;

pub const DEFAULT_DATA_FILE: &str = "jobs.csv";

/// Rows shown in the printed summary, independent of the chart's top-N.
pub const SUMMARY_ROWS: usize = 10;

#[derive(Debug, Clone)]
pub struct Config {
    pub data_file: PathBuf,
    pub top_n: usize,
    pub vocabulary: SkillVocabulary,
    pub output_dir: PathBuf,
    pub open_viewer: bool,
    pub font_path: Option<PathBuf>,
    pub print_json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            top_n: DEFAULT_TOP_N,
            vocabulary: SkillVocabulary::default(),
            output_dir: PathBuf::from("."),
            open_viewer: false,
            font_path: None,
            print_json: false,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.top_n == 0 {
            return Err(Error::Config("top-n must be greater than zero".to_string()));
        }
        if self.data_file.as_os_str().is_empty() {
            return Err(Error::Config("data file path is empty".to_string()));
        }
        Ok(())
    }
}
