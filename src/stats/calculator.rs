//! Skill Frequency Calculator Module
//! Applies the extractor to every posting and tallies skill demand.

use crate::data::{DataProcessor, ProcessorError, DESCRIPTION_COLUMN};
use crate::skills::SkillExtractor;
use polars::prelude::*;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt::Write;

/// Per-row matched skills are attached under this column.
pub const SKILLS_COLUMN: &str = "skills";

/// Number of postings mentioning one skill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillCount {
    pub skill: String,
    pub count: usize,
}

/// Skill counts sorted by descending count; ties keep first-encountered order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SkillFrequencyTable {
    pub total_postings: usize,
    #[serde(rename = "skills")]
    pub entries: Vec<SkillCount>,
}

impl SkillFrequencyTable {
    /// Count skills across per-row match lists.
    pub fn from_matches<'a, I, R>(rows: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = &'a str>,
    {
        let mut total_postings = 0;
        let mut positions: HashMap<&'a str, usize> = HashMap::new();
        let mut entries: Vec<SkillCount> = Vec::new();

        for row in rows {
            total_postings += 1;
            for skill in row {
                let pos = *positions.entry(skill).or_insert_with(|| {
                    entries.push(SkillCount {
                        skill: skill.to_string(),
                        count: 0,
                    });
                    entries.len() - 1
                });
                entries[pos].count += 1;
            }
        }

        // Stable: equal counts stay in encounter order.
        entries.sort_by(|a, b| b.count.cmp(&a.count));

        Self {
            total_postings,
            entries,
        }
    }

    /// First `n` entries, or all of them when fewer exist.
    pub fn top(&self, n: usize) -> &[SkillCount] {
        &self.entries[..n.min(self.entries.len())]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SkillCount> {
        self.entries.iter()
    }

    pub fn count_of(&self, skill: &str) -> Option<usize> {
        self.entries.iter().find(|e| e.skill == skill).map(|e| e.count)
    }

    /// Total (posting, skill) pairs.
    pub fn total_matches(&self) -> usize {
        self.entries.iter().map(|e| e.count).sum()
    }

    /// Render the first `n` entries as an indexed text table.
    pub fn format_table(&self, n: usize) -> String {
        let rows = self.top(n);
        if rows.is_empty() {
            return "(no skills matched)\n".to_string();
        }

        let idx_w = (rows.len() - 1).to_string().len();
        let skill_w = rows
            .iter()
            .map(|r| r.skill.chars().count())
            .max()
            .unwrap_or(0)
            .max("Skill".len());

        let mut out = String::new();
        let _ = writeln!(out, "{:>idx_w$}  {:<skill_w$}  {:>5}", "", "Skill", "Count");
        for (i, row) in rows.iter().enumerate() {
            let _ = writeln!(out, "{:>idx_w$}  {:<skill_w$}  {:>5}", i, row.skill, row.count);
        }
        out
    }
}

/// Runs skill extraction over a cleaned posting table.
pub struct FrequencyCalculator;

impl FrequencyCalculator {
    /// Matched skills for every row's description, in row order.
    pub fn extract_all<'e>(
        df: &DataFrame,
        extractor: &'e SkillExtractor,
    ) -> Result<Vec<Vec<&'e str>>, ProcessorError> {
        let descriptions = DataProcessor::text_column(df, DESCRIPTION_COLUMN)?;
        Ok(descriptions
            .into_iter()
            .map(|text| extractor.extract(text.unwrap_or_default()))
            .collect())
    }

    /// Attach the per-row skills column, then build the frequency table from it.
    pub fn analyze_skills(
        df: &mut DataFrame,
        extractor: &SkillExtractor,
    ) -> Result<SkillFrequencyTable, ProcessorError> {
        let matches = Self::extract_all(df, extractor)?;

        let per_row: Vec<Series> = matches
            .iter()
            .map(|skills| Series::new("".into(), skills.as_slice()))
            .collect();
        df.with_column(Series::new(SKILLS_COLUMN.into(), per_row))?;

        let table = SkillFrequencyTable::from_matches(matches.iter().map(|m| m.iter().copied()));
        tracing::info!(
            postings = table.total_postings,
            distinct_skills = table.len(),
            matches = table.total_matches(),
            "counted skill demand"
        );
        Ok(table)
    }
}
