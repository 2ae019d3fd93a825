//! Stats module - skill frequency aggregation

mod calculator;

pub use calculator::{FrequencyCalculator, SkillCount, SkillFrequencyTable, SKILLS_COLUMN};
