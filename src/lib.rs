//! Skill Demand - Job Posting Skill Analysis
//!
//! Reads a CSV of job postings, finds which known skills each description
//! mentions, counts demand per skill and renders a bar chart of the top
//! skills plus a word cloud of the description text.

pub mod charts;
pub mod config;
pub mod data;
pub mod error;
pub mod pipeline;
pub mod sink;
pub mod skills;
pub mod stats;

pub use config::Config;
pub use error::{Error, Result};
pub use pipeline::{AnalysisOutcome, SkillDemandPipeline};
pub use sink::{DisplaySink, MemorySink, PngFileSink};
