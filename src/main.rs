//! Skill Demand - Job Posting Skill Analysis & Chart Generator
//!
//! Prints the most requested skills in a job postings CSV and writes a bar
//! chart and a word cloud as PNG files.

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use skill_demand::config::DEFAULT_DATA_FILE;
use skill_demand::skills::SkillVocabulary;
use skill_demand::{Config, PngFileSink, SkillDemandPipeline};

#[derive(Parser, Debug)]
#[command(name = "skill-demand")]
#[command(version)]
#[command(about = "Count in-demand skills in job postings and chart them")]
struct Args {
    /// CSV file with a job_description column
    #[arg(default_value = DEFAULT_DATA_FILE)]
    data_file: PathBuf,

    /// Number of skills shown in the bar chart
    #[arg(short = 'n', long, default_value_t = 10)]
    top_n: usize,

    /// JSON array of skill keywords replacing the built-in list
    #[arg(long)]
    skills_file: Option<PathBuf>,

    /// Directory the chart images are written to
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Open each chart in the system image viewer
    #[arg(long)]
    open: bool,

    /// TrueType font used for chart text
    #[arg(long)]
    font: Option<PathBuf>,

    /// Also print the full frequency table as JSON
    #[arg(long)]
    json: bool,
}

impl Args {
    fn into_config(self) -> anyhow::Result<Config> {
        let vocabulary = match &self.skills_file {
            Some(path) => SkillVocabulary::from_json_file(path)?,
            None => SkillVocabulary::default(),
        };
        Ok(Config {
            data_file: self.data_file,
            top_n: self.top_n,
            vocabulary,
            output_dir: self.output_dir,
            open_viewer: self.open,
            font_path: self.font,
            print_json: self.json,
        })
    }
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries the report.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("skill_demand=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Args::parse().into_config()?;
    let mut sink = PngFileSink::new(&config.output_dir).with_viewer(config.open_viewer);
    let pipeline = SkillDemandPipeline::new(config)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    pipeline.run(&mut out, &mut sink)?;

    tracing::info!(charts = sink.written().len(), "analysis complete");
    Ok(())
}
