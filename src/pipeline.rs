use std::io::Write;

use crate::charts::{BarChartRenderer, ChartFont, WordCloudRenderer};
use crate::config::{Config, SUMMARY_ROWS};
use crate::data::{DataLoader, DataProcessor, LoadReport};
use crate::error::Result;
use crate::sink::DisplaySink;
use crate::skills::SkillExtractor;
use crate::stats::{FrequencyCalculator, SkillFrequencyTable};

pub const BAR_CHART_NAME: &str = "top_skills";
pub const WORD_CLOUD_NAME: &str = "wordcloud";

/// What a completed run produced.
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub load_report: LoadReport,
    pub cleaned_rows: usize,
    pub table: SkillFrequencyTable,
}

/// Load -> clean -> extract/count -> bar chart -> word cloud.
pub struct SkillDemandPipeline {
    config: Config,
    extractor: SkillExtractor,
    font: ChartFont,
}

impl SkillDemandPipeline {
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let extractor = SkillExtractor::new(&config.vocabulary)?;
        let font = ChartFont::load(config.font_path.as_deref())?;
        Ok(Self {
            config,
            extractor,
            font,
        })
    }

    /// Replace the chart font.
    pub fn with_font(mut self, font: ChartFont) -> Self {
        self.font = font;
        self
    }

    /// Run every stage. Text goes to `out`, charts to `sink`; nothing is
    /// emitted for a stage whose inputs failed.
    pub fn run<W: Write>(&self, out: &mut W, sink: &mut dyn DisplaySink) -> Result<AnalysisOutcome> {
        let df = DataLoader::load_csv(&self.config.data_file)?;
        let load_report = LoadReport::from_dataframe(&df);
        writeln!(out, "\nDataset Loaded Successfully!")?;
        writeln!(out, "{}", load_report)?;

        let mut df = DataProcessor::clean(df)?;
        let table = FrequencyCalculator::analyze_skills(&mut df, &self.extractor)?;

        writeln!(out, "\nTop {} In-Demand Skills:", SUMMARY_ROWS)?;
        write!(out, "{}", table.format_table(SUMMARY_ROWS))?;
        if self.config.print_json {
            writeln!(out, "{}", serde_json::to_string_pretty(&table)?)?;
        }

        let bar_chart = BarChartRenderer::new(&self.font).render(&table, self.config.top_n);
        sink.show(BAR_CHART_NAME, &bar_chart)?;

        let corpus = DataProcessor::description_corpus(&df)?;
        let word_cloud = WordCloudRenderer::new(&self.font).render(&corpus);
        sink.show(WORD_CLOUD_NAME, &word_cloud)?;

        Ok(AnalysisOutcome {
            load_report,
            cleaned_rows: df.height(),
            table,
        })
    }
}
