//! Charts module - Static chart rendering

mod bar_chart;
mod font;
mod renderer;
mod word_cloud;

pub use bar_chart::{Bar, BarChartLayout, BarChartRenderer, BAR_CHART_TITLE, DEFAULT_TOP_N};
pub use font::ChartFont;
pub use renderer::RenderError;
pub use word_cloud::{
    PlacedWord, WordCloudOptions, WordCloudRenderer, WordFrequency, STOPWORDS, WORD_CLOUD_TITLE,
};
