use std::fs;
use std::path::{Path, PathBuf};

use skill_demand::charts::ChartFont;
use skill_demand::data::ProcessorError;
use skill_demand::pipeline::{BAR_CHART_NAME, WORD_CLOUD_NAME};
use skill_demand::skills::SkillVocabulary;
use skill_demand::{Config, Error, MemorySink, PngFileSink, SkillDemandPipeline};

fn write_csv(dir: &Path, contents: &str) -> PathBuf {
    let path = dir.join("jobs.csv");
    fs::write(&path, contents).unwrap();
    path
}

fn pipeline_for(data_file: PathBuf) -> SkillDemandPipeline {
    let config = Config {
        data_file,
        ..Config::default()
    };
    SkillDemandPipeline::new(config)
        .unwrap()
        .with_font(ChartFont::none())
}

fn counts(outcome: &skill_demand::AnalysisOutcome) -> Vec<(&str, usize)> {
    outcome
        .table
        .entries
        .iter()
        .map(|e| (e.skill.as_str(), e.count))
        .collect()
}

const SCENARIO_A: &str = "\
job_description
Looking for a Python and SQL expert
Needs Power BI and Tableau skills
\"Python developer, pythonic code, AWS\"
";

#[test]
fn test_counts_skills_and_shows_both_charts() {
    let dir = tempfile::tempdir().unwrap();
    let pipeline = pipeline_for(write_csv(dir.path(), SCENARIO_A));
    let mut out = Vec::new();
    let mut sink = MemorySink::new();

    let outcome = pipeline.run(&mut out, &mut sink).unwrap();

    assert_eq!(outcome.load_report.rows, 3);
    assert_eq!(outcome.load_report.columns, 1);
    assert_eq!(outcome.cleaned_rows, 3);
    assert_eq!(
        counts(&outcome),
        vec![("python", 2), ("sql", 1), ("power bi", 1), ("tableau", 1), ("aws", 1)]
    );

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Dataset Loaded Successfully!"));
    assert!(text.contains("Rows: 3, Columns: 1"));
    assert!(text.contains("Top 10 In-Demand Skills:"));
    assert!(text.contains("power bi"));

    assert_eq!(sink.names(), vec![BAR_CHART_NAME, WORD_CLOUD_NAME]);
    assert_eq!(sink.get(BAR_CHART_NAME).unwrap().dimensions(), (800, 600));
    assert_eq!(sink.get(WORD_CLOUD_NAME).unwrap().dimensions(), (800, 440));
}

#[test]
fn test_missing_description_column_stops_before_summary() {
    let dir = tempfile::tempdir().unwrap();
    let csv = "title,description\nAnalyst,Python and SQL\n";
    let pipeline = pipeline_for(write_csv(dir.path(), csv));
    let mut out = Vec::new();
    let mut sink = MemorySink::new();

    let err = pipeline.run(&mut out, &mut sink).unwrap_err();

    assert!(matches!(
        &err,
        Error::Schema(ProcessorError::MissingColumn(col)) if col == "job_description"
    ));
    assert_eq!(err.to_string(), "Column 'job_description' not found in dataset.");

    let text = String::from_utf8(out).unwrap();
    assert!(!text.contains("In-Demand Skills"));
    assert!(sink.images.is_empty());
}

#[test]
fn test_column_names_are_normalized_before_lookup() {
    let dir = tempfile::tempdir().unwrap();
    let csv = "Title, Job_Description \nAnalyst,Excel and SQL\n";
    let pipeline = pipeline_for(write_csv(dir.path(), csv));
    let mut out = Vec::new();
    let mut sink = MemorySink::new();

    let outcome = pipeline.run(&mut out, &mut sink).unwrap();
    assert_eq!(counts(&outcome), vec![("sql", 1), ("excel", 1)]);
}

#[test]
fn test_colliding_column_names_do_not_stop_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let csv = "Title,title ,job_description\nAnalyst,Senior,Python\nAnalyst,Junior,Python\n";
    let pipeline = pipeline_for(write_csv(dir.path(), csv));
    let mut out = Vec::new();
    let mut sink = MemorySink::new();

    let outcome = pipeline.run(&mut out, &mut sink).unwrap();

    assert_eq!(outcome.cleaned_rows, 2);
    assert_eq!(counts(&outcome), vec![("python", 2)]);
    assert_eq!(sink.names(), vec![BAR_CHART_NAME, WORD_CLOUD_NAME]);
}

#[test]
fn test_duplicate_postings_are_counted_once() {
    let dir = tempfile::tempdir().unwrap();
    let csv = "\
job_description,title
Python and SQL,Analyst
Python and SQL,Analyst
Python only,Engineer
";
    let pipeline = pipeline_for(write_csv(dir.path(), csv));
    let mut out = Vec::new();
    let mut sink = MemorySink::new();

    let outcome = pipeline.run(&mut out, &mut sink).unwrap();

    assert_eq!(outcome.load_report.rows, 3);
    assert_eq!(outcome.cleaned_rows, 2);
    assert_eq!(outcome.table.total_postings, 2);
    assert_eq!(counts(&outcome), vec![("python", 2), ("sql", 1)]);
}

#[test]
fn test_empty_descriptions_produce_empty_results() {
    let dir = tempfile::tempdir().unwrap();
    let csv = "job_description,title\n,Analyst\n,Engineer\n";
    let pipeline = pipeline_for(write_csv(dir.path(), csv));
    let mut out = Vec::new();
    let mut sink = MemorySink::new();

    let outcome = pipeline.run(&mut out, &mut sink).unwrap();

    assert_eq!(outcome.cleaned_rows, 0);
    assert!(outcome.table.is_empty());
    assert_eq!(outcome.table.total_postings, 0);

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("(no skills matched)"));
    assert_eq!(sink.names(), vec![BAR_CHART_NAME, WORD_CLOUD_NAME]);
}

#[test]
fn test_missing_data_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let pipeline = pipeline_for(dir.path().join("absent.csv"));
    let mut out = Vec::new();
    let mut sink = MemorySink::new();

    let err = pipeline.run(&mut out, &mut sink).unwrap_err();

    assert!(matches!(err, Error::DataAccess(_)));
    assert!(out.is_empty());
    assert!(sink.images.is_empty());
}

#[test]
fn test_custom_vocabulary_and_json_summary() {
    let dir = tempfile::tempdir().unwrap();
    let csv = "job_description\nRust and Go services\nRust tooling\n";
    let config = Config {
        data_file: write_csv(dir.path(), csv),
        vocabulary: SkillVocabulary::new(["Rust", "go", "python"]).unwrap(),
        print_json: true,
        ..Config::default()
    };
    let pipeline = SkillDemandPipeline::new(config)
        .unwrap()
        .with_font(ChartFont::none());
    let mut out = Vec::new();
    let mut sink = MemorySink::new();

    pipeline.run(&mut out, &mut sink).unwrap();

    let text = String::from_utf8(out).unwrap();
    let json_start = text.find('{').unwrap();
    let value: serde_json::Value = serde_json::from_str(&text[json_start..]).unwrap();
    assert_eq!(value["total_postings"], 2);
    assert_eq!(value["skills"][0]["skill"], "rust");
    assert_eq!(value["skills"][0]["count"], 2);
    assert_eq!(value["skills"][1]["skill"], "go");
    assert_eq!(value["skills"].as_array().unwrap().len(), 2);
}

#[test]
fn test_zero_top_n_is_rejected_up_front() {
    let config = Config {
        top_n: 0,
        ..Config::default()
    };
    assert!(matches!(
        SkillDemandPipeline::new(config),
        Err(Error::Config(_))
    ));
}

#[test]
fn test_png_sink_writes_named_charts() {
    let dir = tempfile::tempdir().unwrap();
    let pipeline = pipeline_for(write_csv(dir.path(), SCENARIO_A));
    let out_dir = dir.path().join("charts");
    let mut sink = PngFileSink::new(&out_dir);
    let mut out = Vec::new();

    pipeline.run(&mut out, &mut sink).unwrap();

    assert_eq!(
        sink.written(),
        &[out_dir.join("top_skills.png"), out_dir.join("wordcloud.png")]
    );
    let bar = image::open(out_dir.join("top_skills.png")).unwrap();
    assert_eq!((bar.width(), bar.height()), (800, 600));
}
