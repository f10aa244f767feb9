//! Integration tests: console log on disk through to the runtime table.

use dbt_log_core::{
    analyze_lines, printable_path, read_log_lines, render_text, write_printable_log,
    AnalyzerConfig, DbtLogError, ModelStatus, RankPolicy, DEFAULT_PRINTABLE_PREFIX,
};
use std::fs;
use std::path::Path;

const CONSOLE_LOG: &str = "\
\x1b[0m05:56:20  Running with dbt=1.7.4
\x1b[0m05:56:21  Found 6 models, 12 tests, 0 snapshots, 0 analyses, 410 macros
\x1b[0m05:56:21
\x1b[0m05:56:22  Concurrency: 4 threads (target='prod')
\x1b[0m05:56:24  1 of 6 START sql table model staging.stg_orders ........................ [RUN]
\x1b[0m05:56:24  2 of 6 START sql table model staging.stg_customers ..................... [RUN]
\x1b[0m05:56:27  2 of 6 \x1b[32mOK\x1b[0m created sql table model staging.stg_customers ... [\x1b[32mSELECT 5120\x1b[0m in 3.02s]
\x1b[0m05:56:27  3 of 6 START sql view model staging.stg_payments ....................... [RUN]
\x1b[0m05:56:28  3 of 6 \x1b[32mOK\x1b[0m created sql view model staging.stg_payments .... [\x1b[32mCREATE VIEW\x1b[0m in 0.41s]
\x1b[0m05:56:36  1 of 6 \x1b[32mOK\x1b[0m created sql table model staging.stg_orders ...... [\x1b[32mSELECT 88213\x1b[0m in 11.69s]
\x1b[0m05:56:36  4 of 6 START sql table model marts.fct_orders .......................... [RUN]
\x1b[0m05:56:36  5 of 6 START sql table model marts.dim_customers ....................... [RUN]
\x1b[0m05:56:51  5 of 6 \x1b[31mERROR\x1b[0m creating sql table model marts.dim_customers . [\x1b[31mERROR\x1b[0m in 15.20s]
\x1b[0m05:56:56  4 of 6 \x1b[32mOK\x1b[0m created sql table model marts.fct_orders ........ [\x1b[32mSELECT 88213\x1b[0m in 20.04s]
\x1b[0m05:56:56  6 of 6 SKIP relation marts.customer_ltv ................................ [\x1b[33mSKIP\x1b[0m]
\x1b[0m05:56:57
\x1b[0m05:56:57  Finished running 5 table models, 1 view model in 0 hours 0 minutes and 36.10 seconds (36.10s).
\x1b[0m05:56:57  Done. PASS=4 WARN=0 ERROR=1 SKIP=1 TOTAL=6
";

fn write_log(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("console_output.log");
    fs::write(&path, CONSOLE_LOG).expect("write log");
    path
}

#[test]
fn test_full_pipeline_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_log(dir.path());

    let lines = read_log_lines(&path).expect("read log");
    assert_eq!(lines.len(), CONSOLE_LOG.lines().count());
    assert!(lines.iter().all(|line| !line.contains('\x1b')));

    let analysis = analyze_lines(&lines, &AnalyzerConfig::default()).expect("analysis");
    assert_eq!(analysis.model_lines.len(), 11);
    assert_eq!(analysis.records.len(), 11);
    assert_eq!(analysis.consolidated.len(), 6);

    let orders = analysis.consolidated.get(Some(1)).expect("model 1");
    assert_eq!(orders.status(), ModelStatus::Completed);
    assert_eq!(orders.model_name().as_deref(), Some("staging.stg_orders"));
    assert_eq!(orders.runtime_seconds(), Some(11.69));

    let dim = analysis.consolidated.get(Some(5)).expect("model 5");
    assert_eq!(dim.status(), ModelStatus::CompletedWithError);
    assert_eq!(dim.runtime_seconds(), Some(15.20));

    let skipped = analysis.consolidated.get(Some(6)).expect("model 6");
    assert_eq!(skipped.status(), ModelStatus::Unknown);
    assert_eq!(skipped.model_name(), None);

    // slowest (fct_orders, 20.04s) is left out by default
    let names: Vec<&str> = analysis
        .top_runtime
        .iter()
        .map(|e| e.model_name.as_str())
        .collect();
    assert_eq!(
        names,
        vec![
            "marts.dim_customers",
            "staging.stg_orders",
            "staging.stg_customers",
            "staging.stg_payments",
            "???",
        ]
    );
}

#[test]
fn test_include_slowest_policy() {
    let dir = tempfile::tempdir().unwrap();
    let lines = read_log_lines(&write_log(dir.path())).unwrap();
    let config = AnalyzerConfig::default()
        .with_top_n(3)
        .with_rank_policy(RankPolicy::IncludeSlowest);

    let analysis = analyze_lines(&lines, &config).unwrap();
    let runtimes: Vec<f64> = analysis
        .top_runtime
        .iter()
        .map(|e| e.runtime_seconds)
        .collect();
    assert_eq!(runtimes, vec![20.04, 15.20, 11.69]);
}

#[test]
fn test_printable_copy_holds_every_cleaned_line() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_log(dir.path());
    let lines = read_log_lines(&path).unwrap();

    let out = printable_path(&path, DEFAULT_PRINTABLE_PREFIX);
    assert_eq!(out, dir.path().join("printable_console_output.log"));
    write_printable_log(&out, &lines).unwrap();

    let written = fs::read_to_string(&out).unwrap();
    assert_eq!(written.lines().count(), lines.len());
    assert!(written.contains("Done. PASS=4 WARN=0 ERROR=1 SKIP=1 TOTAL=6"));
    assert!(!written.contains('\x1b'));
}

#[test]
fn test_text_report_lists_consolidated_models_once() {
    let dir = tempfile::tempdir().unwrap();
    let lines = read_log_lines(&write_log(dir.path())).unwrap();
    let analysis = analyze_lines(&lines, &AnalyzerConfig::default()).unwrap();

    let text = render_text(&analysis);
    let consolidated_section = text
        .split("*** consolidated records\n")
        .nth(1)
        .and_then(|rest| rest.split("\n*** top runtime").next())
        .expect("consolidated section");
    assert_eq!(consolidated_section.lines().count(), 6);
    assert!(text.contains("Summary: 6 models (COMPLETED=4, COMPLETED_WITH_ERROR=1, UNKNOWN=1)"));
}

#[test]
fn test_missing_log_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_log_lines(&dir.path().join("absent.log")).unwrap_err();
    assert!(matches!(err, DbtLogError::Read { .. }));
}
