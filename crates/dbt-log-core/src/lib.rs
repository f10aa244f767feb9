//! dbt log core library
//!
//! Turns dbt console output into per-model lifecycle records:
//! - [`filter`] keeps the `HH:MM:SS  N of M` model lines
//! - [`parse`] reads id, model name, status and runtime from a line
//! - [`consolidate`] folds `START` + `OK`/`ERROR` pairs into one record per model
//! - [`rank`] orders the models by runtime

pub mod analysis;
pub mod ansi;
pub mod config;
pub mod consolidate;
pub mod error;
pub mod filter;
pub mod log_file;
pub mod parse;
pub mod rank;
pub mod report;
pub mod status;
pub mod telemetry;

pub use analysis::{analyze_lines, LogAnalysis, StatusSummary};
pub use ansi::{strip_ansi, strip_ansi_bytes};
pub use config::{AnalyzerConfig, DEFAULT_LOG_FILE, DEFAULT_PRINTABLE_PREFIX, DEFAULT_TOP_N};
pub use consolidate::{consolidate, merge, ConsolidatedMap};
pub use error::{DbtLogError, Result};
pub use filter::{clean_and_filter, filter_model_lines, is_model_line};
pub use log_file::{printable_path, read_log_lines, write_printable_log};
pub use parse::{
    extract_id, extract_model_name, extract_runtime, extract_status, parse_line, LineFields,
    ParsedLine,
};
pub use rank::{top_n_by_runtime, RankPolicy, RankedEntry, UNKNOWN_MODEL_NAME};
pub use report::{render_json, render_summary, render_text, JsonReport, RecordArtifact};
pub use status::{ModelStatus, ModelStatusRecord};
pub use telemetry::{build_filter, init_tracing};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
