//! Model lifecycle status and the per-line status record.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::parse::{extract_id, extract_model_name, extract_runtime, parse_line, ParsedLine};

/// Lifecycle status of a dbt model as reported by the console log.
///
/// A single line yields `Unknown`, `Started`, `Pass` or `Error`. The two
/// `Completed*` variants only appear after consolidation folds a `Started`
/// line together with its terminal line.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ModelStatus {
    Unknown,
    Started,
    Pass,
    Error,
    Completed,
    CompletedWithError,
}

impl ModelStatus {
    /// Map a status keyword found after the `N of M` counter.
    pub fn from_keyword(keyword: &str) -> Self {
        match keyword {
            "START" => ModelStatus::Started,
            "OK" => ModelStatus::Pass,
            "ERROR" => ModelStatus::Error,
            _ => ModelStatus::Unknown,
        }
    }

    /// Stable numeric code.
    pub fn code(&self) -> i8 {
        match self {
            ModelStatus::Unknown => -1,
            ModelStatus::Started => 1,
            ModelStatus::Pass => 2,
            ModelStatus::Completed => 3,
            ModelStatus::Error => 4,
            ModelStatus::CompletedWithError => 5,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ModelStatus::Unknown => "UNKNOWN",
            ModelStatus::Started => "STARTED",
            ModelStatus::Pass => "PASS",
            ModelStatus::Error => "ERROR",
            ModelStatus::Completed => "COMPLETED",
            ModelStatus::CompletedWithError => "COMPLETED_WITH_ERROR",
        }
    }

    /// All variants in code order.
    pub fn all() -> [ModelStatus; 6] {
        [
            ModelStatus::Unknown,
            ModelStatus::Started,
            ModelStatus::Pass,
            ModelStatus::Completed,
            ModelStatus::Error,
            ModelStatus::CompletedWithError,
        ]
    }
}

impl fmt::Display for ModelStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One observed model event line.
///
/// The record owns the cleaned line text and the status read from it at
/// construction. Id, model name and runtime are re-derived from the text on
/// each call.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelStatusRecord {
    raw: String,
    status: ModelStatus,
}

impl ModelStatusRecord {
    /// Build a record from a model line. The status comes from the keyword
    /// following the `N of M` counter, `Unknown` when there is none.
    pub fn from_line(line: impl Into<String>) -> Self {
        let raw = line.into();
        let status = parse_line(&raw)
            .fields()
            .map(|fields| fields.status)
            .unwrap_or(ModelStatus::Unknown);
        Self { raw, status }
    }

    /// Same line, different status. Only consolidation upgrades a status.
    pub(crate) fn with_status(&self, status: ModelStatus) -> Self {
        Self {
            raw: self.raw.clone(),
            status,
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn status(&self) -> ModelStatus {
        self.status
    }

    /// Sequence number `N` from `N of M`.
    pub fn id(&self) -> Option<u64> {
        extract_id(&self.raw)
    }

    pub fn model_name(&self) -> Option<String> {
        extract_model_name(&self.raw)
    }

    /// Runtime in seconds from the trailing `[... in X.XXs]` annotation.
    pub fn runtime_seconds(&self) -> Option<f64> {
        extract_runtime(&self.raw)
    }

    /// All fields re-read from the line, with the record's own status in
    /// place of the one the line carries.
    pub fn fields(&self) -> ParsedLine {
        match parse_line(&self.raw) {
            ParsedLine::Matched(mut fields) => {
                fields.status = self.status;
                ParsedLine::Matched(fields)
            }
            ParsedLine::NoMatch => ParsedLine::NoMatch,
        }
    }

    /// Compact rendering followed by the raw line.
    pub fn to_verbose_string(&self) -> String {
        format!("{}\traw: {}", self, self.raw)
    }
}

fn display_opt<T: fmt::Display>(value: Option<T>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "None".to_string(),
    }
}

impl fmt::Display for ModelStatusRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ModelStatus:\tid: {}\tmodel: {}\tstatus: {}\truntime: {}",
            display_opt(self.id()),
            display_opt(self.model_name()),
            self.status,
            display_opt(self.runtime_seconds()),
        )
    }
}
