//! Console and JSON renderings of a [`LogAnalysis`].

use serde::Serialize;

use crate::analysis::{LogAnalysis, StatusSummary};
use crate::error::Result;
use crate::parse::ParsedLine;
use crate::rank::RankedEntry;
use crate::status::{ModelStatus, ModelStatusRecord};

/// Serializable view of one record with its derived fields resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordArtifact {
    pub id: Option<u64>,
    pub model_name: Option<String>,
    pub status: ModelStatus,
    pub status_code: i8,
    pub runtime_seconds: Option<f64>,
    pub raw: String,
}

impl From<&ModelStatusRecord> for RecordArtifact {
    fn from(record: &ModelStatusRecord) -> Self {
        let (id, model_name, runtime_seconds) = match record.fields() {
            ParsedLine::Matched(fields) => (fields.id, fields.model_name, fields.runtime_seconds),
            ParsedLine::NoMatch => (None, None, None),
        };
        Self {
            id,
            model_name,
            status: record.status(),
            status_code: record.status().code(),
            runtime_seconds,
            raw: record.raw().to_string(),
        }
    }
}

/// JSON document emitted by `--format json`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsonReport {
    pub model_lines: Vec<String>,
    pub records: Vec<RecordArtifact>,
    pub consolidated: Vec<RecordArtifact>,
    pub top_runtime: Vec<RankedEntry>,
    pub summary: StatusSummary,
}

impl From<&LogAnalysis> for JsonReport {
    fn from(analysis: &LogAnalysis) -> Self {
        Self {
            model_lines: analysis.model_lines.clone(),
            records: analysis.records.iter().map(RecordArtifact::from).collect(),
            consolidated: analysis
                .consolidated
                .records()
                .iter()
                .map(RecordArtifact::from)
                .collect(),
            top_runtime: analysis.top_runtime.clone(),
            summary: analysis.summary.clone(),
        }
    }
}

pub fn render_json(analysis: &LogAnalysis) -> Result<String> {
    Ok(serde_json::to_string_pretty(&JsonReport::from(analysis))?)
}

fn push_section(out: &mut String, title: &str) {
    if !out.is_empty() {
        out.push('\n');
    }
    out.push_str(&format!("*** {}\n", title));
}

/// Four sections: model lines, parsed records (with raw text), consolidated
/// records, and the runtime table, followed by a status summary line.
pub fn render_text(analysis: &LogAnalysis) -> String {
    let mut out = String::new();

    push_section(&mut out, "model lines");
    for line in &analysis.model_lines {
        out.push_str(line);
        out.push('\n');
    }

    push_section(&mut out, "parsed records");
    for record in &analysis.records {
        out.push_str(&record.to_verbose_string());
        out.push('\n');
    }

    push_section(&mut out, "consolidated records");
    for record in analysis.consolidated.records() {
        out.push_str(&record.to_string());
        out.push('\n');
    }

    push_section(&mut out, "top runtime");
    for entry in &analysis.top_runtime {
        out.push_str(&entry.to_string());
        out.push('\n');
    }

    out.push('\n');
    out.push_str(&render_summary(&analysis.summary));
    out.push('\n');
    out
}

/// `Summary: 3 models (COMPLETED=2, COMPLETED_WITH_ERROR=1)`
pub fn render_summary(summary: &StatusSummary) -> String {
    let counts: Vec<String> = summary
        .by_status
        .iter()
        .map(|(status, count)| format!("{}={}", status, count))
        .collect();
    format!("Summary: {} models ({})", summary.total, counts.join(", "))
}
