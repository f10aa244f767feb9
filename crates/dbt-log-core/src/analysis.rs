//! End-to-end analysis of already-read log lines.

use serde::Serialize;
use std::collections::BTreeMap;
use tracing::info;

use crate::config::AnalyzerConfig;
use crate::consolidate::{consolidate, ConsolidatedMap};
use crate::error::Result;
use crate::filter::filter_model_lines;
use crate::rank::{top_n_by_runtime, RankedEntry};
use crate::status::{ModelStatus, ModelStatusRecord};

/// Number of consolidated models per lifecycle status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatusSummary {
    pub total: usize,
    pub by_status: BTreeMap<String, usize>,
}

impl StatusSummary {
    pub fn from_map(consolidated: &ConsolidatedMap) -> Self {
        let mut by_status = BTreeMap::new();
        for (_, record) in consolidated.iter() {
            *by_status.entry(record.status().label().to_string()).or_insert(0) += 1;
        }
        Self {
            total: consolidated.len(),
            by_status,
        }
    }

    pub fn count(&self, status: ModelStatus) -> usize {
        self.by_status.get(status.label()).copied().unwrap_or(0)
    }

    /// Models that ended in an error, with or without a seen `START`.
    pub fn failed(&self) -> usize {
        self.count(ModelStatus::Error) + self.count(ModelStatus::CompletedWithError)
    }
}

/// Every intermediate product of one run, in pipeline order.
#[derive(Debug, Clone)]
pub struct LogAnalysis {
    pub model_lines: Vec<String>,
    pub records: Vec<ModelStatusRecord>,
    pub consolidated: ConsolidatedMap,
    pub top_runtime: Vec<RankedEntry>,
    pub summary: StatusSummary,
}

/// Filter, parse, consolidate and rank cleaned log lines.
pub fn analyze_lines<S: AsRef<str>>(lines: &[S], config: &AnalyzerConfig) -> Result<LogAnalysis> {
    config.validate()?;

    let model_lines = filter_model_lines(lines);
    let records: Vec<ModelStatusRecord> = model_lines
        .iter()
        .map(|line| ModelStatusRecord::from_line(line.as_str()))
        .collect();
    let consolidated = consolidate(records.iter().cloned());
    let top_runtime = top_n_by_runtime(&consolidated, config.top_n, config.rank_policy);
    let summary = StatusSummary::from_map(&consolidated);

    info!(
        event = "analysis.done",
        lines = lines.len(),
        model_lines = model_lines.len(),
        models = consolidated.len(),
        failed = summary.failed(),
    );

    Ok(LogAnalysis {
        model_lines,
        records,
        consolidated,
        top_runtime,
        summary,
    })
}
