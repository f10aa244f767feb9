//! Field extraction from a single model line.
//!
//! A dbt model line looks like
//!
//! ```text
//! 05:56:24  5 of 135 START table model schema.some_model ........ [RUN]
//! 05:56:36  5 of 135 OK created table model schema.some_model ... [SELECT in 11.69s]
//! ```
//!
//! Each extraction is independent and best effort: a missing runtime does not
//! stop the id or status from being read.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::status::ModelStatus;

/// `HH:MM:SS  N of M`, capturing `N`.
static COUNTER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\d{1,2}:\d{1,2}:\d{1,2}\s*(\d*)\sof\s*\d*").expect("counter pattern is valid")
});

/// Status keyword directly after the counter, then the text run naming the node.
static KEYWORD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\d{1,2}:\d{1,2}:\d{1,2}\s*\d*\sof\s*\d*\s*(START|ERROR|OK)\b(?:\s([A-Za-z0-9_. ]*))?")
        .expect("keyword pattern is valid")
});

/// `[SELECT in 11.69s]` style timing suffix.
static RUNTIME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\sin\s([0-9.]*)s\]").expect("runtime pattern is valid"));

/// Fields read from a line that carries the `N of M` counter.
#[derive(Debug, Clone, PartialEq)]
pub struct LineFields {
    pub id: Option<u64>,
    pub model_name: Option<String>,
    pub status: ModelStatus,
    pub runtime_seconds: Option<f64>,
}

/// Outcome of parsing one line.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedLine {
    Matched(LineFields),
    /// The line has no `HH:MM:SS  N of M` counter.
    NoMatch,
}

impl ParsedLine {
    pub fn fields(&self) -> Option<&LineFields> {
        match self {
            ParsedLine::Matched(fields) => Some(fields),
            ParsedLine::NoMatch => None,
        }
    }
}

/// Parse every field of a model line at once.
pub fn parse_line(line: &str) -> ParsedLine {
    if !COUNTER.is_match(line) {
        return ParsedLine::NoMatch;
    }
    ParsedLine::Matched(LineFields {
        id: extract_id(line),
        model_name: extract_model_name(line),
        status: extract_status(line),
        runtime_seconds: extract_runtime(line),
    })
}

/// Status keyword following the counter; `Unknown` when absent.
pub fn extract_status(line: &str) -> ModelStatus {
    KEYWORD
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|keyword| ModelStatus::from_keyword(keyword.as_str()))
        .unwrap_or(ModelStatus::Unknown)
}

/// The `N` of `N of M`. `None` when the counter is missing or `N` is not a number.
pub fn extract_id(line: &str) -> Option<u64> {
    let caps = COUNTER.captures(line)?;
    caps.get(1)?.as_str().trim().parse().ok()
}

/// Relation name following the status keyword.
///
/// The run of `[A-Za-z0-9_. ]` after the keyword holds the action words, the
/// relation and dbt's dot leader (`table model schema.some_model .....`).
/// Leader tokens are dropped, the last remaining word is the relation, and
/// one trailing period is removed from it.
pub fn extract_model_name(line: &str) -> Option<String> {
    let caps = KEYWORD.captures(line)?;
    let text = caps.get(2)?.as_str();
    let word = text
        .split_whitespace()
        .rev()
        .find(|word| !word.chars().all(|c| c == '.'))?;
    let name = word.strip_suffix('.').unwrap_or(word);
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

/// Seconds from the ` in X.XXs]` suffix; `None` on START lines or unparsable numbers.
pub fn extract_runtime(line: &str) -> Option<f64> {
    let caps = RUNTIME.captures(line)?;
    caps.get(1)?.as_str().parse().ok()
}
