//! Selection of model event lines.
//!
//! dbt prints a lot of preamble and summary text around the per-model events.
//! Only lines that open with `HH:MM:SS  N of M` describe a model, everything
//! else is dropped before parsing.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::ansi::strip_ansi;

/// `N` and `M` may be empty so a line with a mangled counter is still kept.
static MODEL_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{1,2}:\d{1,2}:\d{1,2}\s*\d*\sof\s*\d*").expect("model line pattern is valid")
});

/// Whether a (cleaned) line has the `HH:MM:SS  N of M` shape.
pub fn is_model_line(line: &str) -> bool {
    MODEL_LINE.is_match(line)
}

/// Keep only model lines, preserving input order.
pub fn filter_model_lines<I, S>(lines: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let kept: Vec<String> = lines
        .into_iter()
        .filter(|line| is_model_line(line.as_ref()))
        .map(|line| line.as_ref().to_string())
        .collect();
    debug!(event = "filter.done", kept = kept.len());
    kept
}

/// Strip escape sequences from every line, then keep only model lines.
pub fn clean_and_filter<I, S>(lines: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    filter_model_lines(lines.into_iter().map(|line| strip_ansi(line.as_ref())))
}
