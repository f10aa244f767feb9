//! Ranking of consolidated models by runtime.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::consolidate::ConsolidatedMap;

/// Placeholder shown when a record has no readable model name.
pub const UNKNOWN_MODEL_NAME: &str = "???";

/// Which slice of the runtime-sorted list is reported.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum RankPolicy {
    /// Positions 2 through N. The single slowest model is left out, matching
    /// the long-standing report layout.
    #[default]
    SkipSlowest,

    /// Positions 1 through N.
    IncludeSlowest,
}

/// One row of the runtime table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedEntry {
    pub id: u64,
    pub model_name: String,
    pub runtime_seconds: f64,
}

impl fmt::Display for RankedEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, '{}', {:?})",
            self.id, self.model_name, self.runtime_seconds
        )
    }
}

/// Sort consolidated models by runtime, slowest first, and cut the list to `top_n`.
///
/// Missing ids and runtimes count as 0, missing names as [`UNKNOWN_MODEL_NAME`].
/// Equal runtimes keep the map's first-seen order.
pub fn top_n_by_runtime(
    consolidated: &ConsolidatedMap,
    top_n: usize,
    policy: RankPolicy,
) -> Vec<RankedEntry> {
    let mut entries: Vec<RankedEntry> = consolidated
        .records()
        .iter()
        .map(|record| RankedEntry {
            id: record.id().unwrap_or(0),
            model_name: record
                .model_name()
                .unwrap_or_else(|| UNKNOWN_MODEL_NAME.to_string()),
            runtime_seconds: record.runtime_seconds().unwrap_or(0.0),
        })
        .collect();

    entries.sort_by(|a, b| b.runtime_seconds.total_cmp(&a.runtime_seconds));

    let ranked: Vec<RankedEntry> = match policy {
        RankPolicy::SkipSlowest => entries
            .into_iter()
            .skip(1)
            .take(top_n.saturating_sub(1))
            .collect(),
        RankPolicy::IncludeSlowest => entries.into_iter().take(top_n).collect(),
    };
    debug!(event = "rank.done", top_n = top_n, policy = ?policy, ranked = ranked.len());
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consolidate::consolidate;
    use crate::status::ModelStatusRecord;

    fn finished(id: u64, name: &str, secs: f64) -> ModelStatusRecord {
        ModelStatusRecord::from_line(format!(
            "06:00:00  {} of 10 OK created table model {} ..... [SELECT in {}s]",
            id, name, secs
        ))
    }

    fn sample_map() -> ConsolidatedMap {
        consolidate(vec![
            finished(1, "a.one", 20.0),
            finished(2, "a.two", 15.0),
            finished(3, "a.three", 11.69),
            finished(4, "a.four", 5.0),
        ])
    }

    fn runtimes(entries: &[RankedEntry]) -> Vec<f64> {
        entries.iter().map(|e| e.runtime_seconds).collect()
    }

    #[test]
    fn test_skip_slowest_drops_first_position() {
        let ranked = top_n_by_runtime(&sample_map(), 3, RankPolicy::SkipSlowest);
        assert_eq!(runtimes(&ranked), vec![15.0, 11.69]);
        assert_eq!(ranked[0].id, 2);
        assert_eq!(ranked[0].model_name, "a.two");
    }

    #[test]
    fn test_include_slowest() {
        let ranked = top_n_by_runtime(&sample_map(), 3, RankPolicy::IncludeSlowest);
        assert_eq!(runtimes(&ranked), vec![20.0, 15.0, 11.69]);
    }

    #[test]
    fn test_fewer_entries_than_requested() {
        let ranked = top_n_by_runtime(&sample_map(), 10, RankPolicy::SkipSlowest);
        assert_eq!(runtimes(&ranked), vec![15.0, 11.69, 5.0]);
    }

    #[test]
    fn test_sorts_unordered_input() {
        let map = consolidate(vec![
            finished(1, "a.one", 1.0),
            finished(2, "a.two", 30.0),
            finished(3, "a.three", 7.5),
        ]);
        let ranked = top_n_by_runtime(&map, 3, RankPolicy::IncludeSlowest);
        let ids: Vec<u64> = ranked.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let map = consolidate(vec![
            finished(8, "a.eight", 2.0),
            finished(3, "a.three", 2.0),
            finished(5, "a.five", 2.0),
        ]);
        let ranked = top_n_by_runtime(&map, 3, RankPolicy::IncludeSlowest);
        let ids: Vec<u64> = ranked.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![8, 3, 5]);
    }

    #[test]
    fn test_missing_fields_use_placeholders() {
        let map = consolidate(vec![
            finished(1, "a.one", 4.0),
            ModelStatusRecord::from_line("06:00:00   of 10 SKIP relation a.skipped"),
        ]);
        let ranked = top_n_by_runtime(&map, 2, RankPolicy::IncludeSlowest);
        assert_eq!(
            ranked[1],
            RankedEntry {
                id: 0,
                model_name: UNKNOWN_MODEL_NAME.to_string(),
                runtime_seconds: 0.0,
            }
        );
    }

    #[test]
    fn test_empty_map_and_zero_top_n() {
        let empty = ConsolidatedMap::new();
        assert!(top_n_by_runtime(&empty, 5, RankPolicy::SkipSlowest).is_empty());
        assert!(top_n_by_runtime(&sample_map(), 0, RankPolicy::SkipSlowest).is_empty());
        assert!(top_n_by_runtime(&sample_map(), 1, RankPolicy::SkipSlowest).is_empty());
    }

    #[test]
    fn test_display() {
        let entry = RankedEntry {
            id: 5,
            model_name: "schema.some_model".to_string(),
            runtime_seconds: 11.69,
        };
        assert_eq!(entry.to_string(), "(5, 'schema.some_model', 11.69)");
        let whole = RankedEntry {
            id: 0,
            model_name: UNKNOWN_MODEL_NAME.to_string(),
            runtime_seconds: 6.0,
        };
        assert_eq!(whole.to_string(), "(0, '???', 6.0)");
    }
}
