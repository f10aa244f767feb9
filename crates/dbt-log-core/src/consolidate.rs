//! Folding of per-line records into one record per model.
//!
//! A model normally emits two lines, `START` then `OK` or `ERROR`. The later
//! line carries the runtime and relation text, so it becomes the
//! representative, and its status is upgraded to reflect the whole lifecycle.
//!
//! Consolidation depends on input order: an `OK` line seen before its `START`
//! line is replaced by the `START` record and is never upgraded.

use std::collections::HashMap;
use tracing::debug;

use crate::status::{ModelStatus, ModelStatusRecord};

/// Choose the representative for an id given the current one and a newer line.
///
/// `Started` followed by `Pass` becomes `Completed`, `Started` followed by
/// `Error` becomes `CompletedWithError`. Otherwise the newer record wins as is.
pub fn merge(previous: &ModelStatusRecord, next: &ModelStatusRecord) -> ModelStatusRecord {
    match (previous.status(), next.status()) {
        (ModelStatus::Started, ModelStatus::Pass) => next.with_status(ModelStatus::Completed),
        (ModelStatus::Started, ModelStatus::Error) => {
            next.with_status(ModelStatus::CompletedWithError)
        }
        _ => next.clone(),
    }
}

/// One representative record per sequence id, iterated in first-seen order.
///
/// Records whose id cannot be read share the `None` key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConsolidatedMap {
    records: Vec<ModelStatusRecord>,
    index: HashMap<Option<u64>, usize>,
}

impl ConsolidatedMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one more record in.
    pub fn insert(&mut self, record: ModelStatusRecord) {
        let id = record.id();
        match self.index.get(&id) {
            Some(&slot) => {
                let merged = merge(&self.records[slot], &record);
                self.records[slot] = merged;
            }
            None => {
                self.index.insert(id, self.records.len());
                self.records.push(record);
            }
        }
    }

    pub fn get(&self, id: Option<u64>) -> Option<&ModelStatusRecord> {
        self.index.get(&id).map(|&slot| &self.records[slot])
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// `(id, record)` pairs in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (Option<u64>, &ModelStatusRecord)> + '_ {
        self.records.iter().map(|record| (record.id(), record))
    }

    pub fn records(&self) -> &[ModelStatusRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<ModelStatusRecord> {
        self.records
    }
}

impl FromIterator<ModelStatusRecord> for ConsolidatedMap {
    fn from_iter<I: IntoIterator<Item = ModelStatusRecord>>(iter: I) -> Self {
        let mut map = ConsolidatedMap::new();
        for record in iter {
            map.insert(record);
        }
        map
    }
}

/// Consolidate records in input order.
pub fn consolidate<I>(records: I) -> ConsolidatedMap
where
    I: IntoIterator<Item = ModelStatusRecord>,
{
    let map: ConsolidatedMap = records.into_iter().collect();
    debug!(event = "consolidate.done", models = map.len());
    map
}
