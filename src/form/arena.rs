// Mon Oct 19 2026 - Alex

use crate::form::{FormType, Record};
use serde::Serialize;
use std::collections::BTreeMap;

/// Reconstructed records keyed by form id.
///
/// Records refer to each other by id only, so the arena is the whole object graph.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct RecordArena {
    records: BTreeMap<u32, Record>,
}

impl RecordArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps the first record seen for an id. Returns whether `record` was stored.
    pub fn insert(&mut self, record: Record) -> bool {
        match self.records.entry(record.form_id()) {
            std::collections::btree_map::Entry::Occupied(_) => false,
            std::collections::btree_map::Entry::Vacant(slot) => {
                slot.insert(record);
                true
            }
        }
    }

    pub fn get(&self, form_id: u32) -> Option<&Record> {
        self.records.get(&form_id)
    }

    pub fn contains(&self, form_id: u32) -> bool {
        self.records.contains_key(&form_id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.records.values()
    }

    pub fn by_type(&self, form_type: FormType) -> impl Iterator<Item = &Record> {
        self.records.values().filter(move |r| r.form_type() == form_type)
    }

    /// Records referenced by `form_id` that are also present in the arena.
    pub fn resolve(&self, form_id: u32) -> Vec<&Record> {
        self.get(form_id)
            .map(|r| r.references().into_iter().filter_map(|id| self.get(id)).collect())
            .unwrap_or_default()
    }

    pub fn counts_by_type(&self) -> BTreeMap<FormType, usize> {
        let mut counts = BTreeMap::new();
        for record in self.records.values() {
            *counts.entry(record.form_type()).or_insert(0) += 1;
        }
        counts
    }

    pub fn extend<I: IntoIterator<Item = Record>>(&mut self, records: I) -> usize {
        records.into_iter().map(|r| self.insert(r) as usize).sum()
    }
}
