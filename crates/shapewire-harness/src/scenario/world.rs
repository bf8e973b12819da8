//! World state for scenario execution.
//!
//! The World holds one [`CaseRecord`] per value the scenario exercised, in the
//! order the cases were added, and provides helpers for oracles.

use std::collections::HashMap;

use shapewire::Shape;

/// Everything observed while exercising one value.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseRecord {
    /// Case label.
    pub label: String,
    /// Rust type name of the value.
    pub type_name: &'static str,
    /// Static shape of the value's type.
    pub shape: Shape,
    /// Full encoding.
    pub encoded: Vec<u8>,
    /// What `encoded_len` predicted.
    pub predicted_len: usize,
    /// Decoding the full encoding returned an equal value.
    pub round_trip: bool,
    /// Decoding the full encoding consumed every byte.
    pub consumed_exactly: bool,
    /// Prefix lengths whose decode wrongly succeeded.
    pub truncation_successes: Vec<usize>,
    /// Prefix lengths whose decode kept reading after a failed read.
    pub reads_after_failure: Vec<usize>,
}

impl CaseRecord {
    /// Length of the full encoding.
    pub fn encoded_len(&self) -> usize {
        self.encoded.len()
    }
}

/// World state containing every exercised case.
pub struct World {
    cases: HashMap<String, CaseRecord>,
    order: Vec<String>,
}

impl World {
    /// Create a new empty world.
    pub fn new() -> Self {
        Self { cases: HashMap::new(), order: Vec::new() }
    }

    /// Add a case record. A later record with the same label replaces the
    /// earlier one but keeps its position.
    pub fn add_case(&mut self, record: CaseRecord) {
        if !self.cases.contains_key(&record.label) {
            self.order.push(record.label.clone());
        }
        self.cases.insert(record.label.clone(), record);
    }

    /// Get a case by label.
    pub fn case(&self, label: &str) -> Option<&CaseRecord> {
        self.cases.get(label)
    }

    /// All cases in insertion order.
    pub fn cases(&self) -> impl Iterator<Item = &CaseRecord> {
        self.order.iter().filter_map(|label| self.cases.get(label))
    }

    /// All case labels in insertion order.
    pub fn labels(&self) -> &[String] {
        &self.order
    }

    /// Sum of every case's encoded length.
    pub fn total_encoded_bytes(&self) -> usize {
        self.cases.values().map(CaseRecord::encoded_len).sum()
    }

    /// Check if every case round-tripped.
    pub fn all_round_trip(&self) -> bool {
        self.cases.values().all(|case| case.round_trip)
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}
