//! Normalized in-memory view of the sheet used for listing and aggregation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A loaded row after amount normalization and date parsing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseEntry {
    /// Zero-based row position in the sheet; the only identity a row has.
    pub position: usize,
    pub date: Option<NaiveDate>,
    pub raw_date: String,
    pub category: String,
    pub amount: f64,
    /// Set when the stored amount could not be parsed and fell back to zero.
    #[serde(default)]
    pub degraded: bool,
}

/// Ordered collection of loaded entries, in sheet insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpenseTable {
    pub entries: Vec<ExpenseEntry>,
}

impl ExpenseTable {
    pub fn new(entries: Vec<ExpenseEntry>) -> Self {
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ExpenseEntry> {
        self.entries.iter()
    }

    pub fn entry(&self, position: usize) -> Option<&ExpenseEntry> {
        self.entries.iter().find(|entry| entry.position == position)
    }

    pub fn degraded_count(&self) -> usize {
        self.entries.iter().filter(|entry| entry.degraded).count()
    }
}

impl<'a> IntoIterator for &'a ExpenseTable {
    type Item = &'a ExpenseEntry;
    type IntoIter = std::slice::Iter<'a, ExpenseEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
