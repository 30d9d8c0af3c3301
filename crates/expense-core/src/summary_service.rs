//! Filtering and group-by totals for the dashboard view.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use expense_domain::{ExpenseEntry, ExpenseTable};

/// Which entries to keep. Empty `categories` means every category; date
/// bounds are inclusive and exclude entries without a parsed date.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseFilter {
    pub categories: Vec<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl ExpenseFilter {
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty() && self.from.is_none() && self.to.is_none()
    }

    pub fn matches(&self, entry: &ExpenseEntry) -> bool {
        if !self.categories.is_empty()
            && !self
                .categories
                .iter()
                .any(|category| category.trim() == entry.category.trim())
        {
            return false;
        }
        if self.from.is_none() && self.to.is_none() {
            return true;
        }
        let Some(date) = entry.date else {
            return false;
        };
        self.from.map_or(true, |from| date >= from) && self.to.map_or(true, |to| date <= to)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
    pub count: usize,
}

/// One calendar day: its total and how that total splits across categories.
#[derive(Debug, Clone, PartialEq)]
pub struct DateTotal {
    pub date: NaiveDate,
    pub total: f64,
    pub categories: Vec<CategoryTotal>,
}

pub struct SummaryService;

impl SummaryService {
    pub fn filter(table: &ExpenseTable, filter: &ExpenseFilter) -> ExpenseTable {
        ExpenseTable::new(
            table
                .iter()
                .filter(|entry| filter.matches(entry))
                .cloned()
                .collect(),
        )
    }

    pub fn total(table: &ExpenseTable) -> f64 {
        table.iter().map(|entry| entry.amount).sum()
    }

    /// Totals per category, largest first; ties break on name.
    pub fn totals_by_category(table: &ExpenseTable) -> Vec<CategoryTotal> {
        category_totals(table.iter())
    }

    /// Totals per calendar day in chronological order, each split by
    /// category. Entries without a parsed date are left out.
    pub fn totals_by_date(table: &ExpenseTable) -> Vec<DateTotal> {
        let mut days: BTreeMap<NaiveDate, Vec<&ExpenseEntry>> = BTreeMap::new();
        for entry in table {
            if let Some(date) = entry.date {
                days.entry(date).or_default().push(entry);
            }
        }
        days.into_iter()
            .map(|(date, entries)| DateTotal {
                date,
                total: entries.iter().map(|entry| entry.amount).sum(),
                categories: category_totals(entries),
            })
            .collect()
    }
}

/// Largest total first; ties break on name.
fn category_totals<'a>(
    entries: impl IntoIterator<Item = &'a ExpenseEntry>,
) -> Vec<CategoryTotal> {
    let mut totals: HashMap<&str, CategoryTotal> = HashMap::new();
    for entry in entries {
        let name = entry.category.trim();
        let slot = totals.entry(name).or_insert_with(|| CategoryTotal {
            category: name.to_string(),
            total: 0.0,
            count: 0,
        });
        slot.total += entry.amount;
        slot.count += 1;
    }
    let mut rows: Vec<CategoryTotal> = totals.into_values().collect();
    rows.sort_by(|a, b| {
        b.total
            .total_cmp(&a.total)
            .then_with(|| a.category.cmp(&b.category))
    });
    rows
}
