//! Time-bounded read cache in front of an [`ExpenseSheet`].

use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, Utc};
use expense_domain::RawExpenseRow;
use tracing::debug;

use crate::{storage::ExpenseSheet, time::Clock, CoreError};

struct CachedRows {
    fetched_at: DateTime<Utc>,
    rows: Vec<RawExpenseRow>,
}

/// Serves `read_all_rows` from memory until `ttl` elapses. Writes go straight
/// to the inner sheet and drop the cached copy.
pub struct CachedSheet<S: ExpenseSheet> {
    inner: S,
    clock: Arc<dyn Clock>,
    ttl: Duration,
    cached: Mutex<Option<CachedRows>>,
}

impl<S: ExpenseSheet> CachedSheet<S> {
    pub fn new(inner: S, clock: Arc<dyn Clock>, ttl: Duration) -> Self {
        Self {
            inner,
            clock,
            ttl,
            cached: Mutex::new(None),
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    fn is_fresh(&self, fetched_at: DateTime<Utc>) -> bool {
        (self.clock.now() - fetched_at)
            .to_std()
            .map(|elapsed| elapsed < self.ttl)
            .unwrap_or(false)
    }

    fn clear(&self) {
        if let Ok(mut guard) = self.cached.lock() {
            *guard = None;
        }
    }
}

impl<S: ExpenseSheet> ExpenseSheet for CachedSheet<S> {
    fn read_all_rows(&self) -> Result<Vec<RawExpenseRow>, CoreError> {
        let mut guard = self
            .cached
            .lock()
            .map_err(|_| CoreError::Storage("sheet cache lock poisoned".into()))?;

        if let Some(cached) = guard.as_ref() {
            if self.is_fresh(cached.fetched_at) {
                debug!(rows = cached.rows.len(), "serving expense rows from cache");
                return Ok(cached.rows.clone());
            }
        }

        let rows = self.inner.read_all_rows()?;
        *guard = Some(CachedRows {
            fetched_at: self.clock.now(),
            rows: rows.clone(),
        });
        Ok(rows)
    }

    fn append_row(
        &self,
        date_iso: &str,
        category: &str,
        amount_text: &str,
    ) -> Result<(), CoreError> {
        let result = self.inner.append_row(date_iso, category, amount_text);
        self.clear();
        result
    }

    fn delete_row_at(&self, position: usize) -> Result<RawExpenseRow, CoreError> {
        let result = self.inner.delete_row_at(position);
        self.clear();
        result
    }

    fn invalidate(&self) {
        self.clear();
        self.inner.invalidate();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use chrono::NaiveDate;

    use super::*;
    use crate::{storage::InMemorySheet, time::ManualClock};

    #[derive(Default)]
    struct CountingSheet {
        inner: InMemorySheet,
        reads: AtomicUsize,
    }

    impl ExpenseSheet for CountingSheet {
        fn read_all_rows(&self) -> Result<Vec<RawExpenseRow>, CoreError> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            self.inner.read_all_rows()
        }

        fn append_row(&self, d: &str, c: &str, a: &str) -> Result<(), CoreError> {
            self.inner.append_row(d, c, a)
        }

        fn delete_row_at(&self, position: usize) -> Result<RawExpenseRow, CoreError> {
            self.inner.delete_row_at(position)
        }
    }

    fn setup() -> (Arc<ManualClock>, CachedSheet<CountingSheet>) {
        let clock = Arc::new(ManualClock::at_date(
            NaiveDate::from_ymd_opt(2025, 5, 1).unwrap(),
        ));
        let sheet = CachedSheet::new(
            CountingSheet::default(),
            clock.clone(),
            Duration::from_secs(60),
        );
        (clock, sheet)
    }

    #[test]
    fn reads_within_ttl_hit_the_cache() {
        let (clock, sheet) = setup();
        sheet.read_all_rows().unwrap();
        clock.advance(chrono::Duration::seconds(30));
        sheet.read_all_rows().unwrap();
        assert_eq!(sheet.inner().reads.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn expired_cache_reloads() {
        let (clock, sheet) = setup();
        sheet.read_all_rows().unwrap();
        clock.advance(chrono::Duration::seconds(61));
        sheet.read_all_rows().unwrap();
        assert_eq!(sheet.inner().reads.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn writes_invalidate_the_cache() {
        let (_clock, sheet) = setup();
        assert!(sheet.read_all_rows().unwrap().is_empty());
        sheet.append_row("2025-05-01", "Luz", "10").unwrap();
        assert_eq!(sheet.read_all_rows().unwrap().len(), 1);
        sheet.delete_row_at(0).unwrap();
        assert!(sheet.read_all_rows().unwrap().is_empty());
        assert_eq!(sheet.inner().reads.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn explicit_invalidate_forces_reload() {
        let (_clock, sheet) = setup();
        sheet.read_all_rows().unwrap();
        sheet.invalidate();
        sheet.read_all_rows().unwrap();
        assert_eq!(sheet.inner().reads.load(Ordering::SeqCst), 2);
    }
}
