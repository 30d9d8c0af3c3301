use chrono::{DateTime, Local, NaiveDate, Utc};

use expense_core::Clock;

/// Real-time clock. "Today" is the local calendar date.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}
