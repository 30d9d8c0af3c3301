//! expense-core
//!
//! Amount normalization, entry validation and the services that sit between
//! the expense sheet and whatever surface presents it.
//! Depends on expense-domain. No CLI, no terminal I/O, no direct file access.

pub mod amount;
pub mod cache;
pub mod dates;
pub mod error;
pub mod expense_service;
pub mod storage;
pub mod summary_service;
pub mod time;
pub mod validation;

pub use cache::CachedSheet;
pub use error::CoreError;
pub use expense_service::*;
pub use storage::{ExpenseSheet, InMemorySheet};
pub use summary_service::*;
pub use time::{Clock, ManualClock};
pub use validation::{ExpenseValidator, ValidationIssue};
