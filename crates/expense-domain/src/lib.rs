//! expense-domain
//!
//! Pure data types for recorded expenses: raw sheet rows, accepted records
//! and the normalized in-memory table. No I/O, no parsing policy.

pub mod record;
pub mod row;
pub mod table;

pub use record::*;
pub use row::*;
pub use table::*;
