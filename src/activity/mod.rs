//! Activity Module
//!
//! The source of record for dated activity entries: one record per
//! (subject, UTC calendar day).

mod record;
mod store;

pub use record::ActivityRecord;
pub use store::{ActivitySource, ActivityStore};
