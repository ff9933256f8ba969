//! Activity Store
//!
//! In-memory source of record: per-subject ordered maps keyed by date, so
//! window queries are range scans. Mutations are unique per (subject, date);
//! creating a duplicate conflicts, updating or removing a missing record is
//! not found.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;

use crate::activity::ActivityRecord;
use crate::error::{AppError, Result};

// == Activity Source ==
/// Read seam consumed by the aggregate service. Returns all committed
/// records for `subject_id` with dates inside the closed range
/// `[start, end]`, in date order.
pub trait ActivitySource {
    fn find_in_range(
        &self,
        subject_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<ActivityRecord>>;
}

// == Activity Store ==
/// In-memory record store.
#[derive(Debug, Default)]
pub struct ActivityStore {
    records: HashMap<String, BTreeMap<NaiveDate, ActivityRecord>>,
}

impl ActivityStore {
    // == Constructor ==
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // == Insert ==
    /// Creates a record; conflicts if one already exists for the record's
    /// (subject, date).
    pub fn insert(&mut self, subject_id: &str, record: ActivityRecord) -> Result<()> {
        let days = self.records.entry(subject_id.to_string()).or_default();
        if days.contains_key(&record.date) {
            return Err(AppError::AlreadyExists(format!(
                "Activity for {} on {} already exists",
                subject_id, record.date
            )));
        }
        days.insert(record.date, record);
        Ok(())
    }

    // == Update ==
    /// Replaces the record for the record's (subject, date); not found if
    /// absent. Returns the updated record.
    pub fn update(&mut self, subject_id: &str, record: ActivityRecord) -> Result<ActivityRecord> {
        let days = self
            .records
            .get_mut(subject_id)
            .filter(|days| days.contains_key(&record.date))
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "No activity for {} on {}",
                    subject_id, record.date
                ))
            })?;
        days.insert(record.date, record.clone());
        Ok(record)
    }

    // == Remove ==
    /// Removes the record for (subject, date); not found if absent.
    pub fn remove(&mut self, subject_id: &str, date: NaiveDate) -> Result<ActivityRecord> {
        self.records
            .get_mut(subject_id)
            .and_then(|days| days.remove(&date))
            .ok_or_else(|| {
                AppError::NotFound(format!("No activity for {} on {}", subject_id, date))
            })
    }

    // == Remove Subject ==
    /// Drops every record for a subject. Returns the number removed;
    /// removing an unknown subject is a no-op.
    pub fn remove_subject(&mut self, subject_id: &str) -> usize {
        self.records
            .remove(subject_id)
            .map(|days| days.len())
            .unwrap_or(0)
    }

    // == List ==
    /// Returns a subject's records with optional inclusive bounds, in date
    /// order.
    pub fn list(
        &self,
        subject_id: &str,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Vec<ActivityRecord> {
        let Some(days) = self.records.get(subject_id) else {
            return Vec::new();
        };
        days.values()
            .filter(|record| from.map_or(true, |from| record.date >= from))
            .filter(|record| to.map_or(true, |to| record.date <= to))
            .cloned()
            .collect()
    }
}

impl ActivitySource for ActivityStore {
    fn find_in_range(
        &self,
        subject_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<ActivityRecord>> {
        let records = self
            .records
            .get(subject_id)
            .map(|days| days.range(start..=end).map(|(_, r)| r.clone()).collect())
            .unwrap_or_default();
        Ok(records)
    }
}
