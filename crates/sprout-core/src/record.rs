//! Daily hydration records and the date-keyed history that holds them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Fraction of the daily target that counts as meeting the goal.
pub const GOAL_THRESHOLD: f64 = 0.9;

/// Consumption for a single calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HydrationRecord {
    /// Calendar day, unique within a history.
    pub date: NaiveDate,
    /// Target in effect for that day (recomputed on every drink).
    pub target_ml: u32,
    /// Total logged so far that day.
    pub consumed_ml: u32,
}

impl HydrationRecord {
    /// Creates an empty record for `date`.
    pub const fn new(date: NaiveDate, target_ml: u32) -> Self {
        Self {
            date,
            target_ml,
            consumed_ml: 0,
        }
    }

    /// Whether consumption reached at least 90% of the target.
    pub fn goal_met(&self) -> bool {
        f64::from(self.consumed_ml) >= f64::from(self.target_ml) * GOAL_THRESHOLD
    }

    /// Progress towards the target, see [`progress_percent`].
    pub fn progress_percent(&self) -> u32 {
        progress_percent(self.consumed_ml, self.target_ml)
    }
}

/// `min(100, round(consumed / target * 100))`, or 0 for a non-positive target.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "result is bounded to 0..=100"
)]
pub fn progress_percent(consumed_ml: u32, target_ml: u32) -> u32 {
    if target_ml == 0 {
        return 0;
    }
    let percent = (f64::from(consumed_ml) / f64::from(target_ml) * 100.0).round();
    percent.min(100.0) as u32
}

/// Date-ordered collection of records with at most one record per day.
///
/// Serialized as `{"records": [...]}`; a missing `records` key deserializes
/// to an empty history. Stored records are re-sorted and deduplicated on load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredHistory")]
pub struct HydrationHistory {
    records: Vec<HydrationRecord>,
}

/// Wire shape of [`HydrationHistory`] before ordering is restored.
#[derive(Deserialize)]
struct StoredHistory {
    #[serde(default)]
    records: Vec<HydrationRecord>,
}

impl From<StoredHistory> for HydrationHistory {
    fn from(stored: StoredHistory) -> Self {
        Self::from_records(stored.records)
    }
}

impl HydrationHistory {
    /// Builds a history from arbitrary records.
    ///
    /// Records are sorted by date. When a date repeats, the last one wins.
    pub fn from_records(records: impl IntoIterator<Item = HydrationRecord>) -> Self {
        let mut history = Self::default();
        for record in records {
            history.upsert(record);
        }
        history
    }

    /// Records in ascending date order.
    pub fn records(&self) -> &[HydrationRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<HydrationRecord> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the record for `date`, if any.
    pub fn get(&self, date: NaiveDate) -> Option<&HydrationRecord> {
        self.records
            .binary_search_by_key(&date, |r| r.date)
            .ok()
            .map(|idx| &self.records[idx])
    }

    /// Returns the record for `date`, inserting `HydrationRecord::new(date, target_ml)`
    /// at its sorted position when missing.
    pub fn get_or_insert(&mut self, date: NaiveDate, target_ml: u32) -> &mut HydrationRecord {
        let idx = match self.records.binary_search_by_key(&date, |r| r.date) {
            Ok(idx) => idx,
            Err(idx) => {
                self.records
                    .insert(idx, HydrationRecord::new(date, target_ml));
                idx
            }
        };
        &mut self.records[idx]
    }

    /// Inserts or replaces the record for `record.date`.
    pub fn upsert(&mut self, record: HydrationRecord) {
        match self.records.binary_search_by_key(&record.date, |r| r.date) {
            Ok(idx) => self.records[idx] = record,
            Err(idx) => self.records.insert(idx, record),
        }
    }

    /// The most recent `n` records, oldest first.
    pub fn last(&self, n: usize) -> &[HydrationRecord] {
        let start = self.records.len().saturating_sub(n);
        &self.records[start..]
    }
}
