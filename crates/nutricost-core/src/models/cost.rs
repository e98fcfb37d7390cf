// ABOUTME: Cost entry model and the append-only cost history ledger
// ABOUTME: Derives an ingredient's current cost from the latest-dated entry
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutricost Contributors

//! # Cost History Ledger
//!
//! Each ingredient owns an append-only list of [`CostEntry`] values. Storage
//! order is append order and is never rewritten; ordering by date happens only
//! at read time. The *current cost* is always recomputed from the entries.
//!
//! When several entries share the maximum date, the one appended last wins.
//! [`CostHistory::history_sorted_desc`] orders ties the same way, so its first
//! element is always the entry that [`CostHistory::current_cost`] reports.

use crate::constants::COST_EPSILON;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One historical price record for an ingredient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostEntry {
    /// Price paid, never negative
    pub cost: f64,
    /// When the price was observed
    pub date: DateTime<Utc>,
    /// Where it was bought
    pub vendor: Option<String>,
    /// Free-form remarks ("Initial cost", "Updated cost", ...)
    pub notes: Option<String>,
}

impl CostEntry {
    /// Create an entry dated `date` with notes and no vendor
    pub fn with_notes(cost: f64, date: DateTime<Utc>, notes: impl Into<String>) -> Self {
        Self {
            cost,
            date,
            vendor: None,
            notes: Some(notes.into()),
        }
    }
}

/// Cost entry as submitted by a caller; `date` defaults to the time of recording
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostEntryInput {
    /// Price paid
    pub cost: f64,
    /// Observation time, `None` means "now"
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
    /// Vendor name
    #[serde(default)]
    pub vendor: Option<String>,
    /// Notes
    #[serde(default)]
    pub notes: Option<String>,
}

impl CostEntryInput {
    /// Entry with only a cost, dated at recording time
    #[must_use]
    pub const fn new(cost: f64) -> Self {
        Self {
            cost,
            date: None,
            vendor: None,
            notes: None,
        }
    }

    /// Resolve into a stored entry, filling a missing date with `now`
    #[must_use]
    pub fn into_entry(self, now: DateTime<Utc>) -> CostEntry {
        CostEntry {
            cost: self.cost,
            date: self.date.unwrap_or(now),
            vendor: self.vendor,
            notes: self.notes,
        }
    }
}

/// Append-only cost history of a single ingredient
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CostHistory {
    entries: Vec<CostEntry>,
}

impl CostHistory {
    /// Empty history
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Rebuild a history from entries in their stored (append) order
    #[must_use]
    pub const fn from_entries(entries: Vec<CostEntry>) -> Self {
        Self { entries }
    }

    /// Append an entry at the end of the history
    pub fn append(&mut self, entry: CostEntry) {
        self.entries.push(entry);
    }

    /// Entries in append order
    #[must_use]
    pub fn entries(&self) -> &[CostEntry] {
        &self.entries
    }

    /// Number of recorded entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been recorded yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry with the latest date; among equal dates the last appended
    #[must_use]
    pub fn latest(&self) -> Option<&CostEntry> {
        // max_by_key yields the last of several equal maxima
        self.entries.iter().max_by_key(|entry| entry.date)
    }

    /// Cost of the latest-dated entry, `0.0` for an empty history
    #[must_use]
    pub fn current_cost(&self) -> f64 {
        self.latest().map_or(0.0, |entry| entry.cost)
    }

    /// Whether `cost` differs from the current cost
    #[must_use]
    pub fn differs_from_current(&self, cost: f64) -> bool {
        (self.current_cost() - cost).abs() > COST_EPSILON
    }

    /// Full history, newest first; equal dates list the last appended first
    #[must_use]
    pub fn history_sorted_desc(&self) -> Vec<CostEntry> {
        let mut sorted: Vec<CostEntry> = self.entries.iter().rev().cloned().collect();
        sorted.sort_by(|a, b| b.date.cmp(&a.date));
        sorted
    }

    /// Consume the history, returning entries in append order
    #[must_use]
    pub fn into_entries(self) -> Vec<CostEntry> {
        self.entries
    }
}

impl From<Vec<CostEntry>> for CostHistory {
    fn from(entries: Vec<CostEntry>) -> Self {
        Self::from_entries(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn day(n: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, n, 12, 0, 0).unwrap()
    }

    fn entry(cost: f64, date: DateTime<Utc>) -> CostEntry {
        CostEntry {
            cost,
            date,
            vendor: None,
            notes: None,
        }
    }

    #[test]
    fn test_empty_history_costs_nothing() {
        let history = CostHistory::new();
        assert!(history.is_empty());
        assert!(history.latest().is_none());
        assert!(history.current_cost().abs() < f64::EPSILON);
        assert!(history.history_sorted_desc().is_empty());
    }

    #[test]
    fn test_current_cost_uses_latest_date_not_append_order() {
        let mut history = CostHistory::new();
        history.append(entry(2.00, day(10)));
        history.append(entry(1.00, day(1)));
        history.append(entry(3.00, day(5)));

        assert!((history.current_cost() - 2.00).abs() < f64::EPSILON);

        // storage order is untouched
        let stored: Vec<f64> = history.entries().iter().map(|e| e.cost).collect();
        assert_eq!(stored, vec![2.00, 1.00, 3.00]);
    }

    #[test]
    fn test_sorted_desc_is_newest_first() {
        let history =
            CostHistory::from_entries(vec![entry(1.0, day(1)), entry(3.0, day(3)), entry(2.0, day(2))]);
        let sorted: Vec<f64> = history.history_sorted_desc().iter().map(|e| e.cost).collect();
        assert_eq!(sorted, vec![3.0, 2.0, 1.0]);
    }

    #[test]
    fn test_ties_agree_between_current_cost_and_sorted_history() {
        let same = day(7);
        let history = CostHistory::from_entries(vec![
            entry(1.0, day(1)),
            entry(4.0, same),
            entry(5.0, same),
        ]);

        let sorted = history.history_sorted_desc();
        assert!((history.current_cost() - sorted[0].cost).abs() < f64::EPSILON);
    }

    #[test]
    fn test_differs_from_current() {
        let mut history = CostHistory::new();
        history.append(entry(1.20, day(1)));
        assert!(!history.differs_from_current(1.20));
        assert!(history.differs_from_current(1.50));
        assert!(CostHistory::new().differs_from_current(0.5));
        assert!(!CostHistory::new().differs_from_current(0.0));
    }

    #[test]
    fn test_input_defaults_date_to_now() {
        let now = day(9);
        let stored = CostEntryInput::new(2.75).into_entry(now);
        assert_eq!(stored.date, now);

        let explicit = CostEntryInput {
            date: Some(now - Duration::days(3)),
            vendor: Some("Costco".to_owned()),
            ..CostEntryInput::new(2.10)
        }
        .into_entry(now);
        assert_eq!(explicit.date, now - Duration::days(3));
        assert_eq!(explicit.vendor.as_deref(), Some("Costco"));
    }

    #[test]
    fn test_history_serializes_as_plain_array() {
        let history = CostHistory::from_entries(vec![CostEntry::with_notes(1.0, day(1), "Initial cost")]);
        let json = serde_json::to_value(&history).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["notes"], "Initial cost");
    }
}
