//! Availability index.
//!
//! Flattens a set of submissions into per-cell candidate pools:
//! `(shiftID, day) → [userID]`. Built once per scheduling run and read-only
//! afterwards; consulted by chromosome initialisation, mutation, and the
//! feasibility checks.

use std::collections::HashMap;

use crate::models::AvailabilitySubmission;

/// Candidate pools per (shift, day) cell.
#[derive(Debug, Clone, Default)]
pub struct AvailabilityIndex {
    cells: HashMap<i64, HashMap<u8, Vec<i64>>>,
    submitters: Vec<i64>,
}

impl AvailabilityIndex {
    /// Builds the index by scanning all submissions.
    ///
    /// Users appear in each cell's pool in submission order. Duplicate user
    /// entries within a cell are not expected (one submission per user) and
    /// are not deduplicated.
    pub fn from_submissions(submissions: &[AvailabilitySubmission]) -> Self {
        let mut cells: HashMap<i64, HashMap<u8, Vec<i64>>> = HashMap::new();
        let mut submitters = Vec::with_capacity(submissions.len());

        for submission in submissions {
            submitters.push(submission.user_id);
            for item in &submission.items {
                let by_day = cells.entry(item.shift_id).or_default();
                for &day in &item.days {
                    by_day.entry(day).or_default().push(submission.user_id);
                }
            }
        }

        Self { cells, submitters }
    }

    /// The candidate pool for a cell. Empty when nobody is available.
    pub fn available(&self, shift_id: i64, day: u8) -> &[i64] {
        self.cells
            .get(&shift_id)
            .and_then(|by_day| by_day.get(&day))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether a user declared availability for a cell.
    pub fn is_available(&self, user_id: i64, shift_id: i64, day: u8) -> bool {
        self.available(shift_id, day).contains(&user_id)
    }

    /// All users who submitted, in submission order.
    pub fn submitters(&self) -> &[i64] {
        &self.submitters
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SubmissionItem;

    fn sample_submissions() -> Vec<AvailabilitySubmission> {
        vec![
            AvailabilitySubmission::new(9, 1)
                .with_item(SubmissionItem::new(5, vec![1, 2]))
                .with_item(SubmissionItem::new(6, vec![1])),
            AvailabilitySubmission::new(2, 1)
                .with_item(SubmissionItem::new(5, vec![1]))
                .with_item(SubmissionItem::new(6, vec![])),
        ]
    }

    #[test]
    fn test_index_pools() {
        let index = AvailabilityIndex::from_submissions(&sample_submissions());

        assert_eq!(index.available(5, 1), &[9, 2]);
        assert_eq!(index.available(5, 2), &[9]);
        assert_eq!(index.available(6, 1), &[9]);
        assert!(index.available(6, 2).is_empty());
        assert!(index.available(99, 1).is_empty());
    }

    #[test]
    fn test_is_available() {
        let index = AvailabilityIndex::from_submissions(&sample_submissions());

        assert!(index.is_available(2, 5, 1));
        assert!(!index.is_available(2, 5, 2));
        assert!(!index.is_available(2, 6, 1));
    }

    #[test]
    fn test_submitters_in_order() {
        let index = AvailabilityIndex::from_submissions(&sample_submissions());
        assert_eq!(index.submitters(), &[9, 2]);
    }

    #[test]
    fn test_empty() {
        let index = AvailabilityIndex::from_submissions(&[]);
        assert!(index.submitters().is_empty());
        assert!(index.available(1, 1).is_empty());
    }
}
