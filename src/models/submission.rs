//! Availability submissions.
//!
//! Each assistant declares, per template shift, the weekdays they are
//! willing to work. At most one submission exists per (plan, user);
//! [`SubmissionSet`] enforces the replace-on-resubmit contract that the
//! surrounding service's storage layer implements with an upsert.

use serde::{Deserialize, Serialize};

/// Availability for one template shift: the declared weekdays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionItem {
    /// Template shift this item refers to.
    #[serde(rename = "shiftID")]
    pub shift_id: i64,
    /// Declared weekdays, each within the shift's applicable days.
    pub days: Vec<u8>,
}

impl SubmissionItem {
    /// Creates a new item.
    pub fn new(shift_id: i64, days: Vec<u8>) -> Self {
        Self { shift_id, days }
    }
}

/// One assistant's availability declaration for a plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilitySubmission {
    /// Plan this submission belongs to.
    #[serde(rename = "schedulePlanID")]
    pub schedule_plan_id: i64,
    /// Submitting user.
    #[serde(rename = "userID")]
    pub user_id: i64,
    /// One item per template shift.
    pub items: Vec<SubmissionItem>,
}

impl AvailabilitySubmission {
    /// Creates an empty submission.
    pub fn new(user_id: i64, schedule_plan_id: i64) -> Self {
        Self {
            schedule_plan_id,
            user_id,
            items: Vec::new(),
        }
    }

    /// Adds an item.
    pub fn with_item(mut self, item: SubmissionItem) -> Self {
        self.items.push(item);
        self
    }

    /// Finds the item for a shift.
    pub fn item_for_shift(&self, shift_id: i64) -> Option<&SubmissionItem> {
        self.items.iter().find(|i| i.shift_id == shift_id)
    }

    /// Whether this submission declares availability at (shift, day).
    pub fn covers(&self, shift_id: i64, day: u8) -> bool {
        self.item_for_shift(shift_id)
            .is_some_and(|item| item.days.contains(&day))
    }
}

/// A collection of submissions holding at most one record per (plan, user).
///
/// Re-inserting for the same (plan, user) replaces the previous record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubmissionSet {
    submissions: Vec<AvailabilitySubmission>,
}

impl SubmissionSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a submission, replacing any existing record for the same
    /// (plan, user) pair.
    pub fn upsert(&mut self, submission: AvailabilitySubmission) {
        match self.submissions.iter_mut().find(|s| {
            s.schedule_plan_id == submission.schedule_plan_id && s.user_id == submission.user_id
        }) {
            Some(existing) => *existing = submission,
            None => self.submissions.push(submission),
        }
    }

    /// Finds a user's submission within a plan.
    pub fn for_user(&self, schedule_plan_id: i64, user_id: i64) -> Option<&AvailabilitySubmission> {
        self.submissions
            .iter()
            .find(|s| s.schedule_plan_id == schedule_plan_id && s.user_id == user_id)
    }

    /// All submissions, in insertion order.
    pub fn as_slice(&self) -> &[AvailabilitySubmission] {
        &self.submissions
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.submissions.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.submissions.is_empty()
    }
}
