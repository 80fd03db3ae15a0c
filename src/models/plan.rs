//! Scheduling plan model.
//!
//! A plan binds a template to two time windows: the period during which
//! assistants may submit availability, and the period during which the
//! resulting roster is in force. Submission must close before the roster
//! becomes active; see
//! [`validate_plan_times`](crate::validation::validate_plan_times).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A scheduling plan for one roster period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulePlan {
    /// Unique plan identifier.
    pub id: i64,
    /// Human-readable name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Opening of the availability-submission window.
    pub submission_start_time: DateTime<Utc>,
    /// Close of the availability-submission window.
    pub submission_end_time: DateTime<Utc>,
    /// Start of the period the roster is in force.
    pub active_start_time: DateTime<Utc>,
    /// End of the period the roster is in force.
    pub active_end_time: DateTime<Utc>,
    /// Template this plan schedules against.
    #[serde(rename = "scheduleTemplateID")]
    pub schedule_template_id: i64,
}

impl SchedulePlan {
    /// Creates a plan with all four window bounds at the Unix epoch.
    pub fn new(id: i64, schedule_template_id: i64) -> Self {
        let epoch = DateTime::<Utc>::UNIX_EPOCH;
        Self {
            id,
            name: String::new(),
            description: String::new(),
            submission_start_time: epoch,
            submission_end_time: epoch,
            active_start_time: epoch,
            active_end_time: epoch,
            schedule_template_id,
        }
    }

    /// Sets the plan name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the availability-submission window.
    pub fn with_submission_window(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.submission_start_time = start;
        self.submission_end_time = end;
        self
    }

    /// Sets the active window.
    pub fn with_active_window(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.active_start_time = start;
        self.active_end_time = end;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_plan_builder() {
        let t0 = Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap();
        let t1 = Utc.with_ymd_and_hms(2025, 3, 7, 0, 0, 0).unwrap();
        let t2 = Utc.with_ymd_and_hms(2025, 3, 10, 0, 0, 0).unwrap();
        let t3 = Utc.with_ymd_and_hms(2025, 3, 17, 0, 0, 0).unwrap();

        let plan = SchedulePlan::new(1, 42)
            .with_name("Week 11")
            .with_submission_window(t0, t1)
            .with_active_window(t2, t3);

        assert_eq!(plan.schedule_template_id, 42);
        assert_eq!(plan.submission_end_time, t1);
        assert_eq!(plan.active_start_time, t2);
    }

    #[test]
    fn test_plan_serde_field_names() {
        let plan = SchedulePlan::new(1, 2);
        let json = serde_json::to_value(&plan).unwrap();
        assert!(json.get("submissionStartTime").is_some());
        assert!(json.get("scheduleTemplateID").is_some());
    }
}
