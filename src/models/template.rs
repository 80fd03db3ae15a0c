//! Weekly shift template model.
//!
//! A template enumerates the shifts that make up one week of duty. Each
//! shift is a wall-clock interval (`HH:MM:SS` strings, no date) together
//! with the weekdays it applies to and the headcount it needs.
//!
//! # Time Model
//! Shift bounds are wall-clock times within a single day; a shift must end
//! strictly after it starts. Shifts of a template must not overlap pairwise,
//! but touching endpoints (one shift ending exactly when another starts) are
//! fine. Both rules are enforced by
//! [`validate_template_shift_times`](crate::validation::validate_template_shift_times).

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// Wall-clock format used for shift bounds.
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// One shift of a weekly template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateShift {
    /// Unique shift identifier.
    pub id: i64,
    /// Wall-clock start, `HH:MM:SS`.
    pub start_time: String,
    /// Wall-clock end, `HH:MM:SS`. Must be after `start_time`.
    pub end_time: String,
    /// Total assistants needed per cell, principal included.
    pub required_headcount: u32,
    /// Weekdays (1..=7) this shift is staffed on.
    pub applicable_days: Vec<u8>,
}

impl TemplateShift {
    /// Creates a new shift with no applicable days.
    pub fn new(
        id: i64,
        start_time: impl Into<String>,
        end_time: impl Into<String>,
        required_headcount: u32,
    ) -> Self {
        Self {
            id,
            start_time: start_time.into(),
            end_time: end_time.into(),
            required_headcount,
            applicable_days: Vec::new(),
        }
    }

    /// Sets the applicable weekdays.
    pub fn with_days(mut self, days: Vec<u8>) -> Self {
        self.applicable_days = days;
        self
    }

    /// Parses both wall-clock bounds. `None` if either string is malformed.
    pub fn parsed_times(&self) -> Option<(NaiveTime, NaiveTime)> {
        let start = NaiveTime::parse_from_str(&self.start_time, TIME_FORMAT).ok()?;
        let end = NaiveTime::parse_from_str(&self.end_time, TIME_FORMAT).ok()?;
        Some((start, end))
    }

    /// Shift length in hours. `None` if the bounds are malformed.
    pub fn duration_hours(&self) -> Option<f64> {
        let (start, end) = self.parsed_times()?;
        Some((end - start).num_seconds() as f64 / 3600.0)
    }
}

/// A weekly shift template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleTemplate {
    /// Unique template identifier.
    pub id: i64,
    /// Human-readable name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Shifts in stored order. The order is load-bearing: it defines the
    /// cell enumeration shared by every chromosome of a scheduling run.
    pub shifts: Vec<TemplateShift>,
}

impl ScheduleTemplate {
    /// Creates an empty template.
    pub fn new(id: i64) -> Self {
        Self {
            id,
            name: String::new(),
            description: String::new(),
            shifts: Vec::new(),
        }
    }

    /// Sets the template name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Adds a shift.
    pub fn with_shift(mut self, shift: TemplateShift) -> Self {
        self.shifts.push(shift);
        self
    }

    /// Finds a shift by its identifier.
    pub fn shift_by_id(&self, shift_id: i64) -> Option<&TemplateShift> {
        self.shifts.iter().find(|s| s.id == shift_id)
    }

    /// Number of (shift, day) cells this template enumerates.
    pub fn cell_count(&self) -> usize {
        self.shifts.iter().map(|s| s.applicable_days.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_hours() {
        let shift = TemplateShift::new(1, "09:00:00", "12:30:00", 3);
        assert_eq!(shift.duration_hours(), Some(3.5));
    }

    #[test]
    fn test_malformed_time() {
        let shift = TemplateShift::new(1, "9am", "12:00:00", 2);
        assert!(shift.parsed_times().is_none());
        assert!(shift.duration_hours().is_none());
    }

    #[test]
    fn test_shift_by_id() {
        let template = ScheduleTemplate::new(1)
            .with_name("Office hours")
            .with_shift(TemplateShift::new(10, "08:00:00", "12:00:00", 2).with_days(vec![1, 2]))
            .with_shift(TemplateShift::new(11, "12:00:00", "18:00:00", 3).with_days(vec![1]));

        assert_eq!(template.shift_by_id(11).map(|s| s.required_headcount), Some(3));
        assert!(template.shift_by_id(99).is_none());
        assert_eq!(template.cell_count(), 3);
    }

    #[test]
    fn test_template_serde_field_names() {
        let shift = TemplateShift::new(1, "08:00:00", "10:00:00", 2).with_days(vec![1]);
        let json = serde_json::to_value(&shift).unwrap();
        assert!(json.get("startTime").is_some());
        assert!(json.get("requiredHeadcount").is_some());
        assert!(json.get("applicableDays").is_some());
    }
}
