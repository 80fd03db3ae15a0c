//! Structural and feasibility validation.
//!
//! Pure checks over the domain models, shared by the scheduler (which gates
//! its own output through them) and the surrounding service (which gates
//! user-submitted rosters and templates). Detects:
//! - submissions that do not conform to their template
//! - rosters that do not conform to their template
//! - rosters assigning users outside their declared availability
//! - duplicate assignments within a cell
//! - malformed or overlapping template shift times
//! - inverted plan windows
//!
//! Each check stops at the first failure and names the offending shift,
//! day, or user in its message.

use std::collections::HashSet;

use chrono::NaiveTime;
use thiserror::Error;

use crate::models::{
    AvailabilitySubmission, SchedulePlan, ScheduleTemplate, SchedulingResult, TemplateShift,
    TIME_FORMAT,
};

/// A validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Failure category.
    pub kind: ValidationErrorKind,
    /// Human-readable description naming the offending entity.
    pub message: String,
}

/// Categories of validation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A shift time string does not parse as `HH:MM:SS`.
    MalformedShiftTime,
    /// A shift does not end strictly after it starts.
    NonPositiveShiftDuration,
    /// Two shifts of a template overlap in wall-clock time.
    ShiftOverlap,
    /// A plan's windows are not ordered.
    PlanTimeOrder,
    /// Item/shift counts do not match the template.
    ShiftCountMismatch,
    /// A shift identifier does not exist in the template.
    UnknownShift,
    /// A day falls outside the shift's applicable days.
    DayNotApplicable,
    /// A result lacks an item for an applicable day.
    MissingDay,
    /// A cell is staffed beyond the shift's required headcount.
    HeadcountExceeded,
    /// An assigned user never submitted availability.
    MissingSubmission,
    /// An assigned user is not available at the cell's (shift, day).
    UserUnavailable,
    /// A user appears twice within one cell.
    DuplicateAssignment,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

fn parse_shift_times(shift: &TemplateShift) -> Result<(NaiveTime, NaiveTime), ValidationError> {
    let start = NaiveTime::parse_from_str(&shift.start_time, TIME_FORMAT).map_err(|_| {
        ValidationError::new(
            ValidationErrorKind::MalformedShiftTime,
            format!("shift {}: start time '{}' is not HH:MM:SS", shift.id, shift.start_time),
        )
    })?;
    let end = NaiveTime::parse_from_str(&shift.end_time, TIME_FORMAT).map_err(|_| {
        ValidationError::new(
            ValidationErrorKind::MalformedShiftTime,
            format!("shift {}: end time '{}' is not HH:MM:SS", shift.id, shift.end_time),
        )
    })?;
    Ok((start, end))
}

/// Validates the wall-clock structure of a template.
///
/// Checks that every shift's bounds parse, that each shift ends strictly
/// after it starts, and that no two shifts overlap. Touching endpoints
/// (one shift ending exactly when another starts) do not conflict.
pub fn validate_template_shift_times(template: &ScheduleTemplate) -> Result<(), ValidationError> {
    let mut intervals = Vec::with_capacity(template.shifts.len());
    for shift in &template.shifts {
        let (start, end) = parse_shift_times(shift)?;
        if end <= start {
            return Err(ValidationError::new(
                ValidationErrorKind::NonPositiveShiftDuration,
                format!("shift {} must end after it starts", shift.id),
            ));
        }
        intervals.push((shift.id, start, end));
    }

    for i in 0..intervals.len() {
        for j in (i + 1)..intervals.len() {
            let (a_id, a_start, a_end) = intervals[i];
            let (b_id, b_start, b_end) = intervals[j];
            if a_start < b_end && b_start < a_end {
                return Err(ValidationError::new(
                    ValidationErrorKind::ShiftOverlap,
                    format!("shifts {a_id} and {b_id} overlap in time"),
                ));
            }
        }
    }

    Ok(())
}

/// Validates a plan's window ordering.
///
/// Requires `submission_start ≤ submission_end`, `active_start ≤ active_end`,
/// and `submission_end ≤ active_start`.
pub fn validate_plan_times(plan: &SchedulePlan) -> Result<(), ValidationError> {
    if plan.submission_start_time > plan.submission_end_time {
        return Err(ValidationError::new(
            ValidationErrorKind::PlanTimeOrder,
            "submission window must start before it ends",
        ));
    }
    if plan.active_start_time > plan.active_end_time {
        return Err(ValidationError::new(
            ValidationErrorKind::PlanTimeOrder,
            "active window must start before it ends",
        ));
    }
    if plan.submission_end_time > plan.active_start_time {
        return Err(ValidationError::new(
            ValidationErrorKind::PlanTimeOrder,
            "submission window must close before the active window starts",
        ));
    }
    Ok(())
}

/// Validates a submission against its template.
///
/// Requires one item per template shift, every item referring to an existing
/// shift, and every declared day within that shift's applicable days.
pub fn validate_submission_with_template(
    submission: &AvailabilitySubmission,
    template: &ScheduleTemplate,
) -> Result<(), ValidationError> {
    if submission.items.len() != template.shifts.len() {
        return Err(ValidationError::new(
            ValidationErrorKind::ShiftCountMismatch,
            format!(
                "submission of user {} has {} items but the template has {} shifts",
                submission.user_id,
                submission.items.len(),
                template.shifts.len()
            ),
        ));
    }

    for item in &submission.items {
        let shift = template.shift_by_id(item.shift_id).ok_or_else(|| {
            ValidationError::new(
                ValidationErrorKind::UnknownShift,
                format!(
                    "submission of user {} references shift {} absent from the template",
                    submission.user_id, item.shift_id
                ),
            )
        })?;

        for &day in &item.days {
            if !shift.applicable_days.contains(&day) {
                return Err(ValidationError::new(
                    ValidationErrorKind::DayNotApplicable,
                    format!(
                        "submission of user {} declares day {} for shift {}, which is not applicable",
                        submission.user_id, day, item.shift_id
                    ),
                ));
            }
        }
    }

    Ok(())
}

/// Validates a roster against its template.
///
/// Requires one entry per template shift, each entry referring to an
/// existing shift, exactly one item per applicable day (full coverage, no
/// extraneous days), and per-cell headcount within the shift's requirement
/// (the principal slot counts whether or not it is filled).
pub fn validate_result_with_template(
    result: &SchedulingResult,
    template: &ScheduleTemplate,
) -> Result<(), ValidationError> {
    if result.shifts.len() != template.shifts.len() {
        return Err(ValidationError::new(
            ValidationErrorKind::ShiftCountMismatch,
            format!(
                "result has {} shift entries but the template has {} shifts",
                result.shifts.len(),
                template.shifts.len()
            ),
        ));
    }

    for result_shift in &result.shifts {
        let shift = template.shift_by_id(result_shift.shift_id).ok_or_else(|| {
            ValidationError::new(
                ValidationErrorKind::UnknownShift,
                format!(
                    "result references shift {} absent from the template",
                    result_shift.shift_id
                ),
            )
        })?;

        for &day in &shift.applicable_days {
            if result_shift.item_for_day(day).is_none() {
                return Err(ValidationError::new(
                    ValidationErrorKind::MissingDay,
                    format!("result for shift {} lacks day {}", shift.id, day),
                ));
            }
        }

        for item in &result_shift.items {
            if !shift.applicable_days.contains(&item.day) {
                return Err(ValidationError::new(
                    ValidationErrorKind::DayNotApplicable,
                    format!(
                        "result for shift {} contains day {}, which is not applicable",
                        shift.id, item.day
                    ),
                ));
            }
            // +1 accounts for the principal slot, filled or not.
            if item.assistant_ids.len() + 1 > shift.required_headcount as usize {
                return Err(ValidationError::new(
                    ValidationErrorKind::HeadcountExceeded,
                    format!(
                        "result for shift {} day {} staffs more assistants than the required headcount {}",
                        shift.id, item.day, shift.required_headcount
                    ),
                ));
            }
        }
    }

    Ok(())
}

fn submission_for_user(
    submissions: &[AvailabilitySubmission],
    user_id: i64,
) -> Option<&AvailabilitySubmission> {
    submissions.iter().find(|s| s.user_id == user_id)
}

/// Validates a roster's feasibility against the declared availability.
///
/// Every assigned user (principal or helper) of every cell must have a
/// submission whose item for that shift includes that day.
pub fn validate_result_with_submissions(
    result: &SchedulingResult,
    submissions: &[AvailabilitySubmission],
) -> Result<(), ValidationError> {
    for result_shift in &result.shifts {
        for item in &result_shift.items {
            let mut assigned: Vec<i64> = Vec::with_capacity(item.assistant_ids.len() + 1);
            assigned.extend(item.principal_id);
            assigned.extend(&item.assistant_ids);

            for user_id in assigned {
                let submission =
                    submission_for_user(submissions, user_id).ok_or_else(|| {
                        ValidationError::new(
                            ValidationErrorKind::MissingSubmission,
                            format!(
                                "user {} is assigned to shift {} day {} but never submitted availability",
                                user_id, result_shift.shift_id, item.day
                            ),
                        )
                    })?;

                if !submission.covers(result_shift.shift_id, item.day) {
                    return Err(ValidationError::new(
                        ValidationErrorKind::UserUnavailable,
                        format!(
                            "user {} is not available for shift {} on day {}",
                            user_id, result_shift.shift_id, item.day
                        ),
                    ));
                }
            }
        }
    }

    Ok(())
}

/// Validates that no user appears twice within a single cell.
///
/// The principal must not double as a helper, and helpers must be pairwise
/// distinct. Cross-cell duplicates are legal: an assistant may work several
/// shifts in one week.
pub fn validate_no_duplicate_assignment(result: &SchedulingResult) -> Result<(), ValidationError> {
    for result_shift in &result.shifts {
        for item in &result_shift.items {
            if let Some(principal) = item.principal_id {
                if item.assistant_ids.contains(&principal) {
                    return Err(ValidationError::new(
                        ValidationErrorKind::DuplicateAssignment,
                        format!(
                            "shift {} day {}: principal {} also appears as a helper",
                            result_shift.shift_id, item.day, principal
                        ),
                    ));
                }
            }

            let mut seen = HashSet::with_capacity(item.assistant_ids.len());
            for &assistant in &item.assistant_ids {
                if !seen.insert(assistant) {
                    return Err(ValidationError::new(
                        ValidationErrorKind::DuplicateAssignment,
                        format!(
                            "shift {} day {}: helper {} appears more than once",
                            result_shift.shift_id, item.day, assistant
                        ),
                    ));
                }
            }
        }
    }

    Ok(())
}
