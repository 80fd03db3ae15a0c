//! Roster-scheduling domain models.
//!
//! Core data types shared by the scheduler, the validation layer, and the
//! surrounding service: the workforce (`User`), the weekly shift structure
//! (`ScheduleTemplate`), the scheduling period (`SchedulePlan`), declared
//! availability (`AvailabilitySubmission`), and the finished roster
//! (`SchedulingResult`).

mod plan;
mod result;
mod submission;
mod template;
mod user;

pub use plan::SchedulePlan;
pub use result::{ResultShift, ResultShiftItem, SchedulingResult};
pub use submission::{AvailabilitySubmission, SubmissionItem, SubmissionSet};
pub use template::{ScheduleTemplate, TemplateShift, TIME_FORMAT};
pub use user::{Role, User};
