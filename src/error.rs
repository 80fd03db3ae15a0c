//! Crate error type.

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors surfaced by [`Scheduler`](crate::scheduler::Scheduler).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchedulerError {
    /// A GA parameter is out of its documented range.
    #[error("invalid scheduling parameters: {0}")]
    InvalidParameters(String),

    /// A submission references a user absent from the supplied user list.
    #[error("submission references user {user_id} not present in the user list")]
    UnknownSubmitter {
        /// Offending user identifier.
        user_id: i64,
    },

    /// The template failed its structural checks (malformed shift times,
    /// non-positive duration, overlapping shifts).
    #[error("template rejected: {0}")]
    Template(ValidationError),

    /// The best evolved roster failed post-run feasibility validation.
    #[error("generated roster is infeasible: {0}")]
    Infeasible(ValidationError),
}
