//! Scheduler facade.
//!
//! Wires the GA pieces together for one scheduling run: builds the
//! availability index, evolves a roster, projects the best chromosome into
//! the external result shape, and gates it through the feasibility checks
//! before handing it back.
//!
//! # Concurrency
//!
//! A `Scheduler` performs no I/O and holds no shared mutable state; runs
//! for different plans may execute concurrently and independently. The GA
//! loop itself is single-threaded and runs `max_generations` to completion;
//! callers wanting a wall-clock bound must wrap the call externally.

use std::collections::HashMap;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::error::SchedulerError;
use crate::ga::{AvailabilityIndex, GaEngine, GaParameters, RosterChromosome, RosterProblem};
use crate::models::{
    AvailabilitySubmission, ResultShift, ResultShiftItem, ScheduleTemplate, SchedulingResult, User,
};
use crate::validation::{
    validate_no_duplicate_assignment, validate_result_with_submissions,
    validate_template_shift_times,
};

/// Evolutionary roster scheduler for one plan.
///
/// # Example
///
/// ```
/// use shift_roster::ga::GaParameters;
/// use shift_roster::models::{
///     AvailabilitySubmission, Role, ScheduleTemplate, SubmissionItem, TemplateShift, User,
/// };
/// use shift_roster::scheduler::Scheduler;
///
/// let template = ScheduleTemplate::new(1)
///     .with_shift(TemplateShift::new(1, "09:00:00", "12:00:00", 2).with_days(vec![1, 2]));
/// let users = vec![User::new(1, Role::Senior), User::new(2, Role::Helper)];
/// let submissions = vec![
///     AvailabilitySubmission::new(1, 1).with_item(SubmissionItem::new(1, vec![1, 2])),
///     AvailabilitySubmission::new(2, 1).with_item(SubmissionItem::new(1, vec![1, 2])),
/// ];
///
/// let params = GaParameters::default().with_seed(42);
/// let scheduler = Scheduler::new(params, &users, template, submissions)?;
/// let shifts = scheduler.schedule()?;
/// assert_eq!(shifts.len(), 1);
/// # Ok::<(), shift_roster::SchedulerError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Scheduler {
    parameters: GaParameters,
    /// Submitters only, in submission order.
    users: Vec<User>,
    template: ScheduleTemplate,
    submissions: Vec<AvailabilitySubmission>,
    index: AvailabilityIndex,
    schedule_plan_id: i64,
}

impl Scheduler {
    /// Creates a scheduler for one run.
    ///
    /// Validates the parameters, rejects templates with malformed or
    /// overlapping shift times up front, and requires every submitter to be
    /// present in `users`. Users who did not submit are dropped; they
    /// cannot be staffed anyway.
    pub fn new(
        parameters: GaParameters,
        users: &[User],
        template: ScheduleTemplate,
        submissions: Vec<AvailabilitySubmission>,
    ) -> Result<Self, SchedulerError> {
        parameters.validate()?;
        validate_template_shift_times(&template).map_err(SchedulerError::Template)?;

        let by_id: HashMap<i64, &User> = users.iter().map(|u| (u.id, u)).collect();
        let mut submitters = Vec::with_capacity(submissions.len());
        for submission in &submissions {
            let user = by_id.get(&submission.user_id).ok_or(
                SchedulerError::UnknownSubmitter {
                    user_id: submission.user_id,
                },
            )?;
            submitters.push((*user).clone());
        }

        let index = AvailabilityIndex::from_submissions(&submissions);
        let schedule_plan_id = submissions
            .first()
            .map(|s| s.schedule_plan_id)
            .unwrap_or_default();

        Ok(Self {
            parameters,
            users: submitters,
            template,
            submissions,
            index,
            schedule_plan_id,
        })
    }

    /// Runs the GA and returns the validated best roster.
    ///
    /// Seeds the random source from `parameters.seed` when set, otherwise
    /// from OS entropy. Equal seeds and inputs produce equal rosters.
    pub fn schedule(&self) -> Result<Vec<ResultShift>, SchedulerError> {
        let mut rng = match self.parameters.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_rng(&mut rand::rng()),
        };
        self.schedule_with_rng(&mut rng)
    }

    /// Runs the GA with a caller-supplied random source.
    pub fn schedule_with_rng<R: Rng>(&self, rng: &mut R) -> Result<Vec<ResultShift>, SchedulerError> {
        let problem = RosterProblem::new(
            &self.template,
            &self.index,
            &self.users,
            self.parameters.fairness_weight,
        )?;
        let engine = GaEngine::new(&problem, &self.parameters)?;
        let best = engine.run(rng);

        let result = SchedulingResult::new(self.schedule_plan_id)
            .with_shifts(self.project(&best));

        validate_result_with_submissions(&result, &self.submissions)
            .map_err(SchedulerError::Infeasible)?;
        validate_no_duplicate_assignment(&result).map_err(SchedulerError::Infeasible)?;

        Ok(result.shifts)
    }

    /// Projects a chromosome into the external result shape.
    ///
    /// Emits one entry per template shift in stored order; a shift with no
    /// applicable days yields an entry with empty items.
    fn project(&self, chromosome: &RosterChromosome) -> Vec<ResultShift> {
        let mut by_shift: HashMap<i64, Vec<ResultShiftItem>> = HashMap::new();
        for gene in &chromosome.genes {
            by_shift.entry(gene.shift_id).or_default().push(ResultShiftItem::new(
                gene.day,
                gene.principal_id,
                gene.helper_ids.clone(),
            ));
        }

        self.template
            .shifts
            .iter()
            .map(|shift| ResultShift {
                shift_id: shift.id,
                items: by_shift.remove(&shift.id).unwrap_or_default(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Role, SubmissionItem, TemplateShift};
    use crate::validation::validate_result_with_template;
    use rand::rngs::SmallRng;

    fn minimal_params() -> GaParameters {
        GaParameters::default()
            .with_population_size(1)
            .with_max_generations(1)
            .with_elite_count(1)
            .with_crossover_rate(0.0)
            .with_mutation_rate(0.0)
            .with_seed(42)
    }

    #[test]
    fn test_minimal_feasible_roster() {
        let template = ScheduleTemplate::new(1)
            .with_shift(TemplateShift::new(1, "09:00:00", "11:00:00", 2).with_days(vec![1]));
        let users = vec![User::new(1, Role::Lead), User::new(2, Role::Helper)];
        let submissions = vec![
            AvailabilitySubmission::new(1, 7).with_item(SubmissionItem::new(1, vec![1])),
            AvailabilitySubmission::new(2, 7).with_item(SubmissionItem::new(1, vec![1])),
        ];

        let scheduler = Scheduler::new(minimal_params(), &users, template, submissions).unwrap();
        let shifts = scheduler.schedule().unwrap();

        assert_eq!(shifts.len(), 1);
        assert_eq!(shifts[0].shift_id, 1);
        assert_eq!(shifts[0].items.len(), 1);
        let item = &shifts[0].items[0];
        assert_eq!(item.day, 1);
        // U1 is the only principal-eligible user, leaving U2 as the only
        // helper candidate.
        assert_eq!(item.principal_id, Some(1));
        assert_eq!(item.assistant_ids, vec![2]);
    }

    #[test]
    fn test_no_principal_eligible_user() {
        let template = ScheduleTemplate::new(1)
            .with_shift(TemplateShift::new(1, "09:00:00", "12:00:00", 3).with_days(vec![1]));
        let users = vec![
            User::new(1, Role::Helper),
            User::new(2, Role::Helper),
            User::new(3, Role::Helper),
        ];
        let submissions: Vec<AvailabilitySubmission> = users
            .iter()
            .map(|u| AvailabilitySubmission::new(u.id, 7).with_item(SubmissionItem::new(1, vec![1])))
            .collect();

        let params = GaParameters::default()
            .with_population_size(10)
            .with_max_generations(20)
            .with_seed(5);
        let scheduler = Scheduler::new(params, &users, template, submissions).unwrap();
        let shifts = scheduler.schedule().unwrap();

        let item = &shifts[0].items[0];
        assert_eq!(item.principal_id, None);
        assert!(item.assistant_ids.len() <= 2);
        for id in &item.assistant_ids {
            assert!([1, 2, 3].contains(id));
        }
    }

    #[test]
    fn test_unknown_submitter_rejected() {
        let template = ScheduleTemplate::new(1)
            .with_shift(TemplateShift::new(1, "09:00:00", "12:00:00", 2).with_days(vec![1]));
        let users = vec![User::new(1, Role::Lead)];
        let submissions =
            vec![AvailabilitySubmission::new(99, 7).with_item(SubmissionItem::new(1, vec![1]))];

        let err = Scheduler::new(minimal_params(), &users, template, submissions).unwrap_err();
        assert_eq!(err, SchedulerError::UnknownSubmitter { user_id: 99 });
    }

    #[test]
    fn test_malformed_template_rejected() {
        let template = ScheduleTemplate::new(1)
            .with_shift(TemplateShift::new(1, "morning", "12:00:00", 2).with_days(vec![1]));
        let err =
            Scheduler::new(minimal_params(), &[], template, Vec::new()).unwrap_err();
        assert!(matches!(err, SchedulerError::Template(_)));
    }

    #[test]
    fn test_invalid_parameters_rejected() {
        let template = ScheduleTemplate::new(1)
            .with_shift(TemplateShift::new(1, "09:00:00", "12:00:00", 2).with_days(vec![1]));
        let params = GaParameters::default().with_population_size(0);
        let err = Scheduler::new(params, &[], template, Vec::new()).unwrap_err();
        assert!(matches!(err, SchedulerError::InvalidParameters(_)));
    }

    #[test]
    fn test_empty_submissions_yield_empty_roster() {
        let template = ScheduleTemplate::new(1)
            .with_shift(TemplateShift::new(1, "09:00:00", "12:00:00", 2).with_days(vec![1, 2]));
        let scheduler =
            Scheduler::new(minimal_params(), &[], template, Vec::new()).unwrap();
        let shifts = scheduler.schedule().unwrap();

        assert_eq!(shifts.len(), 1);
        assert_eq!(shifts[0].items.len(), 2);
        for item in &shifts[0].items {
            assert_eq!(item.principal_id, None);
            assert!(item.assistant_ids.is_empty());
        }
    }

    #[test]
    fn test_shift_without_days_kept_with_empty_items() {
        let template = ScheduleTemplate::new(1)
            .with_shift(TemplateShift::new(1, "09:00:00", "12:00:00", 2).with_days(vec![1]))
            .with_shift(TemplateShift::new(2, "13:00:00", "15:00:00", 2));
        let users = vec![User::new(1, Role::Senior)];
        let submissions = vec![AvailabilitySubmission::new(1, 7)
            .with_item(SubmissionItem::new(1, vec![1]))
            .with_item(SubmissionItem::new(2, vec![]))];

        let scheduler = Scheduler::new(minimal_params(), &users, template, submissions).unwrap();
        let shifts = scheduler.schedule().unwrap();

        assert_eq!(shifts.len(), 2);
        assert_eq!(shifts[1].shift_id, 2);
        assert!(shifts[1].items.is_empty());
    }

    #[test]
    fn test_output_passes_all_validators() {
        let template = ScheduleTemplate::new(1)
            .with_shift(TemplateShift::new(1, "08:00:00", "12:00:00", 3).with_days(vec![1, 2, 3, 4, 5]))
            .with_shift(TemplateShift::new(2, "12:00:00", "18:00:00", 2).with_days(vec![1, 3, 5]));
        let users = vec![
            User::new(1, Role::Lead),
            User::new(2, Role::Senior),
            User::new(3, Role::Helper),
            User::new(4, Role::Helper),
            User::new(5, Role::Helper),
        ];
        let submissions: Vec<AvailabilitySubmission> = users
            .iter()
            .map(|u| {
                AvailabilitySubmission::new(u.id, 7)
                    .with_item(SubmissionItem::new(1, vec![1, 2, 3, 4, 5]))
                    .with_item(SubmissionItem::new(2, vec![1, 3, 5]))
            })
            .collect();

        let params = GaParameters::default()
            .with_population_size(30)
            .with_max_generations(40)
            .with_fairness_weight(10.0)
            .with_seed(11);
        let scheduler =
            Scheduler::new(params, &users, template.clone(), submissions.clone()).unwrap();
        let shifts = scheduler.schedule().unwrap();

        let result = SchedulingResult::new(7).with_shifts(shifts);
        assert!(validate_result_with_template(&result, &template).is_ok());
        assert!(validate_result_with_submissions(&result, &submissions).is_ok());
        assert!(validate_no_duplicate_assignment(&result).is_ok());
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let template = ScheduleTemplate::new(1)
            .with_shift(TemplateShift::new(1, "08:00:00", "12:00:00", 2).with_days(vec![1, 2, 3]));
        let users = vec![
            User::new(1, Role::Senior),
            User::new(2, Role::Helper),
            User::new(3, Role::Helper),
        ];
        let submissions: Vec<AvailabilitySubmission> = users
            .iter()
            .map(|u| {
                AvailabilitySubmission::new(u.id, 7).with_item(SubmissionItem::new(1, vec![1, 2, 3]))
            })
            .collect();

        let params = GaParameters::default()
            .with_population_size(12)
            .with_max_generations(25)
            .with_seed(123);
        let scheduler = Scheduler::new(params, &users, template, submissions).unwrap();

        assert_eq!(scheduler.schedule().unwrap(), scheduler.schedule().unwrap());
    }

    #[test]
    fn test_injected_rng_matches_seeded_run() {
        let template = ScheduleTemplate::new(1)
            .with_shift(TemplateShift::new(1, "08:00:00", "12:00:00", 2).with_days(vec![1]));
        let users = vec![User::new(1, Role::Senior), User::new(2, Role::Helper)];
        let submissions: Vec<AvailabilitySubmission> = users
            .iter()
            .map(|u| AvailabilitySubmission::new(u.id, 7).with_item(SubmissionItem::new(1, vec![1])))
            .collect();

        let params = GaParameters::default()
            .with_population_size(6)
            .with_max_generations(10)
            .with_seed(55);
        let scheduler = Scheduler::new(params, &users, template, submissions).unwrap();

        let mut rng = SmallRng::seed_from_u64(55);
        assert_eq!(
            scheduler.schedule().unwrap(),
            scheduler.schedule_with_rng(&mut rng).unwrap()
        );
    }
}
