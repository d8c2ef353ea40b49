//! Generate → verify → repair → retry driver.
//!
//! # Algorithm
//!
//! Up to `max_attempts` times:
//! 1. Generate a fresh schedule (new starting rooms, new counters).
//! 2. Verify it. Over-judging rejects the attempt outright.
//! 3. If projects are only under-judged, repair in place and verify again;
//!    accept when judging counts are exact and no collision remains.
//! 4. Otherwise accept if every hard check passed, else retry.
//!
//! When every attempt fails, the last attempt's blocking issues are
//! returned. Residual deficits after repair are reported as
//! `SchedulingDeficit` issues.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;
use tracing::instrument;

use crate::models::{Issue, IssueKind, Judge, RoomLayout, Schedule, TableNumber};
use crate::request::{JudgeAssignment, ScheduleOutcome, ScheduleRequest};
use crate::rooms::partition_rooms;
use crate::validation::{validate_request, ConfigErrors};

use super::generator::AssignmentGenerator;
use super::repair::RepairPass;
use super::verifier::{AssignmentVerifier, VerificationReport};

/// Result of a single attempt.
#[derive(Debug, Clone)]
enum AttemptResult {
    Accepted {
        schedule: Schedule,
        warnings: Vec<Issue>,
    },
    Rejected(Vec<Issue>),
}

/// Per-run state shared by every attempt.
struct Run<'a> {
    request: &'a ScheduleRequest,
    judges: Vec<Judge>,
    layout: RoomLayout,
    names: HashMap<TableNumber, &'a str>,
}

/// Judging schedule driver.
///
/// # Example
///
/// ```
/// use u_judging::models::Project;
/// use u_judging::request::ScheduleRequest;
/// use u_judging::scheduler::JudgingScheduler;
///
/// let projects = (1..=6).map(|t| Project::new(format!("Team {t}"), t)).collect();
/// let request = ScheduleRequest::new(projects, ["Ada", "Grace"], 1, 1).with_seed(7);
///
/// let outcome = JudgingScheduler::new().generate_schedule(&request).unwrap();
/// assert!(outcome.success);
/// assert_eq!(outcome.assignments.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct JudgingScheduler {
    repair: RepairPass,
}

impl JudgingScheduler {
    /// Creates a scheduler.
    pub fn new() -> Self {
        Self {
            repair: RepairPass::new(),
        }
    }

    /// Runs the full generate/verify/repair/retry cycle.
    ///
    /// Uses a run-local random source seeded from `request.seed`, or from
    /// OS entropy when no seed is given.
    ///
    /// # Errors
    /// Returns every configuration problem before any attempt is made.
    #[instrument(
        skip(self, request),
        fields(
            projects = request.projects.len(),
            judges = request.judges.len(),
            judgings_per_project = request.judgings_per_project,
            rooms = request.num_rooms,
        )
    )]
    pub fn generate_schedule(
        &self,
        request: &ScheduleRequest,
    ) -> Result<ScheduleOutcome, ConfigErrors> {
        let mut rng = match request.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        self.generate_schedule_with_rng(request, &mut rng)
    }

    /// Same as [`generate_schedule`](Self::generate_schedule) with a caller-supplied random source.
    pub fn generate_schedule_with_rng<R: Rng + ?Sized>(
        &self,
        request: &ScheduleRequest,
        rng: &mut R,
    ) -> Result<ScheduleOutcome, ConfigErrors> {
        validate_request(request)?;

        let layout = partition_rooms(
            &request.projects,
            request.num_rooms,
            request.room_capacities.as_deref(),
        )
        .map_err(|e| ConfigErrors(vec![e]))?;

        let run = Run {
            request,
            judges: Judge::roster(request.judges.iter().map(|j| j.display_name.clone())),
            layout,
            names: request
                .projects
                .iter()
                .map(|p| (p.table_number, p.display_name.as_str()))
                .collect(),
        };

        tracing::info!(
            judges = run.judges.len(),
            projects = request.projects.len(),
            "initialized judging run"
        );
        for room in run.layout.rooms() {
            tracing::info!(
                room = room.number(),
                tables = ?room.tables,
                capacity = room.capacity,
                "room configured"
            );
        }

        let generator = AssignmentGenerator::new(
            &run.layout,
            run.judges.len(),
            request.judgings_per_project,
        );
        let verifier = AssignmentVerifier::new(
            &request.projects,
            &run.judges,
            request.judgings_per_project,
        );

        let mut last_issues = Vec::new();
        for attempt in 1..=request.max_attempts {
            tracing::debug!(attempt, max_attempts = request.max_attempts, "generating");

            match self.attempt(&run, &generator, &verifier, rng) {
                AttemptResult::Accepted { schedule, warnings } => {
                    tracing::info!(attempt, warnings = warnings.len(), "schedule accepted");
                    return Ok(ScheduleOutcome {
                        success: true,
                        assignments: run.sheets(&schedule),
                        issues: Vec::new(),
                        warnings,
                        attempts: attempt,
                    });
                }
                AttemptResult::Rejected(issues) => {
                    tracing::warn!(attempt, issues = issues.len(), "attempt rejected");
                    for issue in &issues {
                        tracing::debug!(%issue, "unresolved");
                    }
                    last_issues = issues;
                }
            }
        }

        tracing::warn!(
            max_attempts = request.max_attempts,
            "no valid schedule within the attempt bound"
        );
        Ok(ScheduleOutcome {
            success: false,
            assignments: Vec::new(),
            issues: last_issues,
            warnings: Vec::new(),
            attempts: request.max_attempts,
        })
    }

    fn attempt<R: Rng + ?Sized>(
        &self,
        run: &Run<'_>,
        generator: &AssignmentGenerator<'_>,
        verifier: &AssignmentVerifier<'_>,
        rng: &mut R,
    ) -> AttemptResult {
        let generated = generator.generate(rng);
        let mut schedule = generated.schedule;

        let mut warnings = Vec::new();
        if generated.starting_rooms.unplaced > 0 {
            warnings.push(Issue::under_capacity(
                generated.starting_rooms.unplaced,
                run.layout.total_capacity(),
                run.judges.len(),
            ));
        }

        let report = verifier.verify(&schedule);

        if !report.over_judged.is_empty() {
            return AttemptResult::Rejected(report.blocking_issues());
        }

        if !report.under_judged.is_empty() {
            let repair = self.repair.run(&mut schedule, &report.under_judged);
            tracing::debug!(
                placed = repair.placements.len(),
                unresolved = repair.unresolved.len(),
                "repair pass finished"
            );

            let recheck = verifier.verify(&schedule);
            if recheck.is_success() {
                warnings.extend(recheck.warnings());
                return AttemptResult::Accepted { schedule, warnings };
            }
            return AttemptResult::Rejected(run.unresolved_issues(&recheck));
        }

        if report.is_success() {
            warnings.extend(report.warnings());
            AttemptResult::Accepted { schedule, warnings }
        } else {
            AttemptResult::Rejected(report.blocking_issues())
        }
    }
}

impl Run<'_> {
    fn sheets(&self, schedule: &Schedule) -> Vec<JudgeAssignment> {
        self.judges
            .iter()
            .map(|judge| JudgeAssignment {
                judge_display_name: judge.display_name.clone(),
                ordered_table_numbers: schedule.tables_for(judge.id),
                slots: schedule.row(judge.id).iter().map(|s| s.table()).collect(),
            })
            .collect()
    }

    /// Blocking issues after repair, with leftover deficits as `SchedulingDeficit`.
    fn unresolved_issues(&self, recheck: &VerificationReport) -> Vec<Issue> {
        let required = self.request.judgings_per_project;
        let mut issues: Vec<Issue> = recheck
            .under_judged
            .iter()
            .map(|d| {
                let name = self.names.get(&d.table).copied().unwrap_or_default();
                Issue::scheduling_deficit(d.table, name, d.delta, required)
            })
            .collect();
        issues.extend(
            recheck
                .blocking_issues()
                .into_iter()
                .filter(|i| i.kind != IssueKind::UnderJudged),
        );
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Project;
    use crate::validation::ConfigErrorKind;

    fn projects(n: u32) -> Vec<Project> {
        (1..=n).map(|t| Project::new(format!("P{t}"), t)).collect()
    }

    #[test]
    fn test_single_room_success() {
        let request = ScheduleRequest::new(projects(6), ["A", "B"], 1, 1).with_seed(1);
        let outcome = JudgingScheduler::new().generate_schedule(&request).unwrap();

        assert!(outcome.success);
        assert_eq!(outcome.attempts, 1);
        assert!(outcome.issues.is_empty());
        assert_eq!(outcome.assignments[0].ordered_table_numbers, vec![1, 2, 3]);
        assert_eq!(outcome.assignments[1].ordered_table_numbers, vec![4, 5, 6]);
    }

    #[test]
    fn test_config_error_before_any_attempt() {
        let request =
            ScheduleRequest::new(projects(4), ["A"], 1, 3).with_room_capacities(vec![1, 1]);
        let err = JudgingScheduler::new().generate_schedule(&request).unwrap_err();
        assert!(err.contains(ConfigErrorKind::RoomCapacityMismatch));
    }

    #[test]
    fn test_unrepairable_deficit_fails_after_all_attempts() {
        crate::logging::init_test();
        let request = ScheduleRequest::new(projects(1), ["Solo"], 3, 1)
            .with_max_attempts(3)
            .with_seed(2);
        let outcome = JudgingScheduler::new().generate_schedule(&request).unwrap();

        assert!(!outcome.success);
        assert!(outcome.assignments.is_empty());
        assert_eq!(outcome.attempts, 3);
        assert_eq!(outcome.issues.len(), 1);
        assert_eq!(outcome.issues[0].kind, IssueKind::SchedulingDeficit);
        assert!(outcome.issues[0].message.contains("short 2"));
    }

    #[test]
    fn test_shared_first_table_is_never_accepted() {
        // One project, K = 2: whichever second judge takes table 1 would list it
        // first, just like judge 0, so no valid schedule exists.
        let request = ScheduleRequest::new(projects(1), ["A", "B", "C"], 2, 1)
            .with_max_attempts(3)
            .with_seed(4);
        let outcome = JudgingScheduler::new().generate_schedule(&request).unwrap();

        assert!(!outcome.success);
        assert_eq!(outcome.issues.len(), 1);
        assert_eq!(outcome.issues[0].kind, IssueKind::SchedulingDeficit);
        assert!(outcome.issues[0].message.contains("short 1"));
    }

    #[test]
    fn test_second_judge_starts_elsewhere() {
        // Two projects, two judges, K = 2: judge 1 may not start at judge 0's
        // first table, so it takes that table second.
        let request = ScheduleRequest::new(projects(2), ["A", "B"], 2, 1).with_seed(4);
        let outcome = JudgingScheduler::new().generate_schedule(&request).unwrap();

        assert!(outcome.success, "issues: {:?}", outcome.issue_messages());
        let firsts: Vec<u32> = outcome
            .assignments
            .iter()
            .filter_map(|a| a.ordered_table_numbers.first().copied())
            .collect();
        assert_eq!(firsts.len(), 2);
        assert_ne!(firsts[0], firsts[1]);
        for sheet in &outcome.assignments {
            let mut tables = sheet.ordered_table_numbers.clone();
            tables.sort_unstable();
            assert_eq!(tables, vec![1, 2]);
        }
    }

    #[test]
    fn test_huge_judging_count_reports_deficit() {
        let request = ScheduleRequest::new(projects(2), ["A"], usize::MAX / 2 + 1, 1)
            .with_max_attempts(2)
            .with_seed(1);
        let outcome = JudgingScheduler::new().generate_schedule(&request).unwrap();

        assert!(!outcome.success);
        assert_eq!(outcome.attempts, 2);
        assert_eq!(outcome.issues.len(), 2);
        assert!(outcome
            .issues
            .iter()
            .all(|i| i.kind == IssueKind::SchedulingDeficit));
    }

    #[test]
    fn test_under_capacity_is_a_warning() {
        let request = ScheduleRequest::new(projects(2), ["A", "B", "C", "D"], 1, 1).with_seed(8);
        let outcome = JudgingScheduler::new().generate_schedule(&request).unwrap();

        assert!(outcome.success);
        assert!(outcome
            .warnings
            .iter()
            .any(|w| w.kind == IssueKind::UnderCapacity));
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let request = ScheduleRequest::new(projects(20), (0..6).map(|i| format!("J{i}")), 2, 3)
            .with_seed(99);
        let a = JudgingScheduler::new().generate_schedule(&request).unwrap();
        let b = JudgingScheduler::new().generate_schedule(&request).unwrap();
        assert_eq!(a.assignments, b.assignments);
    }
}
