//! Schedule verification.
//!
//! Recomputes every invariant from the raw cells of a schedule. Nothing
//! the generator or repair pass tracked is trusted. Checks:
//! 1. Each project is judged exactly `judgings_per_project` times
//! 2. No table is held by two judges at the same slot
//! 3. No judge holds a table twice
//! 4. No two judges start at the same table (first non-idle cell)
//! 5. Every judge's load is within ±2 of the mean (warning only)
//!
//! Verification is pure: the same schedule always yields the same report.

use std::collections::{BTreeMap, HashMap};

use crate::models::{Issue, Judge, Project, Schedule, TableNumber};

use super::kpi::{WorkloadKpi, MAX_WORKLOAD_DEVIATION};

/// Judging-count discrepancy of one project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountDiscrepancy {
    pub table: TableNumber,
    /// Judgings found.
    pub count: usize,
    /// Distance from the required count.
    pub delta: usize,
}

/// Everything the verifier found in one schedule.
#[derive(Debug, Clone, PartialEq)]
pub struct VerificationReport {
    /// Projects judged too few times (`delta` = still needed).
    pub under_judged: Vec<CountDiscrepancy>,
    /// Projects judged too often (`delta` = excess).
    pub over_judged: Vec<CountDiscrepancy>,
    /// Judging-count issues, in project order.
    pub count_issues: Vec<Issue>,
    /// Same table at the same slot for several judges.
    pub simultaneous: Vec<Issue>,
    /// Same table twice for one judge.
    pub duplicates: Vec<Issue>,
    /// Same starting table for several judges.
    pub start_collisions: Vec<Issue>,
    /// Judges too far from the mean load.
    pub workload: Vec<Issue>,
    /// Workload indicators behind the workload check.
    pub kpi: WorkloadKpi,
}

impl VerificationReport {
    /// Whether every project is judged exactly the required number of times.
    pub fn judging_count_exact(&self) -> bool {
        self.under_judged.is_empty() && self.over_judged.is_empty()
    }

    /// Whether the slot, duplicate and start checks all pass.
    pub fn collision_free(&self) -> bool {
        self.simultaneous.is_empty()
            && self.duplicates.is_empty()
            && self.start_collisions.is_empty()
    }

    /// Whether the schedule satisfies every hard invariant.
    pub fn is_success(&self) -> bool {
        self.judging_count_exact() && self.collision_free()
    }

    /// Blocking issues, in check order.
    pub fn blocking_issues(&self) -> Vec<Issue> {
        self.count_issues
            .iter()
            .chain(&self.simultaneous)
            .chain(&self.duplicates)
            .chain(&self.start_collisions)
            .cloned()
            .collect()
    }

    /// Non-blocking issues.
    pub fn warnings(&self) -> Vec<Issue> {
        self.workload.clone()
    }

    /// Every issue, blocking first.
    pub fn issues(&self) -> Vec<Issue> {
        let mut issues = self.blocking_issues();
        issues.extend(self.warnings());
        issues
    }
}

/// Checks completed schedules against the judging invariants.
#[derive(Debug, Clone)]
pub struct AssignmentVerifier<'a> {
    projects: &'a [Project],
    judges: &'a [Judge],
    judgings_per_project: usize,
}

impl<'a> AssignmentVerifier<'a> {
    pub fn new(projects: &'a [Project], judges: &'a [Judge], judgings_per_project: usize) -> Self {
        Self {
            projects,
            judges,
            judgings_per_project,
        }
    }

    /// Runs every check.
    pub fn verify(&self, schedule: &Schedule) -> VerificationReport {
        let (under_judged, over_judged, count_issues) = self.check_judging_count(schedule);
        let kpi = WorkloadKpi::calculate(schedule);
        let workload = self.check_workload(&kpi);

        VerificationReport {
            under_judged,
            over_judged,
            count_issues,
            simultaneous: self.check_simultaneous(schedule),
            duplicates: self.check_duplicates(schedule),
            start_collisions: self.check_start_collisions(schedule),
            workload,
            kpi,
        }
    }

    fn judge_name(&self, judge: usize) -> String {
        self.judges
            .get(judge)
            .map(|j| j.display_name.clone())
            .unwrap_or_else(|| format!("#{}", judge + 1))
    }

    fn check_judging_count(
        &self,
        schedule: &Schedule,
    ) -> (Vec<CountDiscrepancy>, Vec<CountDiscrepancy>, Vec<Issue>) {
        let mut counts: HashMap<TableNumber, usize> = HashMap::new();
        for table in schedule.rows().iter().flatten().filter_map(|s| s.table()) {
            *counts.entry(table).or_insert(0) += 1;
        }

        let required = self.judgings_per_project;
        let mut under = Vec::new();
        let mut over = Vec::new();
        let mut issues = Vec::new();

        for project in self.projects {
            let table = project.table_number;
            let count = counts.get(&table).copied().unwrap_or(0);
            if count < required {
                issues.push(Issue::under_judged(table, &project.display_name, count, required));
                under.push(CountDiscrepancy {
                    table,
                    count,
                    delta: required - count,
                });
            } else if count > required {
                issues.push(Issue::over_judged(table, &project.display_name, count, required));
                over.push(CountDiscrepancy {
                    table,
                    count,
                    delta: count - required,
                });
            }
        }

        (under, over, issues)
    }

    fn check_simultaneous(&self, schedule: &Schedule) -> Vec<Issue> {
        let mut issues = Vec::new();

        for slot in 0..schedule.max_slots() {
            let mut seen: BTreeMap<TableNumber, usize> = BTreeMap::new();
            for judge in 0..schedule.num_judges() {
                if let Some(table) = schedule.get(judge, slot).table() {
                    *seen.entry(table).or_insert(0) += 1;
                }
            }
            let duplicates: Vec<TableNumber> = seen
                .into_iter()
                .filter(|&(_, n)| n > 1)
                .map(|(t, _)| t)
                .collect();
            if !duplicates.is_empty() {
                issues.push(Issue::simultaneous_judging(slot, &duplicates));
            }
        }

        issues
    }

    fn check_duplicates(&self, schedule: &Schedule) -> Vec<Issue> {
        let mut issues = Vec::new();

        for (judge, row) in schedule.rows().iter().enumerate() {
            let mut seen: BTreeMap<TableNumber, usize> = BTreeMap::new();
            for table in row.iter().filter_map(|s| s.table()) {
                *seen.entry(table).or_insert(0) += 1;
            }
            let name = self.judge_name(judge);
            issues.extend(
                seen.into_iter()
                    .filter(|&(_, n)| n > 1)
                    .map(|(t, n)| Issue::duplicate_assignment(t, &name, n)),
            );
        }

        issues
    }

    fn check_start_collisions(&self, schedule: &Schedule) -> Vec<Issue> {
        let mut starts: BTreeMap<TableNumber, Vec<String>> = BTreeMap::new();
        for judge in 0..schedule.num_judges() {
            if let Some((_, table)) = schedule.first_table(judge) {
                starts.entry(table).or_default().push(self.judge_name(judge));
            }
        }

        starts
            .into_iter()
            .filter(|(_, names)| names.len() > 1)
            .map(|(table, names)| {
                let names: Vec<&str> = names.iter().map(String::as_str).collect();
                Issue::start_collision(table, &names)
            })
            .collect()
    }

    fn check_workload(&self, kpi: &WorkloadKpi) -> Vec<Issue> {
        kpi.outliers(MAX_WORKLOAD_DEVIATION)
            .into_iter()
            .map(|judge| {
                Issue::workload_imbalance(&self.judge_name(judge), kpi.loads[judge], kpi.mean_load)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{IssueKind, Slot};

    fn projects(n: u32) -> Vec<Project> {
        (1..=n).map(|t| Project::new(format!("P{t}"), t)).collect()
    }

    fn rows(rows: &[&[u32]]) -> Schedule {
        Schedule::from_rows(
            rows.iter()
                .map(|r| {
                    r.iter()
                        .map(|&t| if t == 0 { Slot::Idle } else { Slot::Table(t) })
                        .collect()
                })
                .collect(),
        )
    }

    #[test]
    fn test_valid_schedule() {
        let p = projects(4);
        let j = Judge::roster(["A", "B"]);
        let verifier = AssignmentVerifier::new(&p, &j, 1);

        let report = verifier.verify(&rows(&[&[1, 2], &[3, 4]]));
        assert!(report.is_success());
        assert!(report.issues().is_empty());
    }

    #[test]
    fn test_under_and_over_judged() {
        let p = projects(3);
        let j = Judge::roster(["A", "B"]);
        let verifier = AssignmentVerifier::new(&p, &j, 1);

        // 1 judged twice, 3 never
        let report = verifier.verify(&rows(&[&[1, 2], &[0, 1]]));
        assert_eq!(
            report.over_judged,
            vec![CountDiscrepancy { table: 1, count: 2, delta: 1 }]
        );
        assert_eq!(
            report.under_judged,
            vec![CountDiscrepancy { table: 3, count: 0, delta: 1 }]
        );
        assert_eq!(report.count_issues.len(), 2);
        assert!(!report.is_success());
    }

    #[test]
    fn test_simultaneous_judging() {
        let p = projects(3);
        let j = Judge::roster(["A", "B"]);
        let verifier = AssignmentVerifier::new(&p, &j, 2);

        let report = verifier.verify(&rows(&[&[1, 2, 3], &[3, 2, 1]]));
        assert_eq!(report.simultaneous.len(), 1);
        assert_eq!(report.simultaneous[0].kind, IssueKind::SimultaneousJudging);
        assert_eq!(report.simultaneous[0].table, Some(2));
        assert!(report.judging_count_exact());
        assert!(!report.collision_free());
    }

    #[test]
    fn test_start_collision() {
        let p = projects(2);
        let j = Judge::roster(["Ada", "Grace"]);
        let verifier = AssignmentVerifier::new(&p, &j, 2);

        let report = verifier.verify(&rows(&[&[1, 2], &[1, 0, 2]]));
        assert_eq!(report.start_collisions.len(), 1);
        assert_eq!(
            report.start_collisions[0].message,
            "Multiple judges start at Table 1: Ada, Grace"
        );
    }

    #[test]
    fn test_start_collision_after_leading_idle() {
        // Grace idles first, but her first table is still Ada's starting table
        let p = projects(2);
        let j = Judge::roster(["Ada", "Grace"]);
        let verifier = AssignmentVerifier::new(&p, &j, 1);

        let report = verifier.verify(&rows(&[&[1], &[0, 2]]));
        assert!(report.start_collisions.is_empty());

        let p = projects(1);
        let verifier = AssignmentVerifier::new(&p, &j, 2);
        let report = verifier.verify(&rows(&[&[1], &[0, 1]]));
        assert!(report.judging_count_exact());
        assert!(report.simultaneous.is_empty());
        assert_eq!(
            report.start_collisions[0].message,
            "Multiple judges start at Table 1: Ada, Grace"
        );
        assert!(!report.is_success());
    }

    #[test]
    fn test_idle_start_is_not_a_collision() {
        let p = projects(2);
        let j = Judge::roster(["A", "B"]);
        let verifier = AssignmentVerifier::new(&p, &j, 1);

        let report = verifier.verify(&rows(&[&[0, 1], &[0, 0, 2]]));
        assert!(report.start_collisions.is_empty());
        assert!(report.is_success());
    }

    #[test]
    fn test_duplicate_assignment() {
        let p = projects(2);
        let j = Judge::roster(["A"]);
        let verifier = AssignmentVerifier::new(&p, &j, 2);

        let report = verifier.verify(&rows(&[&[1, 2, 1, 2]]));
        assert_eq!(report.duplicates.len(), 2);
        assert!(report.judging_count_exact());
        assert!(!report.is_success());
    }

    #[test]
    fn test_workload_is_warning_only() {
        let p = projects(8);
        let j = Judge::roster(["A", "B"]);
        let verifier = AssignmentVerifier::new(&p, &j, 1);

        // loads 7 and 1, mean 4
        let report = verifier.verify(&rows(&[
            &[1, 2, 3, 4, 5, 6, 7],
            &[0, 0, 0, 0, 0, 0, 0, 8],
        ]));
        assert_eq!(report.workload.len(), 2);
        assert!(report.is_success());
        assert_eq!(report.warnings().len(), 2);
        assert!(report.blocking_issues().is_empty());
    }

    #[test]
    fn test_verification_is_idempotent() {
        let p = projects(5);
        let j = Judge::roster(["A", "B", "C"]);
        let verifier = AssignmentVerifier::new(&p, &j, 2);
        let schedule = rows(&[&[1, 2, 3], &[1, 4, 0], &[5, 2, 2]]);

        let first = verifier.verify(&schedule);
        let second = verifier.verify(&schedule);
        assert_eq!(first.issues(), second.issues());
        assert_eq!(first, second);
    }
}
