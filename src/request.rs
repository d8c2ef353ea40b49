//! Request and outcome of a judging run.
//!
//! [`ScheduleRequest`] is everything a caller supplies; [`ScheduleOutcome`]
//! is everything handed back. Both serialize with camelCase field names so
//! they can cross a JSON boundary unchanged.

use serde::{Deserialize, Serialize};

use crate::models::{Issue, Judge, Project, TableNumber};

/// Default bound on regeneration attempts.
pub const DEFAULT_MAX_ATTEMPTS: usize = 10;

fn default_max_attempts() -> usize {
    DEFAULT_MAX_ATTEMPTS
}

/// Input for [`JudgingScheduler::generate_schedule`](crate::scheduler::JudgingScheduler::generate_schedule).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRequest {
    /// Projects to judge.
    pub projects: Vec<Project>,
    /// Judges, in roster order. Ids are reassigned from this order.
    pub judges: Vec<Judge>,
    /// Distinct judges required per project.
    pub judgings_per_project: usize,
    /// Number of physical rooms.
    pub num_rooms: usize,
    /// Per-room judge capacity; overrides even partitioning.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_capacities: Option<Vec<usize>>,
    /// Bound on regeneration attempts.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,
    /// Seed for the run-local random source. `None` = OS entropy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl ScheduleRequest {
    /// Creates a request with even room partitioning and default attempts.
    pub fn new<I, S>(
        projects: Vec<Project>,
        judge_names: I,
        judgings_per_project: usize,
        num_rooms: usize,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            projects,
            judges: Judge::roster(judge_names),
            judgings_per_project,
            num_rooms,
            room_capacities: None,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            seed: None,
        }
    }

    /// Sets explicit room capacities.
    pub fn with_room_capacities(mut self, capacities: Vec<usize>) -> Self {
        self.room_capacities = Some(capacities);
        self
    }

    /// Sets the attempt bound.
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Seeds the random source.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Total judgings the event needs, saturating at `usize::MAX`.
    pub fn total_judgings(&self) -> usize {
        self.projects.len().saturating_mul(self.judgings_per_project)
    }
}

/// One judge's sheet in an accepted schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JudgeAssignment {
    pub judge_display_name: String,
    /// Tables in visiting order, idle slots removed.
    pub ordered_table_numbers: Vec<TableNumber>,
    /// Slot-indexed row; `None` marks an idle slot.
    #[serde(default)]
    pub slots: Vec<Option<TableNumber>>,
}

/// Result of a judging run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleOutcome {
    /// Whether a schedule satisfying every hard invariant was found.
    pub success: bool,
    /// Per-judge sheets; empty on failure.
    pub assignments: Vec<JudgeAssignment>,
    /// Unresolved problems of the last attempt; empty on success.
    pub issues: Vec<Issue>,
    /// Soft problems of the accepted attempt.
    pub warnings: Vec<Issue>,
    /// Attempts used.
    pub attempts: usize,
}

impl ScheduleOutcome {
    /// Issue messages, one string each.
    pub fn issue_messages(&self) -> Vec<String> {
        self.issues.iter().map(ToString::to_string).collect()
    }

    /// Sheet of the named judge.
    pub fn assignment_for(&self, judge_display_name: &str) -> Option<&JudgeAssignment> {
        self.assignments
            .iter()
            .find(|a| a.judge_display_name == judge_display_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builder() {
        let request = ScheduleRequest::new(vec![Project::new("A", 1)], ["J1", "J2"], 3, 2)
            .with_room_capacities(vec![1, 1])
            .with_max_attempts(4)
            .with_seed(7);

        assert_eq!(request.judges[1].id, 1);
        assert_eq!(request.room_capacities, Some(vec![1, 1]));
        assert_eq!(request.max_attempts, 4);
        assert_eq!(request.seed, Some(7));
        assert_eq!(request.total_judgings(), 3);
    }

    #[test]
    fn test_total_judgings_saturates() {
        let projects = vec![Project::new("A", 1), Project::new("B", 2)];
        let request = ScheduleRequest::new(projects, ["J1"], usize::MAX / 2 + 1, 1);
        assert_eq!(request.total_judgings(), usize::MAX);
    }

    #[test]
    fn test_request_from_json_defaults() {
        let json = r#"{
            "projects": [{"displayName": "Rover", "tableNumber": 1}],
            "judges": [{"displayName": "Ada"}],
            "judgingsPerProject": 2,
            "numRooms": 1
        }"#;
        let request: ScheduleRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.max_attempts, DEFAULT_MAX_ATTEMPTS);
        assert_eq!(request.room_capacities, None);
        assert_eq!(request.seed, None);
        assert_eq!(request.judges[0].display_name, "Ada");
    }

    #[test]
    fn test_outcome_serializes_camel_case() {
        let outcome = ScheduleOutcome {
            success: true,
            assignments: vec![JudgeAssignment {
                judge_display_name: "Ada".into(),
                ordered_table_numbers: vec![3, 1],
                slots: vec![Some(3), None, Some(1)],
            }],
            ..Default::default()
        };
        let value = serde_json::to_value(&outcome).unwrap();
        assert_eq!(value["assignments"][0]["judgeDisplayName"], "Ada");
        assert_eq!(value["assignments"][0]["orderedTableNumbers"][1], 1);
        assert!(value["assignments"][0]["slots"][1].is_null());
        assert!(outcome.assignment_for("Ada").is_some());
        assert!(outcome.issue_messages().is_empty());
    }
}
