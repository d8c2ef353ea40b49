//! Synthetic rosters for trying the scheduler without real data.

use rand::seq::IndexedRandom;
use rand::Rng;

use crate::models::{Project, TableNumber};
use crate::request::ScheduleRequest;

const FIRST_NAMES: &[&str] = &[
    "John", "Jane", "Mary", "James", "Patricia", "Michael", "Linda", "Robert", "Elizabeth",
    "William", "Jessica", "David", "Sarah", "Thomas",
];

const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Rodriguez",
    "Martinez", "Hernandez", "Lopez", "Gonzalez", "Wilson",
];

/// Random "First Last" judge name.
pub fn judge_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    let first = FIRST_NAMES.choose(rng).copied().unwrap_or("Judge");
    let last = LAST_NAMES.choose(rng).copied().unwrap_or("Doe");
    format!("{first} {last}")
}

/// Random three-letter lowercase project name.
pub fn project_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..3).map(|_| char::from(rng.random_range(b'a'..=b'z'))).collect()
}

/// Builds a request with `num_judges` random judges and `num_projects`
/// projects at tables `1..=num_projects`.
///
/// Names may repeat; judges are still told apart by roster position.
pub fn demo_request<R: Rng + ?Sized>(
    num_judges: usize,
    num_projects: usize,
    judgings_per_project: usize,
    num_rooms: usize,
    rng: &mut R,
) -> ScheduleRequest {
    let judges: Vec<String> = (0..num_judges).map(|_| judge_name(rng)).collect();
    let projects: Vec<Project> = (1..=num_projects)
        .map(|t| Project::new(project_name(rng), t as TableNumber))
        .collect();

    ScheduleRequest::new(projects, judges, judgings_per_project, num_rooms)
}
