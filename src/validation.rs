//! Input validation for judging runs.
//!
//! Checks a [`ScheduleRequest`] before any attempt is made. Detects:
//! - Empty project or judge rosters
//! - Non-positive judgings-per-project, room count or attempt bound
//! - Room capacity lists of the wrong length or with zero entries
//! - Zero or duplicate table numbers
//!
//! Every problem found is collected; nothing here is retried.

use std::collections::HashSet;
use thiserror::Error;

use crate::request::ScheduleRequest;

/// Validation result.
pub type ValidationResult = Result<(), ConfigErrors>;

/// A configuration error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ConfigError {
    /// Error category.
    pub kind: ConfigErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of configuration errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigErrorKind {
    /// No projects were given.
    NoProjects,
    /// No judges were given.
    NoJudges,
    /// Judgings per project is zero.
    InvalidJudgingsPerProject,
    /// Room count is zero.
    InvalidRoomCount,
    /// Capacity list length differs from the room count.
    RoomCapacityMismatch,
    /// A room capacity is zero.
    InvalidRoomCapacity,
    /// A table number is zero.
    InvalidTableNumber,
    /// Two projects share a table number.
    DuplicateTableNumber,
    /// Attempt bound is zero.
    InvalidMaxAttempts,
}

/// All configuration errors found in one request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid judging configuration: {}", joined_messages(.0))]
pub struct ConfigErrors(pub Vec<ConfigError>);

impl ConfigErrors {
    /// Whether any error has the given kind.
    pub fn contains(&self, kind: ConfigErrorKind) -> bool {
        self.0.iter().any(|e| e.kind == kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConfigError> {
        self.0.iter()
    }
}

fn joined_messages(errors: &[ConfigError]) -> String {
    let messages: Vec<&str> = errors.iter().map(|e| e.message.as_str()).collect();
    messages.join("; ")
}

impl ConfigError {
    pub(crate) fn new(kind: ConfigErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a scheduling request.
///
/// Checks:
/// 1. At least one project and one judge
/// 2. Judgings per project, room count and attempt bound are positive
/// 3. Explicit room capacities, if given, match the room count and are positive
/// 4. Table numbers are positive and unique
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_request(request: &ScheduleRequest) -> ValidationResult {
    let mut errors = Vec::new();

    if request.projects.is_empty() {
        errors.push(ConfigError::new(
            ConfigErrorKind::NoProjects,
            "No projects provided",
        ));
    }
    if request.judges.is_empty() {
        errors.push(ConfigError::new(ConfigErrorKind::NoJudges, "No judges provided"));
    }
    if request.judgings_per_project == 0 {
        errors.push(ConfigError::new(
            ConfigErrorKind::InvalidJudgingsPerProject,
            "Invalid judgingsPerProject value: must be at least 1",
        ));
    }
    if request.num_rooms == 0 {
        errors.push(ConfigError::new(
            ConfigErrorKind::InvalidRoomCount,
            "Invalid numRooms value: must be at least 1",
        ));
    }
    if request.max_attempts == 0 {
        errors.push(ConfigError::new(
            ConfigErrorKind::InvalidMaxAttempts,
            "Invalid maxAttempts value: must be at least 1",
        ));
    }

    if let Some(capacities) = &request.room_capacities {
        if capacities.len() != request.num_rooms {
            errors.push(ConfigError::new(
                ConfigErrorKind::RoomCapacityMismatch,
                format!(
                    "roomCapacities has {} entries but numRooms is {}",
                    capacities.len(),
                    request.num_rooms
                ),
            ));
        }
        for (i, &cap) in capacities.iter().enumerate() {
            if cap == 0 {
                errors.push(ConfigError::new(
                    ConfigErrorKind::InvalidRoomCapacity,
                    format!("Room {} has zero capacity", i + 1),
                ));
            }
        }
    }

    let mut tables = HashSet::new();
    for project in &request.projects {
        if project.table_number == 0 {
            errors.push(ConfigError::new(
                ConfigErrorKind::InvalidTableNumber,
                format!("Project \"{}\" has no valid tableNumber", project.display_name),
            ));
        } else if !tables.insert(project.table_number) {
            errors.push(ConfigError::new(
                ConfigErrorKind::DuplicateTableNumber,
                format!("Duplicate tableNumber: {}", project.table_number),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigErrors(errors))
    }
}
