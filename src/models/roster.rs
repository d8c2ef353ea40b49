//! Roster models: projects and judges.
//!
//! Both are loaded once per scheduling run and never change during it.
//! Projects are identified by their table number; judges by a sequential
//! 0-based id assigned in roster order.

use serde::{Deserialize, Serialize};

/// Table number identifying a project (positive, unique within an event).
pub type TableNumber = u32;

/// 0-based judge identifier (position in the judge roster).
pub type JudgeId = usize;

/// A project presented at a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Display name.
    pub display_name: String,
    /// Table number (identity).
    pub table_number: TableNumber,
}

/// A judge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Judge {
    /// Stable 0-based id.
    #[serde(default)]
    pub id: JudgeId,
    /// Display name.
    pub display_name: String,
}

impl Project {
    /// Creates a project at the given table.
    pub fn new(display_name: impl Into<String>, table_number: TableNumber) -> Self {
        Self {
            display_name: display_name.into(),
            table_number,
        }
    }
}

impl Judge {
    /// Creates a judge with the given id.
    pub fn new(id: JudgeId, display_name: impl Into<String>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
        }
    }

    /// Builds a roster from display names, assigning ids in order.
    pub fn roster<I, S>(names: I) -> Vec<Judge>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        names
            .into_iter()
            .enumerate()
            .map(|(id, name)| Judge::new(id, name))
            .collect()
    }
}
