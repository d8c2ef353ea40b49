//! Scheduling issues.
//!
//! Problems found in a schedule are reported as values. Blocking issues
//! reject an attempt; the rest are warnings carried alongside an accepted
//! schedule.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::TableNumber;

/// A problem found while building or checking a schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Issue category.
    pub kind: IssueKind,
    /// Table concerned, when the issue is about a single project.
    pub table: Option<TableNumber>,
    /// Human-readable description.
    pub message: String,
}

/// Classification of scheduling issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IssueKind {
    /// A project is judged fewer times than required.
    UnderJudged,
    /// A project is judged more times than required.
    OverJudged,
    /// Two judges hold the same table at the same slot.
    SimultaneousJudging,
    /// A judge holds the same table more than once.
    DuplicateAssignment,
    /// Two judges start at the same table.
    StartCollision,
    /// A judge's load is too far from the mean.
    WorkloadImbalance,
    /// Rooms could not host every judge at the start.
    UnderCapacity,
    /// A project stayed under-judged after repair.
    SchedulingDeficit,
}

impl IssueKind {
    /// Whether this kind of issue rejects a schedule.
    pub fn is_blocking(self) -> bool {
        !matches!(self, IssueKind::WorkloadImbalance | IssueKind::UnderCapacity)
    }
}

impl Issue {
    fn new(kind: IssueKind, table: Option<TableNumber>, message: String) -> Self {
        Self {
            kind,
            table,
            message,
        }
    }

    /// Under-judged project.
    pub fn under_judged(table: TableNumber, name: &str, count: usize, required: usize) -> Self {
        Self::new(
            IssueKind::UnderJudged,
            Some(table),
            format!("Table {table} ({name}) is judged {count} times (should be {required})"),
        )
    }

    /// Over-judged project.
    pub fn over_judged(table: TableNumber, name: &str, count: usize, required: usize) -> Self {
        Self::new(
            IssueKind::OverJudged,
            Some(table),
            format!("Table {table} ({name}) is over-judged: {count} times (should be {required})"),
        )
    }

    /// Tables held by more than one judge at one slot.
    pub fn simultaneous_judging(slot: usize, tables: &[TableNumber]) -> Self {
        let list = join(tables.iter());
        Self::new(
            IssueKind::SimultaneousJudging,
            (tables.len() == 1).then(|| tables[0]),
            format!(
                "In Slot {}, tables {list} are being judged simultaneously by multiple judges",
                slot + 1
            ),
        )
    }

    /// Judge holding one table more than once.
    pub fn duplicate_assignment(table: TableNumber, judge_name: &str, times: usize) -> Self {
        Self::new(
            IssueKind::DuplicateAssignment,
            Some(table),
            format!("Judge {judge_name} is assigned Table {table} {times} times"),
        )
    }

    /// Several judges starting at one table.
    pub fn start_collision(table: TableNumber, judge_names: &[&str]) -> Self {
        Self::new(
            IssueKind::StartCollision,
            Some(table),
            format!(
                "Multiple judges start at Table {table}: {}",
                judge_names.join(", ")
            ),
        )
    }

    /// Judge load outside the allowed deviation.
    pub fn workload_imbalance(judge_name: &str, load: usize, mean: f64) -> Self {
        Self::new(
            IssueKind::WorkloadImbalance,
            None,
            format!("Judge {judge_name} has {load} projects (average is {mean:.1})"),
        )
    }

    /// Judges without room capacity at the start.
    pub fn under_capacity(unplaced: usize, total_capacity: usize, num_judges: usize) -> Self {
        Self::new(
            IssueKind::UnderCapacity,
            None,
            format!(
                "Rooms hold {total_capacity} judges at once but {num_judges} are judging; \
                 {unplaced} judge(s) start in an already full room"
            ),
        )
    }

    /// Residual shortfall after repair.
    pub fn scheduling_deficit(
        table: TableNumber,
        name: &str,
        shortfall: usize,
        required: usize,
    ) -> Self {
        Self::new(
            IssueKind::SchedulingDeficit,
            Some(table),
            format!(
                "Table {table} ({name}) is short {shortfall} judging(s) after repair \
                 (needs {required})"
            ),
        )
    }

    #[inline]
    pub fn is_blocking(&self) -> bool {
        self.kind.is_blocking()
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

fn join<T: fmt::Display>(items: impl Iterator<Item = T>) -> String {
    items.map(|t| t.to_string()).collect::<Vec<_>>().join(", ")
}
