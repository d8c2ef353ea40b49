//! Schedule (solution) model.
//!
//! A schedule is a matrix indexed by (judge, slot). Each judge owns a
//! growable row of [`Slot`]s; slot `s` of every row is the same
//! synchronized time step. Rows may differ in length: a missing cell
//! behaves like an idle one.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::{JudgeId, TableNumber};

/// One schedule cell: a table to judge, or nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Slot {
    /// No project at this time step.
    Idle,
    /// Judge the project at this table.
    Table(TableNumber),
}

impl Slot {
    /// The table, if not idle.
    #[inline]
    pub fn table(self) -> Option<TableNumber> {
        match self {
            Slot::Idle => None,
            Slot::Table(t) => Some(t),
        }
    }

    /// Whether no table is assigned.
    #[inline]
    pub fn is_idle(self) -> bool {
        matches!(self, Slot::Idle)
    }
}

/// A complete judge × slot schedule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    rows: Vec<Vec<Slot>>,
}

impl Schedule {
    /// Creates a schedule with an empty row per judge.
    pub fn new(num_judges: usize) -> Self {
        Self {
            rows: vec![Vec::new(); num_judges],
        }
    }

    /// Creates a schedule from raw rows.
    pub fn from_rows(rows: Vec<Vec<Slot>>) -> Self {
        Self { rows }
    }

    /// All rows, indexed by judge id.
    pub fn rows(&self) -> &[Vec<Slot>] {
        &self.rows
    }

    /// One judge's row.
    pub fn row(&self, judge: JudgeId) -> &[Slot] {
        self.rows.get(judge).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Replaces a judge's row.
    pub fn set_row(&mut self, judge: JudgeId, row: Vec<Slot>) {
        if judge >= self.rows.len() {
            self.rows.resize(judge + 1, Vec::new());
        }
        self.rows[judge] = row;
    }

    /// Number of judges.
    pub fn num_judges(&self) -> usize {
        self.rows.len()
    }

    /// Length of the longest row.
    pub fn max_slots(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Cell at (judge, slot); out-of-range cells are idle.
    pub fn get(&self, judge: JudgeId, slot: usize) -> Slot {
        self.rows
            .get(judge)
            .and_then(|row| row.get(slot))
            .copied()
            .unwrap_or(Slot::Idle)
    }

    /// Overwrites an existing cell. Returns `false` if out of range.
    pub fn set(&mut self, judge: JudgeId, slot: usize, value: Slot) -> bool {
        match self.rows.get_mut(judge).and_then(|row| row.get_mut(slot)) {
            Some(cell) => {
                *cell = value;
                true
            }
            None => false,
        }
    }

    /// Appends a cell to a judge's row, returning its slot index.
    pub fn push(&mut self, judge: JudgeId, value: Slot) -> usize {
        if judge >= self.rows.len() {
            self.rows.resize(judge + 1, Vec::new());
        }
        let row = &mut self.rows[judge];
        row.push(value);
        row.len() - 1
    }

    /// Whether a judge holds the table anywhere in its row.
    pub fn judge_has(&self, judge: JudgeId, table: TableNumber) -> bool {
        self.row(judge).contains(&Slot::Table(table))
    }

    /// Non-idle cells of a judge.
    pub fn load(&self, judge: JudgeId) -> usize {
        self.row(judge).iter().filter(|s| !s.is_idle()).count()
    }

    /// Number of judges holding the table.
    pub fn judged_count(&self, table: TableNumber) -> usize {
        self.rows
            .iter()
            .flatten()
            .filter(|&&s| s == Slot::Table(table))
            .count()
    }

    /// Slot and table of a judge's first non-idle cell.
    ///
    /// This is the table a judge visits first, whatever idle slots precede it.
    pub fn first_table(&self, judge: JudgeId) -> Option<(usize, TableNumber)> {
        self.row(judge)
            .iter()
            .enumerate()
            .find_map(|(slot, cell)| cell.table().map(|t| (slot, t)))
    }

    /// A judge's tables in slot order, idle cells dropped.
    pub fn tables_for(&self, judge: JudgeId) -> Vec<TableNumber> {
        self.row(judge).iter().filter_map(|s| s.table()).collect()
    }

    /// Total non-idle cells.
    pub fn assignment_count(&self) -> usize {
        self.rows.iter().flatten().filter(|s| !s.is_idle()).count()
    }
}

/// Slot index → tables occupied at that time step.
///
/// Built incrementally while generating and repairing so collision lookups
/// do not rescan every judge's row.
#[derive(Debug, Clone, Default)]
pub struct SlotOccupancy {
    slots: Vec<HashSet<TableNumber>>,
}

impl SlotOccupancy {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Indexes every non-idle cell of a schedule.
    pub fn from_schedule(schedule: &Schedule) -> Self {
        let mut occupancy = Self::new();
        for row in schedule.rows() {
            for (slot, cell) in row.iter().enumerate() {
                if let Some(table) = cell.table() {
                    occupancy.insert(slot, table);
                }
            }
        }
        occupancy
    }

    /// Whether the table is taken at the slot.
    pub fn is_occupied(&self, slot: usize, table: TableNumber) -> bool {
        self.slots.get(slot).is_some_and(|set| set.contains(&table))
    }

    /// Marks the table as taken at the slot.
    pub fn insert(&mut self, slot: usize, table: TableNumber) {
        if slot >= self.slots.len() {
            self.slots.resize_with(slot + 1, HashSet::new);
        }
        self.slots[slot].insert(table);
    }

    /// Tables taken at the slot.
    pub fn at(&self, slot: usize) -> Option<&HashSet<TableNumber>> {
        self.slots.get(slot)
    }
}
