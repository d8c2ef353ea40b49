//! In-place repair of under-judged projects.
//!
//! For each under-judged table, judges who have not seen it are tried in
//! id order. A judge takes the table in its first idle slot where no other
//! judge holds it; failing that, in the first slot past the end of its row
//! where no other judge holds it, padding the gap with idle cells. One
//! placement per judge.
//!
//! A placement that would become a judge's first table is refused when that
//! table is already another judge's first table, so no two judges ever walk
//! to the same table first.
//!
//! Over-judging cannot be repaired here; the caller regenerates instead.

use std::collections::HashSet;

use crate::models::{JudgeId, Schedule, Slot, SlotOccupancy, TableNumber};

use super::verifier::CountDiscrepancy;

/// Where a repair placement landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// An idle cell was overwritten.
    Filled { judge: JudgeId, slot: usize },
    /// The row was extended (idle-padded up to `slot`).
    Appended { judge: JudgeId, slot: usize },
}

/// Result of one repair pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepairOutcome {
    /// Placements made, in order.
    pub placements: Vec<(TableNumber, Placement)>,
    /// Deficits left over (`delta` = judgings still missing).
    pub unresolved: Vec<CountDiscrepancy>,
}

impl RepairOutcome {
    /// Whether every deficit was covered.
    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty()
    }
}

/// Tops up under-judged projects without regenerating.
#[derive(Debug, Clone, Copy, Default)]
pub struct RepairPass;

impl RepairPass {
    /// Creates a repair pass.
    pub fn new() -> Self {
        Self
    }

    /// Repairs `schedule` in place.
    pub fn run(&self, schedule: &mut Schedule, deficits: &[CountDiscrepancy]) -> RepairOutcome {
        let mut occupancy = SlotOccupancy::from_schedule(schedule);
        let mut leading: HashSet<TableNumber> = (0..schedule.num_judges())
            .filter_map(|j| schedule.first_table(j).map(|(_, t)| t))
            .collect();
        let mut outcome = RepairOutcome::default();

        for deficit in deficits {
            let table = deficit.table;
            let needed = deficit.delta;
            let mut added = 0;

            tracing::debug!(table, needed, "repairing under-judged table");

            for judge in 0..schedule.num_judges() {
                if added == needed {
                    break;
                }
                if schedule.judge_has(judge, table) {
                    continue;
                }
                if let Some(placement) =
                    self.place(schedule, &mut occupancy, &mut leading, judge, table)
                {
                    tracing::debug!(table, ?placement, "placed");
                    outcome.placements.push((table, placement));
                    added += 1;
                }
            }

            if added < needed {
                tracing::warn!(table, added, needed, "could not cover every missing judging");
                outcome.unresolved.push(CountDiscrepancy {
                    table,
                    count: deficit.count + added,
                    delta: needed - added,
                });
            }
        }

        outcome
    }

    fn place(
        &self,
        schedule: &mut Schedule,
        occupancy: &mut SlotOccupancy,
        leading: &mut HashSet<TableNumber>,
        judge: JudgeId,
        table: TableNumber,
    ) -> Option<Placement> {
        let first = schedule.first_table(judge);
        let may_lead = !leading.contains(&table);
        // Slots before the judge's current first table would make `table` its first.
        let allowed = |slot: usize| match first {
            Some((first_slot, _)) if slot > first_slot => true,
            _ => may_lead,
        };

        let idle = schedule
            .row(judge)
            .iter()
            .enumerate()
            .find(|&(slot, cell)| {
                cell.is_idle() && !occupancy.is_occupied(slot, table) && allowed(slot)
            })
            .map(|(slot, _)| slot);

        let placement = match idle {
            Some(slot) => {
                schedule.set(judge, slot, Slot::Table(table));
                Placement::Filled { judge, slot }
            }
            None => {
                let mut slot = schedule.row(judge).len();
                if !allowed(slot) {
                    return None;
                }
                while occupancy.is_occupied(slot, table) {
                    slot += 1;
                }
                while schedule.row(judge).len() < slot {
                    schedule.push(judge, Slot::Idle);
                }
                schedule.push(judge, Slot::Table(table));
                Placement::Appended { judge, slot }
            }
        };

        let slot = match placement {
            Placement::Filled { slot, .. } | Placement::Appended { slot, .. } => slot,
        };
        occupancy.insert(slot, table);

        match first {
            Some((first_slot, old)) if slot < first_slot => {
                leading.remove(&old);
                leading.insert(table);
            }
            None => {
                leading.insert(table);
            }
            Some(_) => {}
        }

        Some(placement)
    }
}
