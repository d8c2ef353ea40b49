//! Greedy room-rotating assignment generator.
//!
//! # Algorithm
//!
//! Judges are processed in ascending id order. For each judge:
//! 1. Target = `floor(T / J)` plus one for the first `T mod J` judges,
//!    where `T = projects × judgings_per_project` and `J = judges`, capped
//!    at the number of projects.
//! 2. Visit every room once, starting from the judge's starting room and
//!    wrapping around. Each visit (phase) fills up to
//!    `min(ceil(max_per_judge / rooms), remaining_target)` slots.
//! 3. A table is eligible for a slot if no earlier judge holds it at that
//!    slot, this judge has not seen it, and it still needs judgings. Until
//!    the judge holds a table, tables another judge visits first are
//!    excluded too.
//!    In-room tables are preferred; other rooms are searched in order
//!    when the room has nothing left.
//! 4. The eligible table with the lowest judged count wins (first one on
//!    ties). No eligible table leaves the slot idle.
//!
//! Only the starting rooms are random; the rest is deterministic.
//!
//! # Complexity
//! O(J × S × R) where S = slots per judge, R = tables per room.

use rand::Rng;
use std::collections::{HashMap, HashSet};

use crate::models::{JudgeId, RoomId, RoomLayout, Schedule, Slot, SlotOccupancy, TableNumber};
use crate::rooms::{RoomAllocator, StartingRooms};

/// Run-scoped counters, rebuilt for every attempt.
#[derive(Debug, Clone, Default)]
struct Counters {
    judged: HashMap<TableNumber, usize>,
    assigned: Vec<usize>,
}

impl Counters {
    fn new(tables: impl Iterator<Item = TableNumber>, num_judges: usize) -> Self {
        Self {
            judged: tables.map(|t| (t, 0)).collect(),
            assigned: vec![0; num_judges],
        }
    }

    #[inline]
    fn judged(&self, table: TableNumber) -> usize {
        self.judged.get(&table).copied().unwrap_or(0)
    }

    fn record(&mut self, judge: JudgeId, table: TableNumber) {
        *self.judged.entry(table).or_insert(0) += 1;
        self.assigned[judge] += 1;
    }
}

/// Tables a judge may not take at a given slot.
struct Taken<'a> {
    occupancy: &'a SlotOccupancy,
    visited: &'a HashSet<TableNumber>,
    /// First tables of other judges; set only while this judge holds none.
    leading: Option<&'a HashSet<TableNumber>>,
}

impl Taken<'_> {
    fn is_free(&self, slot: usize, table: TableNumber) -> bool {
        !self.occupancy.is_occupied(slot, table)
            && !self.visited.contains(&table)
            && !self.leading.is_some_and(|l| l.contains(&table))
    }
}

/// One generated attempt.
#[derive(Debug, Clone)]
pub struct GeneratedSchedule {
    /// Judge × slot matrix.
    pub schedule: Schedule,
    /// Starting rooms drawn for this attempt.
    pub starting_rooms: StartingRooms,
    /// Per-judge target load.
    pub targets: Vec<usize>,
}

/// Builds one schedule attempt.
#[derive(Debug, Clone)]
pub struct AssignmentGenerator<'a> {
    layout: &'a RoomLayout,
    num_judges: usize,
    judgings_per_project: usize,
    allocator: RoomAllocator,
}

impl<'a> AssignmentGenerator<'a> {
    /// Creates a generator over a room layout.
    pub fn new(layout: &'a RoomLayout, num_judges: usize, judgings_per_project: usize) -> Self {
        Self {
            layout,
            num_judges,
            judgings_per_project,
            allocator: RoomAllocator::new(),
        }
    }

    fn num_projects(&self) -> usize {
        self.layout.rooms().iter().map(|r| r.tables.len()).sum()
    }

    fn total_judgings(&self) -> usize {
        self.num_projects().saturating_mul(self.judgings_per_project)
    }

    /// Target load of a judge: base share, plus one for the first
    /// `total mod judges` judges. Never more than the number of projects.
    pub fn target_for(&self, judge: JudgeId) -> usize {
        if self.num_judges == 0 {
            return 0;
        }
        let total = self.total_judgings();
        let base = total / self.num_judges;
        let extra = total % self.num_judges;
        (base + usize::from(judge < extra)).min(self.num_projects())
    }

    /// Largest target of any judge.
    pub fn max_per_judge(&self) -> usize {
        self.target_for(0)
    }

    /// Slots a judge fills per room visit.
    pub fn slots_per_phase(&self) -> usize {
        self.max_per_judge().div_ceil(self.layout.len().max(1))
    }

    /// Generates a fresh attempt: draws starting rooms, then fills slots.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> GeneratedSchedule {
        let starting_rooms = self
            .allocator
            .starting_rooms(self.num_judges, self.layout, rng);
        let schedule = self.generate_from(&starting_rooms.rooms);
        let targets = (0..self.num_judges).map(|j| self.target_for(j)).collect();

        GeneratedSchedule {
            schedule,
            starting_rooms,
            targets,
        }
    }

    /// Fills slots for fixed starting rooms.
    pub fn generate_from(&self, starting_rooms: &[RoomId]) -> Schedule {
        let num_rooms = self.layout.len();
        let slots_per_phase = self.slots_per_phase();
        let tables = self.layout.rooms().iter().flat_map(|r| r.tables.iter().copied());

        let mut counters = Counters::new(tables, self.num_judges);
        let mut occupancy = SlotOccupancy::new();
        let mut leading: HashSet<TableNumber> = HashSet::new();
        let mut schedule = Schedule::new(self.num_judges);

        for judge in 0..self.num_judges {
            let start = starting_rooms.get(judge).copied().unwrap_or(judge) % num_rooms.max(1);
            let mut remaining = self.target_for(judge);
            let mut visited: HashSet<TableNumber> = HashSet::new();
            let mut row: Vec<Slot> = Vec::new();

            for phase in 0..num_rooms {
                let current = (start + phase) % num_rooms;
                let mut pool: Vec<TableNumber> = self
                    .layout
                    .room(current)
                    .map(|r| r.tables.clone())
                    .unwrap_or_default();
                let slots_this_phase = slots_per_phase.min(remaining);

                for _ in 0..slots_this_phase {
                    let slot = row.len();
                    let taken = Taken {
                        occupancy: &occupancy,
                        visited: &visited,
                        leading: visited.is_empty().then_some(&leading),
                    };
                    let chosen = self
                        .pick(&pool, slot, &taken, &counters)
                        .or_else(|| self.pick_elsewhere(current, slot, &taken, &counters));

                    match chosen {
                        Some(table) => {
                            if visited.is_empty() {
                                leading.insert(table);
                            }
                            row.push(Slot::Table(table));
                            visited.insert(table);
                            occupancy.insert(slot, table);
                            counters.record(judge, table);
                            remaining -= 1;
                            pool.retain(|&t| t != table);
                        }
                        None => row.push(Slot::Idle),
                    }
                }
            }

            tracing::trace!(
                judge,
                start_room = start + 1,
                assigned = counters.assigned[judge],
                slots = row.len(),
                "judge row generated"
            );
            schedule.set_row(judge, row);
        }

        schedule
    }

    /// Least-judged eligible table in `candidates`, first on ties.
    fn pick(
        &self,
        candidates: &[TableNumber],
        slot: usize,
        taken: &Taken<'_>,
        counters: &Counters,
    ) -> Option<TableNumber> {
        candidates
            .iter()
            .copied()
            .filter(|&t| taken.is_free(slot, t) && counters.judged(t) < self.judgings_per_project)
            .min_by_key(|&t| counters.judged(t))
    }

    /// Falls back to the first other room with an eligible table.
    fn pick_elsewhere(
        &self,
        current: RoomId,
        slot: usize,
        taken: &Taken<'_>,
        counters: &Counters,
    ) -> Option<TableNumber> {
        self.layout
            .rooms()
            .iter()
            .filter(|room| room.id != current)
            .find_map(|room| self.pick(&room.tables, slot, taken, counters))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Project;
    use crate::rooms::partition_rooms;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn layout(num_projects: u32, num_rooms: usize, caps: Option<&[usize]>) -> RoomLayout {
        let projects: Vec<Project> = (1..=num_projects)
            .map(|t| Project::new(format!("P{t}"), t))
            .collect();
        partition_rooms(&projects, num_rooms, caps).unwrap()
    }

    fn assert_no_slot_collisions(schedule: &Schedule) {
        for slot in 0..schedule.max_slots() {
            let mut seen = HashSet::new();
            for judge in 0..schedule.num_judges() {
                if let Some(t) = schedule.get(judge, slot).table() {
                    assert!(seen.insert(t), "table {t} twice at slot {slot}");
                }
            }
        }
    }

    #[test]
    fn test_targets_front_loaded() {
        // 50 × 3 = 150 over 20 judges → 7 each, first 10 get 8
        let l = layout(50, 4, None);
        let generator = AssignmentGenerator::new(&l, 20, 3);
        assert_eq!(generator.target_for(0), 8);
        assert_eq!(generator.target_for(9), 8);
        assert_eq!(generator.target_for(10), 7);
        assert_eq!(generator.max_per_judge(), 8);
        assert_eq!(generator.slots_per_phase(), 2);
    }

    #[test]
    fn test_single_room_two_judges() {
        let l = layout(6, 1, None);
        let generator = AssignmentGenerator::new(&l, 2, 1);
        let schedule = generator.generate_from(&[0, 0]);

        assert_eq!(schedule.tables_for(0), vec![1, 2, 3]);
        assert_eq!(schedule.tables_for(1), vec![4, 5, 6]);
        assert_no_slot_collisions(&schedule);
    }

    #[test]
    fn test_lowest_count_preferred() {
        // Judge 0 takes 1..=4; judge 1 must avoid 1 at slot 0 and takes 2
        let l = layout(4, 1, None);
        let generator = AssignmentGenerator::new(&l, 2, 2);
        let schedule = generator.generate_from(&[0, 0]);

        assert_eq!(schedule.tables_for(0), vec![1, 2, 3, 4]);
        assert_eq!(schedule.get(1, 0), Slot::Table(2));
        assert_no_slot_collisions(&schedule);
    }

    #[test]
    fn test_never_exceeds_judgings_per_project() {
        let l = layout(12, 3, None);
        let generator = AssignmentGenerator::new(&l, 7, 2);
        let generated = generator.generate(&mut StdRng::seed_from_u64(3));

        for t in 1..=12 {
            assert!(generated.schedule.judged_count(t) <= 2);
        }
        assert_no_slot_collisions(&generated.schedule);
    }

    #[test]
    fn test_no_judge_repeats_a_table() {
        let l = layout(10, 2, None);
        let generator = AssignmentGenerator::new(&l, 4, 3);
        let generated = generator.generate(&mut StdRng::seed_from_u64(11));

        for judge in 0..4 {
            let tables = generated.schedule.tables_for(judge);
            let unique: HashSet<_> = tables.iter().collect();
            assert_eq!(unique.len(), tables.len());
        }
    }

    #[test]
    fn test_idle_when_nothing_eligible() {
        // One project, K = 2: judge 1 cannot share slot 0 with judge 0
        let l = layout(1, 1, None);
        let generator = AssignmentGenerator::new(&l, 2, 2);
        let schedule = generator.generate_from(&[0, 0]);

        assert_eq!(schedule.row(0), &[Slot::Table(1)]);
        assert_eq!(schedule.row(1), &[Slot::Idle]);
    }

    #[test]
    fn test_target_capped_at_project_count() {
        let l = layout(2, 1, None);
        let generator = AssignmentGenerator::new(&l, 1, usize::MAX / 2 + 1);
        assert_eq!(generator.target_for(0), 2);
        assert_eq!(generator.slots_per_phase(), 2);

        let schedule = generator.generate_from(&[0]);
        assert_eq!(schedule.row(0), &[Slot::Table(1), Slot::Table(2)]);
    }

    #[test]
    fn test_first_tables_are_distinct() {
        let l = layout(5, 2, None);
        let generator = AssignmentGenerator::new(&l, 6, 3);
        for seed in 0..20 {
            let generated = generator.generate(&mut StdRng::seed_from_u64(seed));
            let firsts: Vec<TableNumber> = (0..6)
                .filter_map(|j| generated.schedule.first_table(j).map(|(_, t)| t))
                .collect();
            let unique: HashSet<_> = firsts.iter().collect();
            assert_eq!(unique.len(), firsts.len(), "seed {seed}: {firsts:?}");
        }
    }

    #[test]
    fn test_leading_tables_only_bar_judges_without_a_table() {
        let occupancy = SlotOccupancy::new();
        let visited = HashSet::new();
        let leading: HashSet<TableNumber> = [4].into_iter().collect();

        let fresh = Taken {
            occupancy: &occupancy,
            visited: &visited,
            leading: Some(&leading),
        };
        assert!(!fresh.is_free(3, 4));
        assert!(fresh.is_free(3, 5));

        let started = Taken {
            occupancy: &occupancy,
            visited: &visited,
            leading: None,
        };
        assert!(started.is_free(3, 4));
    }

    #[test]
    fn test_falls_back_to_other_room() {
        // Room 0 has one table; a judge starting there with two slots takes the
        // second from room 1.
        let l = layout(3, 2, Some(&[1, 2]));
        let generator = AssignmentGenerator::new(&l, 1, 1);
        let schedule = generator.generate_from(&[0]);

        assert_eq!(schedule.tables_for(0), vec![1, 2, 3]);
    }

    #[test]
    fn test_generate_reports_targets_and_starts() {
        let l = layout(50, 4, Some(&[8, 12, 6, 10]));
        let generator = AssignmentGenerator::new(&l, 20, 3);
        let generated = generator.generate(&mut StdRng::seed_from_u64(5));

        assert_eq!(generated.targets.len(), 20);
        assert_eq!(generated.targets.iter().sum::<usize>(), 150);
        assert_eq!(generated.starting_rooms.rooms.len(), 20);
        assert_no_slot_collisions(&generated.schedule);
    }
}
