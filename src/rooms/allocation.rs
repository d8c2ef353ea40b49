//! Proportional starting-room allocation.
//!
//! # Algorithm
//!
//! 1. `ideal_r = capacity_r / total_capacity × judges`
//! 2. `base_r = min(floor(ideal_r), capacity_r)`
//! 3. Hand out the judges lost to flooring one at a time, largest
//!    fractional remainder first, skipping full rooms, until every judge
//!    is placed or every room is full.
//! 4. Shuffle the resulting start list so no judge id is favored.
//!
//! Judges that no room can take are reported as unplaced and given rooms
//! cyclically before the shuffle.
//!
//! # Reference
//! Balinski & Young (2001), "Fair Representation", Ch. 2 (Hamilton method)

use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::{RoomId, RoomLayout};

/// Starting room of every judge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartingRooms {
    /// Starting room per judge id.
    pub rooms: Vec<RoomId>,
    /// Judges allocated to each room within capacity.
    pub per_room: Vec<usize>,
    /// Judges placed beyond total room capacity.
    pub unplaced: usize,
}

impl StartingRooms {
    /// Starting room of a judge.
    pub fn room_for(&self, judge: usize) -> Option<RoomId> {
        self.rooms.get(judge).copied()
    }
}

/// Distributes judges over rooms in proportion to room capacity.
#[derive(Debug, Clone, Copy, Default)]
pub struct RoomAllocator;

impl RoomAllocator {
    /// Creates an allocator.
    pub fn new() -> Self {
        Self
    }

    /// Judges per room, capped at each room's capacity.
    ///
    /// The sum may fall short of `num_judges` when rooms are saturated.
    pub fn judges_per_room(&self, num_judges: usize, layout: &RoomLayout) -> Vec<usize> {
        let rooms = layout.rooms();
        let total_capacity = layout.total_capacity();
        if total_capacity == 0 {
            return vec![0; rooms.len()];
        }

        let mut per_room = Vec::with_capacity(rooms.len());
        let mut fractions = Vec::with_capacity(rooms.len());
        let mut assigned = 0;

        for (idx, room) in rooms.iter().enumerate() {
            let ideal = room.capacity as f64 / total_capacity as f64 * num_judges as f64;
            let base = ideal.floor();
            let allocation = (base as usize).min(room.capacity);
            per_room.push(allocation);
            assigned += allocation;
            fractions.push((idx, ideal - base));
        }

        // Stable: equal remainders keep room order.
        fractions.sort_by(|a, b| b.1.total_cmp(&a.1));

        let mut remaining = num_judges.saturating_sub(assigned);
        while remaining > 0 {
            let mut placed_any = false;
            for &(idx, _) in &fractions {
                if remaining == 0 {
                    break;
                }
                if per_room[idx] < rooms[idx].capacity {
                    per_room[idx] += 1;
                    remaining -= 1;
                    placed_any = true;
                }
            }
            if !placed_any {
                break;
            }
        }

        per_room
    }

    /// Draws a starting room for every judge.
    pub fn starting_rooms<R: Rng + ?Sized>(
        &self,
        num_judges: usize,
        layout: &RoomLayout,
        rng: &mut R,
    ) -> StartingRooms {
        let per_room = self.judges_per_room(num_judges, layout);

        let mut rooms: Vec<RoomId> = per_room
            .iter()
            .enumerate()
            .flat_map(|(room, &count)| std::iter::repeat(room).take(count))
            .collect();

        let unplaced = num_judges.saturating_sub(rooms.len());
        if unplaced > 0 {
            tracing::warn!(
                unplaced,
                total_capacity = layout.total_capacity(),
                num_judges,
                "rooms cannot host every judge at the start"
            );
            let num_rooms = layout.len().max(1);
            rooms.extend((0..unplaced).map(|i| i % num_rooms));
        }

        rooms.shuffle(rng);

        StartingRooms {
            rooms,
            per_room,
            unplaced,
        }
    }
}
