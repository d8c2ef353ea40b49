//! Room model.
//!
//! A room is a physical space holding an ordered set of project tables.
//! Its capacity bounds how many judges may be present at once; it defaults
//! to the number of tables in the room.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::TableNumber;

/// 0-based room index within a [`RoomLayout`].
pub type RoomId = usize;

/// A judging room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Room index (0-based). Displayed 1-based.
    pub id: RoomId,
    /// Tables in this room, ascending.
    pub tables: Vec<TableNumber>,
    /// Maximum number of judges concurrently present.
    pub capacity: usize,
}

impl Room {
    /// Creates a room whose capacity equals its table count.
    pub fn new(id: RoomId, tables: Vec<TableNumber>) -> Self {
        let capacity = tables.len();
        Self {
            id,
            tables,
            capacity,
        }
    }

    /// Overrides the capacity.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// 1-based room number, as shown to people.
    #[inline]
    pub fn number(&self) -> usize {
        self.id + 1
    }

    /// Whether the room holds the given table.
    pub fn contains(&self, table: TableNumber) -> bool {
        self.tables.contains(&table)
    }

    /// Whether the room holds no tables.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

/// Ordered rooms of an event, with a table → room lookup.
#[derive(Debug, Clone, Default)]
pub struct RoomLayout {
    rooms: Vec<Room>,
    room_of: HashMap<TableNumber, RoomId>,
}

impl RoomLayout {
    /// Builds a layout from rooms indexed by their position.
    pub fn new(rooms: Vec<Room>) -> Self {
        let room_of = rooms
            .iter()
            .flat_map(|room| room.tables.iter().map(move |&t| (t, room.id)))
            .collect();
        Self { rooms, room_of }
    }

    /// All rooms, in order.
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// Number of rooms.
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    /// Whether the layout has no rooms.
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Room by index.
    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.get(id)
    }

    /// Owning room of a table.
    pub fn room_of(&self, table: TableNumber) -> Option<RoomId> {
        self.room_of.get(&table).copied()
    }

    /// Sum of room capacities.
    pub fn total_capacity(&self) -> usize {
        self.rooms.iter().map(|r| r.capacity).sum()
    }
}
