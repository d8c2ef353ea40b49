//! Room partitioning.
//!
//! Splits the project roster, sorted by table number, into contiguous room
//! groups: either `capacity[i]` tables per room when explicit capacities
//! are given, or `ceil(projects / rooms)` tables per room otherwise.

use crate::models::{Project, Room, RoomLayout, TableNumber};
use crate::validation::{ConfigError, ConfigErrorKind};

/// Partitions projects into rooms.
///
/// With explicit capacities, room `i` takes the next `capacities[i]`
/// tables and keeps `capacities[i]` as its judge capacity. Tables left
/// over once every room is filled go to the last room. Without them,
/// tables are cut into `num_rooms` chunks of `ceil(n / num_rooms)` and
/// each room's capacity is its table count.
///
/// # Errors
/// `InvalidRoomCount` if `num_rooms` is zero, `NoProjects` if there are no
/// projects, `RoomCapacityMismatch` if the capacity list length differs
/// from `num_rooms`.
pub fn partition_rooms(
    projects: &[Project],
    num_rooms: usize,
    capacities: Option<&[usize]>,
) -> Result<RoomLayout, ConfigError> {
    if num_rooms == 0 {
        return Err(ConfigError::new(
            ConfigErrorKind::InvalidRoomCount,
            "Invalid numRooms value: must be at least 1",
        ));
    }
    if projects.is_empty() {
        return Err(ConfigError::new(
            ConfigErrorKind::NoProjects,
            "No projects provided",
        ));
    }

    let mut tables: Vec<TableNumber> = projects.iter().map(|p| p.table_number).collect();
    tables.sort_unstable();

    let rooms = match capacities {
        Some(caps) if caps.len() != num_rooms => {
            return Err(ConfigError::new(
                ConfigErrorKind::RoomCapacityMismatch,
                format!(
                    "roomCapacities has {} entries but numRooms is {}",
                    caps.len(),
                    num_rooms
                ),
            ));
        }
        Some(caps) => by_capacity(&tables, caps),
        None => evenly(&tables, num_rooms),
    };

    Ok(RoomLayout::new(rooms))
}

fn by_capacity(tables: &[TableNumber], capacities: &[usize]) -> Vec<Room> {
    let mut rooms = Vec::with_capacity(capacities.len());
    let mut rest = tables;

    for (id, &capacity) in capacities.iter().enumerate() {
        let take = capacity.min(rest.len());
        let (head, tail) = rest.split_at(take);
        rooms.push(Room::new(id, head.to_vec()).with_capacity(capacity));
        rest = tail;
    }

    if !rest.is_empty() {
        if let Some(last) = rooms.last_mut() {
            tracing::warn!(
                leftover = rest.len(),
                room = last.number(),
                "room capacities cover fewer tables than projects; placing the rest in the last room"
            );
            last.tables.extend_from_slice(rest);
        }
    }

    rooms
}

fn evenly(tables: &[TableNumber], num_rooms: usize) -> Vec<Room> {
    let per_room = tables.len().div_ceil(num_rooms);

    (0..num_rooms)
        .map(|id| {
            let start = (id * per_room).min(tables.len());
            let end = ((id + 1) * per_room).min(tables.len());
            Room::new(id, tables[start..end].to_vec())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn projects(tables: impl IntoIterator<Item = TableNumber>) -> Vec<Project> {
        tables
            .into_iter()
            .map(|t| Project::new(format!("P{t}"), t))
            .collect()
    }

    #[test]
    fn test_even_partition() {
        let layout = partition_rooms(&projects(1..=10), 3, None).unwrap();
        let rooms = layout.rooms();
        assert_eq!(rooms.len(), 3);
        assert_eq!(rooms[0].tables, vec![1, 2, 3, 4]);
        assert_eq!(rooms[1].tables, vec![5, 6, 7, 8]);
        assert_eq!(rooms[2].tables, vec![9, 10]);
        assert_eq!(rooms[2].capacity, 2);
    }

    #[test]
    fn test_partition_sorts_by_table() {
        let layout = partition_rooms(&projects([9, 2, 5, 1]), 2, None).unwrap();
        assert_eq!(layout.rooms()[0].tables, vec![1, 2]);
        assert_eq!(layout.rooms()[1].tables, vec![5, 9]);
        assert_eq!(layout.room_of(9), Some(1));
    }

    #[test]
    fn test_more_rooms_than_projects() {
        let layout = partition_rooms(&projects(1..=2), 4, None).unwrap();
        let sizes: Vec<usize> = layout.rooms().iter().map(|r| r.tables.len()).collect();
        assert_eq!(sizes, vec![1, 1, 0, 0]);
        assert_eq!(layout.total_capacity(), 2);
    }

    #[test]
    fn test_explicit_capacities() {
        let layout = partition_rooms(&projects(1..=36), 4, Some(&[8, 12, 6, 10])).unwrap();
        let rooms = layout.rooms();
        assert_eq!(rooms[0].tables, (1..=8).collect::<Vec<_>>());
        assert_eq!(rooms[1].tables.first(), Some(&9));
        assert_eq!(rooms[3].tables.last(), Some(&36));
        let caps: Vec<usize> = rooms.iter().map(|r| r.capacity).collect();
        assert_eq!(caps, vec![8, 12, 6, 10]);
    }

    #[test]
    fn test_explicit_capacities_leftover_goes_to_last_room() {
        let layout = partition_rooms(&projects(1..=50), 4, Some(&[8, 12, 6, 10])).unwrap();
        let rooms = layout.rooms();
        assert_eq!(rooms[3].tables.len(), 24);
        assert_eq!(rooms[3].capacity, 10);
        assert_eq!(layout.room_of(50), Some(3));
    }

    #[test]
    fn test_explicit_capacities_exceed_projects() {
        let layout = partition_rooms(&projects(1..=5), 3, Some(&[4, 4, 4])).unwrap();
        let rooms = layout.rooms();
        assert_eq!(rooms[0].tables.len(), 4);
        assert_eq!(rooms[1].tables, vec![5]);
        assert!(rooms[2].is_empty());
        assert_eq!(rooms[2].capacity, 4);
    }

    #[test]
    fn test_capacity_mismatch() {
        let err = partition_rooms(&projects(1..=50), 5, Some(&[8, 12, 6, 10])).unwrap_err();
        assert_eq!(err.kind, ConfigErrorKind::RoomCapacityMismatch);
    }

    #[test]
    fn test_zero_rooms_and_no_projects() {
        let err = partition_rooms(&projects(1..=3), 0, None).unwrap_err();
        assert_eq!(err.kind, ConfigErrorKind::InvalidRoomCount);
        let err = partition_rooms(&[], 2, None).unwrap_err();
        assert_eq!(err.kind, ConfigErrorKind::NoProjects);
    }
}
