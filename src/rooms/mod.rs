//! Room partitioning and starting-room allocation.
//!
//! - [`partition_rooms`] cuts the sorted project roster into rooms.
//! - [`RoomAllocator`] decides how many judges start in each room and
//!   which judge starts where.

mod allocation;
mod partition;

pub use allocation::{RoomAllocator, StartingRooms};
pub use partition::partition_rooms;
