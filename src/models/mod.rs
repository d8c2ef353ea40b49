//! Judging domain models.
//!
//! Provides the data types for a judging run: the rosters going in, the
//! rooms they are split into, the judge × slot schedule coming out, and
//! the issues found in it.
//!
//! # Domain Mappings
//!
//! | u-judging | Scheduling term | Event floor |
//! |-----------|-----------------|-------------|
//! | Project | Job | Team at a table |
//! | Judge | Machine/Worker | Judge walking the rooms |
//! | Room | Resource pool | Hall with a head-count limit |
//! | Slot | Time bucket | Judging round |
//! | Schedule | Plan | Judge sheets |

mod issue;
mod room;
mod roster;
mod schedule;

pub use issue::{Issue, IssueKind};
pub use room::{Room, RoomId, RoomLayout};
pub use roster::{Judge, JudgeId, Project, TableNumber};
pub use schedule::{Schedule, Slot, SlotOccupancy};
