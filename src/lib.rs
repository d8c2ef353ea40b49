//! Judge-to-table scheduling for project fairs.
//!
//! Given projects at numbered tables, a roster of judges and the number of
//! distinct judges each project needs, builds one ordered table list per
//! judge so that every project is judged exactly that many times, no two
//! judges stand at the same table in the same round, and no two judges
//! start at the same table.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Project`, `Judge`, `Room`, `Schedule`, `Issue`
//! - **`rooms`**: Room partitioning and starting-room allocation
//! - **`scheduler`**: Generator, verifier, repair pass and retry driver
//! - **`request`**: `ScheduleRequest` in, `ScheduleOutcome` out
//! - **`validation`**: Configuration checks run before any attempt
//! - **`demo`**: Synthetic rosters
//! - **`logging`**: `tracing` subscriber setup
//!
//! # Example
//!
//! ```
//! use u_judging::models::Project;
//! use u_judging::request::ScheduleRequest;
//!
//! let projects = (1..=10).map(|t| Project::new(format!("Team {t}"), t)).collect();
//! let request = ScheduleRequest::new(projects, ["Ada", "Grace", "Linus"], 2, 2).with_seed(1);
//!
//! let outcome = u_judging::generate_schedule(&request).unwrap();
//! if outcome.success {
//!     for sheet in &outcome.assignments {
//!         println!("{}: {:?}", sheet.judge_display_name, sheet.ordered_table_numbers);
//!     }
//! }
//! ```

pub mod demo;
pub mod logging;
pub mod models;
pub mod request;
pub mod rooms;
pub mod scheduler;
pub mod validation;

use request::{ScheduleOutcome, ScheduleRequest};
use validation::ConfigErrors;

/// Runs the scheduler with default settings.
///
/// Shorthand for `JudgingScheduler::new().generate_schedule(request)`.
pub fn generate_schedule(request: &ScheduleRequest) -> Result<ScheduleOutcome, ConfigErrors> {
    scheduler::JudgingScheduler::new().generate_schedule(request)
}
