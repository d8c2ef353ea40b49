//! Schedule generation, verification and repair.
//!
//! # Algorithm
//!
//! [`JudgingScheduler`] drives the run: [`AssignmentGenerator`] builds a
//! greedy room-rotating schedule, [`AssignmentVerifier`] recomputes every
//! invariant from the raw cells, and [`RepairPass`] tops up under-judged
//! projects in place. Attempts that still fail are regenerated from
//! scratch, up to a bound.
//!
//! # KPI
//!
//! [`WorkloadKpi`] summarises per-judge load; judges more than
//! [`MAX_WORKLOAD_DEVIATION`] away from the mean are reported as warnings.

mod driver;
mod generator;
mod kpi;
mod repair;
mod verifier;

pub use driver::JudgingScheduler;
pub use generator::{AssignmentGenerator, GeneratedSchedule};
pub use kpi::{WorkloadKpi, MAX_WORKLOAD_DEVIATION};
pub use repair::{Placement, RepairOutcome, RepairPass};
pub use verifier::{AssignmentVerifier, CountDiscrepancy, VerificationReport};
