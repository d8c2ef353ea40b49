//! Workload indicators.
//!
//! Summarises how judging load is spread across judges in a completed
//! schedule.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Load | Non-idle cells of a judge |
//! | Mean load | Sum of loads / judges |
//! | Min / Max load | Extremes over judges |
//! | Max deviation | max(|load - mean|) |
//! | Slots | Longest row (event length in rounds) |

use crate::models::{JudgeId, Schedule};

/// Allowed distance from the mean load before a judge is flagged.
pub const MAX_WORKLOAD_DEVIATION: f64 = 2.0;

/// Judge workload indicators.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkloadKpi {
    /// Load per judge id.
    pub loads: Vec<usize>,
    /// Mean load.
    pub mean_load: f64,
    /// Smallest load.
    pub min_load: usize,
    /// Largest load.
    pub max_load: usize,
    /// Largest absolute distance from the mean.
    pub max_deviation: f64,
    /// Length of the longest row.
    pub slots: usize,
}

impl WorkloadKpi {
    /// Computes workload indicators from a schedule.
    pub fn calculate(schedule: &Schedule) -> Self {
        let loads: Vec<usize> = (0..schedule.num_judges())
            .map(|j| schedule.load(j))
            .collect();

        let mean_load = if loads.is_empty() {
            0.0
        } else {
            loads.iter().sum::<usize>() as f64 / loads.len() as f64
        };

        let max_deviation = loads
            .iter()
            .map(|&l| (l as f64 - mean_load).abs())
            .fold(0.0, f64::max);

        Self {
            min_load: loads.iter().copied().min().unwrap_or(0),
            max_load: loads.iter().copied().max().unwrap_or(0),
            loads,
            mean_load,
            max_deviation,
            slots: schedule.max_slots(),
        }
    }

    /// Judges whose load is more than `bound` away from the mean.
    pub fn outliers(&self, bound: f64) -> Vec<JudgeId> {
        self.loads
            .iter()
            .enumerate()
            .filter(|&(_, &l)| (l as f64 - self.mean_load).abs() > bound)
            .map(|(j, _)| j)
            .collect()
    }

    /// Whether every judge is within `bound` of the mean.
    pub fn is_balanced(&self, bound: f64) -> bool {
        self.max_deviation <= bound
    }
}
