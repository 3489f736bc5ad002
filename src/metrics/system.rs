//! Host resource sampling for the system gauges
//!
//! Reads load average and memory usage from the host and normalizes both to
//! percentages. Values are derived fresh on every call; nothing is cached
//! between export ticks.

use sysinfo::System;
use thiserror::Error;

use super::round2;

/// Host sampling failures
///
/// Surfaced to the caller so the exporter can skip the affected gauge for
/// the tick instead of exporting a silent default.
#[derive(Debug, Error)]
pub enum SampleError {
    #[error("logical core count unavailable: {0}")]
    CoreCount(#[from] std::io::Error),

    #[error("host reported zero total memory")]
    NoMemoryInfo,
}

/// Samples CPU load and memory usage from the host
#[derive(Debug)]
pub struct SystemSampler {
    system: System,
}

impl SystemSampler {
    #[must_use]
    pub fn new() -> Self {
        Self {
            system: System::new(),
        }
    }

    /// One-minute load average per logical core, as a percentage
    ///
    /// The load/core ratio is rounded to two decimal places before scaling.
    pub fn cpu_usage_percent(&self) -> Result<f64, SampleError> {
        let cores = std::thread::available_parallelism()?.get();
        Ok(cpu_percent_from(System::load_average().one, cores))
    }

    /// Used memory as a percentage of total, rounded to two decimal places
    pub fn memory_usage_percent(&mut self) -> Result<f64, SampleError> {
        self.system.refresh_memory();
        let total = self.system.total_memory();
        if total == 0 {
            return Err(SampleError::NoMemoryInfo);
        }
        Ok(memory_percent_from(total, self.system.free_memory()))
    }
}

impl Default for SystemSampler {
    fn default() -> Self {
        Self::new()
    }
}

fn cpu_percent_from(load_one: f64, cores: usize) -> f64 {
    round2(load_one / cores as f64) * 100.0
}

fn memory_percent_from(total: u64, free: u64) -> f64 {
    let used = total.saturating_sub(free) as f64;
    round2(used / total as f64 * 100.0)
}
