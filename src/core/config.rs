/*!
 * Simulator Configuration
 * Defaults come from `core::limits`; each field can be overridden through
 * a `SCHED_SIM_*` environment variable.
 */

use super::errors::{SimError, SimResult};
use super::limits;
use super::types::{BurstTime, Size};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;
use tracing::warn;

pub const ENV_MEMORY: &str = "SCHED_SIM_MEMORY";
pub const ENV_TIME_UNIT_MS: &str = "SCHED_SIM_TIME_UNIT_MS";
pub const ENV_IO_DELAY_MS: &str = "SCHED_SIM_IO_DELAY_MS";
pub const ENV_ADMISSION_PAUSE_MS: &str = "SCHED_SIM_ADMISSION_PAUSE_MS";
pub const ENV_MAX_REQUEST: &str = "SCHED_SIM_MAX_REQUEST";
pub const ENV_SEED: &str = "SCHED_SIM_SEED";

/// Tunable simulator parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SimConfig {
    /// Total memory pool capacity
    pub memory_capacity: Size,
    /// Wall time per unit of burst time
    pub time_unit_ms: u64,
    /// Simulated I/O delay
    pub io_delay_ms: u64,
    /// Pause between allocation attempts in a batch
    pub admission_pause_ms: u64,
    pub min_burst_time: BurstTime,
    pub max_burst_time: BurstTime,
    pub min_request_size: Size,
    pub max_request_size: Size,
    /// Fixed RNG seed; entropy-seeded when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            memory_capacity: limits::DEFAULT_MEMORY_POOL,
            time_unit_ms: limits::DEFAULT_TIME_UNIT.as_millis() as u64,
            io_delay_ms: limits::DEFAULT_IO_DELAY.as_millis() as u64,
            admission_pause_ms: limits::DEFAULT_ADMISSION_PAUSE.as_millis() as u64,
            min_burst_time: limits::MIN_BURST_TIME,
            max_burst_time: limits::DEFAULT_MAX_BURST_TIME,
            min_request_size: limits::MIN_REQUEST_SIZE,
            max_request_size: limits::DEFAULT_MAX_REQUEST_SIZE,
            seed: None,
        }
    }
}

impl SimConfig {
    /// Defaults with overrides taken from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults with overrides taken from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        override_from(&lookup, ENV_MEMORY, &mut config.memory_capacity);
        override_from(&lookup, ENV_TIME_UNIT_MS, &mut config.time_unit_ms);
        override_from(&lookup, ENV_IO_DELAY_MS, &mut config.io_delay_ms);
        override_from(&lookup, ENV_ADMISSION_PAUSE_MS, &mut config.admission_pause_ms);
        override_from(&lookup, ENV_MAX_REQUEST, &mut config.max_request_size);

        let mut seed = 0u64;
        if override_from(&lookup, ENV_SEED, &mut seed) {
            config.seed = Some(seed);
        }
        config
    }

    /// Zero-delay configuration for tests and scripted runs
    pub fn instant() -> Self {
        Self {
            time_unit_ms: 0,
            io_delay_ms: 0,
            admission_pause_ms: 0,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_memory_capacity(mut self, capacity: Size) -> Self {
        self.memory_capacity = capacity;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn time_unit(&self) -> Duration {
        Duration::from_millis(self.time_unit_ms)
    }

    pub fn io_delay(&self) -> Duration {
        Duration::from_millis(self.io_delay_ms)
    }

    pub fn admission_pause(&self) -> Duration {
        Duration::from_millis(self.admission_pause_ms)
    }

    /// Reject configurations the simulator cannot run with
    pub fn validate(&self) -> SimResult<()> {
        if self.memory_capacity == 0 {
            return Err(SimError::Config("memory capacity must be positive".into()));
        }
        if self.min_burst_time == 0 || self.min_burst_time > self.max_burst_time {
            return Err(SimError::Config(format!(
                "invalid burst time range {}..={}",
                self.min_burst_time, self.max_burst_time
            )));
        }
        if self.min_request_size == 0 || self.min_request_size > self.max_request_size {
            return Err(SimError::Config(format!(
                "invalid request size range {}..={}",
                self.min_request_size, self.max_request_size
            )));
        }
        Ok(())
    }
}

/// Parse `key` into `slot`; returns whether an override was applied
fn override_from<F, T>(lookup: &F, key: &str, slot: &mut T) -> bool
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    let Some(raw) = lookup(key) else {
        return false;
    };
    match raw.trim().parse::<T>() {
        Ok(value) => {
            *slot = value;
            true
        }
        Err(_) => {
            warn!(key = key, value = %raw, "Ignoring unparsable configuration override");
            false
        }
    }
}
