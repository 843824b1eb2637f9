/*!
 * Memory Types
 * Common types for memory management
 */

use crate::core::limits::{PRESSURE_CRITICAL, PRESSURE_HIGH, PRESSURE_MEDIUM};
use crate::core::types::{Pid, Size};
use crate::process::ProcessState;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Memory operation result
pub type MemoryResult<T> = Result<T, MemoryError>;

/// Memory errors
///
/// None of these are fatal: the pool and the process are left untouched.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "kind", content = "details", rename_all = "snake_case")]
pub enum MemoryError {
    #[error("Insufficient memory for process {pid}: requested {requested}, available {available} of {total}")]
    #[diagnostic(
        code(memory::insufficient),
        help("The process stays WAITING_MEMORY and is retried when another process terminates.")
    )]
    InsufficientMemory {
        pid: Pid,
        requested: Size,
        available: Size,
        total: Size,
    },

    #[error("Invalid allocation size {requested} for process {pid}")]
    #[diagnostic(code(memory::invalid_size), help("Requests must be at least 1 unit."))]
    InvalidSize { pid: Pid, requested: Size },

    #[error("Process {pid} is {state}, operation not allowed")]
    #[diagnostic(
        code(memory::invalid_state),
        help("Allocation needs WAITING_MEMORY; release needs TERMINATED.")
    )]
    InvalidState { pid: Pid, state: ProcessState },

    #[error("Process {0} not found")]
    #[diagnostic(code(memory::process_not_found))]
    ProcessNotFound(Pid),
}

impl MemoryError {
    /// Allocation failed only because the pool is currently too full
    pub fn is_insufficient(&self) -> bool {
        matches!(self, MemoryError::InsufficientMemory { .. })
    }
}

/// A granted (or requested) slice of the pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    pub pid: Pid,
    pub size: Size,
}

/// Point-in-time view of the pool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct MemoryStatus {
    pub total: Size,
    pub available: Size,
    /// Live allocations ordered by pid
    pub allocations: Vec<Allocation>,
    /// Last failed request of each process still waiting for memory
    #[serde(skip_serializing_if = "crate::core::serde::is_empty_vec")]
    pub pending: Vec<Allocation>,
    /// Successful allocations since the pool was created
    pub grants: u64,
}

impl MemoryStatus {
    pub fn used(&self) -> Size {
        self.total - self.available
    }

    pub fn usage_percentage(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        (self.used() as f64 / self.total as f64) * 100.0
    }

    pub fn pressure(&self) -> MemoryPressure {
        MemoryPressure::from_ratio(self.used() as f64 / self.total.max(1) as f64)
    }

    /// available + allocated == total
    pub fn is_consistent(&self) -> bool {
        let allocated: Size = self.allocations.iter().map(|a| a.size).sum();
        self.available + allocated == self.total
    }
}

/// Memory pressure levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MemoryPressure {
    Low,
    Medium,
    High,
    Critical,
}

impl MemoryPressure {
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio >= PRESSURE_CRITICAL {
            MemoryPressure::Critical
        } else if ratio >= PRESSURE_HIGH {
            MemoryPressure::High
        } else if ratio >= PRESSURE_MEDIUM {
            MemoryPressure::Medium
        } else {
            MemoryPressure::Low
        }
    }
}

impl std::fmt::Display for MemoryPressure {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            MemoryPressure::Low => write!(f, "LOW"),
            MemoryPressure::Medium => write!(f, "MEDIUM"),
            MemoryPressure::High => write!(f, "HIGH"),
            MemoryPressure::Critical => write!(f, "CRITICAL"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(total: Size, allocations: &[(Pid, Size)]) -> MemoryStatus {
        let allocations: Vec<Allocation> = allocations
            .iter()
            .map(|&(pid, size)| Allocation { pid, size })
            .collect();
        let used: Size = allocations.iter().map(|a| a.size).sum();
        MemoryStatus {
            total,
            available: total - used,
            allocations,
            pending: Vec::new(),
            grants: 0,
        }
    }

    #[test]
    fn test_pressure_levels() {
        assert_eq!(status(100, &[]).pressure(), MemoryPressure::Low);
        assert_eq!(status(100, &[(1, 60)]).pressure(), MemoryPressure::Medium);
        assert_eq!(status(100, &[(1, 85)]).pressure(), MemoryPressure::High);
        assert_eq!(status(100, &[(1, 50), (2, 50)]).pressure(), MemoryPressure::Critical);
    }

    #[test]
    fn test_usage_and_consistency() {
        let s = status(200, &[(1, 50)]);
        assert_eq!(s.used(), 50);
        assert!((s.usage_percentage() - 25.0).abs() < f64::EPSILON);
        assert!(s.is_consistent());
    }
}
