/*!
 * Process Types
 * Common types for process management
 */

use crate::core::types::{BurstTime, Pid, Priority};
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Process operation result
pub type ProcessResult<T> = Result<T, ProcessError>;

/// Process errors
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "kind", content = "details", rename_all = "snake_case")]
pub enum ProcessError {
    #[error("Process {0} not found")]
    #[diagnostic(
        code(process::not_found),
        help("Processes are never removed, so the PID was never issued.")
    )]
    NotFound(Pid),

    #[error("Invalid state transition for process {pid}: {from} -> {to}")]
    #[diagnostic(
        code(process::invalid_transition),
        help("Only WAITING_MEMORY->READY->RUNNING->TERMINATED and the BLOCKED detour are allowed.")
    )]
    InvalidTransition {
        pid: Pid,
        from: ProcessState,
        to: ProcessState,
    },

    #[error("Process {pid} is {actual}, expected {expected}")]
    #[diagnostic(
        code(process::stale_state),
        help("Another pass changed the process first; re-read its state.")
    )]
    StaleState {
        pid: Pid,
        expected: ProcessState,
        actual: ProcessState,
    },

    #[error("Priority {0} out of range")]
    #[diagnostic(code(process::invalid_priority), help("Priority must be between 1 and 5."))]
    InvalidPriority(Priority),

    #[error("Burst time must be positive, got {0}")]
    #[diagnostic(code(process::invalid_burst_time))]
    InvalidBurstTime(BurstTime),
}

/// Process state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessState {
    /// Created, waiting for a memory grant
    WaitingMemory,
    /// Holds memory, waiting for the CPU
    Ready,
    /// Holds the CPU
    Running,
    /// Waiting for simulated I/O
    Blocked,
    /// Finished; terminal
    Terminated,
}

impl fmt::Display for ProcessState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProcessState::WaitingMemory => "WAITING_MEMORY",
            ProcessState::Ready => "READY",
            ProcessState::Running => "RUNNING",
            ProcessState::Blocked => "BLOCKED",
            ProcessState::Terminated => "TERMINATED",
        };
        f.write_str(name)
    }
}

/// Process record
///
/// Only `state` changes after creation, and only through the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Process {
    pub id: Pid,
    pub state: ProcessState,
    pub burst_time: BurstTime,
    pub priority: Priority,
}

impl Process {
    pub fn new(id: Pid, burst_time: BurstTime, priority: Priority) -> Self {
        Self {
            id,
            state: ProcessState::WaitingMemory,
            burst_time,
            priority,
        }
    }
}
