/*!
 * Scheduler Types
 * Policy selection and run reports
 */

use crate::core::serde::{is_empty_vec, is_false, is_zero_usize};
use crate::core::types::Pid;
use crate::memory::Allocation;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Scheduling policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Policy {
    /// First-come-first-served, creation order
    Fcfs,
    /// Priority descending, id ascending, run to completion
    PriorityRoundRobin,
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Policy::Fcfs => f.write_str("FCFS"),
            Policy::PriorityRoundRobin => f.write_str("PRIORITY_RR"),
        }
    }
}

impl FromStr for Policy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "fcfs" => Ok(Policy::Fcfs),
            "rr" | "priority_rr" | "priority_round_robin" => Ok(Policy::PriorityRoundRobin),
            other => Err(format!("unknown policy '{}'", other)),
        }
    }
}

/// What a scheduler run did
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RunReport {
    pub run_id: String,
    pub policy: Policy,
    /// No process was READY when the run started
    #[serde(skip_serializing_if = "is_false")]
    pub idle: bool,
    #[serde(skip_serializing_if = "is_zero_usize")]
    pub passes: usize,
    /// Completed processes in execution order
    pub executed: Vec<Pid>,
    #[serde(skip_serializing_if = "is_empty_vec")]
    pub unblocked: Vec<Pid>,
    /// Waiting processes admitted by post-termination retries
    #[serde(skip_serializing_if = "is_empty_vec")]
    pub admitted: Vec<Allocation>,
    /// Processes still WAITING_MEMORY when the run ended
    #[serde(skip_serializing_if = "is_empty_vec")]
    pub starved: Vec<Pid>,
}

impl RunReport {
    pub fn new(run_id: String, policy: Policy) -> Self {
        Self {
            run_id,
            policy,
            idle: false,
            passes: 0,
            executed: Vec::new(),
            unblocked: Vec::new(),
            admitted: Vec::new(),
            starved: Vec::new(),
        }
    }
}
