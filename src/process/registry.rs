/*!
 * Process Registry
 * Canonical, creation-ordered set of process records
 */

use super::types::{Process, ProcessError, ProcessResult, ProcessState};
use crate::core::limits::{MAX_PRIORITY, MIN_PRIORITY};
use crate::core::types::{BurstTime, Pid, Priority};
use parking_lot::RwLock;
use tracing::{debug, info};

struct Table {
    next_pid: Pid,
    // Sorted by id because ids are issued under the same lock as the push
    entries: Vec<Process>,
}

impl Table {
    fn index_of(&self, pid: Pid) -> ProcessResult<usize> {
        self.entries
            .binary_search_by_key(&pid, |p| p.id)
            .map_err(|_| ProcessError::NotFound(pid))
    }
}

/// Owns every process record. Records are never removed.
pub struct ProcessRegistry {
    table: RwLock<Table>,
}

impl ProcessRegistry {
    pub fn new() -> Self {
        Self {
            table: RwLock::new(Table {
                next_pid: 1,
                entries: Vec::new(),
            }),
        }
    }

    /// Create a WAITING_MEMORY process with the next id
    pub fn register(&self, burst_time: BurstTime, priority: Priority) -> ProcessResult<Process> {
        if burst_time == 0 {
            return Err(ProcessError::InvalidBurstTime(burst_time));
        }
        if !(MIN_PRIORITY..=MAX_PRIORITY).contains(&priority) {
            return Err(ProcessError::InvalidPriority(priority));
        }

        let mut table = self.table.write();
        let process = Process::new(table.next_pid, burst_time, priority);
        table.next_pid += 1;
        table.entries.push(process);

        info!(
            pid = process.id,
            burst_time = burst_time,
            priority = priority,
            "Process registered"
        );
        Ok(process)
    }

    /// Snapshot of one process
    pub fn get(&self, pid: Pid) -> ProcessResult<Process> {
        let table = self.table.read();
        let idx = table.index_of(pid)?;
        Ok(table.entries[idx])
    }

    pub fn state(&self, pid: Pid) -> ProcessResult<ProcessState> {
        self.get(pid).map(|p| p.state)
    }

    /// Move `pid` from `expected` to `to`.
    ///
    /// Fails without touching the record when the process is no longer in
    /// `expected` or the lifecycle forbids the move.
    pub fn transition(
        &self,
        pid: Pid,
        expected: ProcessState,
        to: ProcessState,
    ) -> ProcessResult<Process> {
        self.transition_from(pid, &[expected], to)
    }

    /// Like `transition`, accepting any of several source states
    pub fn transition_from(
        &self,
        pid: Pid,
        expected: &[ProcessState],
        to: ProcessState,
    ) -> ProcessResult<Process> {
        let mut table = self.table.write();
        let idx = table.index_of(pid)?;
        let process = &mut table.entries[idx];
        let from = process.state;

        if !expected.contains(&from) {
            return Err(ProcessError::StaleState {
                pid,
                expected: expected.first().copied().unwrap_or(to),
                actual: from,
            });
        }
        if !from.can_transition_to(to) {
            return Err(ProcessError::InvalidTransition { pid, from, to });
        }

        process.state = to;
        debug!(pid = pid, from = %from, to = %to, "Process state changed");
        Ok(*process)
    }

    /// Snapshot of all processes in creation order
    pub fn snapshot(&self) -> Vec<Process> {
        self.table.read().entries.clone()
    }

    /// Oldest process currently in `state`
    pub fn first_in_state(&self, state: ProcessState) -> Option<Process> {
        self.table
            .read()
            .entries
            .iter()
            .find(|p| p.state == state)
            .copied()
    }

    /// Ids of every process in `state`, in creation order
    pub fn pids_in_state(&self, state: ProcessState) -> Vec<Pid> {
        self.table
            .read()
            .entries
            .iter()
            .filter(|p| p.state == state)
            .map(|p| p.id)
            .collect()
    }

    pub fn any_in_state(&self, state: ProcessState) -> bool {
        self.table.read().entries.iter().any(|p| p.state == state)
    }

    pub fn all_terminated(&self) -> bool {
        self.table
            .read()
            .entries
            .iter()
            .all(|p| p.state.is_terminal())
    }

    pub fn len(&self) -> usize {
        self.table.read().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ProcessRegistry {
    fn default() -> Self {
        Self::new()
    }
}
