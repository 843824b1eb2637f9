/*!
 * Execution Engine
 * Drives a selected process through CPU occupation, termination, memory
 * release, and the retry that hands freed memory to a starved process.
 *
 * Every operation re-checks the process state first and returns a
 * `Skipped` outcome instead of an error when the precondition no longer
 * holds, so scheduler passes working from stale snapshots stay harmless.
 */

use super::clock::Clock;
use super::cpu::Cpu;
use crate::core::types::{BurstTime, Pid, Size};
use crate::generators::SharedGenerator;
use crate::memory::{Allocation, MemoryManager, MemoryResult};
use crate::process::{ProcessError, ProcessRegistry, ProcessResult, ProcessState, ReadyQueue};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// A process that ran to completion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Completion {
    pub pid: Pid,
    pub burst_time: BurstTime,
    /// Memory returned to the pool
    pub reclaimed: Size,
    /// Waiting process admitted with the freed memory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admitted: Option<Allocation>,
}

/// Result of `run_to_completion`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RunOutcome {
    Completed(Completion),
    /// Process was not READY; nothing happened
    Skipped { pid: Pid, state: ProcessState },
    /// Process left RUNNING during its burst (blocked from outside)
    Interrupted { pid: Pid, state: ProcessState },
}

impl RunOutcome {
    pub fn completion(&self) -> Option<&Completion> {
        match self {
            RunOutcome::Completed(c) => Some(c),
            _ => None,
        }
    }
}

/// Result of an I/O simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum IoOutcome {
    /// Process went through BLOCKED and is READY again
    Resumed { pid: Pid },
    /// Precondition did not hold; nothing happened
    Skipped { pid: Pid, state: ProcessState },
}

pub struct ExecutionEngine {
    registry: Arc<ProcessRegistry>,
    memory: Arc<MemoryManager>,
    ready_queue: Arc<ReadyQueue>,
    cpu: Cpu,
    clock: Arc<dyn Clock>,
    generator: SharedGenerator,
    time_unit: Duration,
    io_delay: Duration,
}

impl ExecutionEngine {
    pub fn new(
        registry: Arc<ProcessRegistry>,
        memory: Arc<MemoryManager>,
        ready_queue: Arc<ReadyQueue>,
        clock: Arc<dyn Clock>,
        generator: SharedGenerator,
    ) -> Self {
        Self {
            registry,
            memory,
            ready_queue,
            cpu: Cpu::new(),
            clock,
            generator,
            time_unit: crate::core::limits::DEFAULT_TIME_UNIT,
            io_delay: crate::core::limits::DEFAULT_IO_DELAY,
        }
    }

    #[must_use]
    pub fn with_timing(mut self, time_unit: Duration, io_delay: Duration) -> Self {
        self.time_unit = time_unit;
        self.io_delay = io_delay;
        self
    }

    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    /// Allocate memory and record the grant in the ready queue
    pub fn admit(&self, pid: Pid, size: Size) -> MemoryResult<Allocation> {
        let allocation = self.memory.allocate(pid, size)?;
        self.ready_queue.push(pid);
        Ok(allocation)
    }

    /// Run a READY process on the CPU until its burst is consumed.
    ///
    /// Order of effects: RUNNING, burst, TERMINATED, CPU released, memory
    /// released, one waiting process retried.
    pub async fn run_to_completion(&self, pid: Pid) -> ProcessResult<RunOutcome> {
        let state = self.registry.state(pid)?;
        if state != ProcessState::Ready {
            debug!(pid = pid, state = %state, "Run skipped, process not ready");
            return Ok(RunOutcome::Skipped { pid, state });
        }

        let cpu = self.cpu.acquire(pid).await;

        // Someone may have run or blocked it while we waited for the CPU
        let process = match self
            .registry
            .transition(pid, ProcessState::Ready, ProcessState::Running)
        {
            Ok(process) => process,
            Err(ProcessError::StaleState { actual, .. }) => {
                debug!(pid = pid, state = %actual, "Run skipped, state changed while waiting for CPU");
                return Ok(RunOutcome::Skipped { pid, state: actual });
            }
            Err(e) => return Err(e),
        };

        info!(pid = pid, burst_time = process.burst_time, "Process running");
        self.clock
            .suspend(self.time_unit * process.burst_time)
            .await;

        if let Err(e) = self
            .registry
            .transition(pid, ProcessState::Running, ProcessState::Terminated)
        {
            let state = self.registry.state(pid)?;
            warn!(pid = pid, state = %state, error = %e, "Process left RUNNING during its burst");
            return Ok(RunOutcome::Interrupted { pid, state });
        }
        drop(cpu);

        let reclaimed = match self.memory.release(pid) {
            Ok(size) => size,
            Err(e) => {
                warn!(pid = pid, error = %e, "Memory release failed");
                0
            }
        };
        info!(pid = pid, reclaimed = reclaimed, "Process terminated");

        let admitted = self.retry_waiting();

        Ok(RunOutcome::Completed(Completion {
            pid,
            burst_time: process.burst_time,
            reclaimed,
            admitted,
        }))
    }

    /// Give the longest-waiting WAITING_MEMORY process one allocation attempt.
    ///
    /// Re-uses the size of its last failed request when one is recorded.
    pub fn retry_waiting(&self) -> Option<Allocation> {
        let waiting = self.registry.first_in_state(ProcessState::WaitingMemory)?;
        let size = match self.memory.pending_request(waiting.id) {
            Some(size) => size,
            None => self.generator.lock().memory_size(),
        };

        info!(pid = waiting.id, size = size, "Retrying allocation for waiting process");
        match self.admit(waiting.id, size) {
            Ok(allocation) => Some(allocation),
            Err(e) => {
                debug!(pid = waiting.id, error = %e, "Retry did not admit process");
                None
            }
        }
    }

    /// Simulate an I/O request: BLOCKED for the I/O delay, then READY.
    ///
    /// Requires RUNNING or READY.
    pub async fn block_for_io(&self, pid: Pid) -> ProcessResult<IoOutcome> {
        match self.registry.transition_from(
            pid,
            &[ProcessState::Running, ProcessState::Ready],
            ProcessState::Blocked,
        ) {
            Ok(_) => {}
            Err(ProcessError::NotFound(pid)) => return Err(ProcessError::NotFound(pid)),
            Err(_) => {
                let state = self.registry.state(pid)?;
                debug!(pid = pid, state = %state, "I/O skipped, process not runnable");
                return Ok(IoOutcome::Skipped { pid, state });
            }
        }

        info!(pid = pid, "Process blocked on I/O");
        self.clock.suspend(self.io_delay).await;
        self.unblock(pid)?;
        Ok(IoOutcome::Resumed { pid })
    }

    /// Wait out the I/O of an already BLOCKED process and make it READY
    pub async fn complete_io(&self, pid: Pid) -> ProcessResult<IoOutcome> {
        let state = self.registry.state(pid)?;
        if state != ProcessState::Blocked {
            return Ok(IoOutcome::Skipped { pid, state });
        }

        self.clock.suspend(self.io_delay).await;
        if self.unblock(pid)? {
            Ok(IoOutcome::Resumed { pid })
        } else {
            let state = self.registry.state(pid)?;
            Ok(IoOutcome::Skipped { pid, state })
        }
    }

    /// BLOCKED -> READY; false when another caller got there first
    fn unblock(&self, pid: Pid) -> ProcessResult<bool> {
        match self
            .registry
            .transition(pid, ProcessState::Blocked, ProcessState::Ready)
        {
            Ok(_) => {
                info!(pid = pid, "Process I/O complete");
                Ok(true)
            }
            Err(ProcessError::NotFound(pid)) => Err(ProcessError::NotFound(pid)),
            Err(_) => Ok(false),
        }
    }
}
