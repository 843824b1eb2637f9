/*!
 * Simulator
 * Service object that owns the registry, memory pool, CPU and scheduler and
 * exposes them to the CLI shell.
 */

mod builder;

pub use builder::SimulatorBuilder;

use crate::core::config::SimConfig;
use crate::core::errors::{SimError, SimResult};
use crate::core::limits::{MAX_BATCH_SIZE, MAX_PRIORITY, MIN_PRIORITY};
use crate::core::types::{BurstTime, Pid, Priority, Size};
use crate::execution::{Clock, ExecutionEngine, IoOutcome};
use crate::generators::SharedGenerator;
use crate::memory::{Allocation, MemoryManager, MemoryResult, MemoryStatus};
use crate::process::{Process, ProcessError, ProcessRegistry, ProcessState, ReadyQueue};
use crate::scheduler::{Policy, RunReport, Scheduler};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Outcome of `admit_batch`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct BatchReport {
    pub created: Vec<Pid>,
    pub admitted: Vec<Allocation>,
    /// Processes still WAITING_MEMORY after the batch
    pub waiting: Vec<Pid>,
}

#[derive(Clone)]
pub struct Simulator {
    config: Arc<SimConfig>,
    registry: Arc<ProcessRegistry>,
    memory: Arc<MemoryManager>,
    ready_queue: Arc<ReadyQueue>,
    engine: Arc<ExecutionEngine>,
    scheduler: Arc<Scheduler>,
    generator: SharedGenerator,
    clock: Arc<dyn Clock>,
}

impl Simulator {
    /// Simulator with real timers and a config-seeded generator
    pub fn new(config: SimConfig) -> SimResult<Self> {
        Self::builder().with_config(config).build()
    }

    pub fn builder() -> SimulatorBuilder {
        SimulatorBuilder::new()
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Create `count` WAITING_MEMORY processes with generated parameters.
    ///
    /// All parameters are drawn and checked before anything is registered,
    /// so a bad value leaves the registry unchanged.
    pub fn create_processes<B, P>(
        &self,
        count: usize,
        mut burst_time: B,
        mut priority: P,
    ) -> SimResult<Vec<Process>>
    where
        B: FnMut() -> BurstTime,
        P: FnMut() -> Priority,
    {
        if count > MAX_BATCH_SIZE {
            return Err(SimError::InvalidInput(format!(
                "cannot create {} processes at once (max {})",
                count, MAX_BATCH_SIZE
            )));
        }

        let params: Vec<(BurstTime, Priority)> =
            (0..count).map(|_| (burst_time(), priority())).collect();
        for &(burst, prio) in &params {
            if burst == 0 {
                return Err(ProcessError::InvalidBurstTime(burst).into());
            }
            if !(MIN_PRIORITY..=MAX_PRIORITY).contains(&prio) {
                return Err(ProcessError::InvalidPriority(prio).into());
            }
        }

        let created = params
            .into_iter()
            .map(|(burst, prio)| self.registry.register(burst, prio))
            .collect::<Result<Vec<_>, _>>()?;

        info!(count = created.len(), "Processes created");
        Ok(created)
    }

    /// Create `count` processes from the simulator's own generator
    pub fn create_random(&self, count: usize) -> SimResult<Vec<Process>> {
        let generator = self.generator.clone();
        let bursts: Vec<BurstTime> = (0..count).map(|_| generator.lock().burst_time()).collect();
        let priorities: Vec<Priority> = (0..count).map(|_| generator.lock().priority()).collect();

        let mut bursts = bursts.into_iter();
        let mut priorities = priorities.into_iter();
        self.create_processes(
            count,
            || bursts.next().unwrap_or(1),
            || priorities.next().unwrap_or(MIN_PRIORITY),
        )
    }

    /// Attempt an allocation with a caller-supplied size
    pub fn request_memory_for<S>(&self, pid: Pid, size: S) -> MemoryResult<Allocation>
    where
        S: FnOnce() -> Size,
    {
        self.engine.admit(pid, size())
    }

    /// Attempt an allocation with a generator-supplied size
    pub fn request_memory(&self, pid: Pid) -> MemoryResult<Allocation> {
        let generator = self.generator.clone();
        self.request_memory_for(pid, || generator.lock().memory_size())
    }

    /// Create processes, then try to admit every process still waiting,
    /// pausing between attempts.
    pub async fn admit_batch(&self, count: usize) -> SimResult<BatchReport> {
        let created = self.create_random(count)?;
        let waiting = self.registry.pids_in_state(ProcessState::WaitingMemory);

        let mut admitted = Vec::new();
        for (i, pid) in waiting.into_iter().enumerate() {
            if i > 0 {
                self.clock.suspend(self.config.admission_pause()).await;
            }
            match self.request_memory(pid) {
                Ok(allocation) => admitted.push(allocation),
                Err(e) => debug!(pid = pid, error = %e, "Batch admission deferred"),
            }
        }

        Ok(BatchReport {
            created: created.iter().map(|p| p.id).collect(),
            admitted,
            waiting: self.registry.pids_in_state(ProcessState::WaitingMemory),
        })
    }

    /// Run `policy` on the calling task until nothing is eligible
    pub async fn run_scheduler(&self, policy: Policy) -> SimResult<RunReport> {
        Ok(self.scheduler.run(policy).await?)
    }

    /// Run `policy` on a background tokio task
    pub fn spawn_scheduler(&self, policy: Policy) -> JoinHandle<SimResult<RunReport>> {
        let sim = self.clone();
        tokio::spawn(async move { sim.run_scheduler(policy).await })
    }

    /// Simulate an I/O wait for a READY or RUNNING process
    pub async fn block_for_io(&self, pid: Pid) -> SimResult<IoOutcome> {
        Ok(self.engine.block_for_io(pid).await?)
    }

    /// All processes in creation order
    pub fn list_processes(&self) -> Vec<Process> {
        self.registry.snapshot()
    }

    pub fn process(&self, pid: Pid) -> SimResult<Process> {
        Ok(self.registry.get(pid)?)
    }

    pub fn memory_status(&self) -> MemoryStatus {
        self.memory.status()
    }

    /// Processes granted memory, in grant order
    pub fn ready_queue(&self) -> Vec<Pid> {
        self.ready_queue.snapshot()
    }

    pub fn cpu_holder(&self) -> Option<Pid> {
        self.engine.cpu().holder()
    }

    /// Simulated time consumed so far
    pub fn elapsed(&self) -> Duration {
        self.clock.elapsed()
    }
}
