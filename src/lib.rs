/*!
 * Process Scheduler Simulator
 * Process lifecycle, memory pool and CPU scheduling exposed as a library
 */

pub mod cli;
pub mod core;
pub mod execution;
pub mod generators;
pub mod memory;
pub mod monitoring;
pub mod process;
pub mod scheduler;
pub mod simulator;

// Re-exports
pub use crate::core::{BurstTime, Pid, Priority, SimConfig, SimError, SimResult, Size};
pub use execution::{Clock, IoOutcome, RunOutcome, TokioClock, VirtualClock};
pub use generators::{FixedGenerator, ParamGenerator, SeededGenerator};
pub use memory::{Allocation, MemoryError, MemoryStatus};
pub use monitoring::init_tracing;
pub use process::{Process, ProcessError, ProcessState};
pub use scheduler::{Policy, RunReport};
pub use simulator::{BatchReport, Simulator, SimulatorBuilder};
