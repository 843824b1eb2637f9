/*!
 * Execution Module
 * CPU resource, injectable clock, and the engine that drives processes
 * through RUNNING and BLOCKED
 */

pub mod clock;
pub mod cpu;
pub mod engine;

pub use clock::{Clock, TokioClock, VirtualClock};
pub use cpu::{Cpu, CpuGuard};
pub use engine::{Completion, ExecutionEngine, IoOutcome, RunOutcome};
