/*!
 * Process Module
 * Process records, lifecycle state machine, registry and ready queue
 */

pub mod queue;
pub mod registry;
pub mod state;
pub mod types;

// Re-export for convenience
pub use queue::ReadyQueue;
pub use registry::ProcessRegistry;
pub use types::{Process, ProcessError, ProcessResult, ProcessState};
