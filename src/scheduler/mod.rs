/*!
 * Scheduler Module
 * FCFS and priority round-robin policies over the process registry
 */

pub mod order;
pub mod runner;
pub mod types;

// Re-export public API
pub use runner::Scheduler;
pub use types::{Policy, RunReport};
