/*!
 * Core Module
 * Shared types, limits, configuration and errors used across the simulator
 */

pub mod config;
pub mod errors;
pub mod limits;
pub mod serde;
pub mod types;

pub use config::SimConfig;
pub use errors::{SimError, SimResult};
pub use types::{BurstTime, Pid, Priority, Size};
