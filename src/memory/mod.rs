/*!
 * Memory Module
 * Finite memory pool shared by all simulated processes
 */

pub mod pool;
pub mod types;

// Re-export public API
pub use pool::MemoryManager;
pub use types::{Allocation, MemoryError, MemoryPressure, MemoryResult, MemoryStatus};
