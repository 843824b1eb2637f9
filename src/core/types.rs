/*!
 * Core Types
 * Common types used across the simulator
 */

/// Process ID type (assigned from 1, never reused)
pub type Pid = u32;

/// Priority level (1-5, higher is scheduled earlier)
pub type Priority = u8;

/// CPU time a process needs, in simulated time units
pub type BurstTime = u32;

/// Size type for memory operations, in pool units
pub type Size = usize;
