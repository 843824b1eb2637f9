/*!
 * System Limits and Constants
 *
 * Centralized location for simulator-wide limits and default parameters.
 * Organized by domain; every value here can be overridden through
 * `SimConfig` except the priority bounds.
 */

use std::time::Duration;

// =============================================================================
// MEMORY LIMITS
// =============================================================================

/// Total simulated memory pool (units are abstract, shown as MB in the CLI)
pub const DEFAULT_MEMORY_POOL: usize = 1024;

/// Smallest allocation a process may request
pub const MIN_REQUEST_SIZE: usize = 1;

/// Largest allocation the default size generator produces
pub const DEFAULT_MAX_REQUEST_SIZE: usize = 512;

/// Usage ratios at which memory pressure is reported
pub const PRESSURE_MEDIUM: f64 = 0.60;
pub const PRESSURE_HIGH: f64 = 0.80;
pub const PRESSURE_CRITICAL: f64 = 0.95;

// =============================================================================
// PROCESS LIMITS
// =============================================================================

/// Lowest scheduling priority
pub const MIN_PRIORITY: u8 = 1;

/// Highest scheduling priority
pub const MAX_PRIORITY: u8 = 5;

/// Shortest burst the default generator produces
pub const MIN_BURST_TIME: u32 = 1;

/// Longest burst the default generator produces
pub const DEFAULT_MAX_BURST_TIME: u32 = 5;

/// Upper bound for a single interactive batch
pub const MAX_BATCH_SIZE: usize = 1000;

// =============================================================================
// TIMING
// =============================================================================

/// Wall time for one unit of burst time
pub const DEFAULT_TIME_UNIT: Duration = Duration::from_secs(1);

/// Simulated I/O wait while a process is blocked
pub const DEFAULT_IO_DELAY: Duration = Duration::from_secs(2);

/// Pause between allocation attempts during batch admission
pub const DEFAULT_ADMISSION_PAUSE: Duration = Duration::from_secs(1);
