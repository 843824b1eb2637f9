/*!
 * Memory Pool
 * Grants and reclaims memory for registered processes.
 *
 * `available`, the allocation table and the pending-request table live
 * behind one mutex, so `available + sum(allocations) == total` holds at
 * every point another thread can observe.
 */

use super::types::{Allocation, MemoryError, MemoryPressure, MemoryResult, MemoryStatus};
use crate::core::types::{Pid, Size};
use crate::process::{ProcessError, ProcessRegistry, ProcessState};
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

struct PoolState {
    available: Size,
    allocations: BTreeMap<Pid, Size>,
    // Size of the last failed request per still-waiting process
    pending: BTreeMap<Pid, Size>,
    grants: u64,
}

pub struct MemoryManager {
    registry: Arc<ProcessRegistry>,
    total: Size,
    pool: Mutex<PoolState>,
}

impl MemoryManager {
    pub fn new(registry: Arc<ProcessRegistry>, total: Size) -> Self {
        info!(total = total, "Memory manager initialized");
        Self {
            registry,
            total,
            pool: Mutex::new(PoolState {
                available: total,
                allocations: BTreeMap::new(),
                pending: BTreeMap::new(),
                grants: 0,
            }),
        }
    }

    /// Grant `size` units to a WAITING_MEMORY process and move it to READY.
    ///
    /// On `InsufficientMemory` the process stays WAITING_MEMORY and the
    /// request size is remembered for the next retry.
    pub fn allocate(&self, pid: Pid, size: Size) -> MemoryResult<Allocation> {
        if size == 0 {
            return Err(MemoryError::InvalidSize { pid, requested: size });
        }

        let mut pool = self.pool.lock();

        let state = self
            .registry
            .state(pid)
            .map_err(|e| map_process_error(pid, e))?;
        if state != ProcessState::WaitingMemory {
            return Err(MemoryError::InvalidState { pid, state });
        }

        if pool.available < size {
            pool.pending.insert(pid, size);
            warn!(
                pid = pid,
                requested = size,
                available = pool.available,
                "Insufficient memory, process keeps waiting"
            );
            return Err(MemoryError::InsufficientMemory {
                pid,
                requested: size,
                available: pool.available,
                total: self.total,
            });
        }

        // State changes first so a failed transition leaves the pool untouched
        self.registry
            .transition(pid, ProcessState::WaitingMemory, ProcessState::Ready)
            .map_err(|e| map_process_error(pid, e))?;

        pool.available -= size;
        pool.allocations.insert(pid, size);
        pool.pending.remove(&pid);
        pool.grants += 1;

        let used = self.total - pool.available;
        let available = pool.available;
        drop(pool);

        let pressure = MemoryPressure::from_ratio(used as f64 / self.total as f64);
        if pressure > MemoryPressure::Low {
            warn!(
                pid = pid,
                size = size,
                available = available,
                pressure = %pressure,
                "Memory allocated under pressure"
            );
        } else {
            info!(pid = pid, size = size, available = available, "Memory allocated");
        }

        Ok(Allocation { pid, size })
    }

    /// Reclaim the allocation of a TERMINATED process.
    ///
    /// Returns the reclaimed size; 0 when the process holds nothing, so a
    /// second release is a no-op.
    pub fn release(&self, pid: Pid) -> MemoryResult<Size> {
        let mut pool = self.pool.lock();

        let state = self
            .registry
            .state(pid)
            .map_err(|e| map_process_error(pid, e))?;
        if state != ProcessState::Terminated {
            return Err(MemoryError::InvalidState { pid, state });
        }

        pool.pending.remove(&pid);
        match pool.allocations.remove(&pid) {
            Some(size) => {
                pool.available += size;
                info!(
                    pid = pid,
                    size = size,
                    available = pool.available,
                    "Memory released"
                );
                Ok(size)
            }
            None => {
                debug!(pid = pid, "Release skipped, process holds no memory");
                Ok(0)
            }
        }
    }

    /// Size of the last failed request for `pid`, if it is still waiting
    pub fn pending_request(&self, pid: Pid) -> Option<Size> {
        self.pool.lock().pending.get(&pid).copied()
    }

    pub fn allocation_of(&self, pid: Pid) -> Option<Size> {
        self.pool.lock().allocations.get(&pid).copied()
    }

    pub fn available(&self) -> Size {
        self.pool.lock().available
    }

    pub fn total(&self) -> Size {
        self.total
    }

    /// Consistent snapshot of the whole pool
    pub fn status(&self) -> MemoryStatus {
        let pool = self.pool.lock();
        let to_vec = |map: &BTreeMap<Pid, Size>| {
            map.iter()
                .map(|(&pid, &size)| Allocation { pid, size })
                .collect::<Vec<_>>()
        };
        MemoryStatus {
            total: self.total,
            available: pool.available,
            allocations: to_vec(&pool.allocations),
            pending: to_vec(&pool.pending),
            grants: pool.grants,
        }
    }
}

fn map_process_error(pid: Pid, err: ProcessError) -> MemoryError {
    match err {
        ProcessError::StaleState { actual, .. } => MemoryError::InvalidState { pid, state: actual },
        ProcessError::InvalidTransition { from, .. } => MemoryError::InvalidState { pid, state: from },
        _ => MemoryError::ProcessNotFound(pid),
    }
}
