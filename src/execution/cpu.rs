/*!
 * CPU Resource
 * Single execution slot; at most one process holds it at any instant.
 */

use crate::core::types::Pid;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

pub struct Cpu {
    // tokio's mutex is fair, so waiters are served in arrival order
    slot: tokio::sync::Mutex<()>,
    holder: parking_lot::Mutex<Option<Pid>>,
    dispatches: AtomicU64,
}

/// Proof of CPU ownership; the slot is released when this is dropped
pub struct CpuGuard<'a> {
    cpu: &'a Cpu,
    pid: Pid,
    _slot: tokio::sync::MutexGuard<'a, ()>,
}

impl Cpu {
    pub fn new() -> Self {
        Self {
            slot: tokio::sync::Mutex::new(()),
            holder: parking_lot::Mutex::new(None),
            dispatches: AtomicU64::new(0),
        }
    }

    /// Wait until the CPU is free, then take it for `pid`
    pub async fn acquire(&self, pid: Pid) -> CpuGuard<'_> {
        let slot = self.slot.lock().await;
        *self.holder.lock() = Some(pid);
        self.dispatches.fetch_add(1, Ordering::Relaxed);
        debug!(pid = pid, "CPU acquired");
        CpuGuard {
            cpu: self,
            pid,
            _slot: slot,
        }
    }

    /// Process currently holding the CPU
    pub fn holder(&self) -> Option<Pid> {
        *self.holder.lock()
    }

    /// Number of times the CPU has been granted
    pub fn dispatches(&self) -> u64 {
        self.dispatches.load(Ordering::Relaxed)
    }
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

impl CpuGuard<'_> {
    pub fn pid(&self) -> Pid {
        self.pid
    }
}

impl Drop for CpuGuard<'_> {
    fn drop(&mut self) {
        *self.cpu.holder.lock() = None;
        debug!(pid = self.pid, "CPU released");
    }
}
