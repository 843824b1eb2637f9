/*!
 * Ready Queue
 * Grant-ordered record of processes admitted to memory.
 *
 * Bookkeeping only: schedulers derive eligibility from process state,
 * never from this queue.
 */

use crate::core::types::Pid;
use parking_lot::Mutex;
use std::collections::VecDeque;

#[derive(Default)]
pub struct ReadyQueue {
    entries: Mutex<VecDeque<Pid>>,
}

impl ReadyQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `pid`; a process is recorded once no matter how often it is pushed
    pub fn push(&self, pid: Pid) -> bool {
        let mut entries = self.entries.lock();
        if entries.contains(&pid) {
            return false;
        }
        entries.push_back(pid);
        true
    }

    pub fn snapshot(&self) -> Vec<Pid> {
        self.entries.lock().iter().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}
