/*!
 * Selection Order
 * Pure ordering rules for both policies
 */

use crate::core::types::Pid;
use crate::process::{Process, ProcessState};

/// READY processes in creation order
pub fn fcfs(processes: &[Process]) -> Vec<Pid> {
    let mut ready: Vec<Pid> = processes
        .iter()
        .filter(|p| p.state == ProcessState::Ready)
        .map(|p| p.id)
        .collect();
    ready.sort_unstable();
    ready
}

/// All processes, priority descending, ties by ascending id
pub fn priority(processes: &[Process]) -> Vec<Pid> {
    let mut ordered = processes.to_vec();
    ordered.sort_by(|a, b| b.priority.cmp(&a.priority).then(a.id.cmp(&b.id)));
    ordered.into_iter().map(|p| p.id).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn process(id: Pid, priority: u8, state: ProcessState) -> Process {
        Process {
            id,
            state,
            burst_time: 1,
            priority,
        }
    }

    #[test]
    fn test_fcfs_only_ready_in_id_order() {
        let processes = vec![
            process(3, 1, ProcessState::Ready),
            process(1, 5, ProcessState::Ready),
            process(2, 5, ProcessState::WaitingMemory),
            process(4, 2, ProcessState::Terminated),
        ];
        assert_eq!(fcfs(&processes), vec![1, 3]);
    }

    #[test]
    fn test_priority_with_tie_break() {
        let processes = vec![
            process(1, 3, ProcessState::Ready),
            process(2, 5, ProcessState::Ready),
            process(3, 3, ProcessState::Ready),
        ];
        assert_eq!(priority(&processes), vec![2, 1, 3]);
    }

    #[test]
    fn test_priority_includes_every_state() {
        let processes = vec![
            process(1, 1, ProcessState::WaitingMemory),
            process(2, 4, ProcessState::Blocked),
        ];
        assert_eq!(priority(&processes), vec![2, 1]);
    }
}
