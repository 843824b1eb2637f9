/*!
 * Memory Conservation Properties
 * Random allocate/terminate/release sequences never leak or double-count memory
 */

use proptest::prelude::*;
use sched_sim::memory::MemoryManager;
use sched_sim::process::{ProcessRegistry, ProcessState};
use std::sync::Arc;

const TOTAL: usize = 200;
const PROCESSES: usize = 8;

#[derive(Debug, Clone)]
enum Op {
    Allocate(usize, usize),
    Finish(usize),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..PROCESSES, 1..=150usize).prop_map(|(i, size)| Op::Allocate(i, size)),
        (0..PROCESSES).prop_map(Op::Finish),
    ]
}

proptest! {
    #[test]
    fn memory_is_conserved(ops in prop::collection::vec(op(), 1..64)) {
        let registry = Arc::new(ProcessRegistry::new());
        let memory = MemoryManager::new(registry.clone(), TOTAL);
        let pids: Vec<u32> = (0..PROCESSES)
            .map(|_| registry.register(1, 1).unwrap().id)
            .collect();

        for op in ops {
            match op {
                Op::Allocate(i, size) => {
                    let before = memory.available();
                    match memory.allocate(pids[i], size) {
                        Ok(_) => {
                            prop_assert_eq!(memory.available(), before - size);
                        }
                        Err(_) => {
                            prop_assert_eq!(memory.available(), before);
                        }
                    }
                }
                Op::Finish(i) => {
                    let pid = pids[i];
                    if registry.state(pid).unwrap() == ProcessState::Ready {
                        registry.transition(pid, ProcessState::Ready, ProcessState::Running).unwrap();
                        registry.transition(pid, ProcessState::Running, ProcessState::Terminated).unwrap();
                        memory.release(pid).unwrap();
                        prop_assert_eq!(memory.allocation_of(pid), None);
                    }
                }
            }

            let status = memory.status();
            prop_assert!(status.is_consistent());
            prop_assert!(status.available <= TOTAL);
            for allocation in &status.allocations {
                prop_assert!(allocation.size >= 1 && allocation.size <= TOTAL);
                let state = registry.state(allocation.pid).unwrap();
                prop_assert!(state != ProcessState::WaitingMemory && state != ProcessState::Terminated);
            }
        }
    }
}
