/*!
 * Memory Pool Tests
 * Allocation, release and waiting-request bookkeeping
 */

use pretty_assertions::assert_eq;
use sched_sim::memory::{Allocation, MemoryError, MemoryManager, MemoryPressure};
use sched_sim::process::{ProcessRegistry, ProcessState};
use std::sync::Arc;

fn setup(total: usize) -> (Arc<ProcessRegistry>, MemoryManager) {
    let registry = Arc::new(ProcessRegistry::new());
    let memory = MemoryManager::new(registry.clone(), total);
    (registry, memory)
}

fn terminate(registry: &ProcessRegistry, pid: u32) {
    registry
        .transition(pid, ProcessState::Ready, ProcessState::Running)
        .unwrap();
    registry
        .transition(pid, ProcessState::Running, ProcessState::Terminated)
        .unwrap();
}

#[test]
fn test_waiting_request_succeeds_after_release() {
    let (registry, memory) = setup(100);
    let a = registry.register(1, 1).unwrap();
    let b = registry.register(1, 1).unwrap();

    memory.allocate(a.id, 80).unwrap();
    let err = memory.allocate(b.id, 50).unwrap_err();
    assert!(err.is_insufficient());
    assert_eq!(registry.state(b.id).unwrap(), ProcessState::WaitingMemory);
    assert_eq!(memory.pending_request(b.id), Some(50));

    terminate(&registry, a.id);
    assert_eq!(memory.release(a.id).unwrap(), 80);

    let granted = memory.allocate(b.id, 50).unwrap();
    assert_eq!(granted, Allocation { pid: b.id, size: 50 });
    assert_eq!(registry.state(b.id).unwrap(), ProcessState::Ready);
    assert_eq!(memory.pending_request(b.id), None);
    assert_eq!(memory.available(), 50);
}

#[test]
fn test_exact_fit_is_granted() {
    let (registry, memory) = setup(64);
    let p = registry.register(1, 1).unwrap();

    memory.allocate(p.id, 64).unwrap();
    assert_eq!(memory.available(), 0);
    assert_eq!(memory.status().pressure(), MemoryPressure::Critical);
}

#[test]
fn test_release_requires_terminated() {
    let (registry, memory) = setup(100);
    let p = registry.register(1, 1).unwrap();
    memory.allocate(p.id, 30).unwrap();

    let err = memory.release(p.id).unwrap_err();
    assert_eq!(
        err,
        MemoryError::InvalidState {
            pid: p.id,
            state: ProcessState::Ready
        }
    );
    assert_eq!(memory.allocation_of(p.id), Some(30));
}

#[test]
fn test_unknown_process_is_rejected() {
    let (_registry, memory) = setup(100);
    assert_eq!(
        memory.allocate(42, 10).unwrap_err(),
        MemoryError::ProcessNotFound(42)
    );
    assert_eq!(memory.release(42).unwrap_err(), MemoryError::ProcessNotFound(42));
}
