/*!
 * Process Lifecycle Tests
 * State machine rules as seen through the simulator API
 */

use pretty_assertions::assert_eq;
use sched_sim::{
    FixedGenerator, IoOutcome, MemoryError, Policy, ProcessError, ProcessState, SimConfig,
    SimError, Simulator, VirtualClock,
};
use std::sync::Arc;

fn simulator() -> Simulator {
    Simulator::builder()
        .with_config(SimConfig::instant().with_memory_capacity(100))
        .with_clock(Arc::new(VirtualClock::new()))
        .with_generator(FixedGenerator::new(2, 3, 10))
        .build()
        .unwrap()
}

#[test]
fn test_new_processes_wait_for_memory() {
    let sim = simulator();
    let created = sim.create_random(3).unwrap();

    assert_eq!(created.iter().map(|p| p.id).collect::<Vec<_>>(), vec![1, 2, 3]);
    for p in &created {
        assert_eq!(p.state, ProcessState::WaitingMemory);
        assert_eq!(p.burst_time, 2);
        assert_eq!(p.priority, 3);
    }
    assert!(sim.ready_queue().is_empty());
}

#[test]
fn test_ids_keep_increasing_across_batches() {
    let sim = simulator();
    sim.create_random(2).unwrap();
    let second = sim.create_random(2).unwrap();
    assert_eq!(second.iter().map(|p| p.id).collect::<Vec<_>>(), vec![3, 4]);
}

#[test]
fn test_zero_burst_is_rejected() {
    let sim = simulator();
    let err = sim.create_processes(1, || 0, || 1).unwrap_err();
    assert_eq!(err, SimError::Process(ProcessError::InvalidBurstTime(0)));
    assert!(sim.list_processes().is_empty());
}

#[tokio::test]
async fn test_terminated_process_is_stable() {
    let sim = simulator();
    let created = sim.create_random(1).unwrap();
    let pid = created[0].id;
    sim.request_memory(pid).unwrap();
    sim.run_scheduler(Policy::Fcfs).await.unwrap();

    let finished = sim.process(pid).unwrap();
    assert_eq!(finished.state, ProcessState::Terminated);

    assert_eq!(
        sim.block_for_io(pid).await.unwrap(),
        IoOutcome::Skipped {
            pid,
            state: ProcessState::Terminated
        }
    );
    assert_eq!(
        sim.request_memory(pid).unwrap_err(),
        MemoryError::InvalidState {
            pid,
            state: ProcessState::Terminated
        }
    );
    assert!(sim.run_scheduler(Policy::PriorityRoundRobin).await.unwrap().idle);

    assert_eq!(sim.process(pid).unwrap(), finished);
    assert_eq!(sim.memory_status().available, 100);
}

#[tokio::test]
async fn test_io_on_waiting_process_is_skipped() {
    let sim = simulator();
    let pid = sim.create_random(1).unwrap()[0].id;

    assert_eq!(
        sim.block_for_io(pid).await.unwrap(),
        IoOutcome::Skipped {
            pid,
            state: ProcessState::WaitingMemory
        }
    );
}

#[tokio::test]
async fn test_io_round_trip_returns_to_ready() {
    let sim = simulator();
    let pid = sim.create_random(1).unwrap()[0].id;
    sim.request_memory(pid).unwrap();

    assert_eq!(sim.block_for_io(pid).await.unwrap(), IoOutcome::Resumed { pid });
    assert_eq!(sim.process(pid).unwrap().state, ProcessState::Ready);
    assert_eq!(sim.memory_status().allocations.len(), 1);
}

#[tokio::test]
async fn test_unknown_process_errors() {
    let sim = simulator();
    assert_eq!(
        sim.process(9).unwrap_err(),
        SimError::Process(ProcessError::NotFound(9))
    );
    assert!(sim.block_for_io(9).await.is_err());
    assert_eq!(
        sim.request_memory(9).unwrap_err(),
        MemoryError::ProcessNotFound(9)
    );
}
