/*!
 * Scheduler Tests
 * Ordering, quiescence and reporting for both policies
 */

use pretty_assertions::assert_eq;
use sched_sim::{
    Allocation, FixedGenerator, Policy, ProcessState, SimConfig, Simulator, VirtualClock,
};
use std::sync::Arc;

fn simulator(capacity: usize) -> Simulator {
    Simulator::builder()
        .with_config(SimConfig::instant().with_memory_capacity(capacity))
        .with_clock(Arc::new(VirtualClock::new()))
        .with_generator(FixedGenerator::new(1, 1, 1))
        .build()
        .unwrap()
}

/// Create processes with the given (burst, priority) pairs
fn create(sim: &Simulator, params: &[(u32, u8)]) -> Vec<u32> {
    let mut bursts = params.iter().map(|p| p.0);
    let mut priorities = params.iter().map(|p| p.1);
    sim.create_processes(
        params.len(),
        || bursts.next().unwrap(),
        || priorities.next().unwrap(),
    )
    .unwrap()
    .into_iter()
    .map(|p| p.id)
    .collect()
}

#[tokio::test]
async fn test_fcfs_runs_in_creation_order() {
    let sim = simulator(100);
    let pids = create(&sim, &[(1, 1), (1, 5), (1, 3)]);
    for &pid in &pids {
        sim.request_memory_for(pid, || 10).unwrap();
    }

    let report = sim.run_scheduler(Policy::Fcfs).await.unwrap();

    assert_eq!(report.executed, vec![1, 2, 3]);
    assert_eq!(report.policy, Policy::Fcfs);
    assert!(!report.idle);
    assert!(sim
        .list_processes()
        .iter()
        .all(|p| p.state == ProcessState::Terminated));
}

#[tokio::test]
async fn test_priority_rr_breaks_ties_by_id() {
    let sim = simulator(100);
    let pids = create(&sim, &[(1, 3), (1, 5), (1, 3)]);
    for &pid in &pids {
        sim.request_memory_for(pid, || 10).unwrap();
    }

    let report = sim.run_scheduler(Policy::PriorityRoundRobin).await.unwrap();

    assert_eq!(report.executed, vec![2, 1, 3]);
    assert_eq!(report.passes, 1);
}

#[tokio::test]
async fn test_priority_rr_scenario() {
    let sim = simulator(10);
    let pids = create(&sim, &[(2, 1), (1, 5)]);
    sim.request_memory_for(pids[0], || 4).unwrap();
    sim.request_memory_for(pids[1], || 3).unwrap();
    assert_eq!(sim.memory_status().available, 3);

    let report = sim.run_scheduler(Policy::PriorityRoundRobin).await.unwrap();

    assert_eq!(report.executed, vec![2, 1]);
    assert!(sim
        .list_processes()
        .iter()
        .all(|p| p.state == ProcessState::Terminated));
    let status = sim.memory_status();
    assert_eq!(status.available, 10);
    assert!(status.allocations.is_empty());
}

#[tokio::test]
async fn test_nothing_ready_is_idle() {
    let sim = simulator(100);
    create(&sim, &[(1, 1)]);

    for policy in [Policy::Fcfs, Policy::PriorityRoundRobin] {
        let report = sim.run_scheduler(policy).await.unwrap();
        assert!(report.idle);
        assert_eq!(report.passes, 0);
        assert!(report.executed.is_empty());
        assert_eq!(report.starved, vec![1]);
    }
}

#[tokio::test]
async fn test_empty_registry_is_idle() {
    let sim = simulator(100);
    let report = sim.run_scheduler(Policy::PriorityRoundRobin).await.unwrap();
    assert!(report.idle);
}

#[tokio::test]
async fn test_priority_rr_runs_processes_admitted_mid_run() {
    let sim = simulator(100);
    let pids = create(&sim, &[(1, 1), (1, 1)]);
    sim.request_memory_for(pids[0], || 80).unwrap();
    assert!(sim.request_memory_for(pids[1], || 50).is_err());

    let report = sim.run_scheduler(Policy::PriorityRoundRobin).await.unwrap();

    assert_eq!(report.executed, vec![1, 2]);
    assert_eq!(report.admitted, vec![Allocation { pid: 2, size: 50 }]);
    assert!(report.starved.is_empty());
    assert_eq!(sim.memory_status().available, 100);
}

#[tokio::test]
async fn test_fcfs_only_runs_processes_ready_at_start() {
    let sim = simulator(100);
    let pids = create(&sim, &[(1, 1), (1, 1)]);
    sim.request_memory_for(pids[0], || 80).unwrap();
    assert!(sim.request_memory_for(pids[1], || 50).is_err());

    let first = sim.run_scheduler(Policy::Fcfs).await.unwrap();
    assert_eq!(first.executed, vec![1]);
    assert_eq!(first.admitted, vec![Allocation { pid: 2, size: 50 }]);
    assert_eq!(sim.process(2).unwrap().state, ProcessState::Ready);

    let second = sim.run_scheduler(Policy::Fcfs).await.unwrap();
    assert_eq!(second.executed, vec![2]);
    assert_ne!(first.run_id, second.run_id);
}

#[tokio::test]
async fn test_unsatisfiable_request_starves_without_hanging() {
    let sim = simulator(100);
    let pids = create(&sim, &[(1, 2), (1, 1)]);
    sim.request_memory_for(pids[0], || 60).unwrap();
    assert!(sim.request_memory_for(pids[1], || 500).is_err());

    let report = sim.run_scheduler(Policy::PriorityRoundRobin).await.unwrap();

    assert_eq!(report.executed, vec![1]);
    assert_eq!(report.starved, vec![2]);
    assert!(report.admitted.is_empty());
    assert_eq!(sim.process(2).unwrap().state, ProcessState::WaitingMemory);
    assert_eq!(sim.memory_status().available, 100);
}

#[tokio::test]
async fn test_spawned_scheduler_returns_report() {
    let sim = simulator(100);
    let pids = create(&sim, &[(2, 4), (1, 2)]);
    for &pid in &pids {
        sim.request_memory_for(pid, || 5).unwrap();
    }

    let report = sim
        .spawn_scheduler(Policy::PriorityRoundRobin)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(report.executed, vec![1, 2]);
}

#[tokio::test]
async fn test_report_serializes_to_json() {
    let sim = simulator(100);
    let pids = create(&sim, &[(1, 1)]);
    sim.request_memory_for(pids[0], || 5).unwrap();

    let report = sim.run_scheduler(Policy::Fcfs).await.unwrap();
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["policy"], "fcfs");
    assert_eq!(json["executed"], serde_json::json!([1]));
    assert!(json.get("idle").is_none());
}
