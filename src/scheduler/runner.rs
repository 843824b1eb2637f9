/*!
 * Scheduler Runner
 * Applies a policy to the registry and drives the execution engine until
 * nothing is left to run.
 */

use super::order;
use super::types::{Policy, RunReport};
use crate::core::types::Pid;
use crate::execution::{ExecutionEngine, IoOutcome, RunOutcome};
use crate::process::{ProcessRegistry, ProcessResult, ProcessState};
use std::sync::Arc;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

pub struct Scheduler {
    registry: Arc<ProcessRegistry>,
    engine: Arc<ExecutionEngine>,
}

impl Scheduler {
    pub fn new(registry: Arc<ProcessRegistry>, engine: Arc<ExecutionEngine>) -> Self {
        Self { registry, engine }
    }

    /// Execute `policy` to quiescence
    pub async fn run(&self, policy: Policy) -> ProcessResult<RunReport> {
        let run_id = Uuid::new_v4().to_string();
        let span = info_span!("scheduler_run", run_id = %run_id, policy = %policy);
        let mut report = RunReport::new(run_id, policy);

        async move {
            match policy {
                Policy::Fcfs => self.run_fcfs(&mut report).await?,
                Policy::PriorityRoundRobin => self.run_priority_rr(&mut report).await?,
            }

            report.starved = self.registry.pids_in_state(ProcessState::WaitingMemory);

            info!(
                executed = report.executed.len(),
                admitted = report.admitted.len(),
                starved = report.starved.len(),
                "Scheduler run finished"
            );
            Ok(report)
        }
        .instrument(span)
        .await
    }

    /// Every READY process at start, in creation order, one after another
    async fn run_fcfs(&self, report: &mut RunReport) -> ProcessResult<()> {
        let ready = order::fcfs(&self.registry.snapshot());
        if ready.is_empty() {
            info!("Nothing to run");
            report.idle = true;
            return Ok(());
        }

        report.passes = 1;
        for pid in ready {
            let outcome = self.engine.run_to_completion(pid).await?;
            record(report, outcome);
        }
        Ok(())
    }

    /// Passes over the priority order until every process terminated or
    /// none of them is READY or BLOCKED any more.
    async fn run_priority_rr(&self, report: &mut RunReport) -> ProcessResult<()> {
        if !self.registry.any_in_state(ProcessState::Ready) {
            info!("Nothing to run");
            report.idle = true;
            return Ok(());
        }

        let working_order = order::priority(&self.registry.snapshot());
        while !self.registry.all_terminated() && self.any_eligible(&working_order)? {
            report.passes += 1;
            for &pid in &working_order {
                match self.registry.state(pid)? {
                    ProcessState::Ready => {
                        let outcome = self.engine.run_to_completion(pid).await?;
                        record(report, outcome);
                    }
                    ProcessState::Blocked => {
                        if let IoOutcome::Resumed { pid } = self.engine.complete_io(pid).await? {
                            report.unblocked.push(pid);
                        }
                    }
                    // WAITING_MEMORY is checked again next pass
                    _ => {}
                }
            }
        }
        Ok(())
    }

    fn any_eligible(&self, pids: &[Pid]) -> ProcessResult<bool> {
        for &pid in pids {
            if matches!(
                self.registry.state(pid)?,
                ProcessState::Ready | ProcessState::Blocked
            ) {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

fn record(report: &mut RunReport, outcome: RunOutcome) {
    if let RunOutcome::Completed(completion) = outcome {
        report.executed.push(completion.pid);
        report.admitted.extend(completion.admitted);
    }
}
