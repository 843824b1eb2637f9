/*!
 * CLI Helpers
 * Menu parsing and rendering for the interactive shell.
 *
 * Nothing here mutates simulator state; the binary maps each option onto
 * one `Simulator` call.
 */

use crate::core::errors::{SimError, SimResult};
use crate::core::limits::MAX_BATCH_SIZE;
use crate::core::types::Pid;
use crate::memory::MemoryStatus;
use crate::process::{Process, ProcessState};
use crate::scheduler::{Policy, RunReport};
use crate::simulator::BatchReport;
use serde::Serialize;
use std::fmt::Write;

pub const MENU: &str = "
======================= Menu =======================
|   1. Create processes                            |
|   2. Run processes (priority round robin)        |
|   3. Run processes (FCFS)                        |
|   4. Show process states                         |
|   5. Show memory status                          |
|   6. Show ready queue                            |
|   7. Exit                                        |
====================================================";

/// Menu actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    Create,
    Run(Policy),
    ShowProcesses,
    ShowMemory,
    ShowQueue,
    Exit,
}

impl MenuOption {
    pub fn parse(input: &str) -> SimResult<Self> {
        let choice: u32 = input
            .trim()
            .parse()
            .map_err(|_| SimError::InvalidInput(format!("'{}' is not a menu option", input.trim())))?;

        match choice {
            1 => Ok(MenuOption::Create),
            2 => Ok(MenuOption::Run(Policy::PriorityRoundRobin)),
            3 => Ok(MenuOption::Run(Policy::Fcfs)),
            4 => Ok(MenuOption::ShowProcesses),
            5 => Ok(MenuOption::ShowMemory),
            6 => Ok(MenuOption::ShowQueue),
            7 => Ok(MenuOption::Exit),
            other => Err(SimError::InvalidInput(format!("{} is not a menu option", other))),
        }
    }
}

/// Parse how many processes to create
pub fn parse_count(input: &str) -> SimResult<usize> {
    let count: usize = input
        .trim()
        .parse()
        .map_err(|_| SimError::InvalidInput(format!("'{}' is not a process count", input.trim())))?;
    if count > MAX_BATCH_SIZE {
        return Err(SimError::InvalidInput(format!(
            "at most {} processes per batch",
            MAX_BATCH_SIZE
        )));
    }
    Ok(count)
}

/// Output style for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_args<I: IntoIterator<Item = String>>(args: I) -> Self {
        if args.into_iter().any(|a| a == "--json") {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
}

pub fn render_processes(processes: &[Process], format: OutputFormat) -> String {
    if format == OutputFormat::Json {
        return to_json(&processes);
    }
    if processes.is_empty() {
        return "No processes created.".to_string();
    }

    let mut out = String::from("========== Process states ==========\n");
    for p in processes {
        let _ = writeln!(out, "Process ID: {}", p.id);
        let _ = writeln!(out, "State: {}", p.state);
        let _ = writeln!(out, "Priority: {}", p.priority);
        if p.state == ProcessState::Terminated {
            let _ = writeln!(out, "Total execution time: {} units", p.burst_time);
        } else {
            let _ = writeln!(out, "Burst time: {} units", p.burst_time);
        }
        out.push_str("------------------------------------\n");
    }
    out
}

pub fn render_memory(status: &MemoryStatus, format: OutputFormat) -> String {
    if format == OutputFormat::Json {
        return to_json(status);
    }

    let mut out = String::from("========== Memory status ==========\n");
    let _ = writeln!(
        out,
        "Available: {} / {} MB ({:.1}% used, pressure {})",
        status.available,
        status.total,
        status.usage_percentage(),
        status.pressure()
    );
    for a in &status.allocations {
        let _ = writeln!(out, "Process {}: {} MB", a.pid, a.size);
    }
    for a in &status.pending {
        let _ = writeln!(out, "Process {}: waiting for {} MB", a.pid, a.size);
    }
    out
}

pub fn render_queue(queue: &[Pid], processes: &[Process], format: OutputFormat) -> String {
    if format == OutputFormat::Json {
        return to_json(&queue);
    }
    if queue.is_empty() {
        return "The ready queue is empty.".to_string();
    }

    let mut out = String::from("========== Ready queue ==========\n");
    for pid in queue {
        let state = processes
            .iter()
            .find(|p| p.id == *pid)
            .map(|p| p.state.to_string())
            .unwrap_or_else(|| "UNKNOWN".to_string());
        let _ = writeln!(out, "Process {} ({})", pid, state);
    }
    out
}

pub fn render_run_report(report: &RunReport, format: OutputFormat) -> String {
    if format == OutputFormat::Json {
        return to_json(report);
    }
    if report.idle {
        return "No processes ready to run.".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(out, "{} run finished after {} pass(es)", report.policy, report.passes);
    let _ = writeln!(out, "Execution order: {}", join(&report.executed));
    for a in &report.admitted {
        let _ = writeln!(out, "Memory assigned to waiting process {}: {} MB", a.pid, a.size);
    }
    if !report.unblocked.is_empty() {
        let _ = writeln!(out, "Resumed after I/O: {}", join(&report.unblocked));
    }
    if !report.starved.is_empty() {
        let _ = writeln!(out, "Still waiting for memory: {}", join(&report.starved));
    }
    out
}

pub fn render_batch(report: &BatchReport, format: OutputFormat) -> String {
    if format == OutputFormat::Json {
        return to_json(report);
    }

    let mut out = String::new();
    let _ = writeln!(out, "Created processes: {}", join(&report.created));
    for a in &report.admitted {
        let _ = writeln!(out, "Memory assigned to process {}: {} MB", a.pid, a.size);
    }
    if !report.waiting.is_empty() {
        let _ = writeln!(
            out,
            "Insufficient memory for: {} (waiting for memory to be released)",
            join(&report.waiting)
        );
    }
    out
}

fn join(pids: &[Pid]) -> String {
    if pids.is_empty() {
        return "-".to_string();
    }
    pids.iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
