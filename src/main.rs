/*!
 * Process Scheduler Simulator - Main Entry Point
 *
 * Interactive menu over the simulator:
 * - Process creation with memory admission
 * - Priority round-robin and FCFS runs
 * - Process, memory and ready-queue views
 */

use anyhow::Context;
use sched_sim::cli::{self, MenuOption, OutputFormat};
use sched_sim::{init_tracing, SimConfig, Simulator};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin};
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let format = OutputFormat::from_args(std::env::args());
    let config = SimConfig::from_env();
    let sim = Simulator::new(config).context("invalid simulator configuration")?;

    info!(memory = sim.config().memory_capacity, "Simulator ready");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        println!("{}", cli::MENU);
        let Some(input) = prompt(&mut lines, "Enter your option: ").await? else {
            break;
        };

        let option = match MenuOption::parse(&input) {
            Ok(option) => option,
            Err(e) => {
                println!("Invalid option: {}. Please choose a listed option.", e);
                continue;
            }
        };

        match option {
            MenuOption::Create => {
                let Some(input) = prompt(&mut lines, "How many processes do you want to create? ").await?
                else {
                    break;
                };
                let count = match cli::parse_count(&input) {
                    Ok(count) => count,
                    Err(e) => {
                        println!("{}", e);
                        continue;
                    }
                };
                match sim.admit_batch(count).await {
                    Ok(report) => println!("{}", cli::render_batch(&report, format)),
                    Err(e) => println!("{}", e),
                }
            }
            MenuOption::Run(policy) => {
                println!("Running processes ({})...", policy);
                match sim.spawn_scheduler(policy).await {
                    Ok(Ok(report)) => println!("{}", cli::render_run_report(&report, format)),
                    Ok(Err(e)) => println!("{}", e),
                    Err(e) => {
                        error!(error = %e, "Scheduler worker failed");
                        println!("Scheduler worker failed: {}", e);
                    }
                }
            }
            MenuOption::ShowProcesses => {
                println!("{}", cli::render_processes(&sim.list_processes(), format));
            }
            MenuOption::ShowMemory => {
                println!("{}", cli::render_memory(&sim.memory_status(), format));
            }
            MenuOption::ShowQueue => {
                println!(
                    "{}",
                    cli::render_queue(&sim.ready_queue(), &sim.list_processes(), format)
                );
            }
            MenuOption::Exit => {
                println!("Exiting the program.");
                break;
            }
        }
    }

    info!("Simulator shutting down");
    Ok(())
}

/// Print `message` and read one line; `None` on end of input
async fn prompt(
    lines: &mut Lines<BufReader<Stdin>>,
    message: &str,
) -> anyhow::Result<Option<String>> {
    let mut stdout = tokio::io::stdout();
    stdout.write_all(message.as_bytes()).await?;
    stdout.flush().await?;
    Ok(lines.next_line().await.context("failed to read stdin")?)
}
