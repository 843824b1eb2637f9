/*!
 * Simulator Builder
 * Builder pattern for Simulator construction
 */

use super::Simulator;
use crate::core::config::SimConfig;
use crate::core::errors::SimResult;
use crate::execution::{Clock, ExecutionEngine, TokioClock};
use crate::generators::{shared, ParamGenerator, SeededGenerator, SharedGenerator};
use crate::memory::MemoryManager;
use crate::process::{ProcessRegistry, ReadyQueue};
use crate::scheduler::Scheduler;
use std::sync::Arc;
use tracing::info;

/// Builder for Simulator
pub struct SimulatorBuilder {
    config: SimConfig,
    clock: Option<Arc<dyn Clock>>,
    generator: Option<SharedGenerator>,
}

impl SimulatorBuilder {
    /// Create a new Simulator builder with default configuration
    pub fn new() -> Self {
        Self {
            config: SimConfig::default(),
            clock: None,
            generator: None,
        }
    }

    pub fn with_config(mut self, config: SimConfig) -> Self {
        self.config = config;
        self
    }

    /// Override the source of simulated time (defaults to real tokio timers)
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Override the parameter source (defaults to a seeded RNG from the config)
    pub fn with_generator<G: ParamGenerator + 'static>(mut self, generator: G) -> Self {
        self.generator = Some(shared(generator));
        self
    }

    /// Build the Simulator
    pub fn build(self) -> SimResult<Simulator> {
        self.config.validate()?;

        let clock = self
            .clock
            .unwrap_or_else(|| Arc::new(TokioClock::new()) as Arc<dyn Clock>);
        let generator = self
            .generator
            .unwrap_or_else(|| shared(SeededGenerator::from_config(&self.config)));

        let registry = Arc::new(ProcessRegistry::new());
        let memory = Arc::new(MemoryManager::new(
            registry.clone(),
            self.config.memory_capacity,
        ));
        let ready_queue = Arc::new(ReadyQueue::new());
        let engine = Arc::new(
            ExecutionEngine::new(
                registry.clone(),
                memory.clone(),
                ready_queue.clone(),
                clock.clone(),
                generator.clone(),
            )
            .with_timing(self.config.time_unit(), self.config.io_delay()),
        );
        let scheduler = Arc::new(Scheduler::new(registry.clone(), engine.clone()));

        info!(
            memory = self.config.memory_capacity,
            time_unit_ms = self.config.time_unit_ms,
            io_delay_ms = self.config.io_delay_ms,
            "Simulator initialized"
        );

        Ok(Simulator {
            config: Arc::new(self.config),
            registry,
            memory,
            ready_queue,
            engine,
            scheduler,
            generator,
            clock,
        })
    }
}

impl Default for SimulatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
