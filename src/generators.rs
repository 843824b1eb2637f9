/*!
 * Parameter Generators
 * Sources for burst times, priorities and memory request sizes.
 *
 * Scheduling and allocation logic never touches randomness directly; the
 * simulator is handed a generator, so tests can script exact values.
 */

use crate::core::config::SimConfig;
use crate::core::limits::{MAX_PRIORITY, MIN_PRIORITY};
use crate::core::types::{BurstTime, Priority, Size};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::ops::RangeInclusive;
use std::sync::Arc;

/// Source of process parameters
pub trait ParamGenerator: Send {
    fn burst_time(&mut self) -> BurstTime;
    fn priority(&mut self) -> Priority;
    fn memory_size(&mut self) -> Size;
}

/// Generator shared between the simulator and the execution engine
pub type SharedGenerator = Arc<Mutex<Box<dyn ParamGenerator>>>;

pub fn shared<G: ParamGenerator + 'static>(generator: G) -> SharedGenerator {
    Arc::new(Mutex::new(Box::new(generator)))
}

/// Uniform random parameters from a seedable RNG
pub struct SeededGenerator {
    rng: StdRng,
    burst: RangeInclusive<BurstTime>,
    size: RangeInclusive<Size>,
}

impl SeededGenerator {
    pub fn new(
        seed: Option<u64>,
        burst: RangeInclusive<BurstTime>,
        size: RangeInclusive<Size>,
    ) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng, burst, size }
    }

    pub fn from_config(config: &SimConfig) -> Self {
        Self::new(
            config.seed,
            config.min_burst_time..=config.max_burst_time,
            config.min_request_size..=config.max_request_size,
        )
    }
}

impl ParamGenerator for SeededGenerator {
    fn burst_time(&mut self) -> BurstTime {
        self.rng.gen_range(self.burst.clone())
    }

    fn priority(&mut self) -> Priority {
        self.rng.gen_range(MIN_PRIORITY..=MAX_PRIORITY)
    }

    fn memory_size(&mut self) -> Size {
        self.rng.gen_range(self.size.clone())
    }
}

/// Scripted parameters; each sequence cycles when exhausted
#[derive(Debug, Clone)]
pub struct FixedGenerator {
    bursts: Vec<BurstTime>,
    priorities: Vec<Priority>,
    sizes: Vec<Size>,
    cursor: [usize; 3],
}

impl FixedGenerator {
    /// Same values every time
    pub fn new(burst_time: BurstTime, priority: Priority, size: Size) -> Self {
        Self::sequence(vec![burst_time], vec![priority], vec![size])
    }

    /// Cycle through the given values. Empty sequences yield the minimum value.
    pub fn sequence(bursts: Vec<BurstTime>, priorities: Vec<Priority>, sizes: Vec<Size>) -> Self {
        Self {
            bursts,
            priorities,
            sizes,
            cursor: [0; 3],
        }
    }

    fn next<T: Copy>(values: &[T], cursor: &mut usize, fallback: T) -> T {
        if values.is_empty() {
            return fallback;
        }
        let value = values[*cursor % values.len()];
        *cursor += 1;
        value
    }
}

impl ParamGenerator for FixedGenerator {
    fn burst_time(&mut self) -> BurstTime {
        Self::next(&self.bursts, &mut self.cursor[0], 1)
    }

    fn priority(&mut self) -> Priority {
        Self::next(&self.priorities, &mut self.cursor[1], MIN_PRIORITY)
    }

    fn memory_size(&mut self) -> Size {
        Self::next(&self.sizes, &mut self.cursor[2], 1)
    }
}
