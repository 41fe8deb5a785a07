//! How long a simulated lookup takes.
//!
//! The source asks a [`DelayStrategy`] for each operation's latency, so tests
//! can swap the random default for [`FixedDelay::ZERO`] and stay fast and
//! deterministic.

use core::time::Duration;

use rand::Rng;

pub trait DelayStrategy {
    fn next_delay(&self) -> Duration;
}

/// Bounds of the uniform delay, `min` inclusive and `max` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayConfig {
    pub min: Duration,
    pub max: Duration,
}

impl Default for DelayConfig {
    fn default() -> Self {
        Self {
            min: Duration::from_millis(500),
            max: Duration::from_millis(1500),
        }
    }
}

/// Uniformly random delay in `[min, max)`, sampled at nanosecond resolution.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformDelay {
    config: DelayConfig,
}

impl UniformDelay {
    pub fn new(config: DelayConfig) -> Self {
        Self { config }
    }
}

impl DelayStrategy for UniformDelay {
    fn next_delay(&self) -> Duration {
        let DelayConfig { min, max } = self.config;
        if max <= min {
            return min;
        }
        let span = u64::try_from((max - min).as_nanos()).unwrap_or(u64::MAX);
        if span == 0 {
            return min;
        }
        min + Duration::from_nanos(rand::rng().random_range(0..span))
    }
}

/// Always the same delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedDelay(pub Duration);

impl FixedDelay {
    pub const ZERO: Self = Self(Duration::ZERO);
}

impl DelayStrategy for FixedDelay {
    fn next_delay(&self) -> Duration {
        self.0
    }
}
