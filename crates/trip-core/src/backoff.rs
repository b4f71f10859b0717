//! Retry delay schedules.
//!
//! Used by the routing client (exponential) and the whole-generation retry
//! envelope (linear) so failing upstreams don't cause tight retry loops.

use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Growth {
    Exponential,
    Linear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Backoff {
    base: Duration,
    max: Duration,
    growth: Growth,
}

impl Backoff {
    /// `base`, `2 * base`, `4 * base`, ... capped at `max`.
    pub fn exponential(base: Duration, max: Duration) -> Self {
        Self::build(base, max, Growth::Exponential)
    }

    /// `base`, `2 * base`, `3 * base`, ... capped at `max`.
    pub fn linear(base: Duration, max: Duration) -> Self {
        Self::build(base, max, Growth::Linear)
    }

    fn build(base: Duration, max: Duration, growth: Growth) -> Self {
        let max = max.max(base);
        Self { base, max, growth }
    }

    /// Delay to wait after failed attempt number `attempt` (1-based).
    pub fn delay(&self, attempt: u32) -> Duration {
        let attempt = attempt.max(1);
        let delay = match self.growth {
            Growth::Exponential => {
                let factor = 1u32.checked_shl(attempt - 1).unwrap_or(u32::MAX);
                self.base.saturating_mul(factor)
            }
            Growth::Linear => self.base.saturating_mul(attempt),
        };
        delay.min(self.max)
    }
}
