//! Tick timing for body workers.
//!
//! Every worker owns a [`TickClock`] that turns one loop iteration into a
//! phase delta. Under [`TickPolicy::Fixed`] every tick counts as exactly one
//! step regardless of how long the worker actually slept, so animation
//! speed follows the scheduler. Under [`TickPolicy::WallClock`] the step is
//! scaled by the measured time since the previous tick.
//!
//! # Example
//!
//! ```ignore
//! use orrery::time::{TickClock, TickPolicy};
//! use std::time::Duration;
//!
//! let mut clock = TickClock::new(TickPolicy::WallClock, Duration::from_millis(5));
//!
//! // In the worker loop:
//! let delta = clock.tick();
//! body.advance(delta);
//! ```

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Upper bound on a single wall-clock tick delta, in nominal ticks.
pub const MAX_TICK_DELTA: f64 = 10.0;

/// How a tick maps to phase progress.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TickPolicy {
    /// Each tick advances by one nominal step.
    #[default]
    Fixed,
    /// Each tick advances by elapsed time over the nominal interval.
    WallClock,
}

/// Per-worker tick timer.
#[derive(Debug)]
pub struct TickClock {
    policy: TickPolicy,
    /// Sleep between ticks; the unit of a wall-clock delta.
    interval: Duration,
    /// When the previous tick happened.
    last_tick: Instant,
    /// Ticks since the clock was created.
    tick_count: u64,
}

impl TickClock {
    /// Create a clock whose first tick is measured from now.
    pub fn new(policy: TickPolicy, interval: Duration) -> Self {
        Self {
            policy,
            interval,
            last_tick: Instant::now(),
            tick_count: 0,
        }
    }

    /// Register a tick and return its delta in nominal steps.
    pub fn tick(&mut self) -> f64 {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_tick);
        self.last_tick = now;
        self.tick_count += 1;

        match self.policy {
            TickPolicy::Fixed => 1.0,
            TickPolicy::WallClock => scaled_delta(elapsed, self.interval),
        }
    }

    #[inline]
    pub fn policy(&self) -> TickPolicy {
        self.policy
    }

    #[inline]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    #[inline]
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }
}

/// Elapsed time expressed in nominal intervals, clamped to [`MAX_TICK_DELTA`].
fn scaled_delta(elapsed: Duration, interval: Duration) -> f64 {
    if interval.is_zero() {
        return 1.0;
    }
    (elapsed.as_secs_f64() / interval.as_secs_f64()).clamp(0.0, MAX_TICK_DELTA)
}

/// Rate of a monotonically increasing counter, refreshed periodically.
///
/// Used to show ticks per second next to the frame rate.
#[derive(Debug)]
pub struct RateMeter {
    last_update: Instant,
    last_count: u64,
    update_interval: Duration,
    rate: f64,
}

impl RateMeter {
    pub fn new(update_interval: Duration) -> Self {
        Self {
            last_update: Instant::now(),
            last_count: 0,
            update_interval,
            rate: 0.0,
        }
    }

    /// Feed the current counter value; returns the latest rate per second.
    pub fn update(&mut self, count: u64) -> f64 {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_update);
        if elapsed >= self.update_interval {
            let delta = count.saturating_sub(self.last_count);
            self.rate = delta as f64 / elapsed.as_secs_f64();
            self.last_count = count;
            self.last_update = now;
        }
        self.rate
    }

    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }
}

impl Default for RateMeter {
    fn default() -> Self {
        Self::new(Duration::from_millis(500))
    }
}
