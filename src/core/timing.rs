use std::time::{Duration, Instant};

/// Running total of measured durations, in microseconds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Accumulator {
    count: u64,
    total_us: u64,
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, elapsed: Duration) {
        self.add_micros(elapsed.as_micros().min(u64::MAX as u128) as u64);
    }

    pub fn add_micros(&mut self, us: u64) {
        self.total_us = self.total_us.saturating_add(us);
        self.count += 1;
    }

    /// Number of samples
    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn total_us(&self) -> u64 {
        self.total_us
    }

    /// Mean sample in microseconds, 0 with no samples
    pub fn avg_us(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.total_us as f64 / self.count as f64
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Adds the time between its creation and drop to an accumulator.
/// Created disabled it measures nothing.
pub struct ScopedTimer<'a> {
    target: Option<(&'a mut Accumulator, Instant)>,
}

impl<'a> ScopedTimer<'a> {
    pub fn new(accumulator: &'a mut Accumulator, enabled: bool) -> Self {
        Self {
            target: enabled.then(|| (accumulator, Instant::now())),
        }
    }
}

impl Drop for ScopedTimer<'_> {
    fn drop(&mut self) {
        if let Some((accumulator, start)) = self.target.take() {
            accumulator.add(start.elapsed());
        }
    }
}

/// Per-phase timings of the collision system
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionTimings {
    /// Clearing and repopulating the grid
    pub grid: Accumulator,

    /// Candidate pair generation
    pub broad_phase: Accumulator,

    /// Overlap tests and contact resolution
    pub narrow_phase: Accumulator,

    /// Wall containment
    pub boundary: Accumulator,
}

impl CollisionTimings {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Mean total collision time per tick, in microseconds
    pub fn avg_total_us(&self) -> f64 {
        self.grid.avg_us() + self.broad_phase.avg_us() + self.narrow_phase.avg_us() + self.boundary.avg_us()
    }
}
