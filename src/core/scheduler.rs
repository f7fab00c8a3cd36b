use crate::core::SimulationConfig;

/// Fixed-timestep accumulator.
///
/// Real frame time is banked and spent in whole ticks of `time_step`.
/// At most `max_substeps` ticks are released per frame; time beyond that
/// is dropped so a slow frame cannot snowball into ever longer frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedTimestep {
    time_step: f32,
    max_substeps: u32,
    accumulator: f32,
}

impl FixedTimestep {
    pub fn new(time_step: f32, max_substeps: u32) -> Self {
        Self {
            time_step,
            max_substeps: max_substeps.max(1),
            accumulator: 0.0,
        }
    }

    /// Stepper for a world's configured time step and substep cap
    pub fn from_config(config: &SimulationConfig) -> Self {
        Self::new(config.time_step, config.max_substeps)
    }

    pub fn time_step(&self) -> f32 {
        self.time_step
    }

    /// Banked time not yet spent on a tick
    pub fn accumulated(&self) -> f32 {
        self.accumulator
    }

    /// Fraction of a tick currently banked, for render interpolation
    pub fn alpha(&self) -> f32 {
        if self.time_step > 0.0 {
            self.accumulator / self.time_step
        } else {
            0.0
        }
    }

    /// Banks `frame_time` and returns how many whole ticks to run now
    pub fn accumulate(&mut self, frame_time: f32) -> u32 {
        if self.time_step.is_nan() || self.time_step <= 0.0 || !frame_time.is_finite() || frame_time <= 0.0 {
            return 0;
        }
        self.accumulator += frame_time;

        let mut ticks = 0;
        while self.accumulator >= self.time_step && ticks < self.max_substeps {
            self.accumulator -= self.time_step;
            ticks += 1;
        }
        if ticks == self.max_substeps && self.accumulator >= self.time_step {
            log::debug!(
                "dropping {:.4}s of simulation time after {} substeps",
                self.accumulator,
                ticks
            );
            self.accumulator %= self.time_step;
        }
        ticks
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn releases_whole_ticks_and_banks_remainder() {
        let mut stepper = FixedTimestep::new(0.25, 10);
        assert_eq!(stepper.accumulate(0.6), 2);
        assert!((stepper.accumulated() - 0.1).abs() < 1e-6);
        assert_eq!(stepper.accumulate(0.2), 1);
        assert!((stepper.accumulated() - 0.05).abs() < 1e-6);
        assert!((stepper.alpha() - 0.2).abs() < 1e-5);

        stepper.reset();
        assert_eq!(stepper.alpha(), 0.0);
        assert_eq!(FixedTimestep::new(0.0, 1).alpha(), 0.0);
    }

    #[test]
    fn caps_ticks_per_frame() {
        let mut stepper = FixedTimestep::new(0.25, 3);
        assert_eq!(stepper.accumulate(10.0), 3);
        assert!(stepper.accumulated() < 0.25);
    }

    #[test]
    fn from_config_uses_world_settings() {
        let stepper = FixedTimestep::from_config(&SimulationConfig::default());
        assert_eq!(stepper.time_step(), 1.0 / 60.0);
        let mut stepper = stepper;
        assert_eq!(stepper.accumulate(1.0), 10);
    }

    #[test]
    fn ignores_non_positive_frames() {
        let mut stepper = FixedTimestep::new(0.25, 3);
        assert_eq!(stepper.accumulate(-1.0), 0);
        assert_eq!(stepper.accumulate(f32::NAN), 0);
        assert_eq!(stepper.accumulated(), 0.0);
    }
}
