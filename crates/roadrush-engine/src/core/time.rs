/// Default cap on fixed steps run for a single frame.
const DEFAULT_MAX_STEPS: u32 = 10;
const STEP_EPSILON: f32 = 1e-4;

/// Fixed timestep accumulator.
/// Turns variable frame deltas into a whole number of equal simulation steps,
/// so spawn timers and animation lengths advance identically on every device.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    dt: f32,
    accumulator: f32,
    max_steps: u32,
}

impl FixedTimestep {
    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
            max_steps: DEFAULT_MAX_STEPS,
        }
    }

    /// Add frame time to the accumulator. Returns the number of fixed steps to run.
    /// Time beyond `max_steps` is dropped (the game slows down instead of stalling).
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        if frame_dt.is_nan() || frame_dt <= 0.0 {
            return 0;
        }
        self.accumulator += frame_dt;
        self.accumulator = self.accumulator.min(self.dt * self.max_steps as f32);
        // Tolerate rounding so that n frames of exactly `dt` yield n steps
        let steps = ((self.accumulator / self.dt + STEP_EPSILON) as u32).min(self.max_steps);
        self.accumulator = (self.accumulator - steps as f32 * self.dt).max(0.0);
        steps
    }

    pub fn dt(&self) -> f32 {
        self.dt
    }
}
