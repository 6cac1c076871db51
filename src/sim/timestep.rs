//! Fixed-timestep scheduler
//!
//! Turns variable wall-clock frame times into a whole number of simulation
//! steps of constant size. Leftover time is carried to the next frame.

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_FRAME_TIME, MAX_SUBSTEPS, SIM_HZ};

/// Rounding slack when comparing the accumulator against one step
const STEP_EPSILON: f64 = 1e-9;

/// Accumulator-based step scheduler
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixedTimestep {
    /// Step duration in seconds
    step: f64,
    /// Unsimulated time carried between frames
    accumulator: f64,
    /// Wall-clock time of the previous frame, `None` before the first frame
    last_time: Option<f64>,
    max_substeps: u32,
    max_frame_time: f64,
}

impl FixedTimestep {
    /// A rate that is not a positive number falls back to `SIM_HZ`; a
    /// negative or NaN frame cap becomes zero.
    pub fn new(hz: f64, max_substeps: u32, max_frame_time: f64) -> Self {
        let hz = if hz.is_finite() && hz > 0.0 {
            hz
        } else {
            log::warn!("invalid simulation rate {}, using {}", hz, SIM_HZ);
            SIM_HZ
        };
        Self {
            step: 1.0 / hz,
            accumulator: 0.0,
            last_time: None,
            max_substeps: max_substeps.max(1),
            max_frame_time: max_frame_time.max(0.0),
        }
    }

    #[inline]
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Step duration as handed to the simulation
    #[inline]
    pub fn dt(&self) -> f32 {
        self.step as f32
    }

    #[inline]
    pub fn accumulator(&self) -> f64 {
        self.accumulator
    }

    /// Fraction of a step left in the accumulator, for render interpolation
    pub fn alpha(&self) -> f32 {
        (self.accumulator / self.step).clamp(0.0, 1.0) as f32
    }

    /// Restart timing from `now`, dropping any unsimulated time
    pub fn reset(&mut self, now: f64) {
        self.last_time = Some(now);
        self.accumulator = 0.0;
    }

    /// Feed the current wall-clock time (seconds) and get back how many fixed
    /// steps to run this frame. The first call only records the time.
    pub fn advance(&mut self, now: f64) -> u32 {
        let elapsed = match self.last_time {
            Some(last) => now - last,
            None => 0.0,
        };
        self.last_time = Some(now);
        self.accumulate(elapsed)
    }

    /// Add `elapsed` seconds and drain whole steps from the accumulator.
    ///
    /// Negative elapsed time is ignored and a single frame contributes at most
    /// `max_frame_time`. If the substep cap is hit, the remaining whole steps
    /// are dropped and only the fractional remainder is kept.
    pub fn accumulate(&mut self, elapsed: f64) -> u32 {
        let elapsed = if elapsed.is_nan() {
            0.0
        } else {
            elapsed.clamp(0.0, self.max_frame_time)
        };
        self.accumulator += elapsed;

        let mut steps = 0;
        while self.accumulator + STEP_EPSILON >= self.step {
            if steps == self.max_substeps {
                let dropped = (self.accumulator / self.step).floor();
                self.accumulator -= dropped * self.step;
                log::debug!("substep cap hit, dropped {} steps of backlog", dropped);
                break;
            }
            self.accumulator -= self.step;
            steps += 1;
        }

        if self.accumulator < 0.0 {
            self.accumulator = 0.0;
        }
        steps
    }
}

impl Default for FixedTimestep {
    fn default() -> Self {
        Self::new(SIM_HZ, MAX_SUBSTEPS, MAX_FRAME_TIME)
    }
}
