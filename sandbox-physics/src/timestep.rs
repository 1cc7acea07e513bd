// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Fixed-timestep accumulator
//!
//! Decouples the simulation rate from the frame rate. Variable frame time is
//! accumulated and consumed in whole steps; the leftover fraction is exposed
//! as [`FixedTimestep::alpha`] for render interpolation.
//!
//! # Timestep Guidelines
//!
//! - Start with 1/60 s and only go lower if fast bodies tunnel through walls
//! - Frame time is capped (0.25 s by default) so a stalled frame cannot
//!   trigger an unbounded catch-up loop

use crate::error::{PhysicsError, Result};

/// Default cap on elapsed time accepted from a single frame
pub const DEFAULT_MAX_FRAME_TIME: f32 = 0.25;

/// Accumulates frame time and hands it out in fixed steps
///
/// # Examples
///
/// ```
/// use sandbox_physics::timestep::FixedTimestep;
///
/// let mut clock = FixedTimestep::new(0.1);
/// let mut ticks = 0;
/// let steps = clock.advance(0.25, |_dt| ticks += 1);
///
/// assert_eq!(steps, 2);
/// assert_eq!(ticks, 2);
/// assert!((clock.alpha() - 0.5).abs() < 1e-4);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FixedTimestep {
    step: f32,
    accumulator: f32,
    max_frame_time: f32,
}

impl FixedTimestep {
    /// Create an accumulator with the given step in seconds
    ///
    /// # Panics
    ///
    /// Panics if `step` is not positive and finite.
    pub fn new(step: f32) -> Self {
        match Self::try_new(step) {
            Ok(timestep) => timestep,
            Err(err) => panic!("{}", err),
        }
    }

    /// Create an accumulator, rejecting a non-positive or non-finite step
    pub fn try_new(step: f32) -> Result<Self> {
        if !(step > 0.0 && step.is_finite()) {
            return Err(PhysicsError::InvalidTimestep(step));
        }
        Ok(FixedTimestep {
            step,
            accumulator: 0.0,
            max_frame_time: DEFAULT_MAX_FRAME_TIME,
        })
    }

    /// Cap the elapsed time accepted per frame
    ///
    /// # Panics
    ///
    /// Panics if the cap is not positive and finite.
    pub fn with_max_frame_time(mut self, max_frame_time: f32) -> Self {
        assert!(
            max_frame_time > 0.0 && max_frame_time.is_finite(),
            "Max frame time must be positive and finite, got {}",
            max_frame_time
        );
        self.max_frame_time = max_frame_time;
        self
    }

    /// Step length in seconds
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Time waiting to be consumed
    pub fn accumulator(&self) -> f32 {
        self.accumulator
    }

    /// Add frame time; negative or NaN input is ignored
    pub fn accumulate(&mut self, elapsed: f32) {
        if elapsed > 0.0 {
            self.accumulator += elapsed.min(self.max_frame_time);
        }
    }

    /// Take one step from the accumulator if enough time is stored
    pub fn consume_step(&mut self) -> bool {
        if self.accumulator >= self.step {
            self.accumulator -= self.step;
            true
        } else {
            false
        }
    }

    /// Accumulate `elapsed` and run `tick` once per whole step available
    ///
    /// Returns the number of steps taken.
    pub fn advance<F>(&mut self, elapsed: f32, mut tick: F) -> usize
    where
        F: FnMut(f32),
    {
        self.accumulate(elapsed);
        let mut steps = 0;
        while self.consume_step() {
            tick(self.step);
            steps += 1;
        }
        steps
    }

    /// Fraction of a step left in the accumulator, in [0, 1)
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.step
    }

    /// Drop any stored time
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

impl Default for FixedTimestep {
    fn default() -> Self {
        FixedTimestep::new(1.0 / 60.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_new_rejects_invalid() {
        assert_eq!(FixedTimestep::try_new(0.0), Err(PhysicsError::InvalidTimestep(0.0)));
        assert!(FixedTimestep::try_new(-1.0).is_err());
        assert!(FixedTimestep::try_new(f32::INFINITY).is_err());
        assert!(FixedTimestep::try_new(f32::NAN).is_err());
    }

    #[test]
    #[should_panic(expected = "timestep must be positive and finite")]
    fn test_new_panics_on_zero_step() {
        FixedTimestep::new(0.0);
    }

    #[test]
    fn test_accumulate_and_consume() {
        let mut clock = FixedTimestep::new(0.5);
        clock.accumulate(0.2);
        assert!(!clock.consume_step());

        clock.accumulate(0.2);
        clock.accumulate(0.2);
        assert!(clock.consume_step());
        assert!(!clock.consume_step());
        assert!((clock.accumulator() - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_frame_time_is_capped() {
        let mut clock = FixedTimestep::new(0.1).with_max_frame_time(0.25);
        let steps = clock.advance(10.0, |_| {});
        assert_eq!(steps, 2);
    }

    #[test]
    #[should_panic(expected = "Max frame time must be positive and finite")]
    fn test_infinite_max_frame_time_panics() {
        FixedTimestep::new(0.1).with_max_frame_time(f32::INFINITY);
    }

    #[test]
    fn test_negative_and_nan_elapsed_ignored() {
        let mut clock = FixedTimestep::new(0.1);
        clock.accumulate(-1.0);
        clock.accumulate(f32::NAN);
        assert_eq!(clock.accumulator(), 0.0);
    }

    #[test]
    fn test_advance_passes_fixed_step() {
        let mut clock = FixedTimestep::new(0.125);
        let mut seen = Vec::new();
        clock.advance(0.25, |dt| seen.push(dt));
        assert_eq!(seen, vec![0.125, 0.125]);
        assert_eq!(clock.alpha(), 0.0);
    }

    #[test]
    fn test_reset() {
        let mut clock = FixedTimestep::default();
        clock.accumulate(0.01);
        clock.reset();
        assert_eq!(clock.accumulator(), 0.0);
        assert_eq!(clock.step(), 1.0 / 60.0);
    }
}
