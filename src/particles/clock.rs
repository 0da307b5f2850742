//! Fixed timestep driver for the particle field
//!
//! Particle velocities are in pixels per 60 Hz frame. On faster or slower
//! displays the accumulator keeps the drift speed constant, so a single
//! animation callback may step the field zero, one or several times
//! rather than exactly once.

use crate::consts::{FRAME_DT, MAX_SUBSTEPS};

#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    accumulator: f32,
    last_time: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed an animation-frame timestamp (ms). Returns how many fixed
    /// frames to simulate.
    pub fn advance(&mut self, time_ms: f64) -> u32 {
        let dt = match self.last_time {
            Some(last) => ((time_ms - last) / 1000.0) as f32,
            None => FRAME_DT,
        };
        self.last_time = Some(time_ms);

        // Long gaps (hidden tab) are dropped, not replayed
        self.accumulator += dt.clamp(0.0, 0.1);

        let mut substeps = 0;
        while self.accumulator >= FRAME_DT && substeps < MAX_SUBSTEPS {
            self.accumulator -= FRAME_DT;
            substeps += 1;
        }
        if substeps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(FRAME_DT);
        }
        substeps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_steps_once() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.advance(1234.0), 1);
    }

    #[test]
    fn test_sixty_hz() {
        let mut clock = FrameClock::new();
        clock.advance(0.0);
        let frames: u32 = (1..=60).map(|i| clock.advance(i as f64 * 1000.0 / 60.0)).sum();
        assert!((59..=61).contains(&frames), "frames = {}", frames);
    }

    #[test]
    fn test_high_refresh_rate_skips_some_frames() {
        let mut clock = FrameClock::new();
        clock.advance(0.0);
        let frames: u32 = (1..=120).map(|i| clock.advance(i as f64 * 1000.0 / 120.0)).sum();
        assert!((59..=61).contains(&frames), "frames = {}", frames);
    }

    #[test]
    fn test_long_gap_is_capped() {
        let mut clock = FrameClock::new();
        clock.advance(0.0);
        assert_eq!(clock.advance(10_000.0), MAX_SUBSTEPS);
        // No backlog carried into the next frame
        assert!(clock.advance(10_000.0 + 1000.0 / 60.0) <= 2);
    }
}
