//! Linear bus fades, advanced once per frame by the director

use super::bus::Bus;
use crate::lerp;

/// An in-flight fade of one bus level
#[derive(Debug, Clone, PartialEq)]
pub struct Fade {
    pub bus: Bus,
    pub start: f32,
    pub target: f32,
    pub elapsed: f32,
    pub duration: f32,
}

impl Fade {
    pub fn new(bus: Bus, start: f32, target: f32, duration: f32) -> Self {
        Self {
            bus,
            start,
            target,
            elapsed: 0.0,
            duration: duration.max(0.0),
        }
    }

    /// Advance by `dt` and return the level for this frame.
    /// The level depends only on elapsed/duration, never on step size.
    pub fn advance(&mut self, dt: f32) -> f32 {
        self.elapsed += dt;
        self.level()
    }

    pub fn level(&self) -> f32 {
        if self.duration <= 0.0 {
            return self.target;
        }
        lerp(self.start, self.target, self.elapsed / self.duration)
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fade_is_frame_rate_independent() {
        let mut coarse = Fade::new(Bus::Music, 0.2, 1.0, 1.0);
        let mut fine = coarse.clone();

        coarse.advance(0.5);
        for _ in 0..5 {
            fine.advance(0.1);
        }
        assert!((coarse.level() - fine.level()).abs() < 1e-5);
        assert!((coarse.level() - 0.6).abs() < 1e-5);
    }

    #[test]
    fn test_fade_clamps_at_target() {
        let mut fade = Fade::new(Bus::Ambience, 1.0, 0.0, 1.0);
        assert_eq!(fade.advance(3.0), 0.0);
        assert!(fade.is_finished());
    }

    #[test]
    fn test_zero_duration_jumps() {
        let mut fade = Fade::new(Bus::Music, 0.3, 0.9, 0.0);
        assert!(fade.is_finished());
        assert_eq!(fade.advance(0.0), 0.9);
    }
}
