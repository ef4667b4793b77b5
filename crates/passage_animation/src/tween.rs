//! Fixed-duration eased animation
//!
//! Unlike springs, a tween covers its distance in a constant wall-clock time
//! regardless of how far it has to travel or how fast the value was moving.

use crate::easing::Easing;

/// Parameters of a timed animation
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    /// Total duration in milliseconds (excluding delay)
    pub duration_ms: u32,
    /// Delay before the value starts moving, in milliseconds
    pub delay_ms: u32,
    pub easing: Easing,
}

impl Tween {
    pub fn new(duration_ms: u32, easing: Easing) -> Self {
        Self {
            duration_ms,
            delay_ms: 0,
            easing,
        }
    }

    pub fn delay(mut self, delay_ms: u32) -> Self {
        self.delay_ms = delay_ms;
        self
    }
}

impl Default for Tween {
    fn default() -> Self {
        Self::new(300, Easing::FastOutSlowIn)
    }
}

/// Running state of a tween between two fixed endpoints
#[derive(Clone, Copy, Debug)]
pub(crate) struct TweenRun {
    tween: Tween,
    from: f32,
    to: f32,
    elapsed_ms: f32,
}

impl TweenRun {
    pub(crate) fn new(tween: Tween, from: f32, to: f32) -> Self {
        Self {
            tween,
            from,
            to,
            elapsed_ms: 0.0,
        }
    }

    /// Advance by `dt` seconds and return the new value
    pub(crate) fn step(&mut self, dt: f32) -> f32 {
        self.elapsed_ms += dt.max(0.0) * 1000.0;
        self.value()
    }

    pub(crate) fn value(&self) -> f32 {
        let active = self.elapsed_ms - self.tween.delay_ms as f32;
        if active < 0.0 {
            return self.from;
        }
        if self.tween.duration_ms == 0 {
            return self.to;
        }
        let t = (active / self.tween.duration_ms as f32).min(1.0);
        self.from + (self.to - self.from) * self.tween.easing.apply(t)
    }

    pub(crate) fn is_finished(&self) -> bool {
        self.elapsed_ms >= (self.tween.delay_ms + self.tween.duration_ms) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tween_reaches_target_after_duration() {
        let mut run = TweenRun::new(Tween::new(250, Easing::EaseIn), 1.0, 0.0);
        let mut frames = 0;
        while !run.is_finished() {
            run.step(1.0 / 60.0);
            frames += 1;
        }
        assert_eq!(run.value(), 0.0);
        // 250ms at 60fps is 15 frames, one more if rounding lands just short
        assert!((15..=16).contains(&frames), "took {frames} frames");
    }

    #[test]
    fn test_tween_delay_holds_start_value() {
        let mut run = TweenRun::new(Tween::new(100, Easing::Linear).delay(100), 0.0, 10.0);
        assert_eq!(run.step(0.05), 0.0);
        let v = run.step(0.1);
        assert!((v - 5.0).abs() < 1e-3);
    }

    #[test]
    fn test_zero_duration_jumps() {
        let mut run = TweenRun::new(Tween::new(0, Easing::Linear), 3.0, 7.0);
        assert!(run.is_finished());
        assert_eq!(run.step(0.0), 7.0);
    }
}
