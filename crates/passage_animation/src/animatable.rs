//! A single continuously animated scalar
//!
//! An [`Animatable`] owns its current value and velocity and runs at most one
//! animation at a time. Requesting a new target cancels the in-flight run and
//! starts a fresh one from the current value and velocity (latest target wins).
//! Cancelled runs never report completion; a run that reaches its target
//! reports [`Finished`] exactly once.

use crate::spring::{Spring, SpringConfig};
use crate::tween::{Tween, TweenRun};

/// Motion model for one animation run
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Curve {
    Spring(SpringConfig),
    Tween(Tween),
}

impl Curve {
    /// Critically damped spring with the given stiffness
    pub fn spring(stiffness: f32) -> Self {
        Curve::Spring(SpringConfig::critically_damped(stiffness))
    }

    pub fn is_spring(&self) -> bool {
        matches!(self, Curve::Spring(_))
    }
}

impl From<SpringConfig> for Curve {
    fn from(config: SpringConfig) -> Self {
        Curve::Spring(config)
    }
}

impl From<Tween> for Curve {
    fn from(tween: Tween) -> Self {
        Curve::Tween(tween)
    }
}

/// Completion notice for a run that reached its target
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Finished {
    /// Settled value (equal to the run's target)
    pub value: f32,
    /// Sequence number of the run, see [`Animatable::run_id`]
    pub run_id: u64,
}

#[derive(Clone, Copy, Debug)]
enum Run {
    Spring(Spring),
    Tween(TweenRun),
}

/// One animated scalar with latest-target-wins semantics
#[derive(Clone, Debug)]
pub struct Animatable {
    value: f32,
    velocity: f32,
    target: f32,
    run: Option<Run>,
    run_id: u64,
}

impl Animatable {
    pub fn new(initial: f32) -> Self {
        Self {
            value: initial,
            velocity: 0.0,
            target: initial,
            run: None,
            run_id: 0,
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    /// Target of the current (or last) run
    pub fn target(&self) -> f32 {
        self.target
    }

    /// True while a run is in flight
    pub fn is_running(&self) -> bool {
        self.run.is_some()
    }

    /// Sequence number of the most recently started run
    pub fn run_id(&self) -> u64 {
        self.run_id
    }

    /// Start animating toward `target`, replacing any in-flight run
    ///
    /// Springs inherit the current velocity so interrupted motion stays
    /// continuous; tweens restart from the current value at rest.
    pub fn animate_to(&mut self, target: f32, curve: Curve) {
        self.target = target;
        self.run_id += 1;
        self.run = Some(match curve {
            Curve::Spring(config) => {
                let mut spring = Spring::with_velocity(config, self.value, self.velocity);
                spring.set_target(target);
                Run::Spring(spring)
            }
            Curve::Tween(tween) => {
                self.velocity = 0.0;
                Run::Tween(TweenRun::new(tween, self.value, target))
            }
        });
    }

    /// Jump to `value` and cancel any in-flight run without reporting completion
    pub fn snap_to(&mut self, value: f32) {
        self.value = value;
        self.target = value;
        self.velocity = 0.0;
        if self.run.take().is_some() {
            self.run_id += 1;
        }
    }

    /// Advance the active run by `dt` seconds
    ///
    /// Returns `Some` on the frame the run settles. A run whose target equals
    /// the current value settles on its first step.
    pub fn step(&mut self, dt: f32) -> Option<Finished> {
        let run = self.run.as_mut()?;
        let done = match run {
            Run::Spring(spring) => {
                spring.step(dt);
                self.value = spring.value();
                self.velocity = spring.velocity();
                spring.is_settled()
            }
            Run::Tween(tween) => {
                self.value = tween.step(dt);
                tween.is_finished()
            }
        };

        if !done {
            return None;
        }

        self.value = self.target;
        self.velocity = 0.0;
        self.run = None;
        Some(Finished {
            value: self.value,
            run_id: self.run_id,
        })
    }
}

impl Default for Animatable {
    fn default() -> Self {
        Self::new(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::easing::Easing;

    const DT: f32 = 1.0 / 60.0;

    fn run_until_finished(anim: &mut Animatable, max_frames: usize) -> Option<Finished> {
        for _ in 0..max_frames {
            if let Some(done) = anim.step(DT) {
                return Some(done);
            }
        }
        None
    }

    #[test]
    fn test_idle_value_does_not_step() {
        let mut anim = Animatable::new(1.0);
        assert!(!anim.is_running());
        assert_eq!(anim.step(DT), None);
        assert_eq!(anim.value(), 1.0);
    }

    #[test]
    fn test_spring_run_finishes_once() {
        let mut anim = Animatable::new(0.0);
        anim.animate_to(1000.0, Curve::spring(250.0));
        assert!(anim.is_running());

        let done = run_until_finished(&mut anim, 600).expect("spring should settle");
        assert_eq!(done.value, 1000.0);
        assert!(!anim.is_running());
        assert_eq!(anim.step(DT), None);
    }

    #[test]
    fn test_same_target_finishes_immediately() {
        let mut anim = Animatable::new(1.0);
        anim.animate_to(1.0, Curve::spring(225.0));
        assert!(anim.is_running());
        assert!(anim.step(DT).is_some());
    }

    #[test]
    fn test_retarget_cancels_previous_run() {
        let mut anim = Animatable::new(0.0);
        anim.animate_to(100.0, Curve::spring(250.0));
        let first = anim.run_id();
        for _ in 0..5 {
            assert_eq!(anim.step(DT), None);
        }
        let velocity = anim.velocity();
        assert!(velocity > 0.0);

        anim.animate_to(0.0, Curve::spring(250.0));
        assert_ne!(anim.run_id(), first);
        assert_eq!(anim.velocity(), velocity);

        let done = run_until_finished(&mut anim, 600).expect("second run should settle");
        assert_eq!(done.run_id, anim.run_id());
        assert_eq!(done.value, 0.0);
    }

    #[test]
    fn test_tween_run() {
        let mut anim = Animatable::new(1.0);
        anim.animate_to(0.0, Curve::Tween(Tween::new(250, Easing::EaseIn)));
        anim.step(0.125);
        let halfway = anim.value();
        assert!(halfway > 0.5, "ease-in should still be above midpoint: {halfway}");
        let done = run_until_finished(&mut anim, 30).expect("tween should finish");
        assert_eq!(done.value, 0.0);
    }

    #[test]
    fn test_snap_cancels_without_completion() {
        let mut anim = Animatable::new(0.0);
        anim.animate_to(10.0, Curve::spring(250.0));
        anim.snap_to(4.0);
        assert!(!anim.is_running());
        assert_eq!(anim.value(), 4.0);
        assert_eq!(anim.step(DT), None);
    }
}
