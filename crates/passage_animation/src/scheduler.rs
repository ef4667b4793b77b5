//! Animation scheduler
//!
//! Owns every registered [`Animatable`] and advances them together once per
//! frame. The scheduler is driven by the host's frame loop through
//! [`AnimationScheduler::tick`]; it never spawns threads or reads the clock, so
//! the same frame sequence always produces the same values.
//!
//! Completion is reported through the [`FrameReport`] returned by `tick`:
//! callers react to finished runs after the step instead of from inside it,
//! which keeps all mutation on the caller's side of the frame boundary.

use crate::animatable::{Animatable, Curve, Finished};
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

new_key_type! {
    /// Handle to a registered animated scalar
    pub struct AnimationId;
}

/// Result of advancing all animations by one frame
#[derive(Clone, Debug, Default)]
pub struct FrameReport {
    /// Runs that reached their target during this frame, in registration order
    pub finished: SmallVec<[(AnimationId, Finished); 4]>,
    /// Whether any run is still in flight after this frame
    pub active: bool,
}

impl FrameReport {
    pub fn is_finished(&self, id: AnimationId) -> bool {
        self.finished.iter().any(|(finished, _)| *finished == id)
    }
}

/// The animation scheduler that ticks all registered animations
#[derive(Default)]
pub struct AnimationScheduler {
    animations: SlotMap<AnimationId, Animatable>,
    frame: u64,
}

impl AnimationScheduler {
    pub fn new() -> Self {
        Self {
            animations: SlotMap::with_key(),
            frame: 0,
        }
    }

    /// Register a new scalar resting at `initial`
    pub fn register(&mut self, initial: f32) -> AnimationId {
        self.animations.insert(Animatable::new(initial))
    }

    /// Remove a scalar; any in-flight run is dropped without completion
    pub fn remove(&mut self, id: AnimationId) -> Option<Animatable> {
        self.animations.remove(id)
    }

    pub fn contains(&self, id: AnimationId) -> bool {
        self.animations.contains_key(id)
    }

    pub fn get(&self, id: AnimationId) -> Option<&Animatable> {
        self.animations.get(id)
    }

    /// Start animating `id` toward `target`, cancelling its previous run
    pub fn animate_to(&mut self, id: AnimationId, target: f32, curve: Curve) {
        if let Some(anim) = self.animations.get_mut(id) {
            anim.animate_to(target, curve);
        }
    }

    /// Jump `id` to `value` immediately
    pub fn snap_to(&mut self, id: AnimationId, value: f32) {
        if let Some(anim) = self.animations.get_mut(id) {
            anim.snap_to(value);
        }
    }

    /// Current value; unknown ids read as 0
    pub fn value(&self, id: AnimationId) -> f32 {
        self.animations.get(id).map(|a| a.value()).unwrap_or(0.0)
    }

    /// Target of the current or last run
    pub fn target(&self, id: AnimationId) -> Option<f32> {
        self.animations.get(id).map(|a| a.target())
    }

    /// Value once the scalar is at rest, `None` while a run is in flight
    pub fn settled_value(&self, id: AnimationId) -> Option<f32> {
        self.animations
            .get(id)
            .filter(|a| !a.is_running())
            .map(|a| a.value())
    }

    /// Check if a scalar is mid-flight (unknown ids are at rest)
    pub fn is_running(&self, id: AnimationId) -> bool {
        self.animations
            .get(id)
            .map(|a| a.is_running())
            .unwrap_or(false)
    }

    /// Check if any animations are still active
    pub fn has_active_animations(&self) -> bool {
        self.animations.values().any(|a| a.is_running())
    }

    /// Number of registered scalars
    pub fn animation_count(&self) -> usize {
        self.animations.len()
    }

    /// Number of frames ticked so far
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Advance every running animation by `dt` seconds
    ///
    /// Negative or non-finite deltas are treated as zero, which still lets
    /// runs whose target equals their value settle.
    pub fn tick(&mut self, dt: f32) -> FrameReport {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.frame += 1;

        let mut report = FrameReport::default();
        for (id, anim) in self.animations.iter_mut() {
            if let Some(done) = anim.step(dt) {
                report.finished.push((id, done));
            }
            report.active |= anim.is_running();
        }

        if !report.finished.is_empty() {
            tracing::trace!(
                frame = self.frame,
                finished = report.finished.len(),
                "animation runs settled"
            );
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_scheduler_tick() {
        let mut scheduler = AnimationScheduler::new();
        let id = scheduler.register(0.0);
        scheduler.animate_to(id, 100.0, Curve::spring(250.0));

        let report = scheduler.tick(DT);
        assert!(report.active);
        assert!(scheduler.value(id) > 0.0);
    }

    #[test]
    fn test_finished_reported_once() {
        let mut scheduler = AnimationScheduler::new();
        let id = scheduler.register(0.0);
        scheduler.animate_to(id, 1.0, Curve::spring(2500.0));

        let mut reports = 0;
        for _ in 0..240 {
            let report = scheduler.tick(DT);
            if report.is_finished(id) {
                reports += 1;
            }
        }
        assert_eq!(reports, 1);
        assert_eq!(scheduler.settled_value(id), Some(1.0));
        assert!(!scheduler.has_active_animations());
    }

    #[test]
    fn test_removed_animation_never_reports() {
        let mut scheduler = AnimationScheduler::new();
        let keep = scheduler.register(0.0);
        let dropped = scheduler.register(0.0);
        scheduler.animate_to(keep, 1.0, Curve::spring(2500.0));
        scheduler.animate_to(dropped, 1.0, Curve::spring(2500.0));

        assert!(scheduler.remove(dropped).is_some());
        assert_eq!(scheduler.animation_count(), 1);

        for _ in 0..240 {
            let report = scheduler.tick(DT);
            assert!(!report.is_finished(dropped));
        }
        assert!(!scheduler.is_running(dropped));
        assert_eq!(scheduler.value(dropped), 0.0);
    }

    #[test]
    fn test_invalid_dt_is_ignored() {
        let mut scheduler = AnimationScheduler::new();
        let id = scheduler.register(0.0);
        scheduler.animate_to(id, 10.0, Curve::spring(250.0));

        scheduler.tick(f32::NAN);
        scheduler.tick(-1.0);
        assert_eq!(scheduler.value(id), 0.0);
        assert!(scheduler.is_running(id));
        assert_eq!(scheduler.frame(), 2);
    }
}
