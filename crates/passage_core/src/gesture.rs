//! Back gesture bridge
//!
//! Translates the platform's predictive-back signal into the two values every
//! transition formula reads: whether the user is dragging, and how far.
//!
//! The platform reports a drag as `Started`, any number of `Progressed`
//! samples, then exactly one terminal event. Once the drag ends, progress
//! relaxes back to zero on a spring so released visuals settle smoothly.

use crate::config::GestureConfig;
use passage_animation::{Animatable, Curve, SpringConfig};
use std::collections::VecDeque;

/// One event from the platform back-gesture source
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureEvent {
    Started,
    /// Drag progress, expected within `0.0..=1.0`
    Progressed(f32),
    /// The user released past the threshold: navigate back
    Committed,
    /// The user released before the threshold: stay
    Cancelled,
}

/// How a drag ended
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureOutcome {
    Commit,
    Cancel,
}

/// Snapshot of the gesture read by transition targets
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GestureState {
    pub dragged: bool,
    pub progress: f32,
}

/// Pull-based adapter over a platform gesture source
pub trait GestureSource {
    /// Next pending event, or `None` once drained for this frame
    fn poll_event(&mut self) -> Option<GestureEvent>;
}

impl GestureSource for VecDeque<GestureEvent> {
    fn poll_event(&mut self) -> Option<GestureEvent> {
        self.pop_front()
    }
}

/// Live back-gesture state owned by the router
#[derive(Clone, Debug)]
pub struct BackGesture {
    enabled: bool,
    dragged: bool,
    progress: Animatable,
    release: SpringConfig,
}

impl BackGesture {
    pub fn new(config: &GestureConfig) -> Self {
        Self {
            enabled: false,
            dragged: false,
            progress: Animatable::new(0.0),
            release: SpringConfig::critically_damped(config.release_stiffness),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_dragged(&self) -> bool {
        self.dragged
    }

    /// Current progress, live while dragging and relaxing after release
    pub fn progress(&self) -> f32 {
        self.progress.value()
    }

    pub fn state(&self) -> GestureState {
        GestureState {
            dragged: self.dragged,
            progress: self.progress.value(),
        }
    }

    /// True while released progress is still relaxing toward zero
    pub fn is_settling(&self) -> bool {
        self.progress.is_running()
    }

    /// Enable or disable the bridge; disabling cancels a drag in flight
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled == enabled {
            return;
        }
        self.enabled = enabled;
        if !enabled && self.dragged {
            tracing::debug!("back gesture disabled mid-drag, cancelling");
            self.release_drag();
        }
    }

    /// Apply one event, returning the outcome if it ended a drag
    pub fn handle(&mut self, event: GestureEvent) -> Option<GestureOutcome> {
        if !self.enabled {
            tracing::debug!(?event, "back gesture disabled, ignoring event");
            return None;
        }

        match event {
            GestureEvent::Started => {
                if self.dragged {
                    tracing::warn!("back gesture started twice without a terminal event");
                }
                self.dragged = true;
                None
            }
            GestureEvent::Progressed(progress) => {
                if !progress.is_finite() {
                    tracing::warn!(progress, "ignoring non-finite back gesture progress");
                    return None;
                }
                if !self.dragged {
                    tracing::warn!("back gesture progress without start, starting drag");
                    self.dragged = true;
                }
                self.progress.snap_to(progress.clamp(0.0, 1.0));
                None
            }
            GestureEvent::Committed | GestureEvent::Cancelled => {
                if !self.dragged {
                    tracing::warn!(?event, "terminal back gesture event without a drag");
                    return None;
                }
                self.release_drag();
                Some(if event == GestureEvent::Committed {
                    GestureOutcome::Commit
                } else {
                    GestureOutcome::Cancel
                })
            }
        }
    }

    /// Advance the release spring
    pub fn step(&mut self, dt: f32) {
        self.progress.step(dt);
    }

    fn release_drag(&mut self) {
        self.dragged = false;
        self.progress.animate_to(0.0, Curve::Spring(self.release));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enabled() -> BackGesture {
        let mut gesture = BackGesture::new(&GestureConfig::default());
        gesture.set_enabled(true);
        gesture
    }

    #[test]
    fn test_disabled_ignores_events() {
        let mut gesture = BackGesture::new(&GestureConfig::default());
        assert_eq!(gesture.handle(GestureEvent::Started), None);
        gesture.handle(GestureEvent::Progressed(0.5));
        assert_eq!(gesture.state(), GestureState::default());
    }

    #[test]
    fn test_progress_is_clamped() {
        let mut gesture = enabled();
        gesture.handle(GestureEvent::Started);
        gesture.handle(GestureEvent::Progressed(1.7));
        assert_eq!(gesture.progress(), 1.0);
        gesture.handle(GestureEvent::Progressed(-0.2));
        assert_eq!(gesture.progress(), 0.0);
    }

    #[test]
    fn test_non_finite_progress_ignored() {
        let mut gesture = enabled();
        gesture.handle(GestureEvent::Started);
        gesture.handle(GestureEvent::Progressed(0.3));
        gesture.handle(GestureEvent::Progressed(f32::NAN));
        assert!((gesture.progress() - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_progress_without_start_begins_drag() {
        let mut gesture = enabled();
        gesture.handle(GestureEvent::Progressed(0.2));
        assert!(gesture.is_dragged());
    }

    #[test]
    fn test_terminal_without_drag_ignored() {
        let mut gesture = enabled();
        assert_eq!(gesture.handle(GestureEvent::Committed), None);
        assert_eq!(gesture.handle(GestureEvent::Cancelled), None);
    }

    #[test]
    fn test_release_relaxes_to_zero() {
        let mut gesture = enabled();
        gesture.handle(GestureEvent::Started);
        gesture.handle(GestureEvent::Progressed(0.6));
        assert_eq!(
            gesture.handle(GestureEvent::Cancelled),
            Some(GestureOutcome::Cancel)
        );
        assert!(!gesture.is_dragged());
        assert!(gesture.is_settling());

        for _ in 0..240 {
            gesture.step(1.0 / 60.0);
        }
        assert!(!gesture.is_settling());
        assert_eq!(gesture.progress(), 0.0);
    }

    #[test]
    fn test_disable_mid_drag_cancels() {
        let mut gesture = enabled();
        gesture.handle(GestureEvent::Started);
        gesture.handle(GestureEvent::Progressed(0.4));
        gesture.set_enabled(false);
        assert!(!gesture.is_dragged());
        assert!(gesture.is_settling());
    }

    #[test]
    fn test_queue_source_drains_in_order() {
        let mut source: VecDeque<_> = [GestureEvent::Started, GestureEvent::Committed].into();
        assert_eq!(source.poll_event(), Some(GestureEvent::Started));
        assert_eq!(source.poll_event(), Some(GestureEvent::Committed));
        assert_eq!(source.poll_event(), None);
    }
}
