//! Transition targets and motion curves
//!
//! Pure functions mapping an instance's stack membership and the live back
//! gesture to the values its opacity and offset should animate toward, and
//! to the curve each run should use.
//!
//! | Membership          | Opacity                    | Offset               |
//! |---------------------|----------------------------|----------------------|
//! | opened              | 1                          | progress × 350       |
//! | previous            | progress × 0.75            | 0                    |
//! | buried in stack     | 0 (fixed-duration fade)    | 0                    |
//! | out of stack        | 1                          | 1000 (off-screen)    |

use crate::config::TransitionConfig;
use crate::gesture::GestureState;
use passage_animation::{Curve, Easing, SpringConfig, Tween};

/// Stack membership of one instance, recomputed on every stack mutation
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Membership {
    pub in_stack: bool,
    pub opened: bool,
    pub previous: bool,
}

impl Membership {
    /// Neither in the stack nor on top: the instance is leaving
    pub fn is_exiting(&self) -> bool {
        !self.in_stack && !self.opened
    }

    /// In the stack below the previous entry
    pub fn is_buried(&self) -> bool {
        self.in_stack && !self.opened && !self.previous
    }
}

/// Target values for an instance's animated scalars
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransitionTargets {
    pub opacity: f32,
    pub offset: f32,
}

impl TransitionTargets {
    pub fn compute(membership: Membership, gesture: GestureState, config: &TransitionConfig) -> Self {
        Self {
            opacity: opacity_target(membership, gesture, config),
            offset: offset_target(membership, gesture, config),
        }
    }
}

pub fn opacity_target(membership: Membership, gesture: GestureState, config: &TransitionConfig) -> f32 {
    if membership.opened || !membership.in_stack {
        1.0
    } else if membership.previous {
        gesture.progress * config.previous_opacity_factor
    } else {
        0.0
    }
}

pub fn offset_target(membership: Membership, gesture: GestureState, config: &TransitionConfig) -> f32 {
    if membership.opened {
        gesture.progress * config.gesture_offset
    } else if membership.in_stack {
        0.0
    } else {
        config.exit_offset
    }
}

/// Spring used by every gesture-coupled run
///
/// Dragging pins the stiffness to its ceiling so visuals track the finger;
/// otherwise stiffness grows with progress so a released gesture settles fast.
fn gesture_spring(base_stiffness: f32, gesture: GestureState, config: &TransitionConfig) -> Curve {
    let stiffness = if gesture.dragged {
        config.drag_stiffness
    } else {
        base_stiffness + gesture.progress * config.progress_stiffness_scale
    };
    Curve::Spring(SpringConfig::with_damping_ratio(config.damping_ratio, stiffness))
}

pub fn opacity_curve(membership: Membership, gesture: GestureState, config: &TransitionConfig) -> Curve {
    if membership.is_buried() {
        // Buried screens fade at a constant rate regardless of gesture speed
        Curve::Tween(Tween::new(config.buried_fade_ms, Easing::EaseIn))
    } else {
        gesture_spring(config.opacity_base_stiffness, gesture, config)
    }
}

pub fn offset_curve(gesture: GestureState, config: &TransitionConfig) -> Curve {
    gesture_spring(config.offset_base_stiffness, gesture, config)
}

/// Curve of the router-wide back-transition scalar that follows gesture progress
pub fn back_transition_curve(gesture: GestureState, config: &TransitionConfig) -> Curve {
    let stiffness = if gesture.dragged {
        config.drag_stiffness
    } else {
        config.back_transition_stiffness
    };
    Curve::Spring(SpringConfig::with_damping_ratio(config.damping_ratio, stiffness))
}
