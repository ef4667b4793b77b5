//! Passage Animation System
//!
//! Frame-driven animation primitives for screen transitions.
//!
//! # Features
//!
//! - **Spring Physics**: RK4-integrated springs with stiffness, damping, mass
//! - **Tweens**: Fixed-duration runs shaped by cubic-bezier easing
//! - **Interruptible**: Retargeting replaces the in-flight run; springs inherit velocity
//! - **Scheduler**: Steps every registered scalar once per frame and reports
//!   which runs finished

pub mod animatable;
pub mod easing;
pub mod scheduler;
pub mod spring;
pub mod tween;

pub use animatable::{Animatable, Curve, Finished};
pub use easing::Easing;
pub use scheduler::{AnimationId, AnimationScheduler, FrameReport};
pub use spring::{Spring, SpringConfig};
pub use tween::Tween;

/// Linear interpolation between `start` and `stop` by `fraction`
pub fn lerp(start: f32, stop: f32, fraction: f32) -> f32 {
    start + (stop - start) * fraction
}
