//! Screen instances
//!
//! A [`ScreenInstance`] is the live record behind one route value: its stack
//! membership, two animated scalars and its place in the lifecycle. Instances
//! are keyed by route, not stack position, so a route pushed twice shares one
//! record.

use crate::config::TransitionConfig;
use crate::gesture::GestureState;
use crate::route::{Route, Screen};
use crate::transition::{self, Membership};
use passage_animation::{AnimationId, AnimationScheduler, Curve};
use std::fmt;

/// Stable identity of an instance's content
///
/// Never reused: a route disposed and pushed again gets a fresh key, so
/// retained content can be matched to the record that created it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceKey(pub(crate) u64);

impl fmt::Display for InstanceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Lifecycle of an instance
///
/// ```text
/// Created ──sync──▶ Entering ──idle──▶ Settled
///                     ▲  │                │
///          re-pushed  │  └──── popped ────┤
///                     │                   ▼
///                     └─────────────── Exiting ──offset done──▶ Disposed
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LifecyclePhase {
    Created,
    Entering,
    Settled,
    Exiting,
    Disposed,
}

/// One animated scalar of an instance, mirrored from the scheduler
#[derive(Clone, Copy, Debug)]
pub struct AnimatedChannel {
    id: AnimationId,
    requested: Option<f32>,
    value: f32,
    running: bool,
}

impl AnimatedChannel {
    pub(crate) fn register(scheduler: &mut AnimationScheduler, initial: f32) -> Self {
        Self {
            id: scheduler.register(initial),
            requested: None,
            value: initial,
            running: false,
        }
    }

    pub fn id(&self) -> AnimationId {
        self.id
    }

    /// Value as of the last frame
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Target of the latest run, `None` before the first retarget
    pub fn requested(&self) -> Option<f32> {
        self.requested
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Start a run toward `target` unless it is already the requested target
    pub(crate) fn retarget(
        &mut self,
        scheduler: &mut AnimationScheduler,
        target: f32,
        curve: Curve,
    ) -> bool {
        if self.requested == Some(target) {
            return false;
        }
        self.requested = Some(target);
        scheduler.animate_to(self.id, target, curve);
        self.running = true;
        true
    }

    pub(crate) fn refresh(&mut self, scheduler: &AnimationScheduler) {
        self.value = scheduler.value(self.id);
        self.running = scheduler.is_running(self.id);
    }
}

/// Live record of one route
#[derive(Clone, Debug)]
pub struct ScreenInstance<S> {
    route: Route<S>,
    key: InstanceKey,
    membership: Membership,
    opacity: AnimatedChannel,
    offset: AnimatedChannel,
    phase: LifecyclePhase,
}

impl<S: Screen> ScreenInstance<S> {
    pub(crate) fn new(
        route: Route<S>,
        key: InstanceKey,
        scheduler: &mut AnimationScheduler,
        initial_offset: f32,
    ) -> Self {
        Self {
            route,
            key,
            membership: Membership::default(),
            opacity: AnimatedChannel::register(scheduler, 1.0),
            offset: AnimatedChannel::register(scheduler, initial_offset),
            phase: LifecyclePhase::Created,
        }
    }

    pub fn route(&self) -> &Route<S> {
        &self.route
    }

    pub fn key(&self) -> InstanceKey {
        self.key
    }

    pub fn membership(&self) -> Membership {
        self.membership
    }

    pub fn in_stack(&self) -> bool {
        self.membership.in_stack
    }

    pub fn is_opened(&self) -> bool {
        self.membership.opened
    }

    pub fn is_previous(&self) -> bool {
        self.membership.previous
    }

    pub fn phase(&self) -> LifecyclePhase {
        self.phase
    }

    pub fn opacity(&self) -> f32 {
        self.opacity.value()
    }

    /// Horizontal offset in thousandths of the viewport width
    pub fn offset(&self) -> f32 {
        self.offset.value()
    }

    pub fn opacity_channel(&self) -> &AnimatedChannel {
        &self.opacity
    }

    pub fn offset_channel(&self) -> &AnimatedChannel {
        &self.offset
    }

    /// Any scalar mid-flight
    pub fn is_running(&self) -> bool {
        self.opacity.is_running() || self.offset.is_running()
    }

    /// Whether the instance must be measured and drawn this frame
    pub fn is_rendered(&self, dragged: bool) -> bool {
        self.is_running() || self.membership.opened || (self.membership.previous && dragged)
    }

    /// Whether the disposal guard would let this instance go
    pub fn is_disposable(&self) -> bool {
        self.membership.is_exiting()
    }

    pub(crate) fn set_membership(&mut self, membership: Membership) {
        self.membership = membership;
        let next = match (self.phase, membership.in_stack) {
            (LifecyclePhase::Created, true) => LifecyclePhase::Entering,
            (LifecyclePhase::Exiting, true) => {
                tracing::debug!(route = %self.route, key = %self.key, "resurrecting exiting instance");
                LifecyclePhase::Entering
            }
            (LifecyclePhase::Created | LifecyclePhase::Entering | LifecyclePhase::Settled, false) => {
                LifecyclePhase::Exiting
            }
            (phase, _) => phase,
        };
        self.phase = next;
    }

    /// Point both scalars at the targets for the current membership and gesture
    pub(crate) fn retarget(
        &mut self,
        scheduler: &mut AnimationScheduler,
        gesture: GestureState,
        config: &TransitionConfig,
    ) {
        let membership = self.membership;
        let opacity = transition::opacity_target(membership, gesture, config);
        let offset = transition::offset_target(membership, gesture, config);

        let opacity_changed = self.opacity.retarget(
            scheduler,
            opacity,
            transition::opacity_curve(membership, gesture, config),
        );
        let offset_changed =
            self.offset
                .retarget(scheduler, offset, transition::offset_curve(gesture, config));

        if opacity_changed || offset_changed {
            tracing::trace!(route = %self.route, opacity, offset, "retargeted");
        }
    }

    pub(crate) fn refresh(&mut self, scheduler: &AnimationScheduler) {
        self.opacity.refresh(scheduler);
        self.offset.refresh(scheduler);
        if self.phase == LifecyclePhase::Entering && self.membership.in_stack && !self.is_running() {
            self.phase = LifecyclePhase::Settled;
        }
    }

    pub(crate) fn release(mut self, scheduler: &mut AnimationScheduler) -> Self {
        scheduler.remove(self.opacity.id());
        scheduler.remove(self.offset.id());
        self.opacity.running = false;
        self.offset.running = false;
        self.phase = LifecyclePhase::Disposed;
        self
    }
}
