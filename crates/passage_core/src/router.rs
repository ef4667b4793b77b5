//! Router
//!
//! Owns the navigation stack, the instance registry, the animation scheduler
//! and the back gesture, and keeps them consistent. Every mutation runs the
//! same sequence:
//!
//! 1. mutate the stack
//! 2. create the instance for a newly pushed route
//! 3. recompute membership flags
//! 4. enable or disable the back gesture
//! 5. retarget every instance's scalars
//! 6. notify stack observers
//!
//! [`Router::frame`] then advances animations and disposes instances whose
//! exit finished.

use crate::config::RouterConfig;
use crate::error::Result;
use crate::gesture::{BackGesture, GestureEvent, GestureOutcome, GestureSource, GestureState};
use crate::instance::ScreenInstance;
use crate::registry::InstanceRegistry;
use crate::route::{Route, Screen};
use crate::stack::NavigationStack;
use crate::transition;
use passage_animation::{AnimationId, AnimationScheduler};

/// A completed stack mutation, delivered to observers
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StackChange<S> {
    Pushed { route: Route<S>, depth: usize },
    Popped { route: Route<S>, depth: usize },
}

impl<S> StackChange<S> {
    pub fn route(&self) -> &Route<S> {
        match self {
            StackChange::Pushed { route, .. } | StackChange::Popped { route, .. } => route,
        }
    }

    /// Stack length after the mutation, sentinel included
    pub fn depth(&self) -> usize {
        match self {
            StackChange::Pushed { depth, .. } | StackChange::Popped { depth, .. } => *depth,
        }
    }
}

/// Handle returned by [`Router::subscribe`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer<S> = Box<dyn FnMut(&StackChange<S>)>;

/// Outcome of one [`Router::frame`]
#[derive(Clone, Debug)]
pub struct FrameSummary<S> {
    /// Instances removed this frame after their exit finished
    pub disposed: Vec<ScreenInstance<S>>,
    /// Whether another frame is needed to finish in-flight motion
    pub active: bool,
}

/// Stack navigation controller with animated transitions
pub struct Router<S: Screen> {
    stack: NavigationStack<S>,
    registry: InstanceRegistry<S>,
    scheduler: AnimationScheduler,
    gesture: BackGesture,
    back_transition: AnimationId,
    back_requested: Option<f32>,
    config: RouterConfig,
    observers: Vec<(SubscriptionId, Observer<S>)>,
    next_subscription: u64,
}

impl<S: Screen> Router<S> {
    /// Router with default configuration
    pub fn new() -> Self {
        Self::build(RouterConfig::default())
    }

    /// Router with a custom configuration, validated first
    pub fn with_config(config: RouterConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: RouterConfig) -> Self {
        let mut scheduler = AnimationScheduler::new();
        let back_transition = scheduler.register(0.0);
        let mut router = Self {
            stack: NavigationStack::new(),
            registry: InstanceRegistry::new(),
            scheduler,
            gesture: BackGesture::new(&config.gesture),
            back_transition,
            back_requested: None,
            config,
            observers: Vec::new(),
            next_subscription: 0,
        };

        // The sentinel is already in place when the host first renders
        router
            .registry
            .ensure(&Route::Sentinel, &mut router.scheduler, 0.0);
        router.registry.sync(&router.stack);
        router.retarget();
        router
    }

    /// Navigate to `screen`
    ///
    /// Returns `false` without side effects if `screen` is already current.
    pub fn go(&mut self, screen: S) -> bool {
        if !self.stack.push(screen) {
            tracing::trace!(route = %self.stack.current(), "already current, ignoring go");
            return false;
        }

        let route = self.stack.current().clone();
        let created =
            self.registry
                .ensure(&route, &mut self.scheduler, self.config.transition.exit_offset);
        let depth = self.stack.len();
        tracing::debug!(route = %route, depth, created, "pushed screen");

        self.after_mutation(StackChange::Pushed { route, depth });
        true
    }

    /// Navigate back, returning the screen that was current
    ///
    /// Returns `None` and leaves everything untouched when only the sentinel
    /// remains.
    pub fn pop(&mut self) -> Option<S> {
        let Some(route) = self.stack.pop() else {
            tracing::trace!("nothing to pop");
            return None;
        };

        let depth = self.stack.len();
        tracing::debug!(route = %route, depth, "popped screen");
        self.after_mutation(StackChange::Popped {
            route: route.clone(),
            depth,
        });
        route.into_screen()
    }

    fn after_mutation(&mut self, change: StackChange<S>) {
        self.registry.sync(&self.stack);
        self.gesture.set_enabled(self.stack.is_not_empty());
        self.retarget();
        for (_, observer) in self.observers.iter_mut() {
            observer(&change);
        }
    }

    pub fn current(&self) -> &Route<S> {
        self.stack.current()
    }

    pub fn previous(&self) -> Option<&Route<S>> {
        self.stack.previous()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn is_not_empty(&self) -> bool {
        self.stack.is_not_empty()
    }

    pub fn stack(&self) -> &NavigationStack<S> {
        &self.stack
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Feed one back-gesture event
    ///
    /// A commit pops the stack; either terminal event releases the drag.
    pub fn handle_gesture(&mut self, event: GestureEvent) -> Option<GestureOutcome> {
        let outcome = self.gesture.handle(event);
        if outcome == Some(GestureOutcome::Commit) {
            self.pop();
        }
        self.retarget();
        outcome
    }

    /// Drain `source`, returning the number of events handled
    pub fn poll_gesture<G: GestureSource + ?Sized>(&mut self, source: &mut G) -> usize {
        let mut handled = 0;
        while let Some(event) = source.poll_event() {
            self.handle_gesture(event);
            handled += 1;
        }
        handled
    }

    pub fn gesture_state(&self) -> GestureState {
        self.gesture.state()
    }

    pub fn is_gesture_enabled(&self) -> bool {
        self.gesture.is_enabled()
    }

    /// Router-wide scalar following gesture progress, read by the visual transform
    pub fn back_transition(&self) -> f32 {
        self.scheduler.value(self.back_transition)
    }

    fn retarget(&mut self) {
        let gesture = self.gesture.state();
        let config = &self.config.transition;
        self.registry.retarget(&mut self.scheduler, gesture, config);

        if self.back_requested != Some(gesture.progress) {
            self.back_requested = Some(gesture.progress);
            self.scheduler.animate_to(
                self.back_transition,
                gesture.progress,
                transition::back_transition_curve(gesture, config),
            );
        }
    }

    /// Advance all motion by `dt` seconds
    ///
    /// Instances whose exit finished this frame and are still out of the
    /// stack are disposed and returned. Negative or non-finite deltas are
    /// treated as zero.
    pub fn frame(&mut self, dt: f32) -> FrameSummary<S> {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.gesture.step(dt);
        self.retarget();

        let report = self.scheduler.tick(dt);
        self.registry.refresh(&self.scheduler);

        let mut disposed = Vec::new();
        for (id, _) in &report.finished {
            let Some(route) = self.registry.route_for_offset(*id).cloned() else {
                continue;
            };
            if let Some(instance) = self.registry.dispose(&route, &mut self.scheduler) {
                disposed.push(instance);
            }
        }

        FrameSummary {
            disposed,
            active: report.active || self.gesture.is_settling(),
        }
    }

    /// Whether motion is still in flight
    pub fn has_active_animations(&self) -> bool {
        self.scheduler.has_active_animations() || self.gesture.is_settling()
    }

    /// Every live instance in paint order
    pub fn instances(&self) -> impl Iterator<Item = &ScreenInstance<S>> + '_ {
        self.registry.iter()
    }

    pub fn instance(&self, route: &Route<S>) -> Option<&ScreenInstance<S>> {
        self.registry.get(route)
    }

    pub fn registry(&self) -> &InstanceRegistry<S> {
        &self.registry
    }

    pub fn is_rendered(&self, route: &Route<S>) -> bool {
        self.registry
            .get(route)
            .is_some_and(|instance| instance.is_rendered(self.gesture.is_dragged()))
    }

    /// Instances that must be drawn this frame, in paint order
    pub fn rendered_instances(&self) -> impl Iterator<Item = &ScreenInstance<S>> + '_ {
        let dragged = self.gesture.is_dragged();
        self.registry
            .iter()
            .filter(move |instance| instance.is_rendered(dragged))
    }

    /// Call `observer` after every stack mutation
    pub fn subscribe(&mut self, observer: impl FnMut(&StackChange<S>) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Returns `false` if `id` was not subscribed
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(subscription, _)| *subscription != id);
        self.observers.len() != before
    }
}

impl<S: Screen> Default for Router<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Screen> std::fmt::Debug for Router<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("stack", &self.stack)
            .field("instances", &self.registry.len())
            .field("gesture", &self.gesture.state())
            .field("observers", &self.observers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::LifecyclePhase;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Debug, PartialEq, Eq, Hash)]
    enum Page {
        Home,
        Profile,
    }

    const DT: f32 = 1.0 / 60.0;

    fn settle(router: &mut Router<Page>) {
        for _ in 0..600 {
            if !router.frame(DT).active {
                return;
            }
        }
        panic!("router did not settle");
    }

    #[test]
    fn test_new_router_has_settled_sentinel() {
        let mut router = Router::<Page>::new();
        assert!(router.is_empty());
        assert!(router.is_rendered(&Route::Sentinel));
        assert!(!router.is_gesture_enabled());

        settle(&mut router);
        let sentinel = router.instance(&Route::Sentinel).unwrap();
        assert_eq!(sentinel.phase(), LifecyclePhase::Settled);
        assert_eq!(sentinel.offset(), 0.0);
    }

    #[test]
    fn test_go_slides_in_from_exit_offset() {
        let mut router = Router::new();
        assert!(router.go(Page::Home));
        assert!(!router.go(Page::Home));

        let home = router.instance(&Route::Screen(Page::Home)).unwrap();
        assert_eq!(home.offset(), 1000.0);
        assert_eq!(home.offset_channel().requested(), Some(0.0));
        assert!(router.is_gesture_enabled());

        router.frame(DT);
        let offset = router.instance(&Route::Screen(Page::Home)).unwrap().offset();
        assert!(offset < 1000.0 && offset > 0.0);

        settle(&mut router);
        let home = router.instance(&Route::Screen(Page::Home)).unwrap();
        assert_eq!(home.offset(), 0.0);
        assert_eq!(home.phase(), LifecyclePhase::Settled);
    }

    #[test]
    fn test_pop_disposes_after_exit() {
        let mut router = Router::new();
        router.go(Page::Home);
        settle(&mut router);

        assert_eq!(router.pop(), Some(Page::Home));
        assert_eq!(router.pop(), None);
        assert!(router.is_rendered(&Route::Screen(Page::Home)));
        assert_eq!(
            router.instance(&Route::Screen(Page::Home)).unwrap().phase(),
            LifecyclePhase::Exiting
        );

        let mut disposed = Vec::new();
        for _ in 0..600 {
            let summary = router.frame(DT);
            disposed.extend(summary.disposed.into_iter().map(|i| i.route().clone()));
            if !summary.active {
                break;
            }
        }
        assert_eq!(disposed, vec![Route::Screen(Page::Home)]);
        assert_eq!(router.registry().len(), 1);
    }

    #[test]
    fn test_observers_see_real_mutations_only() {
        let mut router = Router::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let id = router.subscribe(move |change: &StackChange<Page>| {
            sink.borrow_mut().push(change.clone());
        });

        router.go(Page::Home);
        router.go(Page::Home);
        router.pop();
        router.pop();

        assert_eq!(
            *seen.borrow(),
            vec![
                StackChange::Pushed { route: Route::Screen(Page::Home), depth: 2 },
                StackChange::Popped { route: Route::Screen(Page::Home), depth: 1 },
            ]
        );

        assert!(router.unsubscribe(id));
        assert!(!router.unsubscribe(id));
        router.go(Page::Profile);
        assert_eq!(seen.borrow().len(), 2);
    }

    #[test]
    fn test_frame_survives_invalid_and_huge_deltas() {
        let mut router = Router::new();
        router.go(Page::Home);
        router.handle_gesture(GestureEvent::Started);
        router.handle_gesture(GestureEvent::Progressed(0.5));
        router.handle_gesture(GestureEvent::Cancelled);

        router.frame(f32::INFINITY);
        router.frame(f32::NAN);
        router.frame(-1.0);
        assert!((router.gesture_state().progress - 0.5).abs() < 1e-6);

        // A resume after a long suspend jumps motion forward but returns
        router.frame(300_000.0);
        settle(&mut router);
        assert_eq!(router.gesture_state().progress, 0.0);
        let home = router.instance(&Route::Screen(Page::Home)).unwrap();
        assert_eq!(home.offset(), 0.0);
        assert_eq!(home.phase(), LifecyclePhase::Settled);
    }

    #[test]
    fn test_with_config_validates() {
        let mut config = RouterConfig::default();
        config.transition.damping_ratio = 0.0;
        assert!(Router::<Page>::with_config(config).is_err());
    }
}
