//! Instance registry
//!
//! Insertion-ordered map from route to [`ScreenInstance`]. Order is paint
//! order: the first route ever pushed is drawn first. Membership flags are
//! recomputed explicitly after every stack mutation via [`InstanceRegistry::sync`].

use crate::config::TransitionConfig;
use crate::gesture::GestureState;
use crate::instance::{InstanceKey, ScreenInstance};
use crate::route::{Route, Screen};
use crate::stack::NavigationStack;
use crate::transition::Membership;
use indexmap::IndexMap;
use passage_animation::{AnimationId, AnimationScheduler};
use rustc_hash::{FxHashMap, FxHashSet};

/// Every live instance, keyed by route
#[derive(Debug)]
pub struct InstanceRegistry<S> {
    instances: IndexMap<Route<S>, ScreenInstance<S>>,
    /// Offset scalar → owning route, for dispatching exit completions
    by_offset: FxHashMap<AnimationId, Route<S>>,
    next_key: u64,
}

impl<S: Screen> InstanceRegistry<S> {
    pub fn new() -> Self {
        Self {
            instances: IndexMap::new(),
            by_offset: FxHashMap::default(),
            next_key: 0,
        }
    }

    /// Create the instance for `route` unless one is alive
    ///
    /// Returns `true` if a new instance was created.
    pub(crate) fn ensure(
        &mut self,
        route: &Route<S>,
        scheduler: &mut AnimationScheduler,
        initial_offset: f32,
    ) -> bool {
        if self.instances.contains_key(route) {
            return false;
        }

        let key = InstanceKey(self.next_key);
        self.next_key += 1;
        let instance = ScreenInstance::new(route.clone(), key, scheduler, initial_offset);
        tracing::debug!(route = %route, key = %key, initial_offset, "created instance");

        self.by_offset
            .insert(instance.offset_channel().id(), route.clone());
        self.instances.insert(route.clone(), instance);
        true
    }

    /// Recompute membership flags of every instance against `stack`
    pub(crate) fn sync(&mut self, stack: &NavigationStack<S>) {
        let stacked: FxHashSet<&Route<S>> = stack.iter().collect();
        let current = stack.current();
        let previous = stack.previous();

        for (route, instance) in self.instances.iter_mut() {
            instance.set_membership(Membership {
                in_stack: stacked.contains(route),
                opened: route == current,
                previous: previous == Some(route),
            });
        }
    }

    pub(crate) fn retarget(
        &mut self,
        scheduler: &mut AnimationScheduler,
        gesture: GestureState,
        config: &TransitionConfig,
    ) {
        for instance in self.instances.values_mut() {
            instance.retarget(scheduler, gesture, config);
        }
    }

    /// Mirror scheduler values into every instance after a tick
    pub(crate) fn refresh(&mut self, scheduler: &AnimationScheduler) {
        for instance in self.instances.values_mut() {
            instance.refresh(scheduler);
        }
    }

    /// Route owning the offset scalar `id`
    pub fn route_for_offset(&self, id: AnimationId) -> Option<&Route<S>> {
        self.by_offset.get(&id)
    }

    /// Remove the instance for `route` if it is neither stacked nor opened
    ///
    /// An instance re-pushed since its exit began is kept. Disposal frees the
    /// instance's scalars from `scheduler`.
    pub(crate) fn dispose(
        &mut self,
        route: &Route<S>,
        scheduler: &mut AnimationScheduler,
    ) -> Option<ScreenInstance<S>> {
        if !self.instances.get(route)?.is_disposable() {
            tracing::trace!(route = %route, "disposal skipped, instance back in stack");
            return None;
        }

        let instance = self.instances.shift_remove(route)?;
        self.by_offset.remove(&instance.offset_channel().id());
        let instance = instance.release(scheduler);
        tracing::debug!(route = %route, key = %instance.key(), "disposed instance");
        Some(instance)
    }

    pub fn get(&self, route: &Route<S>) -> Option<&ScreenInstance<S>> {
        self.instances.get(route)
    }

    pub fn contains(&self, route: &Route<S>) -> bool {
        self.instances.contains_key(route)
    }

    /// Instances in paint order
    pub fn iter(&self) -> impl Iterator<Item = &ScreenInstance<S>> + '_ {
        self.instances.values()
    }

    pub fn routes(&self) -> impl Iterator<Item = &Route<S>> + '_ {
        self.instances.keys()
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

impl<S: Screen> Default for InstanceRegistry<S> {
    fn default() -> Self {
        Self::new()
    }
}
