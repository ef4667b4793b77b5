//! Render scheduler for stacked screens
//!
//! Walks the router's instances in paint order and lays out only those that
//! must be drawn. Every rendered screen fills the viewport; screens differ
//! only by their [`ScreenTransform`].
//!
//! Content is retained per [`InstanceKey`], so a screen that stops rendering
//! while buried keeps its state and is reused when it becomes visible again.
//! Content is released only once its instance leaves the registry.

use crate::content::ScreenContent;
use crate::geometry::{Constraints, Rect, Size};
use crate::transform::{CornerRadiusSource, ScreenTransform};
use indexmap::IndexMap;
use passage_core::{InstanceKey, Route, Router, RouterHandle, Screen};
use rustc_hash::FxHashSet;

/// Where and how one instance is drawn this frame
#[derive(Clone, Debug, PartialEq)]
pub struct Placement<S> {
    pub key: InstanceKey,
    pub route: Route<S>,
    /// Full-bleed region the screen occupies before its transform
    pub bounds: Rect,
    /// Size reported by the content's measurement
    pub measured: Size,
    pub transform: ScreenTransform,
}

/// Lays out a router's rendered screens through a [`ScreenContent`]
pub struct StackLayout<S, C, R = f32>
where
    S: Screen,
    C: ScreenContent<S>,
{
    content: C,
    corner_radius: R,
    retained: IndexMap<InstanceKey, C::Node>,
}

impl<S, C, R> StackLayout<S, C, R>
where
    S: Screen,
    C: ScreenContent<S>,
    R: CornerRadiusSource,
{
    pub fn new(content: C, corner_radius: R) -> Self {
        Self {
            content,
            corner_radius,
            retained: IndexMap::new(),
        }
    }

    pub fn content(&self) -> &C {
        &self.content
    }

    pub fn content_mut(&mut self) -> &mut C {
        &mut self.content
    }

    /// Number of instances with retained content
    pub fn retained_len(&self) -> usize {
        self.retained.len()
    }

    pub fn is_retained(&self, key: InstanceKey) -> bool {
        self.retained.contains_key(&key)
    }

    /// Measure and place every rendered instance, in paint order
    pub fn layout(&mut self, router: &Router<S>, viewport: Size) -> Vec<Placement<S>> {
        self.prune(router);

        let constraints = Constraints::tight(viewport);
        let bounds = viewport.to_rect();
        let back_transition = router.back_transition();
        let config = &router.config().transition;

        let mut placements = Vec::new();
        for instance in router.rendered_instances() {
            let key = instance.key();
            let node = self.retained.entry(key).or_insert_with(|| {
                tracing::debug!(route = %instance.route(), key = %key, "creating screen content");
                self.content.create(instance.route())
            });

            let measured = self.content.measure(node, constraints);
            let placement = Placement {
                key,
                route: instance.route().clone(),
                bounds,
                measured,
                transform: ScreenTransform::for_instance(
                    instance,
                    back_transition,
                    viewport,
                    &self.corner_radius,
                    config,
                ),
            };
            self.content.place(node, &placement);
            placements.push(placement);
        }
        placements
    }

    /// Lay out through a shared handle
    ///
    /// The router stays borrowed for the whole pass, so navigation attempted
    /// from content callbacks fails instead of mutating mid-layout.
    pub fn layout_handle(
        &mut self,
        handle: &RouterHandle<S>,
        viewport: Size,
    ) -> passage_core::Result<Vec<Placement<S>>> {
        let router = handle.borrow()?;
        Ok(self.layout(&router, viewport))
    }

    /// Release content of instances no longer in the registry
    fn prune(&mut self, router: &Router<S>) {
        let live: FxHashSet<InstanceKey> = router.instances().map(|i| i.key()).collect();
        let stale: Vec<InstanceKey> = self
            .retained
            .keys()
            .filter(|key| !live.contains(key))
            .copied()
            .collect();

        for key in stale {
            if let Some(node) = self.retained.shift_remove(&key) {
                tracing::debug!(key = %key, "releasing screen content");
                self.content.release(node);
            }
        }
    }

    /// Release all retained content
    pub fn clear(&mut self) {
        for (_, node) in self.retained.drain(..) {
            self.content.release(node);
        }
    }
}
