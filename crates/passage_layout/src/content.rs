//! Screen content collaborator
//!
//! The host application owns what a screen looks like. The render scheduler
//! only creates content once per instance, measures it, places it with its
//! transform and releases it when the instance is disposed.

use crate::geometry::{Constraints, Size};
use crate::stack_layout::Placement;
use passage_core::{Route, Screen};

/// Host-side rendering of screen content
pub trait ScreenContent<S: Screen> {
    /// Retained content of one instance
    type Node;

    /// Build the content for `route`; called once per instance lifetime
    fn create(&mut self, route: &Route<S>) -> Self::Node;

    /// Size the content wants within `constraints`
    fn measure(&mut self, node: &mut Self::Node, constraints: Constraints) -> Size;

    /// Position the content for this frame
    fn place(&mut self, node: &mut Self::Node, placement: &Placement<S>);

    /// Tear down content whose instance was disposed
    fn release(&mut self, node: Self::Node) {
        drop(node);
    }
}
