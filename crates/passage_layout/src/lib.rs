//! Passage Layout
//!
//! Render scheduling for a [`passage_core::Router`]: decides which screen
//! instances are measured and drawn each frame, keeps their content alive
//! across frames and computes the visual transform of each.
//!
//! ```
//! use passage_core::{Route, Router};
//! use passage_layout::{Constraints, Placement, ScreenContent, Size, StackLayout};
//!
//! struct Labels;
//!
//! impl ScreenContent<&'static str> for Labels {
//!     type Node = String;
//!
//!     fn create(&mut self, route: &Route<&'static str>) -> String {
//!         route.to_string()
//!     }
//!
//!     fn measure(&mut self, _node: &mut String, constraints: Constraints) -> Size {
//!         constraints.max
//!     }
//!
//!     fn place(&mut self, _node: &mut String, _placement: &Placement<&'static str>) {}
//! }
//!
//! let mut router = Router::new();
//! router.go("home");
//!
//! let mut layout = StackLayout::new(Labels, 12.0);
//! let placements = layout.layout(&router, Size::new(390.0, 844.0));
//! assert_eq!(placements.last().map(|p| &p.route), Some(&Route::Screen("home")));
//! ```

pub mod content;
pub mod geometry;
pub mod stack_layout;
pub mod transform;

pub use content::ScreenContent;
pub use geometry::{Constraints, Point, Rect, Size};
pub use stack_layout::{Placement, StackLayout};
pub use transform::{CornerRadiusSource, ScreenTransform};
