//! Passage Core
//!
//! Stack navigation with animated, gesture-interruptible transitions.
//!
//! # Features
//!
//! - **Navigation Stack**: push/pop history rooted at a permanent sentinel
//! - **Screen Instances**: one live record per route, kept alive until its
//!   exit animation finishes
//! - **Transitions**: per-instance opacity and offset retargeted on every
//!   stack mutation and gesture sample
//! - **Back Gesture**: live drag progress that commits to a pop or cancels
//! - **Router Context**: thread-scoped access to a shared [`RouterHandle`]
//!
//! # Example
//!
//! ```
//! use passage_core::{GestureEvent, Route, Router};
//!
//! #[derive(Clone, Debug, PartialEq, Eq, Hash)]
//! enum AppScreen {
//!     Home,
//!     Profile,
//! }
//!
//! let mut router = Router::new();
//! router.go(AppScreen::Home);
//! router.go(AppScreen::Profile);
//!
//! router.handle_gesture(GestureEvent::Started);
//! router.handle_gesture(GestureEvent::Progressed(0.7));
//! router.handle_gesture(GestureEvent::Committed);
//! assert_eq!(router.current(), &Route::Screen(AppScreen::Home));
//!
//! // Profile keeps rendering until its exit animation completes
//! while router.frame(1.0 / 60.0).active {}
//! assert!(router.instance(&Route::Screen(AppScreen::Profile)).is_none());
//! ```

pub mod config;
pub mod context;
pub mod error;
pub mod gesture;
pub mod instance;
pub mod registry;
pub mod route;
pub mod router;
pub mod stack;
pub mod transition;

pub use config::{GestureConfig, RouterConfig, TransitionConfig};
pub use context::{RouterContext, RouterHandle};
pub use error::{ConfigError, Result, RouterError};
pub use gesture::{BackGesture, GestureEvent, GestureOutcome, GestureSource, GestureState};
pub use instance::{AnimatedChannel, InstanceKey, LifecyclePhase, ScreenInstance};
pub use registry::InstanceRegistry;
pub use route::{Route, Screen};
pub use router::{FrameSummary, Router, StackChange, SubscriptionId};
pub use stack::NavigationStack;
pub use transition::{Membership, TransitionTargets};
