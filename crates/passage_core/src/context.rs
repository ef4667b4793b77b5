//! Router handle and thread-scoped router context
//!
//! [`RouterHandle`] is a cheap, cloneable reference to a router shared by the
//! host's frame loop, its layout pass and any screen code that navigates.
//! [`RouterContext`] makes a handle reachable without threading it through
//! every call:
//!
//! ```
//! use passage_core::{Router, RouterContext, RouterHandle};
//!
//! let handle = RouterHandle::new(Router::<&'static str>::new());
//! RouterContext::provide(&handle, || {
//!     let router = RouterContext::current::<&'static str>();
//!     router.go("home").unwrap();
//! });
//! assert_eq!(handle.current().unwrap().screen(), Some(&"home"));
//! ```

use crate::error::{Result, RouterError};
use crate::gesture::{GestureEvent, GestureOutcome};
use crate::route::{Route, Screen};
use crate::router::{FrameSummary, Router};
use std::any::Any;
use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

/// Shared, single-threaded reference to a [`Router`]
///
/// Navigation through a handle fails with [`RouterError::Reentrant`] while
/// the router is borrowed elsewhere, such as by a layout pass or from inside
/// a stack observer.
pub struct RouterHandle<S: Screen> {
    inner: Rc<RefCell<Router<S>>>,
}

impl<S: Screen> Clone for RouterHandle<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<S: Screen> RouterHandle<S> {
    pub fn new(router: Router<S>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(router)),
        }
    }

    /// Read access for layout and inspection
    pub fn borrow(&self) -> Result<Ref<'_, Router<S>>> {
        self.inner.try_borrow().map_err(|_| RouterError::Reentrant)
    }

    pub fn borrow_mut(&self) -> Result<RefMut<'_, Router<S>>> {
        self.inner.try_borrow_mut().map_err(|_| {
            tracing::warn!("router mutation attempted while borrowed");
            RouterError::Reentrant
        })
    }

    pub fn go(&self, screen: S) -> Result<bool> {
        Ok(self.borrow_mut()?.go(screen))
    }

    pub fn pop(&self) -> Result<Option<S>> {
        Ok(self.borrow_mut()?.pop())
    }

    pub fn current(&self) -> Result<Route<S>> {
        Ok(self.borrow()?.current().clone())
    }

    pub fn previous(&self) -> Result<Option<Route<S>>> {
        Ok(self.borrow()?.previous().cloned())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.borrow()?.is_empty())
    }

    pub fn is_not_empty(&self) -> Result<bool> {
        Ok(self.borrow()?.is_not_empty())
    }

    pub fn handle_gesture(&self, event: GestureEvent) -> Result<Option<GestureOutcome>> {
        Ok(self.borrow_mut()?.handle_gesture(event))
    }

    pub fn frame(&self, dt: f32) -> Result<FrameSummary<S>> {
        Ok(self.borrow_mut()?.frame(dt))
    }

    /// Whether two handles refer to the same router
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<S: Screen> std::fmt::Debug for RouterHandle<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.inner.try_borrow() {
            Ok(router) => f.debug_tuple("RouterHandle").field(&*router).finish(),
            Err(_) => f.write_str("RouterHandle(<borrowed>)"),
        }
    }
}

thread_local! {
    static PROVIDED: RefCell<Vec<Box<dyn Any>>> = const { RefCell::new(Vec::new()) };
}

/// Thread-scoped access to the router provided by an enclosing scope
pub struct RouterContext;

impl RouterContext {
    /// Make `handle` current on this thread for the duration of `f`
    pub fn provide<S: Screen, R>(handle: &RouterHandle<S>, f: impl FnOnce() -> R) -> R {
        struct Scope;

        impl Drop for Scope {
            fn drop(&mut self) {
                PROVIDED.with(|provided| {
                    provided.borrow_mut().pop();
                });
            }
        }

        PROVIDED.with(|provided| provided.borrow_mut().push(Box::new(handle.clone())));
        let _scope = Scope;
        f()
    }

    /// The innermost provided router for screens of type `S`
    pub fn try_current<S: Screen>() -> Result<RouterHandle<S>> {
        PROVIDED
            .with(|provided| {
                provided
                    .borrow()
                    .iter()
                    .rev()
                    .find_map(|entry| entry.downcast_ref::<RouterHandle<S>>().cloned())
            })
            .ok_or(RouterError::NotProvided {
                screen_type: std::any::type_name::<S>(),
            })
    }

    /// The innermost provided router for screens of type `S`
    ///
    /// # Panics
    ///
    /// Panics if no router for `S` has been provided on this thread. Use
    /// [`RouterContext::try_current`] to handle that case.
    pub fn current<S: Screen>() -> RouterHandle<S> {
        match Self::try_current() {
            Ok(handle) => handle,
            Err(err) => panic!("{err}"),
        }
    }

    pub fn is_provided<S: Screen>() -> bool {
        Self::try_current::<S>().is_ok()
    }
}
