//! Screen values and stack entries

use std::fmt;
use std::hash::Hash;

/// A navigable destination
///
/// Any application type with structural equality qualifies; the usual shape
/// is an enum with one variant per destination:
///
/// ```
/// #[derive(Clone, Debug, PartialEq, Eq, Hash)]
/// enum AppScreen {
///     Home,
///     Profile { user_id: u64 },
/// }
///
/// fn assert_screen<S: passage_core::Screen>() {}
/// assert_screen::<AppScreen>();
/// ```
pub trait Screen: Clone + Eq + Hash + fmt::Debug + 'static {}

impl<T> Screen for T where T: Clone + Eq + Hash + fmt::Debug + 'static {}

/// One entry of the navigation stack
///
/// `Sentinel` is the permanent root standing for "no screen". Applications
/// only ever push `Screen` entries, so the sentinel can never appear twice.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Route<S> {
    Sentinel,
    Screen(S),
}

impl<S> Route<S> {
    pub fn is_sentinel(&self) -> bool {
        matches!(self, Route::Sentinel)
    }

    /// The application screen, or `None` for the sentinel
    pub fn screen(&self) -> Option<&S> {
        match self {
            Route::Sentinel => None,
            Route::Screen(screen) => Some(screen),
        }
    }

    pub fn into_screen(self) -> Option<S> {
        match self {
            Route::Sentinel => None,
            Route::Screen(screen) => Some(screen),
        }
    }
}

impl<S> From<S> for Route<S> {
    fn from(screen: S) -> Self {
        Route::Screen(screen)
    }
}

impl<S: PartialEq> PartialEq<S> for Route<S> {
    fn eq(&self, other: &S) -> bool {
        self.screen() == Some(other)
    }
}

impl<S: fmt::Debug> fmt::Display for Route<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Sentinel => f.write_str("<sentinel>"),
            Route::Screen(screen) => write!(f, "{screen:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_equality_is_structural() {
        assert_eq!(Route::Screen(3), Route::Screen(3));
        assert_ne!(Route::Screen(3), Route::Sentinel);
        assert!(Route::Screen("home") == "home");
        assert!(!(Route::<&str>::Sentinel == "home"));
    }

    #[test]
    fn test_sentinel_has_no_screen() {
        let route: Route<u8> = Route::Sentinel;
        assert!(route.is_sentinel());
        assert_eq!(route.screen(), None);
        assert_eq!(Route::from(7u8).into_screen(), Some(7));
    }

    #[test]
    fn test_display() {
        assert_eq!(Route::<u8>::Sentinel.to_string(), "<sentinel>");
        assert_eq!(Route::Screen("home").to_string(), "\"home\"");
    }
}
