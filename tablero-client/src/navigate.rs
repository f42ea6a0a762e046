//! Navigation seam for the session layer
//!
//! The expiry reaction needs to send the user back to the login screen
//! without this crate knowing anything about routing. The embedding UI
//! implements [`Navigator`]; tests use a recording double.

/// Where the UI currently is, as far as the session layer cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// The login screen
    Login,
    /// The registration screen
    Register,
    /// Anything else
    Other,
}

impl Route {
    /// Routes that must not bounce to the login screen on expiry.
    pub fn is_auth_screen(&self) -> bool {
        matches!(self, Route::Login | Route::Register)
    }
}

/// Minimal navigation surface the session manager needs.
pub trait Navigator: Send + Sync {
    /// The route the UI is currently showing
    fn current_route(&self) -> Route;

    /// Send the user to the login screen
    fn go_to_login(&self);
}

/// Navigator for embeddings without navigation (tools, tests, headless
/// jobs). Reports [`Route::Other`] and ignores redirects.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNavigator;

impl Navigator for NoopNavigator {
    fn current_route(&self) -> Route {
        Route::Other
    }

    fn go_to_login(&self) {}
}
