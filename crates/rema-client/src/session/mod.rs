//! # Session & Authentication
//!
//! [`SessionStore`] owns the client's view of who is logged in. It moves
//! between three states:
//!
//! ```text
//!               bootstrap / login (token stored)
//!   Anonymous ───────────────────────────────────▶ Pending
//!       ▲                                            │ confirm_session
//!       │ logout, 401/403, no token                  ▼
//!       └─────────────────────────────────────── Authenticated(User)
//! ```
//!
//! - **Anonymous**: no token.
//! - **Pending**: a token is attached to the shared
//!   [`SessionContext`](resource_framework::SessionContext) but the server has
//!   not confirmed it yet.
//! - **Authenticated**: the server answered `/isLoggedIn` with an identity,
//!   which is cached.
//!
//! Navigation is never performed here. Where the browser client used to
//! reload the page, the operations return a [`Redirect`] for the host shell
//! to act on.

mod session_store;
mod token_store;

pub use session_store::*;
pub use token_store::{FileTokenStore, MemoryTokenStore, TokenStore};

use resource_framework::ApiError;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The server accepted the credentials but sent no token back.
    #[error("Login response did not contain a token")]
    MissingToken,

    #[error("Token storage error: {0}")]
    Storage(String),

    /// The operation needs a confirmed identity and there is none.
    #[error("Not authenticated")]
    NotAuthenticated,
}

/// A navigation the host shell should perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub route: String,
    /// Shown on the target page, e.g. why the user was sent to log in.
    pub error: Option<String>,
}

impl Redirect {
    pub fn to(route: impl Into<String>) -> Self {
        Self {
            route: route.into(),
            error: None,
        }
    }

    pub fn with_error(route: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            route: route.into(),
            error: Some(error.into()),
        }
    }
}

/// Where the session sends the user after login and after rejection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRoutes {
    pub landing: String,
    pub login: String,
}

impl Default for SessionRoutes {
    fn default() -> Self {
        Self {
            landing: "/".to_owned(),
            login: "/login".to_owned(),
        }
    }
}
