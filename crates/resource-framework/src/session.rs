//! # Session Context
//!
//! The bearer token lives in an explicit, cloneable [`SessionContext`] that is
//! handed to the [`HttpClient`](crate::HttpClient) at construction. Every
//! clone shares the same slot, so setting the token through the session
//! composable is immediately visible to all service clients built on the same
//! context, while a second context (a second user, a test) stays isolated.

use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;

/// Shared holder for the current bearer token.
#[derive(Clone, Default)]
pub struct SessionContext {
    token: Arc<RwLock<Option<String>>>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with `token` already attached.
    pub fn with_token(token: impl Into<String>) -> Self {
        let context = Self::new();
        context.set_token(token);
        context
    }

    /// Attaches `token` to every subsequent request.
    pub fn set_token(&self, token: impl Into<String>) {
        *self.token.write() = Some(token.into());
    }

    pub fn clear(&self) {
        *self.token.write() = None;
    }

    pub fn token(&self) -> Option<String> {
        self.token.read().clone()
    }

    pub fn has_token(&self) -> bool {
        self.token.read().is_some()
    }
}

// Tokens never end up in logs.
impl fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionContext")
            .field("has_token", &self.has_token())
            .finish()
    }
}
