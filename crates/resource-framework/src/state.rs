//! # Resource State
//!
//! The reactive part of a composable: a held collection, an optional
//! "current" item and one [`ActionStatus`].
//!
//! `ActionStatus` is a single enum rather than separate loading / error /
//! success flags, so "error and success both set" cannot be represented.
//!
//! [`ResourceState<T>`] is a cloneable handle; the view layer reads it through
//! [`ResourceState::snapshot`] while actions run. Every action brackets its
//! request with an [`ActionGuard`]:
//!
//! ```rust
//! use resource_framework::{ActionStatus, ResourceState};
//!
//! let state: ResourceState<String> = ResourceState::new();
//! {
//!     let guard = state.begin();
//!     assert!(state.loading());
//!     guard.succeed("Categoria created successfully!");
//! }
//! assert_eq!(state.status(), ActionStatus::Success("Categoria created successfully!".into()));
//!
//! // A guard dropped without an outcome (e.g. an early `?`) still clears loading.
//! drop(state.begin());
//! assert_eq!(state.status(), ActionStatus::Idle);
//! ```
//!
//! ## Concurrency
//!
//! Actions are not serialized. Two overlapping actions on the same handle
//! race; the one that finishes last decides `items`, `current` and `status`.

use crate::error::ApiError;
use parking_lot::RwLock;
use std::future::Future;
use std::sync::Arc;
use tracing::warn;

/// Outcome of the most recent action.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ActionStatus {
    #[default]
    Idle,
    Loading,
    Success(String),
    Error(String),
}

/// Plain copy of the state at one point in time.
#[derive(Debug, Clone, PartialEq)]
pub struct StateSnapshot<T> {
    pub items: Vec<T>,
    pub current: Option<T>,
    pub status: ActionStatus,
}

impl<T> Default for StateSnapshot<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            current: None,
            status: ActionStatus::Idle,
        }
    }
}

impl<T> StateSnapshot<T> {
    pub fn loading(&self) -> bool {
        self.status == ActionStatus::Loading
    }

    pub fn error(&self) -> Option<&str> {
        match &self.status {
            ActionStatus::Error(message) => Some(message),
            _ => None,
        }
    }

    pub fn success(&self) -> Option<&str> {
        match &self.status {
            ActionStatus::Success(message) => Some(message),
            _ => None,
        }
    }
}

/// Shared state handle of one composable instance.
pub struct ResourceState<T> {
    inner: Arc<RwLock<StateSnapshot<T>>>,
}

impl<T> Clone for ResourceState<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Default for ResourceState<T> {
    fn default() -> Self {
        Self {
            inner: Arc::new(RwLock::new(StateSnapshot::default())),
        }
    }
}

impl<T: Clone> ResourceState<T> {
    /// Empty collection, no current item, idle.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> StateSnapshot<T> {
        self.inner.read().clone()
    }

    pub fn items(&self) -> Vec<T> {
        self.inner.read().items.clone()
    }

    pub fn current(&self) -> Option<T> {
        self.inner.read().current.clone()
    }

    pub fn status(&self) -> ActionStatus {
        self.inner.read().status.clone()
    }

    pub fn loading(&self) -> bool {
        self.inner.read().loading()
    }

    pub fn error(&self) -> Option<String> {
        self.inner.read().error().map(str::to_owned)
    }

    pub fn success(&self) -> Option<String> {
        self.inner.read().success().map(str::to_owned)
    }

    pub fn set_items(&self, items: Vec<T>) {
        self.inner.write().items = items;
    }

    pub fn set_current(&self, current: Option<T>) {
        self.inner.write().current = current;
    }

    /// Mutates the state in place. The closure must not block.
    pub fn update<R>(&self, f: impl FnOnce(&mut StateSnapshot<T>) -> R) -> R {
        f(&mut self.inner.write())
    }

    /// Marks an action as in flight.
    pub fn begin(&self) -> ActionGuard<'_, T> {
        self.inner.write().status = ActionStatus::Loading;
        ActionGuard {
            state: self,
            settled: false,
        }
    }

    fn settle(&self, status: ActionStatus) {
        self.inner.write().status = status;
    }

    /// Runs a list read: the collection is replaced on success and left
    /// untouched on failure, where the error message is recorded instead.
    pub async fn load_items<F>(&self, request: F, fallback: &str) -> Result<(), ApiError>
    where
        F: Future<Output = Result<Vec<T>, ApiError>>,
    {
        let guard = self.begin();
        match request.await {
            Ok(items) => {
                self.set_items(items);
                guard.finish();
                Ok(())
            }
            Err(err) => {
                let message = err.user_message(fallback);
                warn!(error = %err, %message, "List request failed");
                guard.fail(message);
                Err(err)
            }
        }
    }

    /// Runs a single-entity read that becomes `current` on success.
    pub async fn load_current<F>(&self, request: F, fallback: &str) -> Result<T, ApiError>
    where
        F: Future<Output = Result<T, ApiError>>,
    {
        let guard = self.begin();
        match request.await {
            Ok(entity) => {
                self.set_current(Some(entity.clone()));
                guard.finish();
                Ok(entity)
            }
            Err(err) => {
                let message = err.user_message(fallback);
                warn!(error = %err, %message, "Request failed");
                guard.fail(message);
                Err(err)
            }
        }
    }
}

/// In-flight marker returned by [`ResourceState::begin`].
///
/// Consuming it with [`succeed`](Self::succeed), [`fail`](Self::fail) or
/// [`finish`](Self::finish) records the outcome. Dropping it unconsumed
/// resets the status to `Idle`, so loading never outlives the action.
#[must_use = "dropping the guard immediately ends the action"]
pub struct ActionGuard<'a, T: Clone> {
    state: &'a ResourceState<T>,
    settled: bool,
}

impl<T: Clone> ActionGuard<'_, T> {
    pub fn succeed(mut self, message: impl Into<String>) {
        self.settled = true;
        self.state.settle(ActionStatus::Success(message.into()));
    }

    pub fn fail(mut self, message: impl Into<String>) {
        self.settled = true;
        self.state.settle(ActionStatus::Error(message.into()));
    }

    /// Ends the action without a message.
    pub fn finish(mut self) {
        self.settled = true;
        self.state.settle(ActionStatus::Idle);
    }
}

impl<T: Clone> Drop for ActionGuard<'_, T> {
    fn drop(&mut self) {
        if !self.settled {
            self.state.settle(ActionStatus::Idle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_empty_and_idle() {
        let state: ResourceState<u32> = ResourceState::new();
        let snapshot = state.snapshot();
        assert!(snapshot.items.is_empty());
        assert!(snapshot.current.is_none());
        assert_eq!(snapshot.status, ActionStatus::Idle);
        assert!(!snapshot.loading());
    }

    #[test]
    fn test_error_and_success_are_exclusive() {
        let state: ResourceState<u32> = ResourceState::new();
        state.begin().succeed("saved");
        assert_eq!(state.success().as_deref(), Some("saved"));
        assert_eq!(state.error(), None);

        state.begin().fail("boom");
        assert_eq!(state.error().as_deref(), Some("boom"));
        assert_eq!(state.success(), None);
    }

    #[test]
    fn test_loading_only_while_guard_alive() {
        let state: ResourceState<u32> = ResourceState::new();
        assert!(!state.loading());
        let guard = state.begin();
        assert!(state.loading());
        guard.finish();
        assert!(!state.loading());
    }

    #[test]
    fn test_dropped_guard_clears_loading() {
        fn failing_action(state: &ResourceState<u32>) -> Result<(), String> {
            let _guard = state.begin();
            Err("early return".into())
        }
        let state: ResourceState<u32> = ResourceState::new();
        assert!(failing_action(&state).is_err());
        assert_eq!(state.status(), ActionStatus::Idle);
    }

    #[test]
    fn test_clones_share_state() {
        let state: ResourceState<u32> = ResourceState::new();
        let view = state.clone();
        state.set_items(vec![1, 2, 3]);
        state.update(|s| s.current = s.items.first().copied());
        assert_eq!(view.items(), vec![1, 2, 3]);
        assert_eq!(view.current(), Some(1));
    }

    #[tokio::test]
    async fn test_load_items_keeps_collection_on_failure() {
        let state: ResourceState<u32> = ResourceState::new();
        state.load_items(async { Ok(vec![7, 8]) }, "Error fetching").await.unwrap();
        assert_eq!(state.items(), vec![7, 8]);

        let err = state
            .load_items(async { Err(ApiError::Transport("down".into())) }, "Error fetching")
            .await;
        assert!(err.is_err());
        assert_eq!(state.items(), vec![7, 8]);
        assert_eq!(state.error().as_deref(), Some("Error fetching"));
        assert!(!state.loading());
    }

    #[tokio::test]
    async fn test_load_current_sets_current_only_on_success() {
        let state: ResourceState<u32> = ResourceState::new();
        let missing = ApiError::Status {
            status: 404,
            message: Some("Not found".into()),
            body: String::new(),
        };
        assert!(state.load_current(async { Err(missing) }, "Error").await.is_err());
        assert_eq!(state.current(), None);
        assert_eq!(state.error().as_deref(), Some("Not found"));

        assert_eq!(state.load_current(async { Ok(3) }, "Error").await.unwrap(), 3);
        assert_eq!(state.current(), Some(3));
        assert_eq!(state.status(), ActionStatus::Idle);
    }
}
