//! # Generic Resource Store
//!
//! [`ResourceStore<T, S>`] is the state composable every resource view starts
//! from: a [`ResourceState<T>`] driven by a [`CrudService<T>`].
//!
//! | Action        | On success                                   | On failure                     |
//! |---------------|----------------------------------------------|--------------------------------|
//! | `fetch_all`   | replaces `items`                             | records error, swallowed       |
//! | `fetch_by_id` | sets `current`, returns it                   | records error, re-raised       |
//! | `create`      | success message, re-fetches `items`          | records error, re-raised       |
//! | `update`      | success message, re-fetches `items`          | records error, re-raised       |
//! | `delete`      | success message, reconciles per [`Reconcile`] | records error, re-raised       |
//!
//! A mutation never inserts or patches locally; the server answer is
//! reconciled by re-reading the list. When that follow-up read fails the
//! mutation itself still succeeded, so the call returns `Ok` while the status
//! carries the read error.

use crate::client_trait::CrudService;
use crate::entity::ApiEntity;
use crate::error::ApiError;
use crate::state::{ActionGuard, ResourceState};
use crate::transport::ApiResponse;
use std::marker::PhantomData;
use tracing::{info, instrument, warn};

/// How local state catches up with the server after a delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Reconcile {
    /// Re-read the whole collection.
    #[default]
    Refetch,
    /// Drop the deleted entity from `items` (and `current`) without a request.
    RemoveLocally,
}

/// `"producto"` -> `"Producto"`.
pub fn capitalized(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `"Producto created successfully!"`.
pub fn success_message(name: &str, verb: &str) -> String {
    format!("{} {verb} successfully!", capitalized(name))
}

/// `"Error creating producto"`.
pub fn error_message(gerund: &str, name: &str) -> String {
    format!("Error {gerund} {name}")
}

pub struct ResourceStore<T: ApiEntity, S: CrudService<T>> {
    service: S,
    state: ResourceState<T>,
    delete_policy: Reconcile,
    _entity: PhantomData<fn() -> T>,
}

impl<T: ApiEntity, S: CrudService<T>> Clone for ResourceStore<T, S> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
            state: self.state.clone(),
            delete_policy: self.delete_policy,
            _entity: PhantomData,
        }
    }
}

impl<T: ApiEntity, S: CrudService<T>> ResourceStore<T, S> {
    /// Fresh, empty state around `service`.
    pub fn new(service: S) -> Self {
        Self {
            service,
            state: ResourceState::new(),
            delete_policy: Reconcile::default(),
            _entity: PhantomData,
        }
    }

    pub fn with_delete_policy(mut self, policy: Reconcile) -> Self {
        self.delete_policy = policy;
        self
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn state(&self) -> &ResourceState<T> {
        &self.state
    }

    /// Loads the whole collection. Failures are recorded, not returned.
    #[instrument(skip(self), fields(resource = T::NAME))]
    pub async fn fetch_all(&self) {
        let fallback = error_message("fetching", T::PLURAL);
        let _ = self.state.load_items(self.service.get_all(), &fallback).await;
    }

    #[instrument(skip(self), fields(resource = T::NAME))]
    pub async fn fetch_by_id(&self, id: &T::Id) -> Result<T, ApiError> {
        let fallback = error_message("fetching", &format!("{} by ID", T::NAME));
        self.state
            .load_current(self.service.get_by_id(id), &fallback)
            .await
    }

    #[instrument(skip(self, params), fields(resource = T::NAME))]
    pub async fn create(&self, params: &T::Create) -> Result<ApiResponse, ApiError> {
        let guard = self.state.begin();
        let result = self.service.create(params).await;
        self.after_mutation(guard, result, "created", "creating").await
    }

    #[instrument(skip(self, update), fields(resource = T::NAME))]
    pub async fn update(&self, id: &T::Id, update: &T::Update) -> Result<ApiResponse, ApiError> {
        let guard = self.state.begin();
        let result = self.service.update(id, update).await;
        self.after_mutation(guard, result, "updated", "updating").await
    }

    #[instrument(skip(self), fields(resource = T::NAME))]
    pub async fn delete(&self, id: &T::Id) -> Result<ApiResponse, ApiError> {
        match self.delete_policy {
            Reconcile::Refetch => {
                let guard = self.state.begin();
                let result = self.service.delete(id).await;
                self.after_mutation(guard, result, "deleted", "deleting").await
            }
            Reconcile::RemoveLocally => {
                let guard = self.state.begin();
                match self.service.delete(id).await {
                    Ok(response) => {
                        self.state.update(|s| {
                            s.items.retain(|item| item.id() != Some(id));
                            if s.current.as_ref().and_then(|c| c.id()) == Some(id) {
                                s.current = None;
                            }
                        });
                        info!(%id, "Removed locally");
                        guard.succeed(success_message(T::NAME, "deleted"));
                        Ok(response)
                    }
                    Err(err) => {
                        let message = err.user_message(&error_message("deleting", T::NAME));
                        warn!(error = %err, %message, "Delete failed");
                        guard.fail(message);
                        Err(err)
                    }
                }
            }
        }
    }

    /// Re-reads the collection without touching the status.
    pub async fn refresh(&self) -> Result<(), ApiError> {
        let items = self.service.get_all().await?;
        self.state.set_items(items);
        Ok(())
    }

    /// Records the outcome of a mutation and reconciles by re-fetching.
    ///
    /// Loading stays set until the follow-up read is done.
    async fn after_mutation(
        &self,
        guard: ActionGuard<'_, T>,
        result: Result<ApiResponse, ApiError>,
        verb: &str,
        gerund: &str,
    ) -> Result<ApiResponse, ApiError> {
        match result {
            Ok(response) => {
                match self.refresh().await {
                    Ok(()) => guard.succeed(success_message(T::NAME, verb)),
                    Err(err) => {
                        let message = err.user_message(&error_message("fetching", T::PLURAL));
                        warn!(error = %err, %message, "Refresh after mutation failed");
                        guard.fail(message);
                    }
                }
                Ok(response)
            }
            Err(err) => {
                let message = err.user_message(&error_message(gerund, T::NAME));
                warn!(error = %err, %message, "Mutation failed");
                guard.fail(message);
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(capitalized("producto"), "Producto");
        assert_eq!(capitalized(""), "");
        assert_eq!(success_message("categoria", "created"), "Categoria created successfully!");
        assert_eq!(error_message("fetching", "productos"), "Error fetching productos");
    }
}
