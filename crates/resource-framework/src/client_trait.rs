//! # CrudService Trait
//!
//! Resource-specific service clients wrap a [`ResourceClient<T>`] and
//! implement [`CrudService`] to inherit the five standard endpoints. The
//! generic [`ResourceStore`](crate::ResourceStore) is written against this
//! trait, so any client implementing it gets a full state composable for free.
//!
//! # Example
//!
//! ```rust
//! use resource_framework::{ApiEntity, CrudService, ResourceClient};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Clone, Debug, Serialize, Deserialize)]
//! struct Tag { id: String, label: String }
//!
//! impl ApiEntity for Tag {
//!     type Id = String;
//!     type Create = Tag;
//!     type Update = Tag;
//!     const BASE_PATH: &'static str = "/admin/tag";
//!     const NAME: &'static str = "tag";
//!     const PLURAL: &'static str = "tags";
//!     fn id(&self) -> Option<&String> { Some(&self.id) }
//! }
//!
//! #[derive(Clone)]
//! struct TagClient { inner: ResourceClient<Tag> }
//!
//! impl CrudService<Tag> for TagClient {
//!     fn inner(&self) -> &ResourceClient<Tag> { &self.inner }
//! }
//!
//! async fn usage(client: TagClient) {
//!     // get_all(), get_by_id(), create(), update() and delete() are provided.
//!     let _ = client.get_all().await;
//!     let _ = client.delete(&"t1".to_string()).await;
//! }
//! ```

use crate::client::ResourceClient;
use crate::entity::ApiEntity;
use crate::error::ApiError;
use crate::transport::ApiResponse;
use async_trait::async_trait;

/// Standard CRUD endpoints for a resource-specific client.
#[async_trait]
pub trait CrudService<T: ApiEntity>: Clone + Send + Sync + 'static {
    /// Access the inner generic ResourceClient.
    fn inner(&self) -> &ResourceClient<T>;

    /// Fetch every entity.
    #[tracing::instrument(skip(self), fields(resource = T::NAME))]
    async fn get_all(&self) -> Result<Vec<T>, ApiError> {
        tracing::debug!("Sending request");
        self.inner().get_all().await
    }

    /// Fetch an entity by ID.
    #[tracing::instrument(skip(self), fields(resource = T::NAME))]
    async fn get_by_id(&self, id: &T::Id) -> Result<T, ApiError> {
        tracing::debug!("Sending request");
        self.inner().get_by_id(id).await
    }

    /// Create a new entity.
    #[tracing::instrument(skip(self, params), fields(resource = T::NAME))]
    async fn create(&self, params: &T::Create) -> Result<ApiResponse, ApiError> {
        tracing::debug!(?params, "Sending request");
        self.inner().create(params).await
    }

    /// Update an entity by ID.
    #[tracing::instrument(skip(self, update), fields(resource = T::NAME))]
    async fn update(&self, id: &T::Id, update: &T::Update) -> Result<ApiResponse, ApiError> {
        tracing::debug!(?update, "Sending request");
        self.inner().update(id, update).await
    }

    /// Delete an entity by ID.
    #[tracing::instrument(skip(self), fields(resource = T::NAME))]
    async fn delete(&self, id: &T::Id) -> Result<ApiResponse, ApiError> {
        tracing::debug!("Sending request");
        self.inner().delete(id).await
    }
}
