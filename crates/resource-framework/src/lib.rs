//! # Resource Framework
//!
//! Generic building blocks for typed REST clients whose views keep local,
//! observable copies of server-managed resources.
//!
//! ## Layers
//!
//! ```text
//!   view layer (out of scope)
//!        │ reads snapshots, calls actions
//!        ▼
//!   ResourceStore<T, S> ── ResourceState<T>   (items, current, ActionStatus)
//!        │ CrudService<T>
//!        ▼
//!   ResourceClient<T>    ── ApiEntity routes  (/getAll, /getById/{id}, ...)
//!        │
//!        ▼
//!   HttpClient           ── SessionContext    (bearer token)
//!        │ Transport
//!        ▼
//!   ReqwestTransport | MockTransport
//! ```
//!
//! - [`ApiEntity`] describes one resource: its id and payload types, its base
//!   path and its endpoint family.
//! - [`HttpClient`] sends [`ApiRequest`]s through a [`Transport`], attaching
//!   the token held by the shared [`SessionContext`], and turns non-2xx
//!   answers into [`ApiError::Status`]. It never retries or reinterprets.
//! - [`ResourceClient<T>`] is the typed CRUD wrapper. Resource-specific
//!   clients embed one and implement [`CrudService<T>`].
//! - [`ResourceStore<T, S>`] is the state composable: every action brackets
//!   its request with an [`ActionGuard`], records a single [`ActionStatus`]
//!   and reconciles after mutations by re-fetching (see [`Reconcile`]).
//!
//! ## Type Safety
//!
//! - Ids, create and update payloads are associated types, so a store for one
//!   resource cannot be handed another resource's payload.
//! - Loading, error and success are one enum, never three flags that can
//!   disagree.
//!
//! ## Concurrency Model
//!
//! - All handles (`HttpClient`, `SessionContext`, `ResourceState`,
//!   `ResourceStore`) are cheap clones over shared `Arc` state.
//! - State locks are `parking_lot` locks taken for a single read or write and
//!   never held across an `.await`.
//! - Actions are not serialized: overlapping actions on one store race and the
//!   last response wins.
//!
//! ## Testing
//!
//! [`mock::MockTransport`] scripts responses per method and path so clients,
//! stores and session flows can be tested without a server. See the [`mock`]
//! module for the API.

pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod http;
pub mod mock;
pub mod session;
pub mod state;
pub mod store;
pub mod tracing;
pub mod transport;

// Re-export core types for convenience
pub use client::{HttpClient, ResourceClient};
pub use client_trait::CrudService;
pub use entity::ApiEntity;
pub use error::ApiError;
pub use http::ReqwestTransport;
pub use session::SessionContext;
pub use state::{ActionGuard, ActionStatus, ResourceState, StateSnapshot};
pub use store::{Reconcile, ResourceStore};
pub use transport::{ApiRequest, ApiResponse, Method, Payload, Transport};
