//! # Generic Clients
//!
//! [`HttpClient`] is the single handle every service client shares: a
//! [`Transport`] plus the [`SessionContext`] whose token is attached to each
//! outgoing request. [`ResourceClient<T>`] layers the conventional CRUD
//! endpoint family of an [`ApiEntity`] on top of it.
//!
//! Neither type retries, caches or reinterprets failures: a non-2xx answer
//! becomes [`ApiError::Status`] and is returned to the caller as-is.

use crate::entity::ApiEntity;
use crate::error::ApiError;
use crate::session::SessionContext;
use crate::transport::{ApiRequest, ApiResponse, Transport};
use serde::de::DeserializeOwned;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Shared request pipeline: session header, transport, status check.
///
/// Cheap to clone; clones share the transport and the session context.
#[derive(Clone)]
pub struct HttpClient {
    transport: Arc<dyn Transport>,
    session: SessionContext,
}

impl HttpClient {
    pub fn new(transport: Arc<dyn Transport>, session: SessionContext) -> Self {
        Self { transport, session }
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    /// Sends `request`, attaching the session token unless the request
    /// already carries one. Non-2xx responses become [`ApiError::Status`].
    #[instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    pub async fn send(&self, mut request: ApiRequest) -> Result<ApiResponse, ApiError> {
        if request.bearer.is_none() {
            request.bearer = self.session.token();
        }
        debug!(authenticated = request.bearer.is_some(), "Sending request");

        let response = self.transport.send(request).await?;
        if response.is_success() {
            debug!(status = response.status, "Request ok");
            Ok(response)
        } else {
            let err = response.into_error();
            warn!(error = %err, "Request failed");
            Err(err)
        }
    }

    /// Sends `request` and decodes the JSON body.
    pub async fn fetch<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ApiError> {
        self.send(request).await?.decode()
    }
}

impl fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpClient")
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

/// Type-safe CRUD access to one resource.
pub struct ResourceClient<T: ApiEntity> {
    http: HttpClient,
    _entity: PhantomData<fn() -> T>,
}

impl<T: ApiEntity> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self::new(self.http.clone())
    }
}

impl<T: ApiEntity> ResourceClient<T> {
    pub fn new(http: HttpClient) -> Self {
        Self {
            http,
            _entity: PhantomData,
        }
    }

    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    pub async fn get_all(&self) -> Result<Vec<T>, ApiError> {
        self.http.fetch(T::list_request()).await
    }

    pub async fn get_by_id(&self, id: &T::Id) -> Result<T, ApiError> {
        self.http.fetch(T::get_request(id)).await
    }

    pub async fn create(&self, params: &T::Create) -> Result<ApiResponse, ApiError> {
        self.http.send(T::create_request().with_json(params)?).await
    }

    pub async fn update(&self, id: &T::Id, update: &T::Update) -> Result<ApiResponse, ApiError> {
        self.http.send(T::update_request(id).with_json(update)?).await
    }

    pub async fn delete(&self, id: &T::Id) -> Result<ApiResponse, ApiError> {
        self.http.send(T::delete_request(id)).await
    }

    /// Decodes a list of `T` from a resource-specific endpoint.
    pub async fn list_at(&self, request: ApiRequest) -> Result<Vec<T>, ApiError> {
        self.http.fetch(request).await
    }

    /// Decodes one `T` from a resource-specific endpoint.
    pub async fn one_at(&self, request: ApiRequest) -> Result<T, ApiError> {
        self.http.fetch(request).await
    }
}
