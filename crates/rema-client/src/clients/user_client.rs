//! # Users Client
//!
//! Account and authentication endpoints. These sit at the API root under
//! ad-hoc names (`/getUsers`, `/login`, `/isLoggedIn`, ...) rather than the
//! conventional endpoint family.
use crate::model::{Credentials, User, UserForm, UserId};
use resource_framework::{ApiError, ApiRequest, ApiResponse, HttpClient, ResourceClient};
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct UsersClient {
    inner: ResourceClient<User>,
}

impl UsersClient {
    pub fn new(inner: ResourceClient<User>) -> Self {
        Self { inner }
    }

    fn http(&self) -> &HttpClient {
        self.inner.http()
    }

    #[instrument(skip(self))]
    pub async fn get_users(&self) -> Result<Vec<User>, ApiError> {
        debug!("Sending request");
        self.inner.get_all().await
    }

    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: &UserId) -> Result<User, ApiError> {
        debug!("Sending request");
        self.inner.get_by_id(id).await
    }

    #[instrument(skip(self))]
    pub async fn get_by_email(&self, email: &str) -> Result<User, ApiError> {
        debug!("Sending request");
        self.inner
            .one_at(ApiRequest::get(format!("/getUserByEmail/{email}")))
            .await
    }

    #[instrument(skip(self))]
    pub async fn get_by_username(&self, username: &str) -> Result<User, ApiError> {
        debug!("Sending request");
        self.inner
            .one_at(ApiRequest::get(format!("/getUserByUsername/{username}")))
            .await
    }

    /// Public profile of any user.
    #[instrument(skip(self))]
    pub async fn get_profile(&self, id: &UserId) -> Result<User, ApiError> {
        debug!("Sending request");
        self.inner
            .one_at(ApiRequest::get(format!("/getUserProfileById/{id}")))
            .await
    }

    #[instrument(skip(self, form), fields(username = %form.username))]
    pub async fn create_user(&self, form: &UserForm) -> Result<ApiResponse, ApiError> {
        debug!("Sending request");
        self.inner.create(form).await
    }

    #[instrument(skip(self, user))]
    pub async fn update_user(&self, id: &UserId, user: &User) -> Result<ApiResponse, ApiError> {
        debug!("Sending request");
        self.inner.update(id, user).await
    }

    #[instrument(skip(self))]
    pub async fn delete_user(&self, username: &str) -> Result<ApiResponse, ApiError> {
        debug!("Sending request");
        self.http()
            .send(ApiRequest::get(format!("/deleteUser/{username}")))
            .await
    }

    /// Exchanges credentials for a token. The body is `{"token": ..}`.
    #[instrument(skip(self, credentials), fields(username = %credentials.username))]
    pub async fn login(&self, credentials: &Credentials) -> Result<ApiResponse, ApiError> {
        debug!("Sending request");
        self.http()
            .send(ApiRequest::post("/login").with_json(credentials)?)
            .await
    }

    /// The identity behind the current session token.
    #[instrument(skip(self))]
    pub async fn is_logged_in(&self) -> Result<User, ApiError> {
        debug!("Sending request");
        self.inner.one_at(ApiRequest::get("/isLoggedIn")).await
    }

    /// Invalidates `token` server-side.
    #[instrument(skip(self, token))]
    pub async fn logout(&self, token: &str) -> Result<ApiResponse, ApiError> {
        debug!("Sending request");
        self.http()
            .send(ApiRequest::get("/log_out").with_bearer(token))
            .await
    }
}
