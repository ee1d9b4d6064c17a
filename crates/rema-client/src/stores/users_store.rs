//! # Users Store
//!
//! Account administration. Unlike the other stores, the list read and the
//! mutations never re-raise: their outcome is only visible through the
//! status. Single reads re-raise.

use crate::clients::UsersClient;
use crate::model::{User, UserForm, UserId};
use resource_framework::{ApiError, ApiResponse, ResourceState};
use std::future::Future;
use tracing::{info, instrument, warn};

/// Which field of a registration form is already taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExistenceReason {
    Email,
    Username,
}

/// Result of [`UsersStore::check_user_exists`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExistenceCheck {
    pub exists: bool,
    pub reason: Option<ExistenceReason>,
    /// Set when a lookup failed for a reason other than "not found".
    pub error: Option<String>,
}

impl ExistenceCheck {
    fn taken(reason: ExistenceReason) -> Self {
        Self {
            exists: true,
            reason: Some(reason),
            error: None,
        }
    }
}

#[derive(Clone)]
pub struct UsersStore {
    client: UsersClient,
    state: ResourceState<User>,
}

impl UsersStore {
    pub fn new(client: UsersClient) -> Self {
        Self {
            client,
            state: ResourceState::new(),
        }
    }

    pub fn state(&self) -> &ResourceState<User> {
        &self.state
    }

    /// Loads every account. Failures are recorded, not returned.
    #[instrument(skip(self))]
    pub async fn fetch_all(&self) {
        let _ = self
            .state
            .load_items(self.client.get_users(), "Error fetching users")
            .await;
    }

    #[instrument(skip(self))]
    pub async fn fetch_by_id(&self, id: &UserId) -> Result<User, ApiError> {
        self.state
            .load_current(self.client.get_by_id(id), "Error fetching user by ID")
            .await
    }

    /// Public profile; becomes `current`.
    #[instrument(skip(self))]
    pub async fn fetch_profile(&self, id: &UserId) -> Result<User, ApiError> {
        self.state
            .load_current(self.client.get_profile(id), "Error fetching user profile")
            .await
    }

    /// Whether a registration would collide with an existing account.
    ///
    /// The email is checked first. A 404 from a lookup means "free"; any
    /// other failure ends the check with `exists: false` and the error.
    #[instrument(skip(self))]
    pub async fn check_user_exists(&self, email: &str, username: &str) -> ExistenceCheck {
        let guard = self.state.begin();
        let result = async {
            if taken(self.client.get_by_email(email), |u| !u.email.is_empty()).await? {
                return Ok(Some(ExistenceReason::Email));
            }
            if taken(self.client.get_by_username(username), |u| !u.username.is_empty()).await? {
                return Ok(Some(ExistenceReason::Username));
            }
            Ok::<_, ApiError>(None)
        }
        .await;

        match result {
            Ok(Some(reason)) => {
                let message = match reason {
                    ExistenceReason::Email => "Email already exists",
                    ExistenceReason::Username => "Username already exists",
                };
                guard.fail(message);
                ExistenceCheck::taken(reason)
            }
            Ok(None) => {
                guard.finish();
                ExistenceCheck::default()
            }
            Err(err) => {
                let message = err.user_message("Error checking user existence");
                warn!(error = %err, %message, "Existence check failed");
                guard.fail(message.clone());
                ExistenceCheck {
                    exists: false,
                    reason: None,
                    error: Some(message),
                }
            }
        }
    }

    #[instrument(skip(self, form), fields(username = %form.username))]
    pub async fn create_user(&self, form: &UserForm) {
        self.mutate(
            self.client.create_user(form),
            false,
            "User created successfully!",
            "Error creating user",
        )
        .await
    }

    #[instrument(skip(self, user), fields(id = %user.id))]
    pub async fn update_user(&self, user: &User) {
        self.mutate(
            self.client.update_user(&user.id, user),
            true,
            "User updated successfully!",
            "Error updating user",
        )
        .await
    }

    /// Accounts are deleted by username.
    #[instrument(skip(self, user), fields(username = %user.username))]
    pub async fn delete_user(&self, user: &User) {
        self.mutate(
            self.client.delete_user(&user.username),
            true,
            "User deleted successfully!",
            "Error deleting user",
        )
        .await
    }

    async fn mutate<F>(&self, request: F, refetch: bool, success: &str, fallback: &str)
    where
        F: Future<Output = Result<ApiResponse, ApiError>>,
    {
        let guard = self.state.begin();
        if let Err(err) = request.await {
            let message = err.user_message(fallback);
            warn!(error = %err, %message, "Mutation failed");
            guard.fail(message);
            return;
        }
        info!("{success}");
        if !refetch {
            guard.succeed(success);
            return;
        }
        match self.client.get_users().await {
            Ok(users) => {
                self.state.set_items(users);
                guard.succeed(success);
            }
            Err(err) => {
                let message = err.user_message("Error fetching users");
                warn!(error = %err, %message, "Refresh after mutation failed");
                guard.fail(message);
            }
        }
    }
}

/// `Ok(true)` if the lookup found a matching account, `Ok(false)` on 404.
async fn taken<F>(lookup: F, matches: impl Fn(&User) -> bool) -> Result<bool, ApiError>
where
    F: Future<Output = Result<User, ApiError>>,
{
    match lookup.await {
        Ok(user) => Ok(matches(&user)),
        Err(err) if err.is_not_found() => Ok(false),
        Err(err) => Err(err),
    }
}
