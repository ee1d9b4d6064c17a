use super::{Redirect, SessionError, SessionRoutes, TokenStore};
use crate::clients::UsersClient;
use crate::model::{Credentials, LoginResponse, ProfilePatch, User, UserId, UsernameChange};
use parking_lot::RwLock;
use resource_framework::{ActionStatus, ResourceState, SessionContext};
use std::fmt;
use std::sync::Arc;
use tracing::{info, instrument, warn};

const SESSION_EXPIRED: &str = "Your session has expired, please log in again";

#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Anonymous,
    Pending,
    Authenticated(User),
}

/// Result of [`SessionStore::confirm_session`].
#[derive(Debug, Clone, PartialEq)]
pub enum SessionCheck {
    Authenticated(User),
    /// No persisted token; no request was made.
    Anonymous,
    /// The server refused the token (401/403). Local credentials were
    /// cleared and the user should be sent to the login route.
    Rejected(Redirect),
    /// The check itself failed (network, 5xx). The token is kept but the
    /// cached identity is dropped until a later check confirms it.
    Failed(String),
}

impl SessionCheck {
    pub fn user(&self) -> Option<&User> {
        match self {
            SessionCheck::Authenticated(user) => Some(user),
            _ => None,
        }
    }
}

/// Result of a successful [`SessionStore::login`].
#[derive(Debug, Clone, PartialEq)]
pub struct LoginOutcome {
    /// Identity check run right after the token was stored.
    pub session: SessionCheck,
    /// Landing route, or the login route if the new token was refused.
    pub redirect: Redirect,
}

/// Result of [`SessionStore::update_profile`].
#[derive(Debug, Clone, PartialEq)]
pub enum ProfileUpdate {
    Updated(User),
    /// The username changed, the server invalidated the token and the local
    /// session has been cleared.
    ReauthenticationRequired { message: String },
}

/// Session composable: token persistence, identity cache and auth actions.
///
/// Cheap to clone; clones share state.
#[derive(Clone)]
pub struct SessionStore {
    users: UsersClient,
    context: SessionContext,
    tokens: Arc<dyn TokenStore>,
    routes: SessionRoutes,
    state: Arc<RwLock<SessionState>>,
    status: ResourceState<User>,
}

impl SessionStore {
    /// `context` must be the one `users` sends through.
    pub fn new(
        users: UsersClient,
        context: SessionContext,
        tokens: Arc<dyn TokenStore>,
        routes: SessionRoutes,
    ) -> Self {
        Self {
            users,
            context,
            tokens,
            routes,
            state: Arc::new(RwLock::new(SessionState::Anonymous)),
            status: ResourceState::new(),
        }
    }

    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    pub fn routes(&self) -> &SessionRoutes {
        &self.routes
    }

    pub fn state(&self) -> SessionState {
        self.state.read().clone()
    }

    pub fn current_user(&self) -> Option<User> {
        match &*self.state.read() {
            SessionState::Authenticated(user) => Some(user.clone()),
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(*self.state.read(), SessionState::Authenticated(_))
    }

    pub fn status(&self) -> ActionStatus {
        self.status.status()
    }

    pub fn loading(&self) -> bool {
        self.status.loading()
    }

    pub fn error(&self) -> Option<String> {
        self.status.error()
    }

    pub fn success(&self) -> Option<String> {
        self.status.success()
    }

    fn set_state(&self, state: SessionState) {
        *self.state.write() = state;
    }

    /// Restores a persisted token at startup. Returns whether one was found.
    ///
    /// The identity is not confirmed; the session is `Pending` afterwards.
    pub async fn bootstrap(&self) -> Result<bool, SessionError> {
        match self.tokens.load().await? {
            Some(token) => {
                self.context.set_token(token);
                self.set_state(SessionState::Pending);
                info!("Restored persisted session");
                Ok(true)
            }
            None => {
                self.context.clear();
                self.set_state(SessionState::Anonymous);
                Ok(false)
            }
        }
    }

    /// Exchanges credentials for a token, stores it and confirms the
    /// identity behind it.
    #[instrument(skip(self, credentials), fields(username = %credentials.username))]
    pub async fn login(&self, credentials: &Credentials) -> Result<LoginOutcome, SessionError> {
        let guard = self.status.begin();
        let token = match self.request_token(credentials).await {
            Ok(token) => token,
            Err(err) => {
                let message = match &err {
                    SessionError::Api(api) => api.user_message("Error logging in"),
                    other => other.to_string(),
                };
                warn!(error = %err, %message, "Login failed");
                guard.fail(message);
                return Err(err);
            }
        };

        if let Err(err) = self.tokens.save(&token).await {
            warn!(error = %err, "Could not persist token");
            guard.fail(err.to_string());
            return Err(err);
        }
        self.context.set_token(token);
        self.set_state(SessionState::Pending);
        info!("Logged in, confirming session");

        let session = self.resolve().await;
        let redirect = match &session {
            SessionCheck::Rejected(redirect) => {
                guard.fail(redirect.error.clone().unwrap_or_else(|| SESSION_EXPIRED.to_owned()));
                redirect.clone()
            }
            _ => {
                guard.succeed("Login successful!");
                Redirect::to(&self.routes.landing)
            }
        };
        Ok(LoginOutcome { session, redirect })
    }

    async fn request_token(&self, credentials: &Credentials) -> Result<String, SessionError> {
        let response = self.users.login(credentials).await?;
        let body: LoginResponse = response.decode().unwrap_or_default();
        body.token
            .filter(|token| !token.is_empty())
            .ok_or(SessionError::MissingToken)
    }

    /// Asks the server who the stored token belongs to.
    ///
    /// With no persisted token this returns `Anonymous` without a request.
    #[instrument(skip(self))]
    pub async fn confirm_session(&self) -> SessionCheck {
        let guard = self.status.begin();
        let check = self.resolve().await;
        match &check {
            SessionCheck::Rejected(redirect) => {
                guard.fail(redirect.error.clone().unwrap_or_else(|| SESSION_EXPIRED.to_owned()))
            }
            SessionCheck::Failed(message) => guard.fail(message.clone()),
            SessionCheck::Authenticated(_) | SessionCheck::Anonymous => guard.finish(),
        }
        check
    }

    async fn resolve(&self) -> SessionCheck {
        let token = match self.tokens.load().await {
            Ok(Some(token)) => token,
            Ok(None) => {
                self.context.clear();
                self.set_state(SessionState::Anonymous);
                return SessionCheck::Anonymous;
            }
            Err(err) => {
                warn!(error = %err, "Could not read persisted token");
                return SessionCheck::Failed(err.to_string());
            }
        };

        self.context.set_token(token);
        if !self.is_authenticated() {
            self.set_state(SessionState::Pending);
        }

        match self.users.is_logged_in().await {
            Ok(user) => {
                info!(user = %user.username, rol = %user.role(), "Session confirmed");
                self.set_state(SessionState::Authenticated(user.clone()));
                SessionCheck::Authenticated(user)
            }
            Err(err) if err.is_auth_failure() => {
                warn!(error = %err, "Session rejected by server");
                self.clear_local().await;
                SessionCheck::Rejected(Redirect::with_error(&self.routes.login, SESSION_EXPIRED))
            }
            Err(err) => {
                warn!(error = %err, "Session check failed");
                self.set_state(SessionState::Pending);
                SessionCheck::Failed(err.user_message("Error checking session"))
            }
        }
    }

    /// Invalidates the token server-side and clears the local session.
    ///
    /// Local state is cleared whatever the server says; its failure is still
    /// reported.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<(), SessionError> {
        let guard = self.status.begin();
        let token = match self.context.token() {
            Some(token) => Some(token),
            None => self.tokens.load().await.ok().flatten(),
        };

        let server = match &token {
            Some(token) => self.users.logout(token).await.map(|_| ()),
            None => Ok(()),
        };
        self.clear_local().await;

        match (token, server) {
            (None, _) => {
                guard.finish();
                Err(SessionError::MissingToken)
            }
            (Some(_), Ok(())) => {
                info!("Logged out");
                guard.succeed("Logout successful!");
                Ok(())
            }
            (Some(_), Err(err)) => {
                let message = err.user_message("Error logging out");
                warn!(error = %err, %message, "Server logout failed, local session cleared");
                guard.fail(message);
                Err(err.into())
            }
        }
    }

    async fn clear_local(&self) {
        if let Err(err) = self.tokens.clear().await {
            warn!(error = %err, "Could not remove persisted token");
        }
        self.context.clear();
        self.set_state(SessionState::Anonymous);
    }

    /// Applies `patch` to the cached identity and sends it to the server.
    ///
    /// When the server reports a username change it has already invalidated
    /// the token, so the local session is logged out and
    /// [`ProfileUpdate::ReauthenticationRequired`] is returned.
    #[instrument(skip(self, patch))]
    pub async fn update_profile(
        &self,
        id: &UserId,
        patch: &ProfilePatch,
    ) -> Result<ProfileUpdate, SessionError> {
        let updated = {
            let mut state = self.state.write();
            match &mut *state {
                SessionState::Authenticated(user) => {
                    patch.apply_to(user);
                    user.clone()
                }
                _ => return Err(SessionError::NotAuthenticated),
            }
        };

        let guard = self.status.begin();
        let response = match self.users.update_user(id, &updated).await {
            Ok(response) => response,
            Err(err) => {
                let message = err.user_message("Error updating profile");
                warn!(error = %err, %message, "Profile update failed");
                guard.fail(message);
                return Err(err.into());
            }
        };

        let change: UsernameChange = response.decode().unwrap_or_default();
        if change.username_changed {
            let message = change
                .message
                .unwrap_or_else(|| "Username changed, please log in again".to_owned());
            info!("Username changed, ending session");
            drop(guard);
            if let Err(err) = self.logout().await {
                warn!(error = %err, "Logout after username change failed");
            }
            self.status.update(|s| s.status = ActionStatus::Success(message.clone()));
            return Ok(ProfileUpdate::ReauthenticationRequired { message });
        }

        guard.succeed("Profile updated successfully!");
        Ok(ProfileUpdate::Updated(updated))
    }
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionStore")
            .field("context", &self.context)
            .field("state", &*self.state.read())
            .finish_non_exhaustive()
    }
}
