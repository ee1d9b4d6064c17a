use resource_framework::{ApiEntity, ApiRequest};
use serde::{Deserialize, Serialize};
use std::fmt;

string_id!(UserId);

/// Account role, used by the route guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Rol {
    Admin,
    Comprador,
    Vendedor,
    Trabajador,
    /// A role this client does not know; never matches an allowed-role list.
    #[serde(other)]
    Unknown,
}

impl fmt::Display for Rol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Rol::Admin => "ADMIN",
            Rol::Comprador => "COMPRADOR",
            Rol::Vendedor => "VENDEDOR",
            Rol::Trabajador => "TRABAJADOR",
            Rol::Unknown => "UNKNOWN",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRol {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: Rol,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialLink {
    pub platform: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub password: String,
    pub rol: UserRol,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_links: Option<Vec<SocialLink>>,
}

impl User {
    pub fn role(&self) -> Rol {
        self.rol.name
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("rol", &self.rol)
            .field("description", &self.description)
            .field("profile_image", &self.profile_image)
            .field("social_links", &self.social_links)
            .finish_non_exhaustive()
    }
}

/// Partial profile edit merged into the cached identity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfilePatch {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub description: Option<String>,
    pub profile_image: Option<String>,
    pub social_links: Option<Vec<SocialLink>>,
}

impl ProfilePatch {
    pub fn apply_to(&self, user: &mut User) {
        if let Some(username) = &self.username {
            user.username = username.clone();
        }
        if let Some(email) = &self.email {
            user.email = email.clone();
        }
        if let Some(password) = &self.password {
            user.password = password.clone();
        }
        if let Some(description) = &self.description {
            user.description = Some(description.clone());
        }
        if let Some(image) = &self.profile_image {
            user.profile_image = Some(image.clone());
        }
        if let Some(links) = &self.social_links {
            user.social_links = Some(links.clone());
        }
    }
}

/// Sign-up form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_links: Option<Vec<SocialLink>>,
}

#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

// Passwords stay out of logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// Body of a successful `/login`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,
}

/// Body `/updateUser` returns when the username changed and the token was
/// invalidated server-side.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsernameChange {
    #[serde(default)]
    pub username_changed: bool,
    #[serde(default)]
    pub message: Option<String>,
}

// User endpoints live at the API root under ad-hoc names.
impl ApiEntity for User {
    type Id = UserId;
    type Create = UserForm;
    type Update = User;

    const BASE_PATH: &'static str = "";
    const NAME: &'static str = "user";
    const PLURAL: &'static str = "users";

    fn id(&self) -> Option<&UserId> {
        Some(&self.id)
    }

    fn list_request() -> ApiRequest {
        ApiRequest::get("/getUsers")
    }

    fn get_request(id: &UserId) -> ApiRequest {
        ApiRequest::get(format!("/getUserById/{id}"))
    }

    fn create_request() -> ApiRequest {
        ApiRequest::post("/createUser")
    }

    fn update_request(id: &UserId) -> ApiRequest {
        ApiRequest::post(format!("/updateUser/{id}"))
    }

    // No delete_request: accounts are deleted by username, not id
    // (`UsersClient::delete_user`).
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unknown_role_deserializes() {
        let rol: UserRol = serde_json::from_value(json!({ "id": 9, "name": "SUPERVISOR" })).unwrap();
        assert_eq!(rol.name, Rol::Unknown);
        let rol: UserRol = serde_json::from_value(json!({ "name": "VENDEDOR" })).unwrap();
        assert_eq!(rol.name, Rol::Vendedor);
    }

    #[test]
    fn test_user_debug_hides_password() {
        let user: User = serde_json::from_value(json!({
            "id": "u1",
            "username": "ana",
            "password": "hunter2",
            "rol": { "name": "ADMIN" }
        }))
        .unwrap();
        assert_eq!(user.password, "hunter2");

        let printed = format!("{user:?}");
        assert!(printed.contains("ana"));
        assert!(!printed.contains("hunter2"));
        assert!(!printed.contains("password"));
    }

    #[test]
    fn test_profile_patch_only_touches_set_fields() {
        let mut user: User = serde_json::from_value(json!({
            "id": "u1",
            "username": "ana",
            "email": "ana@example.com",
            "rol": { "name": "COMPRADOR" }
        }))
        .unwrap();
        ProfilePatch {
            description: Some("Coleccionista".into()),
            ..Default::default()
        }
        .apply_to(&mut user);
        assert_eq!(user.username, "ana");
        assert_eq!(user.description.as_deref(), Some("Coleccionista"));
    }

    #[test]
    fn test_credentials_debug_hides_password() {
        let rendered = format!("{:?}", Credentials::new("ana", "hunter2"));
        assert!(!rendered.contains("hunter2"));
    }
}
