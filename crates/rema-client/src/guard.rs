//! # Route Guard
//!
//! Decides whether navigation to a route may proceed. The decision itself is
//! the pure function [`evaluate`]; [`RouteGuard::check`] only resolves the
//! session it needs, asking the server when the identity is not cached yet.
//!
//! | Route                           | No identity      | Role not allowed | Otherwise |
//! |---------------------------------|------------------|------------------|-----------|
//! | public                          | allow            | allow            | allow     |
//! | `requires_auth`, no role list   | fallback         | n/a              | allow     |
//! | `requires_auth`, role list      | fallback         | fallback         | allow     |

use crate::model::{Rol, User};
use crate::session::{SessionCheck, SessionStore};
use tracing::{debug, info};

/// Access requirements attached to a route.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteMeta {
    pub requires_auth: bool,
    /// Roles allowed in; `None` admits any authenticated user.
    pub roles: Option<Vec<Rol>>,
}

impl RouteMeta {
    pub fn public() -> Self {
        Self::default()
    }

    pub fn authenticated() -> Self {
        Self {
            requires_auth: true,
            roles: None,
        }
    }

    pub fn for_roles(roles: impl IntoIterator<Item = Rol>) -> Self {
        Self {
            requires_auth: true,
            roles: Some(roles.into_iter().collect()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    LoginRequired,
    RoleNotAllowed(Rol),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect { route: String, reason: DenyReason },
}

impl GuardDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, GuardDecision::Allow)
    }
}

/// Pure access decision for `meta` given the resolved identity.
pub fn evaluate(meta: &RouteMeta, user: Option<&User>, fallback: &str) -> GuardDecision {
    if !meta.requires_auth {
        return GuardDecision::Allow;
    }
    let Some(user) = user else {
        return GuardDecision::Redirect {
            route: fallback.to_owned(),
            reason: DenyReason::LoginRequired,
        };
    };
    match &meta.roles {
        Some(roles) if !roles.contains(&user.role()) => GuardDecision::Redirect {
            route: fallback.to_owned(),
            reason: DenyReason::RoleNotAllowed(user.role()),
        },
        _ => GuardDecision::Allow,
    }
}

#[derive(Debug, Clone)]
pub struct RouteGuard {
    session: SessionStore,
    fallback: String,
}

impl RouteGuard {
    pub fn new(session: SessionStore, fallback: impl Into<String>) -> Self {
        Self {
            session,
            fallback: fallback.into(),
        }
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    /// Resolves the session if `meta` needs it, then [`evaluate`]s.
    pub async fn check(&self, meta: &RouteMeta) -> GuardDecision {
        if !meta.requires_auth {
            return GuardDecision::Allow;
        }
        let user = match self.session.current_user() {
            Some(user) => Some(user),
            None => match self.session.confirm_session().await {
                SessionCheck::Authenticated(user) => Some(user),
                other => {
                    debug!(check = ?other, "Session not resolved");
                    None
                }
            },
        };
        let decision = evaluate(meta, user.as_ref(), &self.fallback);
        if let GuardDecision::Redirect { route, reason } = &decision {
            info!(%route, ?reason, "Navigation denied");
        }
        decision
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn user(rol: &str) -> User {
        serde_json::from_value(json!({
            "id": "u1",
            "username": "ana",
            "rol": { "name": rol }
        }))
        .unwrap()
    }

    #[test]
    fn test_public_route_always_allowed() {
        assert!(evaluate(&RouteMeta::public(), None, "/").is_allowed());
    }

    #[test]
    fn test_protected_route_without_identity_redirects() {
        let decision = evaluate(&RouteMeta::authenticated(), None, "/");
        assert_eq!(
            decision,
            GuardDecision::Redirect {
                route: "/".into(),
                reason: DenyReason::LoginRequired
            }
        );
    }

    #[test]
    fn test_role_checks() {
        let admin_only = RouteMeta::for_roles([Rol::Admin]);
        let sellers = RouteMeta::for_roles([Rol::Vendedor, Rol::Admin]);

        assert!(evaluate(&admin_only, Some(&user("ADMIN")), "/").is_allowed());
        assert!(evaluate(&sellers, Some(&user("VENDEDOR")), "/").is_allowed());
        assert_eq!(
            evaluate(&admin_only, Some(&user("COMPRADOR")), "/home"),
            GuardDecision::Redirect {
                route: "/home".into(),
                reason: DenyReason::RoleNotAllowed(Rol::Comprador)
            }
        );
        assert!(!evaluate(&sellers, Some(&user("SUPERVISOR")), "/").is_allowed());
        assert!(evaluate(&RouteMeta::authenticated(), Some(&user("TRABAJADOR")), "/").is_allowed());
    }
}
