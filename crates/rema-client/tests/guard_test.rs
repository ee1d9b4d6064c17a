use rema_client::app::MarketplaceApp;
use rema_client::guard::{DenyReason, GuardDecision, RouteMeta};
use rema_client::model::Rol;
use rema_client::session::{MemoryTokenStore, SessionRoutes};
use resource_framework::mock::MockTransport;
use serde_json::json;
use std::sync::Arc;

fn app(mock: &MockTransport, tokens: MemoryTokenStore) -> MarketplaceApp {
    MarketplaceApp::with_transport(
        Arc::new(mock.clone()),
        Arc::new(tokens),
        SessionRoutes::default(),
        "/inicio",
    )
}

fn denied(reason: DenyReason) -> GuardDecision {
    GuardDecision::Redirect {
        route: "/inicio".into(),
        reason,
    }
}

#[tokio::test]
async fn test_public_route_skips_session() {
    let mock = MockTransport::new();
    let app = app(&mock, MemoryTokenStore::new());

    assert!(app.guard.check(&RouteMeta::public()).await.is_allowed());
    assert_eq!(mock.request_count(), 0);
}

#[tokio::test]
async fn test_protected_route_without_token() {
    let mock = MockTransport::new();
    let app = app(&mock, MemoryTokenStore::new());

    let decision = app.guard.check(&RouteMeta::authenticated()).await;
    assert_eq!(decision, denied(DenyReason::LoginRequired));
    assert_eq!(mock.request_count(), 0);
}

#[tokio::test]
async fn test_session_resolved_once_then_cached() {
    let mock = MockTransport::new();
    mock.expect_get("/isLoggedIn").return_ok_json(json!({
        "id": "u7",
        "username": "bea",
        "rol": { "name": "COMPRADOR" }
    }));

    let app = app(&mock, MemoryTokenStore::with_token("abc"));

    assert!(app.guard.check(&RouteMeta::authenticated()).await.is_allowed());
    assert_eq!(
        app.guard.check(&RouteMeta::for_roles([Rol::Admin])).await,
        denied(DenyReason::RoleNotAllowed(Rol::Comprador))
    );
    assert!(app
        .guard
        .check(&RouteMeta::for_roles([Rol::Comprador, Rol::Vendedor]))
        .await
        .is_allowed());

    assert_eq!(mock.request_count(), 1);
    mock.verify();
}

#[tokio::test]
async fn test_rejected_token_redirects_to_fallback() {
    let mock = MockTransport::new();
    mock.expect_get("/isLoggedIn").return_empty(403);

    let app = app(&mock, MemoryTokenStore::with_token("revoked"));

    let decision = app.guard.check(&RouteMeta::for_roles([Rol::Admin])).await;
    assert_eq!(decision, denied(DenyReason::LoginRequired));
    assert!(!app.session.context().has_token());
    mock.verify();
}
