use rema_client::app::MarketplaceApp;
use rema_client::model::{CategoriaModify, ProductoId, RatingForm, RatingReply, SaleRequest, UserForm, UserId};
use rema_client::session::{MemoryTokenStore, SessionRoutes};
use rema_client::stores::{ExistenceCheck, ExistenceReason};
use resource_framework::mock::MockTransport;
use resource_framework::ActionStatus;
use serde_json::{json, Value};
use std::sync::Arc;

// --- Helpers ---

fn app(mock: &MockTransport) -> MarketplaceApp {
    MarketplaceApp::with_transport(
        Arc::new(mock.clone()),
        Arc::new(MemoryTokenStore::with_token("abc")),
        SessionRoutes::default(),
        "/",
    )
}

fn producto(id: &str, stock: u32, activo: bool) -> Value {
    json!({
        "id": id,
        "idUsuario": "u2",
        "idCategoria": "c1",
        "titulo": format!("Producto {id}"),
        "precioCentimos": 1500,
        "stock": stock,
        "activo": activo
    })
}

fn chat(id: &str) -> Value {
    json!({
        "id": id,
        "idProducto": "p1",
        "idComprador": "u1",
        "idVendedor": "u2",
        "mensajes": [],
        "fechaCreacion": "2026-10-01T10:00:00.000Z",
        "activo": true
    })
}

fn user(id: &str, username: &str) -> Value {
    json!({
        "id": id,
        "username": username,
        "email": format!("{username}@rema.test"),
        "rol": { "name": "COMPRADOR" }
    })
}

fn rating(id: &str, stars: u8) -> Value {
    json!({
        "id": id,
        "sellerId": "u2",
        "userId": "u1",
        "username": "ana",
        "rating": stars,
        "comment": "Todo correcto"
    })
}

// --- Producto ---

#[tokio::test]
async fn test_mark_as_sold_patches_stock_locally() {
    let mock = MockTransport::new();
    mock.expect_get("/vendedor/producto/getAll")
        .return_ok_json(json!([producto("p1", 3, true), producto("p2", 8, true)]));
    mock.expect_get("/vendedor/producto/getById/p1")
        .return_ok_json(producto("p1", 3, true));
    mock.expect_post("/vendedor/producto/update/p1")
        .return_text(200, "Producto updated successfully");

    let store = app(&mock).producto_store();
    store.fetch_all().await;

    let stock = store.mark_as_sold(&ProductoId::from("p1"), 5).await.unwrap();
    assert_eq!(stock, 0);

    let snapshot = store.state().snapshot();
    assert_eq!(snapshot.current.unwrap().stock, 0);
    assert_eq!(snapshot.items[0].stock, 0);
    assert_eq!(snapshot.items[1].stock, 8);
    assert_eq!(
        snapshot.status,
        ActionStatus::Success("Product marked as sold successfully!".into())
    );

    // No re-fetch after the update.
    assert_eq!(mock.request_count(), 3);
    assert_eq!(mock.last_request().unwrap().body.unwrap()["stock"], 0);
    mock.verify();
}

#[tokio::test]
async fn test_fetch_by_id_not_found() {
    let mock = MockTransport::new();
    mock.expect_get("/vendedor/producto/getById/nope")
        .return_status(404, "Producto not found");

    let store = app(&mock).producto_store();
    let err = store.fetch_by_id(&ProductoId::from("nope")).await.unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(store.state().current(), None);
    assert_eq!(store.state().error().as_deref(), Some("Producto not found"));
    assert!(!store.state().loading());
}

#[tokio::test]
async fn test_fetch_activos_filters_inactive() {
    let mock = MockTransport::new();
    mock.expect_get("/vendedor/producto/getAll").return_ok_json(json!([
        producto("p1", 1, true),
        producto("p2", 1, false),
        producto("p3", 1, true)
    ]));

    let store = app(&mock).producto_store();
    store.fetch_activos().await.unwrap();

    let ids: Vec<_> = store
        .state()
        .items()
        .into_iter()
        .map(|p| p.id.to_string())
        .collect();
    assert_eq!(ids, ["p1", "p3"]);
}

#[tokio::test]
async fn test_fetch_by_usuario_swallows_failure() {
    let mock = MockTransport::new();
    mock.expect_get("/vendedor/producto/getByUserId/u2")
        .return_transport_error("timeout");

    let store = app(&mock).producto_store();
    store.fetch_by_usuario(&UserId::from("u2")).await;

    assert_eq!(
        store.state().error().as_deref(),
        Some("Error fetching productos by user")
    );
}

#[tokio::test]
async fn test_toggle_status_refetches() {
    let mock = MockTransport::new();
    mock.expect_post("/vendedor/producto/toggleStatus/p1")
        .return_text(200, "Status toggled");
    mock.expect_get("/vendedor/producto/getAll")
        .return_ok_json(json!([producto("p1", 2, false)]));

    let store = app(&mock).producto_store();
    store.toggle_status(&ProductoId::from("p1")).await.unwrap();

    assert!(!store.state().items()[0].activo);
    assert_eq!(
        store.state().success().as_deref(),
        Some("Producto status toggled successfully!")
    );
    mock.verify();
}

// --- Categoria ---

#[tokio::test]
async fn test_categoria_create_refetches() {
    let mock = MockTransport::new();
    mock.expect_post("/admin/categoria/create")
        .return_text(200, "Categoria created");
    mock.expect_get("/admin/categoria/getAll")
        .return_ok_json(json!([{ "id": "c1", "titulo": "Instrumentos" }]));

    let store = app(&mock).categoria_store();
    let form = CategoriaModify {
        id: None,
        titulo: "Instrumentos".into(),
        descripcion: String::new(),
        campos: vec!["marca".into()],
    };
    store.create(&form).await.unwrap();

    assert_eq!(store.state().items().len(), 1);
    assert_eq!(
        store.state().success().as_deref(),
        Some("Categoria created successfully!")
    );
    mock.verify();
}

// --- Chat ---

#[tokio::test]
async fn test_get_or_create_opens_missing_chat() {
    let mock = MockTransport::new();
    mock.expect_get("/api/chat/getByParticipants/p1/u1/u2")
        .return_empty(404);
    mock.expect_post("/api/chat/create").return_ok_json(chat("ch1"));

    let store = app(&mock).chat_store();
    let opened = store
        .get_or_create(&"p1".into(), &"u1".into(), &"u2".into())
        .await
        .unwrap();

    assert_eq!(opened.id.as_ref().map(|id| id.as_str()), Some("ch1"));
    assert_eq!(store.state().current(), Some(opened));

    let sent = mock.last_request().unwrap().body.unwrap();
    assert_eq!(sent["activo"], true);
    assert_eq!(sent["idVendedor"], "u2");
    assert!(sent.get("id").is_none());
    mock.verify();
}

#[tokio::test]
async fn test_add_message_becomes_current() {
    let mock = MockTransport::new();
    let mut updated = chat("ch1");
    updated["mensajes"] = json!([{ "idEmisor": "u1", "mensaje": "Hola", "leido": false }]);
    mock.expect_post("/api/chat/addMessage/ch1").return_ok_json(updated);

    let store = app(&mock).chat_store();
    store
        .add_message(&"ch1".into(), &"u1".into(), "Hola")
        .await
        .unwrap();

    assert_eq!(store.state().current().unwrap().mensajes.len(), 1);
    let sent = mock.last_request().unwrap().body.unwrap();
    assert_eq!(sent["mensaje"], "Hola");
    assert_eq!(sent["leido"], false);
}

#[tokio::test]
async fn test_delete_chat_removes_locally() {
    let mock = MockTransport::new();
    mock.expect_get("/api/chat/getByBuyerId/u1")
        .return_ok_json(json!([chat("ch1"), chat("ch2")]));
    mock.expect_get("/api/chat/getById/ch1").return_ok_json(chat("ch1"));
    mock.expect_delete("/api/chat/delete/ch1")
        .return_text(200, "Chat deleted");

    let store = app(&mock).chat_store();
    store.fetch_by_buyer(&"u1".into()).await.unwrap();
    store.fetch_by_id(&"ch1".into()).await.unwrap();
    store.delete(&"ch1".into()).await.unwrap();

    let snapshot = store.state().snapshot();
    assert_eq!(snapshot.items.len(), 1);
    assert_eq!(snapshot.current, None);
    assert_eq!(snapshot.success(), Some("Chat eliminado exitosamente"));
    mock.verify();
}

#[tokio::test]
async fn test_partner_name() {
    let mock = MockTransport::new();
    mock.expect_get("/api/chat/getById/ch1").return_ok_json(chat("ch1"));
    mock.expect_get("/getUserById/u1").return_ok_json(user("u1", "ana"));
    mock.expect_get("/api/chat/getById/ch1").return_ok_json(chat("ch1"));
    mock.expect_get("/getUserById/u2").return_ok_json(user("u2", "bea"));
    mock.expect_get("/api/chat/getById/ch9").return_empty(404);

    let store = app(&mock).chat_store();
    let seller = UserId::from("u2");

    assert_eq!(store.partner_name(&"ch1".into(), Some(&seller)).await, "ana");
    assert_eq!(store.partner_name(&"ch1".into(), None).await, "bea");
    assert_eq!(store.partner_name(&"ch9".into(), None).await, "");
    mock.verify();
}

// --- Factura ---

#[tokio::test]
async fn test_create_from_sale() {
    let mock = MockTransport::new();
    mock.expect_post("/api/factura/createFromSale/p1/u1/u2/2/ch1")
        .return_ok_json(json!({
            "id": "f1",
            "idProducto": "p1",
            "idComprador": "u1",
            "idVendedor": "u2",
            "cantidad": 2,
            "precioCentimos": 3000,
            "estado": "PENDIENTE",
            "idChat": "ch1"
        }));

    let store = app(&mock).factura_store();
    let sale = SaleRequest {
        producto: "p1".into(),
        comprador: "u1".into(),
        vendedor: "u2".into(),
        cantidad: 2,
        chat: "ch1".into(),
    };
    let factura = store.create_from_sale(&sale).await.unwrap();

    assert_eq!(factura.cantidad, 2);
    assert_eq!(store.state().current(), Some(factura));
    assert_eq!(
        store.state().success().as_deref(),
        Some("Factura creada exitosamente desde la venta")
    );
    mock.verify();
}

#[tokio::test]
async fn test_factura_list_failure_is_raised() {
    let mock = MockTransport::new();
    mock.expect_get("/api/factura/getByBuyerId/u1").return_empty(500);

    let store = app(&mock).factura_store();
    assert!(store.fetch_by_buyer(&"u1".into()).await.is_err());
    assert_eq!(
        store.state().error().as_deref(),
        Some("Error obteniendo facturas de comprador")
    );
}

// --- Rating ---

#[tokio::test]
async fn test_missing_user_rating_is_not_an_error() {
    let mock = MockTransport::new();
    mock.expect_get("/ratings/user/u1/seller/u2").return_ok_json(rating("r1", 4));
    mock.expect_get("/ratings/user/u1/seller/u3").return_empty(404);

    let store = app(&mock).rating_store();
    let found = store
        .fetch_user_rating(&"u1".into(), &"u2".into())
        .await
        .unwrap();
    assert_eq!(found.unwrap().rating, 4);

    let none = store
        .fetch_user_rating(&"u1".into(), &"u3".into())
        .await
        .unwrap();
    assert_eq!(none, None);
    assert_eq!(store.state().current(), None);
    assert_eq!(store.state().status(), ActionStatus::Idle);
}

#[tokio::test]
async fn test_create_rating_refetches_seller_ratings() {
    let mock = MockTransport::new();
    mock.expect_post("/ratings/create").return_ok_json(rating("r1", 5));
    mock.expect_get("/ratings/seller/u2").return_ok_json(json!([rating("r1", 5)]));

    let store = app(&mock).rating_store();
    let form = RatingForm {
        seller_id: "u2".into(),
        rating: 5,
        comment: "Todo correcto".into(),
    };
    store.create(&form).await.unwrap();

    assert_eq!(store.state().items().len(), 1);
    assert_eq!(
        store.state().success().as_deref(),
        Some("Valoración enviada correctamente")
    );
    mock.verify();
}

#[tokio::test]
async fn test_update_and_delete_rating_paths() {
    let mock = MockTransport::new();
    mock.expect_put("/ratings/r1").return_ok_json(rating("r1", 3));
    mock.expect_get("/ratings/seller/u2").return_ok_json(json!([rating("r1", 3)]));
    mock.expect_delete("/ratings/r1").return_status(403, "Not your rating");

    let store = app(&mock).rating_store();
    let form = RatingForm {
        seller_id: "u2".into(),
        rating: 3,
        comment: "Regular".into(),
    };
    store.update(&"r1".into(), &form).await.unwrap();
    assert_eq!(store.state().items()[0].rating, 3);

    assert!(store.delete(&"r1".into(), &"u2".into()).await.is_err());
    assert_eq!(store.state().error().as_deref(), Some("Not your rating"));
    assert_eq!(store.state().items().len(), 1);
    mock.verify();
}

#[tokio::test]
async fn test_reply_patches_held_rating() {
    let mock = MockTransport::new();
    mock.expect_get("/ratings/seller/u2").return_ok_json(json!([rating("r1", 4)]));
    mock.expect_post("/ratings/reply").return_text(200, "Reply added");

    let store = app(&mock).rating_store();
    store.fetch_by_seller(&"u2".into()).await.unwrap();
    store
        .add_reply(&RatingReply {
            rating_id: "r1".into(),
            reply: "¡Gracias!".into(),
        })
        .await
        .unwrap();

    assert_eq!(store.state().items()[0].reply.as_deref(), Some("¡Gracias!"));
    assert_eq!(mock.last_request().unwrap().body.unwrap()["ratingId"], "r1");
    mock.verify();
}

// --- Users ---

#[tokio::test]
async fn test_check_user_exists() {
    let mock = MockTransport::new();
    // Email taken.
    mock.expect_get("/getUserByEmail/ana@rema.test")
        .return_ok_json(user("u1", "ana"));
    // Username taken.
    mock.expect_get("/getUserByEmail/new@rema.test").return_empty(404);
    mock.expect_get("/getUserByUsername/ana").return_ok_json(user("u1", "ana"));
    // Both free.
    mock.expect_get("/getUserByEmail/new@rema.test").return_empty(404);
    mock.expect_get("/getUserByUsername/nueva").return_empty(404);
    // Lookup broken.
    mock.expect_get("/getUserByEmail/new@rema.test").return_empty(500);

    let store = app(&mock).users_store();

    let check = store.check_user_exists("ana@rema.test", "ana").await;
    assert_eq!((check.exists, check.reason), (true, Some(ExistenceReason::Email)));
    assert_eq!(store.state().error().as_deref(), Some("Email already exists"));

    let check = store.check_user_exists("new@rema.test", "ana").await;
    assert_eq!((check.exists, check.reason), (true, Some(ExistenceReason::Username)));
    assert_eq!(store.state().error().as_deref(), Some("Username already exists"));

    let check = store.check_user_exists("new@rema.test", "nueva").await;
    assert_eq!(check, ExistenceCheck::default());
    assert_eq!(store.state().status(), ActionStatus::Idle);

    let check = store.check_user_exists("new@rema.test", "nueva").await;
    assert!(!check.exists);
    assert_eq!(check.error.as_deref(), Some("Error checking user existence"));
    mock.verify();
}

#[tokio::test]
async fn test_user_mutations_only_report_status() {
    let mock = MockTransport::new();
    mock.expect_post("/createUser").return_status(409, "Username already exists");
    mock.expect_get("/deleteUser/bea").return_text(200, "User deleted");
    mock.expect_get("/getUsers").return_ok_json(json!([user("u1", "ana")]));

    let store = app(&mock).users_store();
    let form = UserForm {
        username: "bea".into(),
        email: "bea@rema.test".into(),
        password: "secret".into(),
        confirm_password: "secret".into(),
        description: None,
        profile_image: None,
        social_links: None,
    };
    store.create_user(&form).await;
    assert_eq!(store.state().error().as_deref(), Some("Username already exists"));

    let bea = serde_json::from_value(user("u2", "bea")).unwrap();
    store.delete_user(&bea).await;
    assert_eq!(store.state().success().as_deref(), Some("User deleted successfully!"));
    assert_eq!(store.state().items().len(), 1);
    mock.verify();
}
