use rema_client::app::MarketplaceApp;
use rema_client::config::ClientConfig;
use rema_client::guard::RouteMeta;
use rema_client::model::Rol;
use rema_client::session::SessionCheck;
use resource_framework::tracing::setup_tracing;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = ClientConfig::from_env().map_err(|e| e.to_string())?;
    let app = MarketplaceApp::from_config(&config).map_err(|e| e.to_string())?;

    let restored = app.session.bootstrap().await.map_err(|e| e.to_string())?;
    info!(restored, "Starting marketplace client");

    match app.session.confirm_session().await {
        SessionCheck::Authenticated(user) => {
            info!(user = %user.username, rol = %user.role(), "Logged in")
        }
        SessionCheck::Anonymous => info!("Browsing anonymously"),
        SessionCheck::Rejected(redirect) => {
            warn!(route = %redirect.route, reason = ?redirect.error, "Session rejected")
        }
        SessionCheck::Failed(message) => warn!(%message, "Could not check session"),
    }

    let seller_area = RouteMeta::for_roles([Rol::Vendedor, Rol::Admin]);
    let decision = app.guard.check(&seller_area).await;
    info!(allowed = decision.is_allowed(), "Seller area");

    let productos = app.producto_store();
    if let Err(e) = productos.fetch_activos().await {
        error!(error = %e, "Could not load the catalogue");
        return Err(e.to_string());
    }
    for producto in productos.state().items() {
        info!(
            id = %producto.id,
            titulo = %producto.titulo,
            stock = producto.stock,
            "Producto"
        );
    }

    Ok(())
}
