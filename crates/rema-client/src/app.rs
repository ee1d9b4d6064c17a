use crate::clients::{
    CategoriaClient, ChatClient, FacturaClient, ProductoClient, RatingClient, UsersClient,
};
use crate::config::ClientConfig;
use crate::guard::RouteGuard;
use crate::session::{FileTokenStore, SessionRoutes, SessionStore, TokenStore};
use crate::stores::{CategoriaStore, ChatStore, FacturaStore, ProductoStore, RatingStore, UsersStore};
use resource_framework::{ApiError, HttpClient, ReqwestTransport, ResourceClient, SessionContext, Transport};
use std::sync::Arc;
use tracing::info;

/// Wiring for the whole client.
///
/// `MarketplaceApp` owns:
/// - **One `HttpClient`** shared by every service client, so the session
///   token attached at login reaches all of them.
/// - **The session** and the **route guard** built on it, both process-wide.
/// - **Service clients**, one per resource.
///
/// Stores are per view: every `*_store()` call hands out a fresh, empty one.
///
/// # Example
///
/// ```ignore
/// let app = MarketplaceApp::from_config(&ClientConfig::from_env()?)?;
/// app.session.bootstrap().await?;
///
/// let productos = app.producto_store();
/// productos.fetch_activos().await?;
/// ```
#[derive(Clone)]
pub struct MarketplaceApp {
    pub http: HttpClient,
    pub session: SessionStore,
    pub guard: RouteGuard,

    pub productos: ProductoClient,
    pub categorias: CategoriaClient,
    pub chats: ChatClient,
    pub facturas: FacturaClient,
    pub ratings: RatingClient,
    pub users: UsersClient,
}

impl MarketplaceApp {
    /// Production wiring: `reqwest` transport and the token persisted on disk.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ApiError> {
        let transport = ReqwestTransport::new(&config.api_base_url, config.request_timeout)?;
        let tokens = FileTokenStore::new(&config.token_path, config.token_ttl);
        info!(
            base_url = %config.api_base_url,
            token_path = %config.token_path.display(),
            "Client wired"
        );
        Ok(Self::with_transport(
            Arc::new(transport),
            Arc::new(tokens),
            config.routes.clone(),
            &config.fallback_route,
        ))
    }

    /// Wiring over any transport and token store.
    pub fn with_transport(
        transport: Arc<dyn Transport>,
        tokens: Arc<dyn TokenStore>,
        routes: SessionRoutes,
        fallback_route: &str,
    ) -> Self {
        let context = SessionContext::new();
        let http = HttpClient::new(transport, context.clone());

        let users = UsersClient::new(ResourceClient::new(http.clone()));
        let session = SessionStore::new(users.clone(), context, tokens, routes);
        let guard = RouteGuard::new(session.clone(), fallback_route);

        Self {
            productos: ProductoClient::new(ResourceClient::new(http.clone())),
            categorias: CategoriaClient::new(ResourceClient::new(http.clone())),
            chats: ChatClient::new(ResourceClient::new(http.clone())),
            facturas: FacturaClient::new(ResourceClient::new(http.clone())),
            ratings: RatingClient::new(ResourceClient::new(http.clone())),
            users,
            http,
            session,
            guard,
        }
    }

    pub fn producto_store(&self) -> ProductoStore {
        ProductoStore::new(self.productos.clone())
    }

    pub fn categoria_store(&self) -> CategoriaStore {
        CategoriaStore::new(self.categorias.clone())
    }

    pub fn chat_store(&self) -> ChatStore {
        ChatStore::new(self.chats.clone(), self.users.clone())
    }

    pub fn factura_store(&self) -> FacturaStore {
        FacturaStore::new(self.facturas.clone())
    }

    pub fn rating_store(&self) -> RatingStore {
        RatingStore::new(self.ratings.clone())
    }

    pub fn users_store(&self) -> UsersStore {
        UsersStore::new(self.users.clone())
    }
}
