//! # Producto Client
//!
//! Seller-side product endpoints below `/vendedor/producto`.
use crate::model::{stock_after_sale, CategoriaId, Producto, ProductoId, ProductoModify, UserId};
use async_trait::async_trait;
use resource_framework::{ApiEntity, ApiError, ApiRequest, ApiResponse, CrudService, ResourceClient};
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct ProductoClient {
    inner: ResourceClient<Producto>,
}

impl ProductoClient {
    pub fn new(inner: ResourceClient<Producto>) -> Self {
        Self { inner }
    }

    fn path(suffix: &str) -> String {
        format!("{}/{suffix}", Producto::BASE_PATH)
    }
}

#[async_trait]
impl CrudService<Producto> for ProductoClient {
    fn inner(&self) -> &ResourceClient<Producto> {
        &self.inner
    }
}

impl ProductoClient {
    #[instrument(skip(self))]
    pub async fn get_by_categoria(&self, id: &CategoriaId) -> Result<Vec<Producto>, ApiError> {
        debug!("Sending request");
        let request = ApiRequest::get(Self::path(&format!("getProductosByIdCategoria/{id}")));
        self.inner.list_at(request).await
    }

    #[instrument(skip(self))]
    pub async fn get_by_usuario(&self, id: &UserId) -> Result<Vec<Producto>, ApiError> {
        debug!("Sending request");
        let request = ApiRequest::get(Self::path(&format!("getByUserId/{id}")));
        self.inner.list_at(request).await
    }

    /// Flips the listing between active and inactive.
    #[instrument(skip(self))]
    pub async fn toggle_status(&self, id: &ProductoId) -> Result<ApiResponse, ApiError> {
        debug!("Sending request");
        let request = ApiRequest::post(Self::path(&format!("toggleStatus/{id}")));
        self.inner.http().send(request).await
    }

    /// Writes back `producto` with `quantity` units taken off its stock.
    ///
    /// Returns the stock that was sent alongside the server's answer.
    #[instrument(skip(self, producto), fields(id = %producto.id))]
    pub async fn mark_as_sold(
        &self,
        producto: &Producto,
        quantity: u32,
    ) -> Result<(u32, ApiResponse), ApiError> {
        let mut update = ProductoModify::from(producto);
        update.stock = stock_after_sale(producto.stock, quantity);
        debug!(stock = update.stock, "Sending request");
        let response = self.inner.update(&producto.id, &update).await?;
        Ok((update.stock, response))
    }
}
