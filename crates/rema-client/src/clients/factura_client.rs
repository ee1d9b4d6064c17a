//! # Factura Client
//!
//! Invoice endpoints below `/api/factura`. Invoices are created and read,
//! never updated or deleted from the client.
use crate::model::{ChatId, Factura, FacturaId, ProductoId, SaleRequest, UserId};
use resource_framework::{ApiEntity, ApiError, ApiRequest, ResourceClient};
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct FacturaClient {
    inner: ResourceClient<Factura>,
}

impl FacturaClient {
    pub fn new(inner: ResourceClient<Factura>) -> Self {
        Self { inner }
    }

    fn list(suffix: String) -> ApiRequest {
        ApiRequest::get(format!("{}/{suffix}", Factura::BASE_PATH))
    }

    #[instrument(skip(self, factura))]
    pub async fn create(&self, factura: &Factura) -> Result<Factura, ApiError> {
        debug!(?factura, "Sending request");
        let request = Factura::create_request().with_json(factura)?;
        self.inner.one_at(request).await
    }

    /// Issues the invoice for a sale agreed in a chat.
    #[instrument(skip(self))]
    pub async fn create_from_sale(&self, sale: &SaleRequest) -> Result<Factura, ApiError> {
        debug!("Sending request");
        let path = format!(
            "{}/createFromSale/{}/{}/{}/{}/{}",
            Factura::BASE_PATH,
            sale.producto,
            sale.comprador,
            sale.vendedor,
            sale.cantidad,
            sale.chat
        );
        self.inner.one_at(ApiRequest::post(path)).await
    }

    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: &FacturaId) -> Result<Factura, ApiError> {
        debug!("Sending request");
        self.inner.get_by_id(id).await
    }

    #[instrument(skip(self))]
    pub async fn get_by_buyer(&self, id: &UserId) -> Result<Vec<Factura>, ApiError> {
        debug!("Sending request");
        self.inner.list_at(Self::list(format!("getByBuyerId/{id}"))).await
    }

    #[instrument(skip(self))]
    pub async fn get_by_seller(&self, id: &UserId) -> Result<Vec<Factura>, ApiError> {
        debug!("Sending request");
        self.inner.list_at(Self::list(format!("getBySellerId/{id}"))).await
    }

    #[instrument(skip(self))]
    pub async fn get_by_product(&self, id: &ProductoId) -> Result<Vec<Factura>, ApiError> {
        debug!("Sending request");
        self.inner.list_at(Self::list(format!("getByProductId/{id}"))).await
    }

    #[instrument(skip(self))]
    pub async fn get_by_chat(&self, id: &ChatId) -> Result<Vec<Factura>, ApiError> {
        debug!("Sending request");
        self.inner.list_at(Self::list(format!("getByChatId/{id}"))).await
    }
}
