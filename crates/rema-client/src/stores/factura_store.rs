//! # Factura Store
//!
//! Invoices are issued and read, never edited. Every action re-raises its
//! failure.

use crate::clients::FacturaClient;
use crate::model::{ChatId, Factura, FacturaId, ProductoId, SaleRequest, UserId};
use resource_framework::{ApiError, ResourceState};
use std::future::Future;
use tracing::{info, instrument, warn};

#[derive(Clone)]
pub struct FacturaStore {
    client: FacturaClient,
    state: ResourceState<Factura>,
}

impl FacturaStore {
    pub fn new(client: FacturaClient) -> Self {
        Self {
            client,
            state: ResourceState::new(),
        }
    }

    pub fn state(&self) -> &ResourceState<Factura> {
        &self.state
    }

    #[instrument(skip(self, factura))]
    pub async fn create(&self, factura: &Factura) -> Result<Factura, ApiError> {
        self.issue(
            self.client.create(factura),
            "Factura creada exitosamente",
            "Error creando factura",
        )
        .await
    }

    /// Issues the invoice for a sale closed in a chat.
    #[instrument(skip(self))]
    pub async fn create_from_sale(&self, sale: &SaleRequest) -> Result<Factura, ApiError> {
        self.issue(
            self.client.create_from_sale(sale),
            "Factura creada exitosamente desde la venta",
            "Error creando factura desde la venta",
        )
        .await
    }

    async fn issue<F>(&self, request: F, success: &str, fallback: &str) -> Result<Factura, ApiError>
    where
        F: Future<Output = Result<Factura, ApiError>>,
    {
        let guard = self.state.begin();
        match request.await {
            Ok(factura) => {
                info!(id = ?factura.id, "Factura issued");
                self.state.set_current(Some(factura.clone()));
                guard.succeed(success);
                Ok(factura)
            }
            Err(err) => {
                let message = err.user_message(fallback);
                warn!(error = %err, %message, "Factura not issued");
                guard.fail(message);
                Err(err)
            }
        }
    }

    #[instrument(skip(self))]
    pub async fn fetch_by_id(&self, id: &FacturaId) -> Result<Factura, ApiError> {
        self.state
            .load_current(self.client.get_by_id(id), "Error obteniendo factura por ID")
            .await
    }

    #[instrument(skip(self))]
    pub async fn fetch_by_buyer(&self, id: &UserId) -> Result<(), ApiError> {
        self.state
            .load_items(
                self.client.get_by_buyer(id),
                "Error obteniendo facturas de comprador",
            )
            .await
    }

    #[instrument(skip(self))]
    pub async fn fetch_by_seller(&self, id: &UserId) -> Result<(), ApiError> {
        self.state
            .load_items(
                self.client.get_by_seller(id),
                "Error obteniendo facturas de vendedor",
            )
            .await
    }

    #[instrument(skip(self))]
    pub async fn fetch_by_product(&self, id: &ProductoId) -> Result<(), ApiError> {
        self.state
            .load_items(
                self.client.get_by_product(id),
                "Error obteniendo facturas de producto",
            )
            .await
    }

    #[instrument(skip(self))]
    pub async fn fetch_by_chat(&self, id: &ChatId) -> Result<(), ApiError> {
        self.state
            .load_items(self.client.get_by_chat(id), "Error obteniendo facturas de chat")
            .await
    }
}
