//! # Producto Store
//!
//! | Action               | Failure                      |
//! |----------------------|------------------------------|
//! | `fetch_all`          | recorded, swallowed          |
//! | `fetch_by_usuario`   | recorded, swallowed          |
//! | everything else      | recorded, re-raised          |
//!
//! `mark_as_sold` is the one action that patches local state instead of
//! re-reading the list: the new stock is known exactly once the update went
//! through.

use crate::clients::ProductoClient;
use crate::model::{CategoriaId, Producto, ProductoId, UserId};
use resource_framework::{ApiError, ApiResponse, CrudService, ResourceState, ResourceStore};
use std::ops::Deref;
use tracing::{info, instrument, warn};

#[derive(Clone)]
pub struct ProductoStore {
    base: ResourceStore<Producto, ProductoClient>,
}

impl Deref for ProductoStore {
    type Target = ResourceStore<Producto, ProductoClient>;

    fn deref(&self) -> &Self::Target {
        &self.base
    }
}

impl ProductoStore {
    pub fn new(client: ProductoClient) -> Self {
        Self {
            base: ResourceStore::new(client),
        }
    }

    fn client(&self) -> &ProductoClient {
        self.base.service()
    }

    fn local(&self) -> &ResourceState<Producto> {
        self.base.state()
    }

    /// Loads the catalogue and keeps only active listings.
    #[instrument(skip(self))]
    pub async fn fetch_activos(&self) -> Result<(), ApiError> {
        let request = async {
            let productos = self.client().get_all().await?;
            Ok::<Vec<Producto>, ApiError>(productos.into_iter().filter(|p| p.activo).collect())
        };
        self.local()
            .load_items(request, "Error fetching active productos")
            .await
    }

    #[instrument(skip(self))]
    pub async fn fetch_by_categoria(&self, id: &CategoriaId) -> Result<(), ApiError> {
        self.local()
            .load_items(
                self.client().get_by_categoria(id),
                "Error fetching productos by category ID",
            )
            .await
    }

    /// A seller's listings. Failures are recorded, not returned.
    #[instrument(skip(self))]
    pub async fn fetch_by_usuario(&self, id: &UserId) {
        let _ = self
            .local()
            .load_items(self.client().get_by_usuario(id), "Error fetching productos by user")
            .await;
    }

    #[instrument(skip(self))]
    pub async fn toggle_status(&self, id: &ProductoId) -> Result<ApiResponse, ApiError> {
        let guard = self.local().begin();
        match self.client().toggle_status(id).await {
            Ok(response) => {
                match self.base.refresh().await {
                    Ok(()) => guard.succeed("Producto status toggled successfully!"),
                    Err(err) => {
                        let message = err.user_message("Error fetching productos");
                        warn!(error = %err, %message, "Refresh after toggle failed");
                        guard.fail(message);
                    }
                }
                Ok(response)
            }
            Err(err) => {
                let message = err.user_message("Error toggling producto status");
                warn!(error = %err, %message, "Toggle failed");
                guard.fail(message);
                Err(err)
            }
        }
    }

    /// Takes `quantity` units off the product's stock, never below zero.
    ///
    /// The product is re-read first so the decrement applies to the stock
    /// the server holds now. Returns the stock written back.
    #[instrument(skip(self))]
    pub async fn mark_as_sold(&self, id: &ProductoId, quantity: u32) -> Result<u32, ApiError> {
        let guard = self.local().begin();
        let result = async {
            let producto = self.client().get_by_id(id).await?;
            self.local().set_current(Some(producto.clone()));
            self.client().mark_as_sold(&producto, quantity).await
        }
        .await;

        match result {
            Ok((stock, _)) => {
                self.local().update(|s| {
                    if let Some(current) = s.current.as_mut().filter(|p| &p.id == id) {
                        current.stock = stock;
                    }
                    if let Some(item) = s.items.iter_mut().find(|p| &p.id == id) {
                        item.stock = stock;
                    }
                });
                info!(%id, stock, "Stock updated after sale");
                guard.succeed("Product marked as sold successfully!");
                Ok(stock)
            }
            Err(err) => {
                let message = err.user_message("Error marking product as sold");
                warn!(error = %err, %message, "Mark as sold failed");
                guard.fail(message);
                Err(err)
            }
        }
    }
}
