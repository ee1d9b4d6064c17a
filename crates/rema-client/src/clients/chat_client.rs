//! # Chat Client
//!
//! Buyer/seller conversations below `/api/chat`.
use crate::model::{Chat, ChatId, Mensaje, ProductoId, UserId};
use chrono::Utc;
use resource_framework::{ApiEntity, ApiError, ApiRequest, ApiResponse, ResourceClient};
use tracing::{debug, info, instrument};

#[derive(Clone)]
pub struct ChatClient {
    inner: ResourceClient<Chat>,
}

impl ChatClient {
    pub fn new(inner: ResourceClient<Chat>) -> Self {
        Self { inner }
    }

    fn path(suffix: &str) -> String {
        format!("{}/{suffix}", Chat::BASE_PATH)
    }

    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: &ChatId) -> Result<Chat, ApiError> {
        debug!("Sending request");
        self.inner.get_by_id(id).await
    }

    #[instrument(skip(self))]
    pub async fn get_by_product(&self, id: &ProductoId) -> Result<Vec<Chat>, ApiError> {
        debug!("Sending request");
        self.inner
            .list_at(ApiRequest::get(Self::path(&format!("getByProductId/{id}"))))
            .await
    }

    #[instrument(skip(self))]
    pub async fn get_by_buyer(&self, id: &UserId) -> Result<Vec<Chat>, ApiError> {
        debug!("Sending request");
        self.inner
            .list_at(ApiRequest::get(Self::path(&format!("getByBuyerId/{id}"))))
            .await
    }

    #[instrument(skip(self))]
    pub async fn get_by_seller(&self, id: &UserId) -> Result<Vec<Chat>, ApiError> {
        debug!("Sending request");
        self.inner
            .list_at(ApiRequest::get(Self::path(&format!("getBySellerId/{id}"))))
            .await
    }

    #[instrument(skip(self))]
    pub async fn get_by_participants(
        &self,
        producto: &ProductoId,
        comprador: &UserId,
        vendedor: &UserId,
    ) -> Result<Chat, ApiError> {
        debug!("Sending request");
        let path = Self::path(&format!("getByParticipants/{producto}/{comprador}/{vendedor}"));
        self.inner.one_at(ApiRequest::get(path)).await
    }

    #[instrument(skip(self, chat))]
    pub async fn create(&self, chat: &Chat) -> Result<Chat, ApiError> {
        debug!(?chat, "Sending request");
        let request = Chat::create_request().with_json(chat)?;
        self.inner.one_at(request).await
    }

    /// Looks the conversation up by its participants and opens a new one when
    /// the lookup fails for any reason.
    #[instrument(skip(self))]
    pub async fn get_or_create(
        &self,
        producto: &ProductoId,
        comprador: &UserId,
        vendedor: &UserId,
    ) -> Result<Chat, ApiError> {
        match self.get_by_participants(producto, comprador, vendedor).await {
            Ok(chat) => Ok(chat),
            Err(err) => {
                info!(error = %err, "No chat found, opening a new one");
                let chat = Chat::open(
                    producto.clone(),
                    comprador.clone(),
                    vendedor.clone(),
                    Utc::now(),
                );
                self.create(&chat).await
            }
        }
    }

    /// Appends `mensaje` and returns the updated conversation.
    #[instrument(skip(self, mensaje))]
    pub async fn add_message(&self, id: &ChatId, mensaje: &Mensaje) -> Result<Chat, ApiError> {
        debug!(?mensaje, "Sending request");
        let request = ApiRequest::post(Self::path(&format!("addMessage/{id}"))).with_json(mensaje)?;
        self.inner.one_at(request).await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &ChatId) -> Result<ApiResponse, ApiError> {
        debug!("Sending request");
        self.inner.delete(id).await
    }
}
