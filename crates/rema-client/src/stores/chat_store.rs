//! # Chat Store
//!
//! Conversations between a buyer and a seller about one product. Every action
//! re-raises its failure except [`ChatStore::partner_name`], which is display
//! sugar and answers `""` instead.
//!
//! Deleting a chat removes it locally; the list is not re-read.

use crate::clients::{ChatClient, UsersClient};
use crate::model::{Chat, ChatId, Mensaje, ProductoId, UserId};
use resource_framework::{ApiEntity, ApiError, ApiResponse, ResourceState};
use std::future::Future;
use tracing::{debug, info, instrument, warn};

#[derive(Clone)]
pub struct ChatStore {
    client: ChatClient,
    users: UsersClient,
    state: ResourceState<Chat>,
}

impl ChatStore {
    pub fn new(client: ChatClient, users: UsersClient) -> Self {
        Self {
            client,
            users,
            state: ResourceState::new(),
        }
    }

    pub fn state(&self) -> &ResourceState<Chat> {
        &self.state
    }

    #[instrument(skip(self))]
    pub async fn fetch_by_id(&self, id: &ChatId) -> Result<Chat, ApiError> {
        self.state
            .load_current(self.client.get_by_id(id), "Error obteniendo chat por ID")
            .await
    }

    #[instrument(skip(self))]
    pub async fn fetch_by_product(&self, id: &ProductoId) -> Result<(), ApiError> {
        self.state
            .load_items(
                self.client.get_by_product(id),
                "Error obteniendo chats por ID de producto",
            )
            .await
    }

    #[instrument(skip(self))]
    pub async fn fetch_by_buyer(&self, id: &UserId) -> Result<(), ApiError> {
        self.state
            .load_items(
                self.client.get_by_buyer(id),
                "Error obteniendo chats por ID de comprador",
            )
            .await
    }

    #[instrument(skip(self))]
    pub async fn fetch_by_seller(&self, id: &UserId) -> Result<(), ApiError> {
        self.state
            .load_items(
                self.client.get_by_seller(id),
                "Error obteniendo chats por ID de vendedor",
            )
            .await
    }

    /// The conversation for this product between these two users, opened on
    /// the spot if none exists yet. Becomes `current`.
    #[instrument(skip(self))]
    pub async fn get_or_create(
        &self,
        producto: &ProductoId,
        comprador: &UserId,
        vendedor: &UserId,
    ) -> Result<Chat, ApiError> {
        self.state
            .load_current(
                self.client.get_or_create(producto, comprador, vendedor),
                "Error obteniendo/creando chat por participantes",
            )
            .await
    }

    /// Sends `text` as `emisor`; the updated chat becomes `current`.
    #[instrument(skip(self, text))]
    pub async fn add_message(
        &self,
        chat: &ChatId,
        emisor: &UserId,
        text: &str,
    ) -> Result<Chat, ApiError> {
        let mensaje = Mensaje::new(emisor.clone(), text);
        self.state
            .load_current(
                self.client.add_message(chat, &mensaje),
                "Error añadiendo mensaje al chat",
            )
            .await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &ChatId) -> Result<ApiResponse, ApiError> {
        let guard = self.state.begin();
        match self.client.delete(id).await {
            Ok(response) => {
                self.state.update(|s| {
                    s.items.retain(|chat| chat.id() != Some(id));
                    if s.current.as_ref().and_then(|c| c.id()) == Some(id) {
                        s.current = None;
                    }
                });
                info!(%id, "Chat removed");
                guard.succeed("Chat eliminado exitosamente");
                Ok(response)
            }
            Err(err) => {
                let message = err.user_message("Error eliminando chat");
                warn!(error = %err, %message, "Delete failed");
                guard.fail(message);
                Err(err)
            }
        }
    }

    /// Username of the other participant in `chat`, seen from `me`.
    ///
    /// Without `me` the viewer is taken to be the buyer. Any failure yields
    /// an empty string.
    #[instrument(skip(self))]
    pub async fn partner_name(&self, chat: &ChatId, me: Option<&UserId>) -> String {
        let lookup = async {
            let chat = self.fetch_by_id(chat).await?;
            let partner = chat.partner_of(me);
            self.username_of(partner).await
        };
        or_empty(lookup).await
    }

    async fn username_of(&self, id: &UserId) -> Result<String, ApiError> {
        if id.as_str().is_empty() {
            return Ok(String::new());
        }
        Ok(self.users.get_by_id(id).await?.username)
    }
}

async fn or_empty<F>(lookup: F) -> String
where
    F: Future<Output = Result<String, ApiError>>,
{
    match lookup.await {
        Ok(name) => name,
        Err(err) => {
            debug!(error = %err, "Partner name unavailable");
            String::new()
        }
    }
}
