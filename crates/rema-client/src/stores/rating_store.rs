//! # Rating Store
//!
//! Ratings are always shown per seller, so `items` holds one seller's
//! ratings and `current` the viewer's own rating of that seller, if any.
//! Create, update and delete re-read the seller's list afterwards. Every
//! action re-raises its failure, except that a missing rating of the viewer
//! is an answer, not an error.

use crate::clients::RatingClient;
use crate::model::{Rating, RatingForm, RatingId, RatingReply, UserId};
use resource_framework::{ActionGuard, ApiError, ApiResponse, ResourceState};
use tracing::{debug, instrument, warn};

const FETCH_ERROR: &str = "Error al cargar las valoraciones";

#[derive(Clone)]
pub struct RatingStore {
    client: RatingClient,
    state: ResourceState<Rating>,
}

impl RatingStore {
    pub fn new(client: RatingClient) -> Self {
        Self {
            client,
            state: ResourceState::new(),
        }
    }

    pub fn state(&self) -> &ResourceState<Rating> {
        &self.state
    }

    #[instrument(skip(self))]
    pub async fn fetch_by_seller(&self, seller: &UserId) -> Result<(), ApiError> {
        self.state
            .load_items(self.client.get_by_seller(seller), FETCH_ERROR)
            .await
    }

    #[instrument(skip(self, form), fields(seller = %form.seller_id))]
    pub async fn create(&self, form: &RatingForm) -> Result<ApiResponse, ApiError> {
        let guard = self.state.begin();
        let result = self.client.create(form).await;
        self.after_mutation(
            guard,
            result,
            &form.seller_id,
            "Valoración enviada correctamente",
            "Error al crear la valoración",
        )
        .await
    }

    #[instrument(skip(self, form), fields(seller = %form.seller_id))]
    pub async fn update(&self, id: &RatingId, form: &RatingForm) -> Result<ApiResponse, ApiError> {
        let guard = self.state.begin();
        let result = self.client.update(id, form).await;
        self.after_mutation(
            guard,
            result,
            &form.seller_id,
            "Valoración actualizada correctamente",
            "Error al actualizar la valoración",
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &RatingId, seller: &UserId) -> Result<ApiResponse, ApiError> {
        let guard = self.state.begin();
        let result = self.client.delete(id).await;
        self.after_mutation(
            guard,
            result,
            seller,
            "Valoración eliminada correctamente",
            "Error al eliminar la valoración",
        )
        .await
    }

    /// The rating `user` left for `seller`, which becomes `current`.
    ///
    /// `Ok(None)` when there is none; that clears `current` and records no
    /// error.
    #[instrument(skip(self))]
    pub async fn fetch_user_rating(
        &self,
        user: &UserId,
        seller: &UserId,
    ) -> Result<Option<Rating>, ApiError> {
        let guard = self.state.begin();
        match self.client.get_user_rating(user, seller).await {
            Ok(rating) => {
                self.state.set_current(Some(rating.clone()));
                guard.finish();
                Ok(Some(rating))
            }
            Err(err) if err.is_not_found() => {
                debug!("No rating yet");
                self.state.set_current(None);
                guard.finish();
                Ok(None)
            }
            Err(err) => {
                let message = err.user_message("Error al cargar la valoración");
                warn!(error = %err, %message, "Request failed");
                guard.fail(message);
                Err(err)
            }
        }
    }

    /// Adds or replaces the seller's answer. The held copy of the rating is
    /// patched in place.
    #[instrument(skip(self, reply), fields(rating = %reply.rating_id))]
    pub async fn add_reply(&self, reply: &RatingReply) -> Result<ApiResponse, ApiError> {
        let guard = self.state.begin();
        match self.client.add_reply(reply).await {
            Ok(response) => {
                self.state.update(|s| {
                    let held = s.items.iter_mut().chain(s.current.as_mut());
                    for rating in held.filter(|r| r.id == reply.rating_id) {
                        rating.reply = Some(reply.reply.clone());
                    }
                });
                guard.succeed("Respuesta añadida correctamente");
                Ok(response)
            }
            Err(err) => {
                let message = err.user_message("Error al añadir la respuesta");
                warn!(error = %err, %message, "Reply failed");
                guard.fail(message);
                Err(err)
            }
        }
    }

    async fn after_mutation(
        &self,
        guard: ActionGuard<'_, Rating>,
        result: Result<ApiResponse, ApiError>,
        seller: &UserId,
        success: &str,
        fallback: &str,
    ) -> Result<ApiResponse, ApiError> {
        match result {
            Ok(response) => {
                match self.client.get_by_seller(seller).await {
                    Ok(ratings) => {
                        self.state.set_items(ratings);
                        guard.succeed(success);
                    }
                    Err(err) => {
                        let message = err.user_message(FETCH_ERROR);
                        warn!(error = %err, %message, "Refresh after mutation failed");
                        guard.fail(message);
                    }
                }
                Ok(response)
            }
            Err(err) => {
                let message = err.user_message(fallback);
                warn!(error = %err, %message, "Mutation failed");
                guard.fail(message);
                Err(err)
            }
        }
    }
}
