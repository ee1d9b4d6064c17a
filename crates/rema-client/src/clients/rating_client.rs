//! # Rating Client
//!
//! Seller reviews below `/ratings`.
use crate::model::{Rating, RatingForm, RatingId, RatingReply, UserId};
use resource_framework::{ApiEntity, ApiError, ApiRequest, ApiResponse, ResourceClient};
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct RatingClient {
    inner: ResourceClient<Rating>,
}

impl RatingClient {
    pub fn new(inner: ResourceClient<Rating>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn get_by_seller(&self, seller: &UserId) -> Result<Vec<Rating>, ApiError> {
        debug!("Sending request");
        let request = ApiRequest::get(format!("{}/seller/{seller}", Rating::BASE_PATH));
        self.inner.list_at(request).await
    }

    /// The rating `user` left for `seller`. 404 when there is none.
    #[instrument(skip(self))]
    pub async fn get_user_rating(&self, user: &UserId, seller: &UserId) -> Result<Rating, ApiError> {
        debug!("Sending request");
        let request = ApiRequest::get(format!("{}/user/{user}/seller/{seller}", Rating::BASE_PATH));
        self.inner.one_at(request).await
    }

    #[instrument(skip(self, form), fields(seller = %form.seller_id))]
    pub async fn create(&self, form: &RatingForm) -> Result<ApiResponse, ApiError> {
        debug!(rating = form.rating, "Sending request");
        self.inner.create(form).await
    }

    #[instrument(skip(self, form))]
    pub async fn update(&self, id: &RatingId, form: &RatingForm) -> Result<ApiResponse, ApiError> {
        debug!(rating = form.rating, "Sending request");
        self.inner.update(id, form).await
    }

    #[instrument(skip(self, reply), fields(rating = %reply.rating_id))]
    pub async fn add_reply(&self, reply: &RatingReply) -> Result<ApiResponse, ApiError> {
        debug!("Sending request");
        let request = ApiRequest::post(format!("{}/reply", Rating::BASE_PATH)).with_json(reply)?;
        self.inner.http().send(request).await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &RatingId) -> Result<ApiResponse, ApiError> {
        debug!("Sending request");
        self.inner.delete(id).await
    }
}
