use super::UserId;
use resource_framework::{ApiEntity, ApiRequest};
use serde::{Deserialize, Serialize};

string_id!(RatingId);

/// A buyer's review of a seller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rating {
    pub id: RatingId,
    pub seller_id: UserId,
    pub user_id: UserId,
    #[serde(default)]
    pub username: String,
    /// 1 to 5 stars.
    pub rating: u8,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub reply: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Create / update payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingForm {
    pub seller_id: UserId,
    pub rating: u8,
    pub comment: String,
}

/// A seller's answer to a rating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingReply {
    pub rating_id: RatingId,
    pub reply: String,
}

// Ratings are addressed REST-style below /ratings and only listed per seller.
impl ApiEntity for Rating {
    type Id = RatingId;
    type Create = RatingForm;
    type Update = RatingForm;

    const BASE_PATH: &'static str = "/ratings";
    const NAME: &'static str = "rating";
    const PLURAL: &'static str = "ratings";

    fn id(&self) -> Option<&RatingId> {
        Some(&self.id)
    }

    fn get_request(id: &RatingId) -> ApiRequest {
        ApiRequest::get(format!("{}/{}", Self::BASE_PATH, id))
    }

    fn update_request(id: &RatingId) -> ApiRequest {
        ApiRequest::put(format!("{}/{}", Self::BASE_PATH, id))
    }

    fn delete_request(id: &RatingId) -> ApiRequest {
        ApiRequest::delete(format!("{}/{}", Self::BASE_PATH, id))
    }
}
