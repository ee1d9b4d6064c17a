//! # ApiEntity Trait
//!
//! The contract every server-managed resource (product, category, chat, ...)
//! implements so the generic [`ResourceClient`](crate::ResourceClient) and
//! [`ResourceStore`](crate::ResourceStore) can work with it.
//!
//! Associated types pin each resource to its own id and payload types: a
//! `Producto` update takes a `ProductoModify`, and the compiler rejects a
//! `CategoriaModify` in its place.
//!
//! # Routes
//!
//! Most resources follow the same endpoint family below [`ApiEntity::BASE_PATH`]:
//!
//! | Operation | Request                        |
//! |-----------|--------------------------------|
//! | list      | `GET    {base}/getAll`         |
//! | by id     | `GET    {base}/getById/{id}`   |
//! | create    | `POST   {base}/create`         |
//! | update    | `POST   {base}/update/{id}`    |
//! | delete    | `DELETE {base}/delete/{id}`    |
//!
//! Resources whose endpoints differ override the matching provided method.

use crate::transport::ApiRequest;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::{Debug, Display};

pub trait ApiEntity: Clone + Debug + DeserializeOwned + Send + Sync + 'static {
    /// Server-assigned identifier.
    type Id: Clone + PartialEq + Display + Debug + Send + Sync;

    /// Payload sent to the create endpoint.
    type Create: Serialize + Debug + Send + Sync;

    /// Payload sent to the update endpoint.
    type Update: Serialize + Debug + Send + Sync;

    /// Path prefix of the resource, e.g. `/vendedor/producto`.
    const BASE_PATH: &'static str;

    /// Singular name used in status messages, e.g. `producto`.
    const NAME: &'static str;

    /// Plural name used in status messages, e.g. `productos`.
    const PLURAL: &'static str;

    /// The identifier, if the server has assigned one yet.
    fn id(&self) -> Option<&Self::Id>;

    fn list_request() -> ApiRequest {
        ApiRequest::get(format!("{}/getAll", Self::BASE_PATH))
    }

    fn get_request(id: &Self::Id) -> ApiRequest {
        ApiRequest::get(format!("{}/getById/{}", Self::BASE_PATH, id))
    }

    fn create_request() -> ApiRequest {
        ApiRequest::post(format!("{}/create", Self::BASE_PATH))
    }

    fn update_request(id: &Self::Id) -> ApiRequest {
        ApiRequest::post(format!("{}/update/{}", Self::BASE_PATH, id))
    }

    fn delete_request(id: &Self::Id) -> ApiRequest {
        ApiRequest::delete(format!("{}/delete/{}", Self::BASE_PATH, id))
    }
}
