//! # Service Clients
//!
//! One client per resource, each a thin wrapper over a
//! [`ResourceClient`](resource_framework::ResourceClient). Every method maps to
//! exactly one REST endpoint (a few composites say so in their docs) and hands
//! the answer back as-is: no retries, no caching, failures propagate
//! unchanged as [`ApiError`](resource_framework::ApiError).
//!
//! Clients that follow the conventional endpoint family implement
//! [`CrudService`](resource_framework::CrudService) and inherit `get_all`,
//! `get_by_id`, `create`, `update` and `delete`.

pub mod categoria_client;
pub mod chat_client;
pub mod factura_client;
pub mod producto_client;
pub mod rating_client;
pub mod user_client;

pub use categoria_client::CategoriaClient;
pub use chat_client::ChatClient;
pub use factura_client::FacturaClient;
pub use producto_client::ProductoClient;
pub use rating_client::RatingClient;
pub use user_client::UsersClient;
