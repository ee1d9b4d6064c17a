//! # Resource Stores
//!
//! One state composable per resource. Each owns a fresh
//! [`ResourceState`](resource_framework::ResourceState) and drives it through
//! its service client.
//!
//! Producto and Categoria follow the conventional endpoint family and build
//! on [`ResourceStore`](resource_framework::ResourceStore), which they expose
//! through `Deref`. The others have ad-hoc endpoints and drive their state
//! directly.
//!
//! Whether a failed action re-raises or only records its message differs per
//! resource and is listed in each store's docs.

pub mod categoria_store;
pub mod chat_store;
pub mod factura_store;
pub mod producto_store;
pub mod rating_store;
pub mod users_store;

pub use categoria_store::CategoriaStore;
pub use chat_store::ChatStore;
pub use factura_store::FacturaStore;
pub use producto_store::ProductoStore;
pub use rating_store::RatingStore;
pub use users_store::{ExistenceCheck, ExistenceReason, UsersStore};
