//! # Marketplace Model
//!
//! Plain records exchanged with the backend. Wire names are camelCase; ids
//! are opaque server-assigned strings wrapped in one newtype per resource so
//! a `UserId` cannot be passed where a `ProductoId` is expected.
//!
//! References between entities (a chat's product, buyer and seller) are just
//! ids. Nothing here checks that they point anywhere; the server is
//! authoritative.

/// Declares a transparent string id newtype.
///
/// Must stay above the `mod` declarations: submodules use it textually.
macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

pub mod categoria;
pub mod chat;
pub mod factura;
pub mod producto;
pub mod rating;
pub mod user;

pub use categoria::*;
pub use chat::*;
pub use factura::*;
pub use producto::*;
pub use rating::*;
pub use user::*;
