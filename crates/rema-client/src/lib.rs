//! # Rema Marketplace Client
//!
//! Typed client for the Rema marketplace backend: products, categories,
//! chats, invoices, ratings and user accounts.
//!
//! - **[model]**: records exchanged with the server, one typed id per resource.
//! - **[clients]**: one service client per resource, one method per endpoint.
//! - **[stores]**: per-view state composables (items, current, status).
//! - **[session]**: token persistence and the login / session-check / logout
//!   state machine.
//! - **[guard]**: auth and role checks before navigation.
//! - **[app]**: [`MarketplaceApp`](app::MarketplaceApp) wires it all over one
//!   shared HTTP client.
//!
//! See [`resource_framework::mock`] to test any of it without a server.

pub mod app;
pub mod clients;
pub mod config;
pub mod guard;
pub mod model;
pub mod session;
pub mod stores;
