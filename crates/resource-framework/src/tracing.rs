//! # Tracing Setup
//!
//! [`setup_tracing`] installs the global subscriber used by binaries built on
//! this framework. Log levels come from `RUST_LOG`; without it, `info`.
//!
//! ```bash
//! # Session transitions and store failures
//! RUST_LOG=info cargo run
//!
//! # Every outgoing request with method, path and status
//! RUST_LOG=debug cargo run
//!
//! # Only the HTTP pipeline
//! RUST_LOG=resource_framework=debug cargo run
//! ```
//!
//! With `debug`, each request shows up as a span carrying its method and path:
//!
//! ```text
//! DEBUG send{method=GET path=/vendedor/producto/getAll}: Sending request authenticated=true
//! DEBUG send{method=GET path=/vendedor/producto/getAll}: Request ok status=200
//! ```
//!
//! Bearer tokens are never recorded as fields.

use tracing_subscriber::EnvFilter;

pub fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
