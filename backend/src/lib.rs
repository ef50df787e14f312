//! Chirp: a small social feed service.
//!
//! Users publish short posts, follow one another and read a feed assembled
//! from the people they follow. The crate is laid out hexagonally:
//! [`domain`] holds the entities, ports and services, [`inbound`] the Actix
//! HTTP adapter, [`outbound`] the in-memory and PostgreSQL adapters, and
//! [`server`] wires them together.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
