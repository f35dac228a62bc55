//! Backend library modules.
//!
//! The crate follows a hexagonal layout: `domain` owns the entities and the
//! ports, `inbound` adapts HTTP onto those ports, and `outbound` implements
//! them against PostgreSQL, Redis, or process memory.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
