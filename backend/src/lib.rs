//! Course marketplace backend library.
//!
//! Hexagonal layout: [`domain`] holds entities, ports and services;
//! [`inbound`] adapts HTTP requests onto driving ports; [`outbound`] provides
//! PostgreSQL, in-memory and filesystem adapters for the driven ports.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
