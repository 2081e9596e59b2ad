//! Exercise tracker library modules.
//!
//! Layout follows a hexagonal split: [`domain`] holds entities, ports, and
//! the tracker service; [`inbound`] adapts HTTP onto the driving ports;
//! [`outbound`] implements the user store.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
