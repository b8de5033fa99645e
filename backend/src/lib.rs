//! Voting backend library: domain model, ports and adapters.
//!
//! Layout follows a hexagonal split: [`domain`] holds the voting rules and
//! ports, [`inbound`] the HTTP adapter, [`outbound`] the persistence and
//! eligibility adapters, and [`middleware`] request tracing.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
