//! Outbound adapters implementing domain ports.
//!
//! - **api**: services and gateway talking to the VacMan backend REST API
//! - **cache**: in-process lookup cache shared by the HTTP lookup services
//! - **fixtures**: in-memory services seeded from bundled JSON, used when
//!   running without a backend
//!
//! Adapters translate between domain types and transport representations.
//! They contain no business rules beyond error mapping.

pub mod api;
pub mod cache;
pub mod fixtures;
