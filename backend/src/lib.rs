//! VacMan service layer: typed access to the VacMan backend API.
//!
//! Reference-data lookups, employee profiles and vacancy referral requests
//! are exposed through the ports in [`domain::ports`]. [`services`] builds
//! either HTTP-backed or fixture-backed implementations from
//! [`settings::ApiSettings`].

pub mod domain;
pub mod outbound;
pub mod services;
pub mod settings;
pub mod telemetry;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use services::{ApiServices, LookupServices};
