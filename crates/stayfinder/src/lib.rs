//! Stayfinder marketplace core.
//!
//! Hosts publish listings, guests book stays through the booking service, and
//! completed stays accumulate reviews behind the review admission checks. The
//! HTTP surface, configuration, and telemetry wiring live alongside the domain
//! so the `services/api` binary only has to supply storage adapters.

pub mod config;
pub mod error;
pub mod marketplace;
pub mod telemetry;
