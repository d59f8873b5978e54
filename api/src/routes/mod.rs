//! API route definitions.
//!
//! This module organizes all HTTP routes for the Covidash API server.

mod error;
mod health;
mod overview;
mod regions;

pub use health::health_routes;
pub use overview::overview_routes;
pub use regions::region_routes;
