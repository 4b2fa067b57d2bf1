//! API routes
//!
//! # Structure
//!
//! - [`health`] - liveness probe
//! - [`orders`] - order lifecycle endpoints
//! - [`quotes`] - custom build quote requests

pub mod health;
pub mod orders;
pub mod quotes;
