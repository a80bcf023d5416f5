//! Services Layer
//!
//! Business logic on top of the repositories: transactional order flow,
//! review validation, customer accounts, catalog aggregates.

pub mod catalog_service;
pub mod customer_service;
pub mod order_service;
pub mod review_service;

// Re-export for convenience
pub use order_service::{OrderLine, place_order};
pub use review_service::{ReviewInput, add_review};
