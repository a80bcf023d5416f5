//! Domain layer - Pure business abstractions
//!
//! This layer contains NO framework dependencies beyond the SeaORM error
//! conversion. Only trait definitions, filter/input types and domain errors.

pub mod errors;
pub mod repositories;

pub use errors::DomainError;
pub use repositories::*;
