//! Infrastructure layer - Framework implementations
//!
//! This layer contains:
//! - Repository implementations (repositories)

pub mod repositories;

pub use repositories::*;
