//! Domain layer - Pure business abstractions
//!
//! This layer contains NO framework dependencies (no SeaORM queries, no Axum).
//! Only record types, the repository contract and domain error types.

pub mod coerce;
pub mod errors;
pub mod repositories;

pub use errors::DomainError;
pub use repositories::*;
