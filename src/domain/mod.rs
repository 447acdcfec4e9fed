//! Domain layer - Core business logic and rules
//!
//! This layer contains:
//! - Aggregates: `Call`, `Staff`, `Manager`
//! - Value Objects: identifiers, statuses, ratings, workday policy
//! - Domain Events: Things that happened in the domain

pub mod call;
pub mod employee;
pub mod manager;
pub mod shared;
pub mod staff;

// Re-export commonly used types
pub use employee::{Employee, Person};
pub use shared::{DomainError, Result};
