//! Helpdesk - a call-center domain model built with Rust
//!
//! Staff members move between `Out of Office`, `Free` and `On Call` while
//! support calls move from `Pending` to `In Progress` to `Successful`.
//! Managers keep the roster of staff reporting to them. The model is
//! synchronous and driven entirely by its caller.

pub mod application;
pub mod config;
pub mod domain;

// Re-export commonly used types
pub use application::CallCenter;
pub use domain::call::{Call, CallStatus};
pub use domain::employee::{Employee, Person};
pub use domain::manager::Manager;
pub use domain::shared::error::DomainError;
pub use domain::shared::result::Result;
pub use domain::shared::value_objects::{CallId, EmployeeId};
pub use domain::staff::{AvailabilityStatus, Staff, WorkdayPolicy};
