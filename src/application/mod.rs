//! Application layer - Use cases and application services
//!
//! This layer orchestrates domain objects to fulfill use cases.
//! It's responsible for:
//! - Owning the aggregates on behalf of the driver
//! - Coordinating multiple aggregates
//! - Collecting domain events

pub mod call_center;

pub use call_center::{CallCenter, CenterEvent};
