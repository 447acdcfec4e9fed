//! Staff bounded context - availability and call handling

pub mod aggregate;
pub mod event;
pub mod value_object;

pub use aggregate::Staff;
pub use event::{StaffEvent, StaffEventKind};
pub use value_object::{AvailabilityStatus, CallRating, WorkdayPolicy};
