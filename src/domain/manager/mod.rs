//! Manager bounded context - roster management

pub mod aggregate;
pub mod event;

pub use aggregate::Manager;
pub use event::{RosterEvent, RosterEventKind};
