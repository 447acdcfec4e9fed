//! Call bounded context - manages the lifecycle of support calls

pub mod aggregate;
pub mod event;
pub mod value_object;

pub use aggregate::Call;
pub use event::{CallEvent, CallEventKind};
pub use value_object::CallStatus;
