//! Call domain events

use crate::domain::shared::events::{DomainEvent, EventMetadata};
use crate::domain::shared::value_objects::{CallId, EmployeeId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CallEventKind {
    /// A staff member picked the call up
    Accepted { staff_id: EmployeeId },
    /// The handling staff member closed the call
    Completed { staff_id: EmployeeId },
}

impl CallEventKind {
    pub fn event_type(&self) -> &'static str {
        match self {
            CallEventKind::Accepted { .. } => "call.accepted",
            CallEventKind::Completed { .. } => "call.completed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallEvent {
    pub metadata: EventMetadata,
    pub call_id: CallId,
    pub kind: CallEventKind,
}

impl CallEvent {
    pub fn new(call_id: CallId, kind: CallEventKind, occurred_at: DateTime<Utc>) -> Self {
        Self {
            metadata: EventMetadata::new(kind.event_type(), occurred_at),
            call_id,
            kind,
        }
    }
}

impl DomainEvent for CallEvent {
    fn event_type(&self) -> &'static str {
        self.kind.event_type()
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        self.metadata.occurred_at
    }
}
