//! Roster domain events

use crate::domain::shared::events::{DomainEvent, EventMetadata};
use crate::domain::shared::value_objects::EmployeeId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RosterEventKind {
    StaffAdded { staff_id: EmployeeId },
    StaffRemoved { staff_id: EmployeeId },
}

impl RosterEventKind {
    pub fn event_type(&self) -> &'static str {
        match self {
            RosterEventKind::StaffAdded { .. } => "roster.staff_added",
            RosterEventKind::StaffRemoved { .. } => "roster.staff_removed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterEvent {
    pub metadata: EventMetadata,
    pub manager_id: EmployeeId,
    pub kind: RosterEventKind,
}

impl RosterEvent {
    pub fn new(manager_id: EmployeeId, kind: RosterEventKind, occurred_at: DateTime<Utc>) -> Self {
        Self {
            metadata: EventMetadata::new(kind.event_type(), occurred_at),
            manager_id,
            kind,
        }
    }
}

impl DomainEvent for RosterEvent {
    fn event_type(&self) -> &'static str {
        self.kind.event_type()
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        self.metadata.occurred_at
    }
}
