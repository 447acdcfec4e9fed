//! Staff domain events

use crate::domain::shared::events::{DomainEvent, EventMetadata};
use crate::domain::shared::value_objects::{CallId, EmployeeId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StaffEventKind {
    WorkdayStarted,
    /// `worked` is the credited length of the session that just closed
    WorkdayEnded { worked: Duration },
    CallAccepted { call_id: CallId },
    CallEnded { call_id: CallId, rating: f64 },
}

impl StaffEventKind {
    pub fn event_type(&self) -> &'static str {
        match self {
            StaffEventKind::WorkdayStarted => "staff.workday_started",
            StaffEventKind::WorkdayEnded { .. } => "staff.workday_ended",
            StaffEventKind::CallAccepted { .. } => "staff.call_accepted",
            StaffEventKind::CallEnded { .. } => "staff.call_ended",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffEvent {
    pub metadata: EventMetadata,
    pub staff_id: EmployeeId,
    pub kind: StaffEventKind,
}

impl StaffEvent {
    pub fn new(staff_id: EmployeeId, kind: StaffEventKind, occurred_at: DateTime<Utc>) -> Self {
        Self {
            metadata: EventMetadata::new(kind.event_type(), occurred_at),
            staff_id,
            kind,
        }
    }
}

impl DomainEvent for StaffEvent {
    fn event_type(&self) -> &'static str {
        self.kind.event_type()
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        self.metadata.occurred_at
    }
}
