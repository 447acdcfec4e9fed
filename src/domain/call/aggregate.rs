//! Call aggregate root

use crate::domain::call::event::{CallEvent, CallEventKind};
use crate::domain::call::value_object::CallStatus;
use crate::domain::shared::error::DomainError;
use crate::domain::shared::result::Result;
use crate::domain::shared::value_objects::{CallId, EmployeeId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Call aggregate root
///
/// A call never changes status on its own: staff operations drive it through
/// [`Call::begin`] and [`Call::complete`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Call {
    id: CallId,
    status: CallStatus,
    /// Staff member currently or last handling the call
    handled_by: Option<EmployeeId>,
    accepted_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
    #[serde(skip)]
    events: Vec<CallEvent>,
}

impl Call {
    /// Create a new call in `Pending`
    pub fn new(id: CallId) -> Self {
        Self::with_status(id, CallStatus::Pending)
    }

    /// Rebuild a call that is already somewhere in its lifecycle
    pub fn with_status(id: CallId, status: CallStatus) -> Self {
        Self {
            id,
            status,
            handled_by: None,
            accepted_at: None,
            completed_at: None,
            events: Vec::new(),
        }
    }

    pub(crate) fn begin(&mut self, staff_id: EmployeeId, at: DateTime<Utc>) -> Result<()> {
        self.transition_to(CallStatus::InProgress)?;
        self.handled_by = Some(staff_id);
        self.accepted_at = Some(at);
        self.events
            .push(CallEvent::new(self.id, CallEventKind::Accepted { staff_id }, at));
        Ok(())
    }

    pub(crate) fn complete(&mut self, staff_id: EmployeeId, at: DateTime<Utc>) -> Result<()> {
        if self.status == CallStatus::InProgress && self.handled_by != Some(staff_id) {
            return Err(DomainError::InvalidOperation(format!(
                "Call {} is not being handled by staff {}",
                self.id, staff_id
            )));
        }

        self.transition_to(CallStatus::Successful)?;
        self.completed_at = Some(at);
        self.events
            .push(CallEvent::new(self.id, CallEventKind::Completed { staff_id }, at));
        Ok(())
    }

    fn transition_to(&mut self, new_status: CallStatus) -> Result<()> {
        if !self.status.can_transition_to(new_status) {
            return Err(DomainError::InvalidStateTransition(format!(
                "Call {} cannot move from {} to {}",
                self.id, self.status, new_status
            )));
        }

        self.status = new_status;
        Ok(())
    }

    /// Take all pending events
    pub fn take_events(&mut self) -> Vec<CallEvent> {
        std::mem::take(&mut self.events)
    }

    // Getters
    pub fn id(&self) -> CallId {
        self.id
    }

    pub fn status(&self) -> CallStatus {
        self.status
    }

    pub fn handled_by(&self) -> Option<EmployeeId> {
        self.handled_by
    }

    pub fn accepted_at(&self) -> Option<&DateTime<Utc>> {
        self.accepted_at.as_ref()
    }

    pub fn completed_at(&self) -> Option<&DateTime<Utc>> {
        self.completed_at.as_ref()
    }

    pub fn duration(&self) -> Option<chrono::Duration> {
        self.accepted_at
            .and_then(|accepted| self.completed_at.map(|completed| completed - accepted))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_new_call_is_pending() {
        let call = Call::new(CallId::new(2));
        assert_eq!(call.status(), CallStatus::Pending);
        assert_eq!(call.handled_by(), None);
    }

    #[test]
    fn test_call_lifecycle() {
        let mut call = Call::new(CallId::new(2));
        let staff = EmployeeId::new(4);
        let start = Utc::now();

        call.begin(staff, start).unwrap();
        assert_eq!(call.status(), CallStatus::InProgress);
        assert_eq!(call.handled_by(), Some(staff));

        call.complete(staff, start + Duration::seconds(90)).unwrap();
        assert_eq!(call.status(), CallStatus::Successful);
        assert_eq!(call.duration(), Some(Duration::seconds(90)));

        let events = call.take_events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].kind, CallEventKind::Accepted { staff_id: staff });
        assert!(call.take_events().is_empty());
    }

    #[test]
    fn test_cannot_complete_pending_call() {
        let mut call = Call::new(CallId::new(2));
        let err = call.complete(EmployeeId::new(4), Utc::now()).unwrap_err();
        assert!(err.is_state_transition());
        assert_eq!(call.status(), CallStatus::Pending);
    }

    #[test]
    fn test_cannot_transition_from_successful() {
        let mut call = Call::with_status(CallId::new(9), CallStatus::Successful);
        assert!(call.begin(EmployeeId::new(4), Utc::now()).is_err());
        assert!(call.complete(EmployeeId::new(4), Utc::now()).is_err());
        assert_eq!(call.status(), CallStatus::Successful);
    }

    #[test]
    fn test_only_handler_can_complete() {
        let mut call = Call::new(CallId::new(2));
        call.begin(EmployeeId::new(4), Utc::now()).unwrap();

        let err = call.complete(EmployeeId::new(5), Utc::now()).unwrap_err();
        assert!(matches!(err, DomainError::InvalidOperation(_)));
        assert_eq!(call.status(), CallStatus::InProgress);
    }

    #[test]
    fn test_unhandled_in_progress_call_cannot_be_completed() {
        let mut call = Call::with_status(CallId::new(2), CallStatus::InProgress);

        let err = call.complete(EmployeeId::new(4), Utc::now()).unwrap_err();
        assert!(matches!(err, DomainError::InvalidOperation(_)));
        assert_eq!(call.status(), CallStatus::InProgress);
        assert_eq!(call.handled_by(), None);
    }
}
