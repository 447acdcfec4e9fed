//! Call center application service
//!
//! Owns managers, staff and calls by id and forwards driver requests to the
//! domain operations. It answers "who is free" but never picks a staff
//! member for a call; that stays with the driver.

use crate::config::Config;
use crate::domain::call::{Call, CallEvent, CallStatus};
use crate::domain::employee::Person;
use crate::domain::manager::{Manager, RosterEvent};
use crate::domain::shared::clock::{Clock, SharedClock};
use crate::domain::shared::error::DomainError;
use crate::domain::shared::events::DomainEvent;
use crate::domain::shared::result::Result;
use crate::domain::shared::value_objects::{CallId, EmployeeId};
use crate::domain::staff::{Staff, StaffEvent, WorkdayPolicy};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Any event raised by an aggregate owned by the [`CallCenter`]
#[derive(Debug, Clone, PartialEq)]
pub enum CenterEvent {
    Call(CallEvent),
    Staff(StaffEvent),
    Roster(RosterEvent),
}

impl DomainEvent for CenterEvent {
    fn event_type(&self) -> &'static str {
        match self {
            CenterEvent::Call(e) => e.event_type(),
            CenterEvent::Staff(e) => e.event_type(),
            CenterEvent::Roster(e) => e.event_type(),
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            CenterEvent::Call(e) => e.occurred_at(),
            CenterEvent::Staff(e) => e.occurred_at(),
            CenterEvent::Roster(e) => e.occurred_at(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CallCenter {
    managers: HashMap<EmployeeId, Manager>,
    staff: HashMap<EmployeeId, Staff>,
    calls: HashMap<CallId, Call>,
    policy: WorkdayPolicy,
    clock: SharedClock,
    /// Events of aggregates that have already left the center
    retired_events: Vec<CenterEvent>,
}

impl CallCenter {
    pub fn new(policy: WorkdayPolicy) -> Self {
        Self {
            policy,
            ..Default::default()
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(config.workday_policy()?))
    }

    /// Time source handed to every manager and staff member hired afterwards
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = SharedClock::new(clock);
        self
    }

    pub fn hire_manager(
        &mut self,
        id: EmployeeId,
        first_name: &str,
        last_name: &str,
    ) -> Result<&Manager> {
        self.ensure_unused(id)?;
        let manager = Manager::new(id, first_name, last_name, Vec::new())
            .with_shared_clock(self.clock.clone());
        info!("Hired manager {} ({})", id, manager.full_name());
        Ok(&*self.managers.entry(id).or_insert(manager))
    }

    /// Hire a staff member and put them on their manager's roster
    ///
    /// An unknown manager id is accepted: the reference is weak.
    pub fn hire_staff(
        &mut self,
        id: EmployeeId,
        first_name: &str,
        last_name: &str,
        manager_id: EmployeeId,
    ) -> Result<&Staff> {
        self.ensure_unused(id)?;

        match self.managers.get_mut(&manager_id) {
            Some(manager) => {
                manager.add_staff(id, first_name, last_name, manager_id);
            }
            None => warn!("Staff {} reports to unknown manager {}", id, manager_id),
        }

        let staff = Staff::new(id, first_name, last_name, manager_id)
            .with_policy(self.policy)
            .with_shared_clock(self.clock.clone());
        info!("Hired staff {} ({})", id, staff.full_name());
        Ok(&*self.staff.entry(id).or_insert(staff))
    }

    /// Remove a staff member and their roster entry
    ///
    /// Events the staff member raised so far stay with the center and are
    /// returned by the next [`CallCenter::take_events`].
    pub fn dismiss_staff(&mut self, id: EmployeeId) -> Result<Staff> {
        let (manager_id, current_call) = {
            let staff = self.staff_ref(id)?;
            (staff.manager_id(), staff.current_call())
        };
        if let Some(call_id) = current_call {
            return Err(DomainError::InvalidStateTransition(format!(
                "Staff {} is handling call {} and cannot be dismissed",
                id, call_id
            )));
        }

        if let Some(manager) = self.managers.get_mut(&manager_id) {
            manager.remove_staff(id);
        }

        let mut staff = self
            .staff
            .remove(&id)
            .ok_or_else(|| DomainError::NotFound(format!("Staff {}", id)))?;
        self.retired_events
            .extend(staff.take_events().into_iter().map(CenterEvent::Staff));

        info!("Dismissed staff {}", id);
        Ok(staff)
    }

    /// Register a new pending call
    pub fn open_call(&mut self, id: CallId) -> Result<&Call> {
        if self.calls.contains_key(&id) {
            return Err(DomainError::AlreadyExists(format!("Call {}", id)));
        }
        debug!("Opened call {}", id);
        Ok(&*self.calls.entry(id).or_insert_with(|| Call::new(id)))
    }

    pub fn start_workday(&mut self, staff_id: EmployeeId) -> Result<()> {
        self.staff_mut(staff_id)?.start_workday()
    }

    pub fn end_workday(&mut self, staff_id: EmployeeId) -> Result<()> {
        self.staff_mut(staff_id)?.end_workday()
    }

    pub fn accept_call(&mut self, staff_id: EmployeeId, call_id: CallId) -> Result<()> {
        let staff = self
            .staff
            .get_mut(&staff_id)
            .ok_or_else(|| DomainError::NotFound(format!("Staff {}", staff_id)))?;
        let call = self
            .calls
            .get_mut(&call_id)
            .ok_or_else(|| DomainError::NotFound(format!("Call {}", call_id)))?;
        staff.accept_call(call)
    }

    pub fn end_call(&mut self, staff_id: EmployeeId, call_id: CallId, rating: f64) -> Result<()> {
        let staff = self
            .staff
            .get_mut(&staff_id)
            .ok_or_else(|| DomainError::NotFound(format!("Staff {}", staff_id)))?;
        let call = self
            .calls
            .get_mut(&call_id)
            .ok_or_else(|| DomainError::NotFound(format!("Call {}", call_id)))?;
        staff.end_call(call, rating)
    }

    /// Ids of staff currently able to take a call, ascending
    pub fn free_staff(&self) -> Vec<EmployeeId> {
        let mut free: Vec<EmployeeId> = self
            .staff
            .values()
            .filter(|s| s.is_available())
            .map(|s| s.id())
            .collect();
        free.sort();
        free
    }

    /// Ids of calls still waiting for a staff member, ascending
    pub fn pending_calls(&self) -> Vec<CallId> {
        let mut pending: Vec<CallId> = self
            .calls
            .values()
            .filter(|c| c.status() == CallStatus::Pending)
            .map(|c| c.id())
            .collect();
        pending.sort();
        pending
    }

    pub fn manager(&self, id: EmployeeId) -> Option<&Manager> {
        self.managers.get(&id)
    }

    pub fn staff(&self, id: EmployeeId) -> Option<&Staff> {
        self.staff.get(&id)
    }

    pub fn call(&self, id: CallId) -> Option<&Call> {
        self.calls.get(&id)
    }

    /// Drain the events of every aggregate, oldest first
    pub fn take_events(&mut self) -> Vec<CenterEvent> {
        let mut events: Vec<CenterEvent> = std::mem::take(&mut self.retired_events);
        for manager in self.managers.values_mut() {
            events.extend(manager.take_events().into_iter().map(CenterEvent::Roster));
        }
        for staff in self.staff.values_mut() {
            events.extend(staff.take_events().into_iter().map(CenterEvent::Staff));
        }
        for call in self.calls.values_mut() {
            events.extend(call.take_events().into_iter().map(CenterEvent::Call));
        }
        events.sort_by_key(|e| e.occurred_at());

        for event in &events {
            debug!("Domain event {} at {}", event.event_type(), event.occurred_at());
        }
        events
    }

    fn ensure_unused(&self, id: EmployeeId) -> Result<()> {
        if self.managers.contains_key(&id) || self.staff.contains_key(&id) {
            return Err(DomainError::AlreadyExists(format!("Employee {}", id)));
        }
        Ok(())
    }

    fn staff_ref(&self, id: EmployeeId) -> Result<&Staff> {
        self.staff
            .get(&id)
            .ok_or_else(|| DomainError::NotFound(format!("Staff {}", id)))
    }

    fn staff_mut(&mut self, id: EmployeeId) -> Result<&mut Staff> {
        self.staff
            .get_mut(&id)
            .ok_or_else(|| DomainError::NotFound(format!("Staff {}", id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::shared::clock::MockClock;
    use crate::domain::staff::AvailabilityStatus;
    use chrono::TimeZone;
    use std::time::Duration;

    fn staffed_center() -> CallCenter {
        let mut center = CallCenter::new(WorkdayPolicy::default());
        center.hire_manager(EmployeeId::new(3), "Grace", "Hopper").unwrap();
        center
            .hire_staff(EmployeeId::new(4), "Ada", "Lovelace", EmployeeId::new(3))
            .unwrap();
        center
            .hire_staff(EmployeeId::new(5), "Alan", "Turing", EmployeeId::new(3))
            .unwrap();
        center
    }

    #[test]
    fn test_hire_staff_updates_roster() {
        let center = staffed_center();
        let manager = center.manager(EmployeeId::new(3)).unwrap();
        assert_eq!(manager.staff_list(), &[EmployeeId::new(4), EmployeeId::new(5)]);
        assert_eq!(
            center.staff(EmployeeId::new(4)).unwrap().status(),
            AvailabilityStatus::Free
        );
    }

    #[test]
    fn test_hire_staff_with_unknown_manager() {
        let mut center = CallCenter::default();
        let staff = center
            .hire_staff(EmployeeId::new(4), "Ada", "Lovelace", EmployeeId::new(99))
            .unwrap();
        assert_eq!(staff.manager_id(), EmployeeId::new(99));
    }

    #[test]
    fn test_employee_ids_are_unique() {
        let mut center = staffed_center();
        let err = center.hire_manager(EmployeeId::new(4), "x", "y").unwrap_err();
        assert!(matches!(err, DomainError::AlreadyExists(_)));
        let err = center
            .hire_staff(EmployeeId::new(3), "x", "y", EmployeeId::new(3))
            .unwrap_err();
        assert!(matches!(err, DomainError::AlreadyExists(_)));
        assert_eq!(center.manager(EmployeeId::new(3)).unwrap().roster_size(), 2);
    }

    #[test]
    fn test_open_call_rejects_duplicates() {
        let mut center = CallCenter::default();
        assert_eq!(center.open_call(CallId::new(2)).unwrap().status(), CallStatus::Pending);
        assert!(matches!(
            center.open_call(CallId::new(2)),
            Err(DomainError::AlreadyExists(_))
        ));
    }

    #[test]
    fn test_unknown_ids_are_not_found() {
        let mut center = staffed_center();
        center.open_call(CallId::new(1)).unwrap();

        assert!(matches!(
            center.start_workday(EmployeeId::new(42)),
            Err(DomainError::NotFound(_))
        ));
        assert!(matches!(
            center.accept_call(EmployeeId::new(4), CallId::new(42)),
            Err(DomainError::NotFound(_))
        ));
        assert!(matches!(
            center.end_call(EmployeeId::new(42), CallId::new(1), 0.5),
            Err(DomainError::NotFound(_))
        ));
        assert!(matches!(
            center.dismiss_staff(EmployeeId::new(42)),
            Err(DomainError::NotFound(_))
        ));
    }

    #[test]
    fn test_free_staff_tracks_availability() {
        let mut center = staffed_center();
        assert_eq!(center.free_staff(), vec![EmployeeId::new(4), EmployeeId::new(5)]);

        center.end_workday(EmployeeId::new(4)).unwrap();
        center.end_workday(EmployeeId::new(5)).unwrap();
        assert!(center.free_staff().is_empty());

        center.start_workday(EmployeeId::new(5)).unwrap();
        center.start_workday(EmployeeId::new(4)).unwrap();
        assert_eq!(center.free_staff(), vec![EmployeeId::new(4), EmployeeId::new(5)]);

        center.open_call(CallId::new(1)).unwrap();
        center.accept_call(EmployeeId::new(4), CallId::new(1)).unwrap();
        assert_eq!(center.free_staff(), vec![EmployeeId::new(5)]);
        assert!(center.pending_calls().is_empty());

        center.end_call(EmployeeId::new(4), CallId::new(1), 1.0).unwrap();
        assert_eq!(center.free_staff(), vec![EmployeeId::new(4), EmployeeId::new(5)]);
    }

    #[test]
    fn test_dismiss_staff() {
        let mut center = staffed_center();
        let dismissed = center.dismiss_staff(EmployeeId::new(4)).unwrap();

        assert_eq!(dismissed.id(), EmployeeId::new(4));
        assert!(center.staff(EmployeeId::new(4)).is_none());
        assert!(!center.manager(EmployeeId::new(3)).unwrap().supervises(EmployeeId::new(4)));
    }

    #[test]
    fn test_cannot_dismiss_staff_on_call() {
        let mut center = staffed_center();
        center.open_call(CallId::new(1)).unwrap();
        center.start_workday(EmployeeId::new(4)).unwrap();
        center.accept_call(EmployeeId::new(4), CallId::new(1)).unwrap();

        let err = center.dismiss_staff(EmployeeId::new(4)).unwrap_err();
        assert!(err.is_state_transition());
        assert!(center.manager(EmployeeId::new(3)).unwrap().supervises(EmployeeId::new(4)));
    }

    #[test]
    fn test_center_clock_reaches_staff() {
        let start = Utc.with_ymd_and_hms(2024, 3, 4, 9, 0, 0).unwrap();
        let mut times = vec![start, start + chrono::Duration::hours(2)].into_iter();
        let mut clock = MockClock::new();
        clock
            .expect_now()
            .times(2)
            .returning(move || times.next().expect("clock read more often than expected"));

        let mut center = CallCenter::default().with_clock(Arc::new(clock));
        center
            .hire_staff(EmployeeId::new(4), "Ada", "Lovelace", EmployeeId::new(3))
            .unwrap();
        center.start_workday(EmployeeId::new(4)).unwrap();
        center.end_workday(EmployeeId::new(4)).unwrap();

        assert_eq!(
            center.staff(EmployeeId::new(4)).unwrap().working_time_elapsed(),
            Duration::from_secs(2 * 60 * 60)
        );
    }

    #[test]
    fn test_dismissed_staff_events_are_kept() {
        let mut center = staffed_center();
        center.start_workday(EmployeeId::new(4)).unwrap();
        let mut dismissed = center.dismiss_staff(EmployeeId::new(4)).unwrap();
        assert!(dismissed.take_events().is_empty());

        let types: Vec<&'static str> = center.take_events().iter().map(|e| e.event_type()).collect();
        assert!(types.contains(&"staff.workday_started"));
        assert!(types.contains(&"roster.staff_removed"));
        assert!(center.take_events().is_empty());
    }

    #[test]
    fn test_take_events_orders_by_center_clock() {
        let start = Utc.with_ymd_and_hms(2024, 3, 4, 9, 0, 0).unwrap();
        let mut times = (0..3)
            .map(|minute| start + chrono::Duration::minutes(minute))
            .collect::<Vec<_>>()
            .into_iter();
        let mut clock = MockClock::new();
        clock
            .expect_now()
            .times(3)
            .returning(move || times.next().expect("clock read more often than expected"));

        let mut center = CallCenter::default().with_clock(Arc::new(clock));
        center.hire_manager(EmployeeId::new(3), "Grace", "Hopper").unwrap();
        // roster entry at minute 0
        center
            .hire_staff(EmployeeId::new(4), "Ada", "Lovelace", EmployeeId::new(3))
            .unwrap();
        center.open_call(CallId::new(1)).unwrap();
        // workday at minute 1, call accepted at minute 2
        center.start_workday(EmployeeId::new(4)).unwrap();
        center.accept_call(EmployeeId::new(4), CallId::new(1)).unwrap();

        let types: Vec<&'static str> = center.take_events().iter().map(|e| e.event_type()).collect();
        assert_eq!(
            types,
            vec![
                "roster.staff_added",
                "staff.workday_started",
                "staff.call_accepted",
                "call.accepted",
            ]
        );
    }

    #[test]
    fn test_take_events_drains_all_aggregates() {
        let mut center = staffed_center();
        center.open_call(CallId::new(1)).unwrap();
        center.start_workday(EmployeeId::new(4)).unwrap();
        center.accept_call(EmployeeId::new(4), CallId::new(1)).unwrap();

        let events = center.take_events();
        let count = |prefix: &str| {
            events
                .iter()
                .filter(|e| e.event_type().starts_with(prefix))
                .count()
        };
        assert_eq!(count("roster."), 2);
        assert_eq!(count("staff."), 2);
        assert_eq!(count("call."), 1);
        assert!(center.take_events().is_empty());
    }
}
