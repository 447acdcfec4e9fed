//! Staff aggregate root

use crate::domain::call::Call;
use crate::domain::employee::{Employee, Person};
use crate::domain::shared::clock::{Clock, SharedClock};
use crate::domain::shared::error::DomainError;
use crate::domain::shared::result::Result;
use crate::domain::shared::value_objects::{CallId, EmployeeId};
use crate::domain::staff::event::{StaffEvent, StaffEventKind};
use crate::domain::staff::value_object::{AvailabilityStatus, CallRating, WorkdayPolicy};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Staff aggregate root
///
/// A new staff member is `Free`; availability then cycles
/// `Free -> On Call -> Free -> Out of Office -> Free`.
/// A staff member holds at most one call at a time and neither a workday
/// operation nor a second call can interrupt it; the call has to be ended
/// first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Staff {
    employee: Employee,
    /// Weak reference, never checked against the manager's roster
    manager_id: EmployeeId,
    status: AvailabilityStatus,
    working_time_elapsed: Duration,
    shift_started_at: Option<DateTime<Utc>>,
    current_call: Option<CallId>,
    ratings: Vec<CallRating>,
    policy: WorkdayPolicy,
    #[serde(skip)]
    clock: SharedClock,
    #[serde(skip)]
    events: Vec<StaffEvent>,
}

impl Staff {
    /// Create a staff member, free to take a call
    pub fn new(
        id: EmployeeId,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        manager_id: EmployeeId,
    ) -> Self {
        Self {
            employee: Employee::new(id, first_name, last_name),
            manager_id,
            status: AvailabilityStatus::Free,
            working_time_elapsed: Duration::ZERO,
            shift_started_at: None,
            current_call: None,
            ratings: Vec::new(),
            policy: WorkdayPolicy::default(),
            clock: SharedClock::default(),
            events: Vec::new(),
        }
    }

    pub fn with_policy(mut self, policy: WorkdayPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = SharedClock::new(clock);
        self
    }

    pub(crate) fn with_shared_clock(mut self, clock: SharedClock) -> Self {
        self.clock = clock;
        self
    }

    /// Begin a workday session
    ///
    /// Closes any session still open, opens a new one and credits the
    /// policy's minimum session length, so working time always grows.
    pub fn start_workday(&mut self) -> Result<()> {
        if self.status == AvailabilityStatus::OnCall {
            warn!("Staff {} tried to start a workday while on call", self.id());
            return Err(DomainError::InvalidStateTransition(format!(
                "Staff {} cannot start a workday while on call",
                self.id()
            )));
        }

        let now = self.clock.now();
        if self.shift_started_at.is_some() {
            let worked = self.settle_session(now);
            debug!("Staff {} restarted workday, previous session {:?}", self.id(), worked);
        }

        self.shift_started_at = Some(now);
        self.working_time_elapsed += self.policy.minimum_session();
        self.status = AvailabilityStatus::Free;
        self.record_event(StaffEventKind::WorkdayStarted, now);

        info!("Staff {} ({}) started workday", self.id(), self.full_name());
        Ok(())
    }

    /// End the workday and go out of office
    pub fn end_workday(&mut self) -> Result<()> {
        if self.status == AvailabilityStatus::OnCall {
            warn!("Staff {} tried to end the workday while on call", self.id());
            return Err(DomainError::InvalidStateTransition(format!(
                "Staff {} must end call {} before ending the workday",
                self.id(),
                self.current_call.map(|c| c.to_string()).unwrap_or_default()
            )));
        }

        let now = self.clock.now();
        let worked = self.settle_session(now);
        self.status = AvailabilityStatus::OutOfOffice;
        self.record_event(StaffEventKind::WorkdayEnded { worked }, now);

        info!(
            "Staff {} ended workday after {:?}, total {:?}",
            self.id(),
            worked,
            self.working_time_elapsed
        );
        Ok(())
    }

    /// Pick up a pending call
    pub fn accept_call(&mut self, call: &mut Call) -> Result<()> {
        if self.status != AvailabilityStatus::Free {
            return Err(DomainError::InvalidStateTransition(format!(
                "Staff {} is {} and cannot accept call {}",
                self.id(),
                self.status,
                call.id()
            )));
        }

        let now = self.clock.now();
        call.begin(self.id(), now)?;

        self.status = AvailabilityStatus::OnCall;
        self.current_call = Some(call.id());
        self.record_event(StaffEventKind::CallAccepted { call_id: call.id() }, now);

        info!("Staff {} accepted call {}", self.id(), call.id());
        Ok(())
    }

    /// Close the call being handled and record its rating
    pub fn end_call(&mut self, call: &mut Call, rating: f64) -> Result<()> {
        CallRating::validate(rating)?;

        if self.status != AvailabilityStatus::OnCall {
            return Err(DomainError::InvalidStateTransition(format!(
                "Staff {} is {} and has no call to end",
                self.id(),
                self.status
            )));
        }

        if self.current_call != Some(call.id()) {
            return Err(DomainError::InvalidOperation(format!(
                "Staff {} is not handling call {}",
                self.id(),
                call.id()
            )));
        }

        let now = self.clock.now();
        let rating = CallRating::new(call.id(), rating, now)?;
        call.complete(self.id(), now)?;

        self.ratings.push(rating);
        self.status = AvailabilityStatus::Free;
        self.current_call = None;
        self.record_event(
            StaffEventKind::CallEnded {
                call_id: call.id(),
                rating: rating.score(),
            },
            now,
        );

        info!(
            "Staff {} ended call {} with rating {:.2}",
            self.id(),
            call.id(),
            rating.score()
        );
        Ok(())
    }

    /// Close the open session, topping the credit up to its real length
    fn settle_session(&mut self, now: DateTime<Utc>) -> Duration {
        let Some(started) = self.shift_started_at.take() else {
            return Duration::ZERO;
        };

        let actual = (now - started).to_std().unwrap_or(Duration::ZERO);
        let minimum = self.policy.minimum_session();
        self.working_time_elapsed += actual.saturating_sub(minimum);
        actual.max(minimum)
    }

    fn record_event(&mut self, kind: StaffEventKind, at: DateTime<Utc>) {
        self.events.push(StaffEvent::new(self.id(), kind, at));
    }

    /// Take all pending events
    pub fn take_events(&mut self) -> Vec<StaffEvent> {
        std::mem::take(&mut self.events)
    }

    // Getters
    pub fn manager_id(&self) -> EmployeeId {
        self.manager_id
    }

    pub fn status(&self) -> AvailabilityStatus {
        self.status
    }

    pub fn is_available(&self) -> bool {
        self.status == AvailabilityStatus::Free
    }

    pub fn working_time_elapsed(&self) -> Duration {
        self.working_time_elapsed
    }

    pub fn shift_started_at(&self) -> Option<&DateTime<Utc>> {
        self.shift_started_at.as_ref()
    }

    pub fn current_call(&self) -> Option<CallId> {
        self.current_call
    }

    pub fn policy(&self) -> &WorkdayPolicy {
        &self.policy
    }

    pub fn ratings(&self) -> &[CallRating] {
        &self.ratings
    }

    pub fn calls_handled(&self) -> usize {
        self.ratings.len()
    }

    pub fn average_rating(&self) -> Option<f64> {
        if self.ratings.is_empty() {
            return None;
        }
        let total: f64 = self.ratings.iter().map(CallRating::score).sum();
        Some(total / self.ratings.len() as f64)
    }
}

impl Person for Staff {
    fn employee(&self) -> &Employee {
        &self.employee
    }
}
