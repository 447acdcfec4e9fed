//! Manager aggregate root

use crate::domain::employee::{Employee, Person};
use crate::domain::manager::event::{RosterEvent, RosterEventKind};
use crate::domain::shared::clock::{Clock, SharedClock};
use crate::domain::shared::value_objects::EmployeeId;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

/// Manager aggregate root
///
/// Owns the roster of staff ids it supervises, not the staff themselves.
/// Adding is idempotent and removing an unknown id is a no-op.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manager {
    employee: Employee,
    staff_list: Vec<EmployeeId>,
    #[serde(skip)]
    clock: SharedClock,
    #[serde(skip)]
    events: Vec<RosterEvent>,
}

impl Manager {
    /// Create a manager with an initial roster; repeated ids keep their first position
    pub fn new(
        id: EmployeeId,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        staff_list: impl IntoIterator<Item = EmployeeId>,
    ) -> Self {
        let mut roster: Vec<EmployeeId> = Vec::new();
        for staff_id in staff_list {
            if !roster.contains(&staff_id) {
                roster.push(staff_id);
            }
        }

        Self {
            employee: Employee::new(id, first_name, last_name),
            staff_list: roster,
            clock: SharedClock::default(),
            events: Vec::new(),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = SharedClock::new(clock);
        self
    }

    pub(crate) fn with_shared_clock(mut self, clock: SharedClock) -> Self {
        self.clock = clock;
        self
    }

    /// Put a staff member on the roster
    ///
    /// Only the id is stored; the remaining fields describe the hire for the
    /// log. Returns `false` when the id was already on the roster.
    pub fn add_staff(
        &mut self,
        id: EmployeeId,
        first_name: &str,
        last_name: &str,
        manager_id: EmployeeId,
    ) -> bool {
        if self.supervises(id) {
            debug!("Staff {} already on roster of manager {}", id, self.id());
            return false;
        }

        self.staff_list.push(id);
        self.events.push(RosterEvent::new(
            self.id(),
            RosterEventKind::StaffAdded { staff_id: id },
            self.clock.now(),
        ));
        info!(
            "Manager {} added staff {} ({} {}, reports to {})",
            self.id(),
            id,
            first_name,
            last_name,
            manager_id
        );
        true
    }

    /// Take a staff member off the roster; returns whether it was present
    pub fn remove_staff(&mut self, id: EmployeeId) -> bool {
        let Some(position) = self.staff_list.iter().position(|s| *s == id) else {
            debug!("Staff {} not on roster of manager {}", id, self.id());
            return false;
        };

        self.staff_list.remove(position);
        self.events.push(RosterEvent::new(
            self.id(),
            RosterEventKind::StaffRemoved { staff_id: id },
            self.clock.now(),
        ));
        info!("Manager {} removed staff {}", self.id(), id);
        true
    }

    pub fn supervises(&self, id: EmployeeId) -> bool {
        self.staff_list.contains(&id)
    }

    /// Staff ids in insertion order
    pub fn staff_list(&self) -> &[EmployeeId] {
        &self.staff_list
    }

    pub fn roster_size(&self) -> usize {
        self.staff_list.len()
    }

    /// Take all pending events
    pub fn take_events(&mut self) -> Vec<RosterEvent> {
        std::mem::take(&mut self.events)
    }
}

impl Person for Manager {
    fn employee(&self) -> &Employee {
        &self.employee
    }
}
