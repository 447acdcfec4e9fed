//! Employee identity
//!
//! Managers and staff both compose an [`Employee`] and expose it through the
//! [`Person`] trait rather than inheriting from a common base.

use crate::domain::shared::value_objects::EmployeeId;
use serde::{Deserialize, Serialize};

/// Identity record shared by every employee
///
/// Uniqueness of `id` is the caller's responsibility; no global registry is
/// consulted here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    id: EmployeeId,
    first_name: String,
    last_name: String,
}

impl Employee {
    pub fn new(id: EmployeeId, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            id,
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }
}

/// Read access to an employee's identity
pub trait Person {
    fn employee(&self) -> &Employee;

    fn id(&self) -> EmployeeId {
        self.employee().id
    }

    fn first_name(&self) -> &str {
        &self.employee().first_name
    }

    fn last_name(&self) -> &str {
        &self.employee().last_name
    }

    fn full_name(&self) -> String {
        format!("{} {}", self.first_name(), self.last_name())
    }
}

impl Person for Employee {
    fn employee(&self) -> &Employee {
        self
    }
}
