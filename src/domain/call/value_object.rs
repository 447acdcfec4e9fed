//! Call value objects

use serde::{Deserialize, Serialize};
use std::fmt;

/// Call lifecycle status
///
/// `Pending -> In Progress -> Successful`; `Successful` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CallStatus {
    /// Waiting for a staff member to pick it up
    #[default]
    Pending,
    /// Being handled by exactly one staff member
    #[serde(rename = "In Progress")]
    InProgress,
    /// Handled and closed
    Successful,
}

impl CallStatus {
    /// Check if state transition is valid
    pub fn can_transition_to(&self, new_status: CallStatus) -> bool {
        use CallStatus::*;

        matches!((self, new_status), (Pending, InProgress) | (InProgress, Successful))
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, CallStatus::Successful)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CallStatus::Pending => "Pending",
            CallStatus::InProgress => "In Progress",
            CallStatus::Successful => "Successful",
        }
    }
}

impl fmt::Display for CallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
