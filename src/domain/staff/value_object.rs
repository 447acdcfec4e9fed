//! Staff value objects

use crate::domain::shared::error::DomainError;
use crate::domain::shared::result::Result;
use crate::domain::shared::value_objects::CallId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Availability status of a staff member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AvailabilityStatus {
    /// Working and able to take a call
    #[default]
    Free,
    /// Handling exactly one call
    #[serde(rename = "On Call")]
    OnCall,
    /// Not working
    #[serde(rename = "Out of Office")]
    OutOfOffice,
}

impl AvailabilityStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AvailabilityStatus::Free => "Free",
            AvailabilityStatus::OnCall => "On Call",
            AvailabilityStatus::OutOfOffice => "Out of Office",
        }
    }
}

impl fmt::Display for AvailabilityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Working-time accounting rules
///
/// Every workday session is credited at least `minimum_session`; the credit is
/// booked when the session starts and topped up with the real length when it
/// is settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkdayPolicy {
    minimum_session: Duration,
}

impl WorkdayPolicy {
    pub const DEFAULT_MINIMUM_SESSION: Duration = Duration::from_secs(60);

    pub fn new(minimum_session: Duration) -> Result<Self> {
        if minimum_session.is_zero() {
            return Err(DomainError::ValidationError(
                "Minimum workday session must be longer than zero".to_string(),
            ));
        }
        Ok(Self { minimum_session })
    }

    pub fn minimum_session(&self) -> Duration {
        self.minimum_session
    }
}

impl Default for WorkdayPolicy {
    fn default() -> Self {
        Self {
            minimum_session: Self::DEFAULT_MINIMUM_SESSION,
        }
    }
}

/// Quality score given when a call ends
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CallRating {
    call_id: CallId,
    score: f64,
    recorded_at: DateTime<Utc>,
}

impl CallRating {
    pub const MIN: f64 = 0.0;
    pub const MAX: f64 = 1.0;

    pub fn new(call_id: CallId, score: f64, recorded_at: DateTime<Utc>) -> Result<Self> {
        Self::validate(score)?;
        Ok(Self {
            call_id,
            score,
            recorded_at,
        })
    }

    /// Scores must be finite and within `[0.0, 1.0]`
    pub fn validate(score: f64) -> Result<()> {
        if !score.is_finite() || !(Self::MIN..=Self::MAX).contains(&score) {
            return Err(DomainError::ValidationError(format!(
                "Rating {} is outside [{}, {}]",
                score,
                Self::MIN,
                Self::MAX
            )));
        }
        Ok(())
    }

    pub fn call_id(&self) -> CallId {
        self.call_id
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn recorded_at(&self) -> &DateTime<Utc> {
        &self.recorded_at
    }
}
