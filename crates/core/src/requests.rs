//! Blood request severity and lifecycle enums.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Severity tag on a blood request.
///
/// Ordering is severity-increasing (`Normal < Urgent < Critical`) so
/// clients can sort, but the level carries no automated behaviour: a
/// critical request fans out exactly like a normal one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmergencyLevel {
    Normal,
    Urgent,
    Critical,
}

impl EmergencyLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmergencyLevel::Normal => "normal",
            EmergencyLevel::Urgent => "urgent",
            EmergencyLevel::Critical => "critical",
        }
    }
}

impl fmt::Display for EmergencyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmergencyLevel {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "normal" => Ok(EmergencyLevel::Normal),
            "urgent" => Ok(EmergencyLevel::Urgent),
            "critical" => Ok(EmergencyLevel::Critical),
            other => Err(CoreError::Validation(format!(
                "Unknown emergency level: {other}"
            ))),
        }
    }
}

/// Lifecycle of a blood request.
///
/// The only transition is `Open -> Fulfilled`; fulfilled is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Open,
    Fulfilled,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Open => "open",
            RequestStatus::Fulfilled => "fulfilled",
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequestStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(RequestStatus::Open),
            "fulfilled" => Ok(RequestStatus::Fulfilled),
            other => Err(CoreError::Validation(format!(
                "Unknown request status: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emergency_ordering_is_severity_increasing() {
        assert!(EmergencyLevel::Normal < EmergencyLevel::Urgent);
        assert!(EmergencyLevel::Urgent < EmergencyLevel::Critical);
    }

    #[test]
    fn status_parses_both_states() {
        assert_eq!("open".parse::<RequestStatus>().unwrap(), RequestStatus::Open);
        assert_eq!(
            "fulfilled".parse::<RequestStatus>().unwrap(),
            RequestStatus::Fulfilled
        );
        assert!("cancelled".parse::<RequestStatus>().is_err());
    }
}
