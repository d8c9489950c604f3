// Core types for the instance inventory

use serde::{Serialize, Serializer};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Opaque platform identifier of a compute instance
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct InstanceId(String);

impl InstanceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for InstanceId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Lifecycle status reported by the platform
///
/// Only the two states the workflows act on are named; everything else
/// (BUILD, ERROR, SHUTOFF, ...) is carried verbatim.
#[derive(Debug, Clone)]
pub enum InstanceStatus {
    Active,
    Paused,
    Other(String),
}

impl InstanceStatus {
    pub fn as_str(&self) -> &str {
        match self {
            InstanceStatus::Active => "ACTIVE",
            InstanceStatus::Paused => "PAUSED",
            InstanceStatus::Other(raw) => raw,
        }
    }
}

impl PartialEq for InstanceStatus {
    fn eq(&self, other: &Self) -> bool {
        self.as_str().eq_ignore_ascii_case(other.as_str())
    }
}

impl Eq for InstanceStatus {}

impl FromStr for InstanceStatus {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Ok(if trimmed.eq_ignore_ascii_case("ACTIVE") {
            InstanceStatus::Active
        } else if trimmed.eq_ignore_ascii_case("PAUSED") {
            InstanceStatus::Paused
        } else {
            InstanceStatus::Other(trimmed.to_string())
        })
    }
}

impl From<&str> for InstanceStatus {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(status) => status,
            Err(never) => match never {},
        }
    }
}

impl fmt::Display for InstanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for InstanceStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseValueError {
    #[error("expected a lock flag (True/False), got {raw:?}")]
    LockFlag { raw: String },
}

/// Decode the `locked` field as printed by `server show -f value`
pub fn parse_lock_flag(raw: &str) -> Result<bool, ParseValueError> {
    let trimmed = raw.trim();
    if trimmed.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if trimmed.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(ParseValueError::LockFlag {
            raw: trimmed.to_string(),
        })
    }
}

/// One row of the platform inventory
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Instance {
    pub id: InstanceId,
    pub name: String,
    pub status: InstanceStatus,
}

impl Instance {
    pub fn new(id: impl Into<String>, name: impl Into<String>, status: InstanceStatus) -> Self {
        Self {
            id: InstanceId::new(id),
            name: name.into(),
            status,
        }
    }
}
