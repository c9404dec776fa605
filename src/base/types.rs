use std::{fmt, str::FromStr};

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use super::error::QueueError;

pub type Err = anyhow::Error;
pub type Res<T> = Result<T, Err>;
pub type Void = Res<()>;

/// Clinical triage priority. Lower values are more urgent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
#[repr(u8)]
pub enum Priority {
    Critical = 1,
    Urgent = 2,
    Regular = 3,
}

impl Priority {
    /// Display label for this priority.
    pub fn label(self) -> &'static str {
        match self {
            Priority::Critical => "Critical",
            Priority::Urgent => "Urgent",
            Priority::Regular => "Regular",
        }
    }

    /// Display label for a raw priority value; unknown values render as `—`.
    pub fn label_for(raw: i64) -> &'static str {
        Priority::try_from(raw).map(Priority::label).unwrap_or("—")
    }

    pub fn value(self) -> i64 {
        self as i64
    }
}

impl TryFrom<i64> for Priority {
    type Error = QueueError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Priority::Critical),
            2 => Ok(Priority::Urgent),
            3 => Ok(Priority::Regular),
            other => Err(QueueError::InvalidPriority(other)),
        }
    }
}

impl From<Priority> for i64 {
    fn from(priority: Priority) -> Self {
        priority.value()
    }
}

impl FromStr for Priority {
    type Err = QueueError;

    /// Accepts either the numeric rank or the (case-insensitive) label.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if let Ok(raw) = s.parse::<i64>() {
            return Priority::try_from(raw);
        }

        match s.to_ascii_lowercase().as_str() {
            "critical" => Ok(Priority::Critical),
            "urgent" => Ok(Priority::Urgent),
            "regular" => Ok(Priority::Regular),
            _ => Err(QueueError::UnknownPriority(s.to_string())),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A patient's request for an appointment slot.
///
/// All fields are fixed at submission; there is no re-triage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentRequest {
    patient_id: String,
    display_name: String,
    priority: Priority,
    submitted_at: DateTime<Local>,
}

impl AppointmentRequest {
    pub fn new(patient_id: impl Into<String>, display_name: impl Into<String>, priority: Priority, submitted_at: DateTime<Local>) -> Self {
        Self {
            patient_id: patient_id.into(),
            display_name: display_name.into(),
            priority,
            submitted_at,
        }
    }

    pub fn patient_id(&self) -> &str {
        &self.patient_id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn submitted_at(&self) -> DateTime<Local> {
        self.submitted_at
    }
}

/// One rendered line of the ordered queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueueRow {
    /// 1-based serving position.
    pub position: usize,
    pub patient_id: String,
    pub display_name: String,
    pub priority: i64,
    pub priority_label: String,
    pub submitted_at: String,
}

/// Role of an authenticated account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Role {
    Patient,
    Staff { title: String },
}

/// An account known to the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub name: String,
    pub role: Role,
}

impl Account {
    pub fn is_staff(&self) -> bool {
        matches!(self.role, Role::Staff { .. })
    }
}
