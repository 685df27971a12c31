//! Automation status taxonomy.
//!
//! TestRail stores automation triage state in the `custom_automation_status`
//! case field as a small integer. The five codes below are fixed by the
//! TestRail project configuration and never change at runtime.

use std::fmt;
use std::str::FromStr;

use crate::error::CoverageError;

/// Lifecycle state of a test case with respect to automation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AutomationStatus {
    Untriaged = 1,
    Suitable = 2,
    Unsuitable = 3,
    Completed = 4,
    Disabled = 5,
}

impl AutomationStatus {
    /// All statuses in declaration (code) order.
    pub const ALL: [AutomationStatus; 5] = [
        AutomationStatus::Untriaged,
        AutomationStatus::Suitable,
        AutomationStatus::Unsuitable,
        AutomationStatus::Completed,
        AutomationStatus::Disabled,
    ];

    /// Integer code as stored by TestRail.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Look up a status by code. Returns `None` outside `1..=5`.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(AutomationStatus::Untriaged),
            2 => Some(AutomationStatus::Suitable),
            3 => Some(AutomationStatus::Unsuitable),
            4 => Some(AutomationStatus::Completed),
            5 => Some(AutomationStatus::Disabled),
            _ => None,
        }
    }

    /// Upper-case name, used in dump file names (`DISABLED`).
    pub fn name(self) -> &'static str {
        match self {
            AutomationStatus::Untriaged => "UNTRIAGED",
            AutomationStatus::Suitable => "SUITABLE",
            AutomationStatus::Unsuitable => "UNSUITABLE",
            AutomationStatus::Completed => "COMPLETED",
            AutomationStatus::Disabled => "DISABLED",
        }
    }

    /// Lower-case key, used for summary fields and SQL `automation_state`.
    pub fn key(self) -> &'static str {
        match self {
            AutomationStatus::Untriaged => "untriaged",
            AutomationStatus::Suitable => "suitable",
            AutomationStatus::Unsuitable => "unsuitable",
            AutomationStatus::Completed => "completed",
            AutomationStatus::Disabled => "disabled",
        }
    }

    /// Zero-based slot for table-driven bucket storage.
    pub(crate) fn index(self) -> usize {
        self.code() as usize - 1
    }
}

impl fmt::Display for AutomationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Accepts either the numeric code (`"5"`) or the name in any case
/// (`"disabled"`, `"DISABLED"`).
impl FromStr for AutomationStatus {
    type Err = CoverageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(code) = trimmed.parse::<i64>() {
            return AutomationStatus::from_code(code)
                .ok_or_else(|| CoverageError::UnknownStatus(trimmed.to_string()));
        }
        AutomationStatus::ALL
            .into_iter()
            .find(|status| status.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| CoverageError::UnknownStatus(trimmed.to_string()))
    }
}
