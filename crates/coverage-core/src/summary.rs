//! Per-status count summary.

use serde::{Deserialize, Serialize};

use crate::classify::Buckets;
use crate::status::AutomationStatus;

/// Automation coverage counts for one project/suite pair.
///
/// Serialized field order is part of the output contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub project_name: String,
    pub suite: String,
    pub untriaged: usize,
    pub suitable: usize,
    pub unsuitable: usize,
    pub completed: usize,
    pub disabled: usize,
}

impl Summary {
    /// Count for a single status.
    pub fn count(&self, status: AutomationStatus) -> usize {
        match status {
            AutomationStatus::Untriaged => self.untriaged,
            AutomationStatus::Suitable => self.suitable,
            AutomationStatus::Unsuitable => self.unsuitable,
            AutomationStatus::Completed => self.completed,
            AutomationStatus::Disabled => self.disabled,
        }
    }

    /// Sum of all five counts.
    pub fn total(&self) -> usize {
        AutomationStatus::ALL.iter().map(|s| self.count(*s)).sum()
    }
}

/// Build the summary record from classified buckets.
pub fn summarize(buckets: &Buckets, project_name: &str, suite_name: &str) -> Summary {
    Summary {
        project_name: project_name.to_string(),
        suite: suite_name.to_string(),
        untriaged: buckets.count(AutomationStatus::Untriaged),
        suitable: buckets.count(AutomationStatus::Suitable),
        unsuitable: buckets.count(AutomationStatus::Unsuitable),
        completed: buckets.count(AutomationStatus::Completed),
        disabled: buckets.count(AutomationStatus::Disabled),
    }
}
