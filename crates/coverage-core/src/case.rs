//! Opaque TestRail records.
//!
//! Cases and sections are kept as raw JSON objects so that every field
//! TestRail returns survives a round trip through the report untouched.
//! Only the handful of keys the aggregation reads get typed accessors.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::status::AutomationStatus;

/// Case field holding the automation status code.
pub const AUTOMATION_STATUS_FIELD: &str = "custom_automation_status";

/// Case field holding the human-readable title.
pub const TITLE_FIELD: &str = "title";

/// Section field naming the owning suite.
pub const SUITE_ID_FIELD: &str = "suite_id";

/// Section field holding the section name.
pub const NAME_FIELD: &str = "name";

/// A single test case record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Case(Map<String, Value>);

impl Case {
    pub fn new(fields: Map<String, Value>) -> Self {
        Case(fields)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_fields(self) -> Map<String, Value> {
        self.0
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn title(&self) -> Option<&str> {
        self.0.get(TITLE_FIELD).and_then(Value::as_str)
    }

    /// The case's automation status, if it carries a recognised numeric code.
    ///
    /// Integral floats such as `4.0` count as their integer code. Missing
    /// keys, nulls, strings, fractional numbers and codes outside `1..=5`
    /// all yield `None`.
    pub fn automation_status(&self) -> Option<AutomationStatus> {
        let raw = self.0.get(AUTOMATION_STATUS_FIELD)?;
        let code = match raw.as_i64() {
            Some(code) => code,
            None => {
                let float = raw.as_f64()?;
                if float.fract() != 0.0 || float.abs() > i64::MAX as f64 {
                    return None;
                }
                float as i64
            }
        };
        AutomationStatus::from_code(code)
    }

    /// Copy holding only the title and automation status keys.
    pub fn stripped(&self) -> Case {
        retain_keys(&self.0, &[TITLE_FIELD, AUTOMATION_STATUS_FIELD]).into()
    }
}

impl From<Map<String, Value>> for Case {
    fn from(fields: Map<String, Value>) -> Self {
        Case(fields)
    }
}

/// A TestRail section (folder) record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Section(Map<String, Value>);

impl Section {
    pub fn new(fields: Map<String, Value>) -> Self {
        Section(fields)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn name(&self) -> Option<&str> {
        self.0.get(NAME_FIELD).and_then(Value::as_str)
    }

    /// Copy holding only `suite_id` and `name`.
    pub fn stripped(&self) -> Section {
        Section(retain_keys(&self.0, &[SUITE_ID_FIELD, NAME_FIELD]))
    }
}

impl From<Map<String, Value>> for Section {
    fn from(fields: Map<String, Value>) -> Self {
        Section(fields)
    }
}

fn retain_keys(fields: &Map<String, Value>, keep: &[&str]) -> Map<String, Value> {
    fields
        .iter()
        .filter(|(key, _)| keep.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn case(value: Value) -> Case {
        serde_json::from_value(value).expect("case object")
    }

    #[test]
    fn test_automation_status_reads_integer_code() {
        let c = case(json!({"title": "Login", "custom_automation_status": 4}));
        assert_eq!(c.automation_status(), Some(AutomationStatus::Completed));
        assert_eq!(c.title(), Some("Login"));
    }

    #[test]
    fn test_automation_status_ignores_unusable_values() {
        for raw in [json!(null), json!("4"), json!(4.5), json!(0), json!(9)] {
            let c = case(json!({"title": "X", "custom_automation_status": raw.clone()}));
            assert_eq!(c.automation_status(), None, "value {:?}", raw);
        }
        assert_eq!(case(json!({"title": "X"})).automation_status(), None);
    }

    #[test]
    fn test_automation_status_accepts_integral_float_codes() {
        let c = case(json!({"title": "X", "custom_automation_status": 4.0}));
        assert_eq!(c.automation_status(), Some(AutomationStatus::Completed));
        let c = case(json!({"title": "X", "custom_automation_status": 9.0}));
        assert_eq!(c.automation_status(), None);
    }

    #[test]
    fn test_stripped_case_keeps_two_keys() {
        let c = case(json!({
            "id": 17,
            "title": "Open tab",
            "type_id": 3,
            "custom_automation_status": 2,
            "custom_automation_coverage": 1
        }));
        let s = c.stripped();
        let keys: Vec<&str> = s.fields().keys().map(String::as_str).collect();
        assert_eq!(keys.len(), 2);
        assert!(keys.contains(&"title"));
        assert!(keys.contains(&"custom_automation_status"));
        // source untouched
        assert_eq!(c.fields().len(), 5);
    }

    #[test]
    fn test_section_stripped() {
        let s: Section = serde_json::from_value(json!({
            "id": 1, "suite_id": 19, "name": "Tabs", "depth": 0, "parent_id": null
        }))
        .unwrap();
        let stripped = s.stripped();
        assert_eq!(stripped.fields().len(), 2);
        assert_eq!(stripped.name(), Some("Tabs"));
        assert_eq!(stripped.fields()["suite_id"], json!(19));
    }

    #[test]
    fn test_case_serializes_transparently() {
        let raw = json!({"title": "A", "custom_automation_status": 1, "refs": null});
        let c = case(raw.clone());
        assert_eq!(serde_json::to_value(&c).unwrap(), raw);
    }
}
