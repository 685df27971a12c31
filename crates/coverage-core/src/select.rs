//! Extracting grouped case lists for a caller-chosen set of statuses.

use crate::case::Case;
use crate::classify::Buckets;
use crate::status::AutomationStatus;

/// Deduplicate `requested`, keeping the first occurrence of each status.
pub fn ordered_statuses(requested: &[AutomationStatus]) -> Vec<AutomationStatus> {
    let mut out: Vec<AutomationStatus> = Vec::with_capacity(requested.len());
    for status in requested {
        if !out.contains(status) {
            out.push(*status);
        }
    }
    out
}

/// Emit one case list per requested status, in request order.
///
/// With `stripped`, every case is reduced to its title and automation
/// status.
pub fn select(buckets: &Buckets, requested: &[AutomationStatus], stripped: bool) -> Vec<Vec<Case>> {
    ordered_statuses(requested)
        .into_iter()
        .map(|status| {
            let cases = buckets.get(status);
            if stripped {
                cases.iter().map(Case::stripped).collect()
            } else {
                cases.to_vec()
            }
        })
        .collect()
}

/// File name for a grouped dump, e.g.
/// `custom-automation-status-19-SUITABLE-DISABLED.json`.
pub fn status_dump_file_name(suite_id: u64, requested: &[AutomationStatus]) -> String {
    let mut name = format!("custom-automation-status-{}", suite_id);
    for status in ordered_statuses(requested) {
        name.push('-');
        name.push_str(status.name());
    }
    name.push_str(".json");
    name
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify;
    use serde_json::json;

    fn case(code: i64, title: &str) -> Case {
        serde_json::from_value(json!({
            "title": title,
            "custom_automation_status": code,
            "section_id": 3
        }))
        .unwrap()
    }

    #[test]
    fn test_request_order_wins_over_declaration_order() {
        let a = case(2, "a");
        let b = case(5, "b");
        let buckets = classify(vec![a.clone(), b.clone()]);
        let out = select(
            &buckets,
            &[AutomationStatus::Disabled, AutomationStatus::Suitable],
            false,
        );
        assert_eq!(out, vec![vec![b], vec![a]]);
    }

    #[test]
    fn test_duplicate_requests_emitted_once() {
        let buckets = classify(vec![case(1, "u")]);
        let out = select(
            &buckets,
            &[
                AutomationStatus::Untriaged,
                AutomationStatus::Completed,
                AutomationStatus::Untriaged,
            ],
            false,
        );
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].len(), 1);
        assert!(out[1].is_empty());
    }

    #[test]
    fn test_stripped_records_have_exactly_two_keys() {
        let buckets = classify(vec![case(2, "a"), case(2, "b"), case(3, "c")]);
        let out = select(
            &buckets,
            &[AutomationStatus::Suitable, AutomationStatus::Unsuitable],
            true,
        );
        for group in &out {
            for c in group {
                let mut keys: Vec<&str> = c.fields().keys().map(String::as_str).collect();
                keys.sort();
                assert_eq!(keys, vec!["custom_automation_status", "title"]);
            }
        }
        assert_eq!(out[0].len() + out[1].len(), 3);
    }

    #[test]
    fn test_unstripped_records_pass_through() {
        let original = case(4, "full");
        let buckets = classify(vec![original.clone()]);
        let out = select(&buckets, &[AutomationStatus::Completed], false);
        assert_eq!(out[0][0], original);
    }

    #[test]
    fn test_dump_file_name() {
        assert_eq!(
            status_dump_file_name(
                19,
                &[
                    AutomationStatus::Disabled,
                    AutomationStatus::Suitable,
                    AutomationStatus::Disabled
                ]
            ),
            "custom-automation-status-19-DISABLED-SUITABLE.json"
        );
        assert_eq!(
            status_dump_file_name(7, &[]),
            "custom-automation-status-7.json"
        );
    }
}
