//! Section name extraction.

use crate::case::Section;

/// Reduce every section to its `suite_id` and `name`.
pub fn strip_sections(sections: &[Section]) -> Vec<Section> {
    sections.iter().map(Section::stripped).collect()
}

/// Bare section names. Sections without a string name are skipped.
pub fn section_names(sections: &[Section]) -> Vec<String> {
    sections
        .iter()
        .filter_map(Section::name)
        .map(str::to_string)
        .collect()
}

/// File name for a section dump, e.g. `sections-from-suite-19.json`.
pub fn sections_dump_file_name(suite_id: u64) -> String {
    format!("sections-from-suite-{}.json", suite_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sections() -> Vec<Section> {
        serde_json::from_value(json!([
            {"id": 1, "suite_id": 19, "name": "Bookmarks", "display_order": 1},
            {"id": 2, "suite_id": 19, "name": "History", "parent_id": 1},
            {"id": 3, "suite_id": 19, "name": null}
        ]))
        .unwrap()
    }

    #[test]
    fn test_strip_sections_keeps_suite_and_name() {
        let stripped = strip_sections(&sections());
        assert_eq!(stripped.len(), 3);
        assert_eq!(
            serde_json::to_value(&stripped[0]).unwrap(),
            json!({"suite_id": 19, "name": "Bookmarks"})
        );
        assert_eq!(
            serde_json::to_value(&stripped[2]).unwrap(),
            json!({"suite_id": 19, "name": null})
        );
    }

    #[test]
    fn test_section_names_skip_missing() {
        assert_eq!(section_names(&sections()), vec!["Bookmarks", "History"]);
    }

    #[test]
    fn test_dump_file_name() {
        assert_eq!(sections_dump_file_name(19), "sections-from-suite-19.json");
    }
}
