//! Parameterized SQL insert statements for coverage summaries.
//!
//! Statements are produced, never executed. Values are always bound
//! parameters; only the table name is spliced into the SQL text, and it
//! must pass [`validate_identifier`] first.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CoverageError, Result};
use crate::status::AutomationStatus;
use crate::summary::Summary;

/// Default table for wide summary rows.
pub const DEFAULT_SUMMARY_TABLE: &str = "testrail_automation_summary";

/// Default table for one-row-per-status coverage rows.
pub const DEFAULT_COVERAGE_TABLE: &str = "testrail_test_coverage";

const SUMMARY_COLUMNS: [&str; 7] = [
    "project_name",
    "suite",
    "untriaged",
    "suitable",
    "unsuitable",
    "completed",
    "disabled",
];

const COVERAGE_COLUMNS: [&str; 4] = ["project_name", "suite", "automation_state", "case_count"];

/// Bind-parameter marker syntax.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Placeholder {
    /// `$1, $2, ...` (PostgreSQL, SQLite)
    #[default]
    Dollar,
    /// `?, ?, ...` (MySQL, SQLite)
    Question,
}

impl Placeholder {
    fn render(self, count: usize) -> String {
        (1..=count)
            .map(|i| match self {
                Placeholder::Dollar => format!("${}", i),
                Placeholder::Question => "?".to_string(),
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// A bound parameter value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SqlParam {
    Integer(i64),
    Text(String),
}

impl From<&str> for SqlParam {
    fn from(value: &str) -> Self {
        SqlParam::Text(value.to_string())
    }
}

impl From<usize> for SqlParam {
    fn from(value: usize) -> Self {
        SqlParam::Integer(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

/// SQL text plus its positional parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsertStatement {
    pub sql: String,
    pub params: Vec<SqlParam>,
}

impl InsertStatement {
    fn build(table: &str, columns: &[&str], params: Vec<SqlParam>, style: Placeholder) -> Self {
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            table,
            columns.join(", "),
            style.render(columns.len())
        );
        InsertStatement { sql, params }
    }
}

impl fmt::Display for InsertStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.sql)
    }
}

/// Accept `name` or `schema.name` where each part is `[A-Za-z_][A-Za-z0-9_]*`.
pub fn validate_identifier(name: &str) -> Result<&str> {
    let parts: Vec<&str> = name.split('.').collect();
    let valid = parts.len() <= 2
        && parts.iter().all(|part| {
            let mut chars = part.chars();
            matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        });
    if valid {
        Ok(name)
    } else {
        Err(CoverageError::InvalidIdentifier(name.to_string()))
    }
}

/// One wide row holding all five counts.
pub fn summary_insert(table: &str, summary: &Summary, style: Placeholder) -> Result<InsertStatement> {
    let table = validate_identifier(table)?;
    let mut params: Vec<SqlParam> = vec![
        summary.project_name.as_str().into(),
        summary.suite.as_str().into(),
    ];
    params.extend(AutomationStatus::ALL.iter().map(|s| summary.count(*s).into()));
    Ok(InsertStatement::build(table, &SUMMARY_COLUMNS, params, style))
}

/// One `(project_name, suite, automation_state, case_count)` row per
/// requested status, in status-code order whatever order they were asked in.
pub fn coverage_inserts(
    table: &str,
    summary: &Summary,
    requested: &[AutomationStatus],
    style: Placeholder,
) -> Result<Vec<InsertStatement>> {
    let table = validate_identifier(table)?;
    Ok(AutomationStatus::ALL
        .iter()
        .copied()
        .filter(|status| requested.contains(status))
        .map(|status| {
            let params = vec![
                summary.project_name.as_str().into(),
                summary.suite.as_str().into(),
                status.key().into(),
                summary.count(status).into(),
            ];
            InsertStatement::build(table, &COVERAGE_COLUMNS, params, style)
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn summary() -> Summary {
        Summary {
            project_name: "Fenix'); DROP TABLE x; --".to_string(),
            suite: "Smoke".to_string(),
            untriaged: 1,
            suitable: 2,
            unsuitable: 3,
            completed: 4,
            disabled: 5,
        }
    }

    #[test]
    fn test_summary_insert_binds_values() {
        let stmt = summary_insert("coverage", &summary(), Placeholder::Dollar).unwrap();
        assert_eq!(
            stmt.sql,
            "INSERT INTO coverage (project_name, suite, untriaged, suitable, unsuitable, completed, disabled) VALUES ($1, $2, $3, $4, $5, $6, $7)"
        );
        assert!(!stmt.sql.contains("DROP"));
        assert_eq!(stmt.params.len(), 7);
        assert_eq!(stmt.params[0], SqlParam::Text(summary().project_name));
        assert_eq!(stmt.params[6], SqlParam::Integer(5));
    }

    #[test]
    fn test_question_placeholders() {
        let stmt = summary_insert("reports.coverage", &summary(), Placeholder::Question).unwrap();
        assert!(stmt.sql.ends_with("VALUES (?, ?, ?, ?, ?, ?, ?)"));
        assert!(stmt.sql.starts_with("INSERT INTO reports.coverage "));
    }

    #[test]
    fn test_invalid_table_rejected() {
        for bad in ["", "1table", "t; DROP TABLE x", "a.b.c", "t-name", "t name", "t."] {
            let err = summary_insert(bad, &summary(), Placeholder::Dollar).unwrap_err();
            assert!(
                matches!(err, CoverageError::InvalidIdentifier(_)),
                "accepted {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_coverage_inserts_follow_status_code_order() {
        let stmts = coverage_inserts(
            DEFAULT_COVERAGE_TABLE,
            &summary(),
            &[
                AutomationStatus::Disabled,
                AutomationStatus::Untriaged,
                AutomationStatus::Disabled,
            ],
            Placeholder::Dollar,
        )
        .unwrap();
        assert_eq!(stmts.len(), 2);
        assert_eq!(
            stmts[0].sql,
            "INSERT INTO testrail_test_coverage (project_name, suite, automation_state, case_count) VALUES ($1, $2, $3, $4)"
        );
        assert_eq!(stmts[0].params[2], SqlParam::Text("untriaged".to_string()));
        assert_eq!(stmts[1].params[2], SqlParam::Text("disabled".to_string()));
        assert_eq!(stmts[1].params[3], SqlParam::Integer(5));
    }

    #[test]
    fn test_statement_serializes_params_untagged() {
        let stmt = coverage_inserts(
            "t",
            &summary(),
            &[AutomationStatus::Completed],
            Placeholder::Question,
        )
        .unwrap()
        .remove(0);
        let raw = serde_json::to_value(&stmt).unwrap();
        assert_eq!(raw["params"][2], json!("completed"));
        assert_eq!(raw["params"][3], json!(4));
        assert_eq!(stmt.to_string(), stmt.sql);
    }
}
