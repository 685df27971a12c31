//! Typed TestRail entities.
//!
//! Only the identifying fields are typed; everything else TestRail sends is
//! kept in `extra` so listings can be dumped without loss.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A TestRail project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: u64,
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Project {
    pub fn new(id: u64, name: &str) -> Self {
        Project {
            id,
            name: name.to_string(),
            extra: Map::new(),
        }
    }
}

/// A test suite inside a project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suite {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub project_id: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Suite {
    pub fn new(id: u64, project_id: u64, name: &str) -> Self {
        Suite {
            id,
            name: name.to_string(),
            project_id: Some(project_id),
            extra: Map::new(),
        }
    }
}

/// A test run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Run {
    pub id: u64,
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A case priority level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Priority {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub short_name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
