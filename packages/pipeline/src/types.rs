// ABOUTME: Data model for generated specifications
// ABOUTME: Five-field Specification plus its element types, wire-compatible with the HTTP surface

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A high-level module extracted from the requirement text.
///
/// Later stages refer back to modules by name as a plain string tag;
/// there is no enforced referential integrity and mismatches are
/// tolerated silently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Module {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserStory {
    pub module: String,
    pub story: String,
    #[serde(default)]
    pub acceptance_criteria: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEndpoint {
    pub endpoint: String,
    pub method: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub request_schema: Value,
    #[serde(default)]
    pub response_schema: Value,
    pub module: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DbColumn {
    pub column_name: String,
    pub data_type: String,
    #[serde(default)]
    pub constraints: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DbTable {
    pub table_name: String,
    #[serde(default)]
    pub columns: Vec<DbColumn>,
    pub module: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeCase {
    pub module: String,
    pub scenario: String,
    pub handling: String,
}

/// The complete structured specification produced by one pipeline run.
///
/// Immutable once produced; refinement builds a new value from a
/// read-only previous one.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Specification {
    #[serde(default)]
    pub modules: Vec<Module>,
    #[serde(default)]
    pub user_stories: Vec<UserStory>,
    #[serde(default)]
    pub api_endpoints: Vec<ApiEndpoint>,
    #[serde(default)]
    pub db_schema: Vec<DbTable>,
    #[serde(default)]
    pub edge_cases: Vec<EdgeCase>,
}
