// ABOUTME: History record type definitions
// ABOUTME: One record per pipeline invocation: input, serialized output, request-type tag, user, timestamp

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use speccraft_pipeline::Specification;

/// Which pipeline entry point produced a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestKind {
    Generate,
    Refine,
}

impl RequestKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestKind::Generate => "generate",
            RequestKind::Refine => "refine",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "generate" => Some(RequestKind::Generate),
            "refine" => Some(RequestKind::Refine),
            _ => None,
        }
    }
}

/// One persisted pipeline invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecRequestRecord {
    pub id: i64,
    pub user_id: i64,
    pub input_text: String,
    #[serde(rename = "output_json")]
    pub specification: Specification,
    pub request_type: RequestKind,
    pub created_at: DateTime<Utc>,
}
