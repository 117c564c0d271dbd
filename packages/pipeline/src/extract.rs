// ABOUTME: Tolerant JSON extraction for model output
// ABOUTME: Strips markdown code fences and decodes strictly; failure is an explicit result, never a panic

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("response is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// Normalize raw model output into a parsed JSON value.
///
/// Models frequently wrap JSON in a markdown code fence, with or
/// without a `json` language tag. One leading and one trailing fence
/// marker are stripped and the remainder is decoded strictly. A
/// genuinely malformed payload is reported as `ExtractError`, not
/// repaired.
pub fn extract_json(raw: &str) -> Result<Value, ExtractError> {
    let mut content = raw.trim();

    if let Some(rest) = content.strip_prefix("```json") {
        content = rest;
    } else if let Some(rest) = content.strip_prefix("```") {
        content = rest;
    }
    if let Some(rest) = content.strip_suffix("```") {
        content = rest;
    }

    Ok(serde_json::from_str(content.trim())?)
}
