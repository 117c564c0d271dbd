// ABOUTME: Stage prompts for specification generation
// ABOUTME: System instructions and user prompt builders for the three generation stages and refinement

pub const MODULES_SYSTEM: &str =
    "You are a software architect. Extract modules and features from requirements. Always return valid JSON.";

pub const USER_STORIES_SYSTEM: &str =
    "You are a product manager. Generate user stories following standard format. Always return valid JSON.";

pub const API_DB_EDGE_CASES_SYSTEM: &str =
    "You are a senior backend engineer. Generate production-ready API specs, database schemas, and edge cases. Always return valid JSON.";

pub const REFINE_SYSTEM: &str =
    "You are a software architect refining specifications. Always return valid JSON.";

/// Stage 1: extract high-level modules from the requirement text.
pub fn extract_modules_prompt(requirement_text: &str) -> String {
    format!(
        r#"Extract the high-level modules/features from the following requirement text.
Return a JSON array of objects, where each object has:
- "name": module/feature name
- "description": brief description

Requirement text:
{requirement_text}

Return only valid JSON array, no markdown formatting."#
    )
}

/// Stage 2: generate user stories for the extracted modules.
pub fn user_stories_prompt(requirement_text: &str, modules_json: &str) -> String {
    format!(
        r#"Generate detailed user stories for each module using standard user story format.
Each user story should have:
- "module": module name it belongs to
- "story": user story in format "As a [role], I want [feature] so that [benefit]"
- "acceptance_criteria": array of acceptance criteria

Modules:
{modules_json}

Requirement text:
{requirement_text}

Return only valid JSON array of user stories, no markdown formatting."#
    )
}

/// Stage 3: generate API endpoints, DB schema, and edge cases in one call.
pub fn api_db_edge_cases_prompt(requirement_text: &str, modules_json: &str) -> String {
    format!(
        r#"Generate production-level API endpoints, DB schema, and edge cases for each module.

For API endpoints, include:
- "endpoint": URL path
- "method": HTTP method
- "description": what it does
- "request_schema": JSON schema for request body
- "response_schema": JSON schema for response body
- "module": module name

For DB schema, include:
- "table_name": name of table
- "columns": array of {{column_name, data_type, constraints, description}}
- "module": module name

For edge cases, include:
- "module": module name
- "scenario": description of edge case
- "handling": how to handle it

Modules:
{modules_json}

Requirement text:
{requirement_text}

Return only valid JSON object with keys: "api_endpoints", "db_schema", "edge_cases", no markdown formatting."#
    )
}

/// Refinement: one combined call that rewrites a prior specification.
pub fn refine_prompt(
    requirement_text: &str,
    previous_spec_json: &str,
    refinement_instructions: &str,
) -> String {
    format!(
        r#"Refine the following specification based on the refinement instructions.

Original requirement:
{requirement_text}

Previous specification:
{previous_spec_json}

Refinement instructions:
{refinement_instructions}

Update the specification (modules, user_stories, api_endpoints, db_schema, edge_cases) according to the refinement instructions.
Return only valid JSON object with keys: "modules", "user_stories", "api_endpoints", "db_schema", "edge_cases", no markdown formatting."#
    )
}
