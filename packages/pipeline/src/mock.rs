// ABOUTME: Deterministic fallback specification
// ABOUTME: Single fixed value used whenever no backend is configured or refinement output is unusable

use serde_json::json;

use crate::types::{
    ApiEndpoint, DbColumn, DbTable, EdgeCase, Module, Specification, UserStory,
};

/// The fixed "User Management" specification used as a fallback.
///
/// Every fallback site references this one function so that the
/// output is bit-identical across calls: no randomness, no timestamps.
pub fn mock_specification() -> Specification {
    Specification {
        modules: vec![Module {
            name: "User Management".to_string(),
            description: "Handles user registration, authentication, and profile management"
                .to_string(),
        }],
        user_stories: vec![UserStory {
            module: "User Management".to_string(),
            story: "As a user, I want to register an account so that I can access the system"
                .to_string(),
            acceptance_criteria: vec![
                "User can provide email and password".to_string(),
                "System validates email format".to_string(),
                "System stores user securely".to_string(),
            ],
        }],
        api_endpoints: vec![ApiEndpoint {
            endpoint: "/api/users/register".to_string(),
            method: "POST".to_string(),
            description: "Register a new user".to_string(),
            request_schema: json!({
                "email": "string",
                "password": "string"
            }),
            response_schema: json!({
                "user_id": "integer",
                "email": "string"
            }),
            module: "User Management".to_string(),
        }],
        db_schema: vec![DbTable {
            table_name: "users".to_string(),
            columns: vec![
                DbColumn {
                    column_name: "id".to_string(),
                    data_type: "INTEGER".to_string(),
                    constraints: "PRIMARY KEY".to_string(),
                    description: "User ID".to_string(),
                },
                DbColumn {
                    column_name: "email".to_string(),
                    data_type: "VARCHAR(255)".to_string(),
                    constraints: "UNIQUE NOT NULL".to_string(),
                    description: "User email".to_string(),
                },
            ],
            module: "User Management".to_string(),
        }],
        edge_cases: vec![EdgeCase {
            module: "User Management".to_string(),
            scenario: "User tries to register with existing email".to_string(),
            handling: "Return 400 error with message 'Email already exists'".to_string(),
        }],
    }
}
