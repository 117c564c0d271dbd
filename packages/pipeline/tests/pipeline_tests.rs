// ABOUTME: Integration tests for the specification pipeline
// ABOUTME: Exercises stage sequencing, fallback behavior, and the deterministic mock path

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use pretty_assertions::assert_eq;
use serde_json::json;

use speccraft_ai::{AiError, AiResult, TextGeneration};
use speccraft_pipeline::{mock_specification, Module, SpecPipeline, Specification};

/// Returns one canned response per completion call, in order, and
/// records the prompts it was given.
struct ScriptedClient {
    responses: Mutex<VecDeque<AiResult<String>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedClient {
    fn new(responses: Vec<AiResult<String>>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into_iter().collect()),
            prompts: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl TextGeneration for ScriptedClient {
    async fn complete(&self, _system: &str, user_prompt: &str) -> AiResult<String> {
        self.prompts.lock().unwrap().push(user_prompt.to_string());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(AiError::ApiError("script exhausted".to_string())))
    }
}

fn pipeline_with(responses: Vec<AiResult<String>>) -> SpecPipeline {
    SpecPipeline::new(Some(ScriptedClient::new(responses) as Arc<dyn TextGeneration>))
}

fn placeholder_module() -> Module {
    Module {
        name: "Module 1".to_string(),
        description: "Extracted from requirements".to_string(),
    }
}

#[tokio::test]
async fn no_client_returns_identical_mock_for_generate_and_refine() {
    let pipeline = SpecPipeline::new(None);
    assert!(!pipeline.has_client());

    let first = pipeline.generate("Build a todo app").await;
    let second = pipeline.generate("Build a todo app").await;
    assert_eq!(first, mock_specification());
    assert_eq!(first, second);

    let refined = pipeline.refine("Build a todo app", "add tags", Some(&first)).await;
    assert_eq!(refined, mock_specification());
}

#[tokio::test]
async fn generate_assembles_all_three_stages() {
    let pipeline = pipeline_with(vec![
        Ok(json!([
            {"name": "Tasks", "description": "Task CRUD"},
            {"name": "Tags", "description": "Labeling"}
        ])
        .to_string()),
        Ok(json!([{
            "module": "Tasks",
            "story": "As a user, I want to add tasks so that I can track work",
            "acceptance_criteria": ["Task appears in the list"]
        }])
        .to_string()),
        Ok(json!({
            "api_endpoints": [{
                "endpoint": "/api/tasks",
                "method": "POST",
                "description": "Create a task",
                "request_schema": {"title": "string"},
                "response_schema": {"id": "integer"},
                "module": "Tasks"
            }],
            "db_schema": [{
                "table_name": "tasks",
                "columns": [{
                    "column_name": "id",
                    "data_type": "INTEGER",
                    "constraints": "PRIMARY KEY",
                    "description": "Task ID"
                }],
                "module": "Tasks"
            }],
            "edge_cases": [{
                "module": "Tasks",
                "scenario": "Empty task title",
                "handling": "Reject with validation error"
            }]
        })
        .to_string()),
    ]);

    let spec = pipeline.generate("Build a todo app").await;
    assert_eq!(spec.modules.len(), 2);
    assert_eq!(spec.modules[0].name, "Tasks");
    assert_eq!(spec.user_stories.len(), 1);
    assert_eq!(spec.api_endpoints.len(), 1);
    assert_eq!(spec.api_endpoints[0].method, "POST");
    assert_eq!(spec.db_schema.len(), 1);
    assert_eq!(spec.db_schema[0].columns.len(), 1);
    assert_eq!(spec.edge_cases.len(), 1);
}

#[tokio::test]
async fn fenced_responses_are_parsed() {
    let pipeline = pipeline_with(vec![
        Ok("```json\n[{\"name\": \"Search\", \"description\": \"Find things\"}]\n```".to_string()),
        Ok("```\n[]\n```".to_string()),
        Ok("```json\n{\"api_endpoints\": [], \"db_schema\": [], \"edge_cases\": []}\n```".to_string()),
    ]);

    let spec = pipeline.generate("Build a search engine").await;
    assert_eq!(spec.modules.len(), 1);
    assert_eq!(spec.modules[0].name, "Search");
}

#[tokio::test]
async fn stage_one_garbage_yields_placeholder_module() {
    let pipeline = pipeline_with(vec![
        Ok("not json at all".to_string()),
        Ok("[]".to_string()),
        Ok("{}".to_string()),
    ]);

    let spec = pipeline.generate("Build a todo app").await;
    assert_eq!(spec.modules, vec![placeholder_module()]);
}

#[tokio::test]
async fn stage_one_lone_object_is_wrapped_into_a_list() {
    let pipeline = pipeline_with(vec![
        Ok(json!({"name": "Billing", "description": "Invoices"}).to_string()),
        Ok("[]".to_string()),
        Ok("{}".to_string()),
    ]);

    let spec = pipeline.generate("Invoice my customers").await;
    assert_eq!(spec.modules.len(), 1);
    assert_eq!(spec.modules[0].name, "Billing");
}

#[tokio::test]
async fn stage_two_garbage_keeps_stage_one_modules() {
    let pipeline = pipeline_with(vec![
        Ok(json!([{"name": "Tasks", "description": "Task CRUD"}]).to_string()),
        Ok("sorry, I cannot produce JSON today".to_string()),
        Ok(json!({
            "api_endpoints": [],
            "db_schema": [],
            "edge_cases": [{
                "module": "Tasks",
                "scenario": "Duplicate task",
                "handling": "De-duplicate by title"
            }]
        })
        .to_string()),
    ]);

    let spec = pipeline.generate("Build a todo app").await;
    assert_eq!(spec.modules.len(), 1);
    assert_eq!(spec.modules[0].name, "Tasks");
    assert!(spec.user_stories.is_empty());
    assert_eq!(spec.edge_cases.len(), 1);
}

#[tokio::test]
async fn stage_three_missing_keys_default_independently() {
    let pipeline = pipeline_with(vec![
        Ok(json!([{"name": "Tasks", "description": "Task CRUD"}]).to_string()),
        Ok("[]".to_string()),
        Ok(json!({
            "api_endpoints": [{
                "endpoint": "/api/tasks",
                "method": "GET",
                "description": "List tasks",
                "module": "Tasks"
            }]
        })
        .to_string()),
    ]);

    let spec = pipeline.generate("Build a todo app").await;
    assert_eq!(spec.api_endpoints.len(), 1);
    assert!(spec.db_schema.is_empty());
    assert!(spec.edge_cases.is_empty());
}

#[tokio::test]
async fn transport_failures_degrade_to_stage_defaults() {
    let pipeline = pipeline_with(vec![
        Err(AiError::ApiError("API returned 500".to_string())),
        Err(AiError::ApiError("API returned 500".to_string())),
        Err(AiError::ApiError("API returned 500".to_string())),
    ]);

    let spec = pipeline.generate("Build a todo app").await;
    assert_eq!(spec.modules, vec![placeholder_module()]);
    assert!(spec.user_stories.is_empty());
    assert!(spec.api_endpoints.is_empty());
    assert!(spec.db_schema.is_empty());
    assert!(spec.edge_cases.is_empty());
}

#[tokio::test]
async fn empty_requirement_text_still_produces_a_specification() {
    let pipeline = pipeline_with(vec![
        Ok("[]".to_string()),
        Ok("[]".to_string()),
        Ok("{}".to_string()),
    ]);

    let spec = pipeline.generate("").await;
    assert_eq!(spec.modules, vec![placeholder_module()]);
}

#[tokio::test]
async fn refine_parses_a_full_specification() {
    let previous = mock_specification();
    let pipeline = pipeline_with(vec![Ok(json!({
        "modules": [{"name": "User Management", "description": "Accounts"}],
        "user_stories": [],
        "api_endpoints": [],
        "db_schema": [],
        "edge_cases": [{
            "module": "User Management",
            "scenario": "Password reset for unknown email",
            "handling": "Respond 200 without revealing account existence"
        }]
    })
    .to_string())]);

    let refined = pipeline
        .refine("Build user accounts", "add password reset", Some(&previous))
        .await;
    assert_eq!(refined.modules.len(), 1);
    assert_eq!(refined.edge_cases.len(), 1);
    // The previous specification is read-only input, untouched.
    assert_eq!(previous, mock_specification());
}

#[tokio::test]
async fn refine_failure_regresses_to_mock_not_a_partial_merge() {
    let mut previous = mock_specification();
    previous.modules.push(Module {
        name: "Billing".to_string(),
        description: "Invoices".to_string(),
    });

    let pipeline = pipeline_with(vec![Ok("definitely not json".to_string())]);
    let refined = pipeline
        .refine("Build user accounts", "add billing", Some(&previous))
        .await;

    assert_eq!(refined, mock_specification());
    assert_ne!(refined, previous);
}

#[tokio::test]
async fn refine_without_previous_spec_sends_none_marker() {
    let client = ScriptedClient::new(vec![Ok(json!({"modules": []}).to_string())]);
    let pipeline = SpecPipeline::new(Some(client.clone() as Arc<dyn TextGeneration>));

    let refined = pipeline.refine("Build a todo app", "start over", None).await;
    // An object with empty sections is a valid (if sparse) refinement.
    assert_eq!(refined, Specification::default());

    let prompts = client.prompts.lock().unwrap();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("Previous specification:\nNone"));
    assert!(prompts[0].contains("start over"));
}
