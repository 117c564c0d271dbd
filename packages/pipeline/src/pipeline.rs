// ABOUTME: Staged specification generation pipeline
// ABOUTME: Orchestrates the three generation stages and single-call refinement, absorbing all failures into defaults

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{info, warn};

use speccraft_ai::{AiConfig, TextGeneration};

use crate::extract::extract_json;
use crate::mock::mock_specification;
use crate::prompts;
use crate::types::{ApiEndpoint, DbTable, EdgeCase, Module, Specification, UserStory};

/// Output of the combined third stage.
struct ApiDbEdgeCases {
    api_endpoints: Vec<ApiEndpoint>,
    db_schema: Vec<DbTable>,
    edge_cases: Vec<EdgeCase>,
}

/// The specification generation pipeline.
///
/// Holds an optional text-generation client and no other state; every
/// invocation is independent. Without a client, both `generate` and
/// `refine` return the fixed mock specification. Failures anywhere
/// (transport, extraction, schema mismatch) degrade to stage defaults
/// rather than propagating — neither entry point can fail. No call is
/// ever retried.
pub struct SpecPipeline {
    client: Option<Arc<dyn TextGeneration>>,
}

impl SpecPipeline {
    pub fn new(client: Option<Arc<dyn TextGeneration>>) -> Self {
        Self { client }
    }

    /// Build a pipeline from injected configuration. A config without
    /// an API key yields a client-less pipeline on the mock path.
    pub fn from_config(config: &AiConfig) -> Self {
        Self::new(
            config
                .client()
                .map(|c| Arc::new(c) as Arc<dyn TextGeneration>),
        )
    }

    pub fn has_client(&self) -> bool {
        self.client.is_some()
    }

    /// Generate a specification from free-form requirement text.
    ///
    /// Runs three strictly sequential stages; stage n+1 consumes the
    /// parsed output of stage n and never the other way around. A
    /// failure in one stage leaves the other stages' output intact.
    pub async fn generate(&self, requirement_text: &str) -> Specification {
        let Some(client) = &self.client else {
            info!("No text-generation backend configured, returning mock specification");
            return mock_specification();
        };

        let modules = self.extract_modules(client.as_ref(), requirement_text).await;
        let modules_json = to_json_or_empty_array(&modules);

        let user_stories = self
            .generate_user_stories(client.as_ref(), requirement_text, &modules_json)
            .await;
        let api_db_edge = self
            .generate_api_db_edge_cases(client.as_ref(), requirement_text, &modules_json)
            .await;

        Specification {
            modules,
            user_stories,
            api_endpoints: api_db_edge.api_endpoints,
            db_schema: api_db_edge.db_schema,
            edge_cases: api_db_edge.edge_cases,
        }
    }

    /// Refine an existing specification in one combined call.
    ///
    /// The previous specification is read-only input; refinement
    /// builds a new value. An unparseable response regresses to the
    /// full mock specification, never a partial merge.
    pub async fn refine(
        &self,
        requirement_text: &str,
        refinement_instructions: &str,
        previous_spec: Option<&Specification>,
    ) -> Specification {
        let Some(client) = &self.client else {
            info!("No text-generation backend configured, returning mock specification");
            return mock_specification();
        };

        let previous_json = previous_spec
            .and_then(|spec| serde_json::to_string_pretty(spec).ok())
            .unwrap_or_else(|| "None".to_string());
        let prompt =
            prompts::refine_prompt(requirement_text, &previous_json, refinement_instructions);

        match self
            .stage_value(client.as_ref(), prompts::REFINE_SYSTEM, prompt, "refine")
            .await
            .and_then(|value| match serde_json::from_value::<Specification>(value) {
                Ok(spec) => Some(spec),
                Err(e) => {
                    warn!("Refinement response did not match the specification shape: {}", e);
                    None
                }
            }) {
            Some(spec) => spec,
            None => {
                warn!("Refinement failed, falling back to mock specification");
                mock_specification()
            }
        }
    }

    /// Stage 1: extract high-level modules.
    ///
    /// Always yields at least one module so that downstream stages
    /// have a non-empty module list to reference.
    async fn extract_modules(
        &self,
        client: &dyn TextGeneration,
        requirement_text: &str,
    ) -> Vec<Module> {
        let prompt = prompts::extract_modules_prompt(requirement_text);
        let value = self
            .stage_value(client, prompts::MODULES_SYSTEM, prompt, "extract_modules")
            .await;

        let modules = match value {
            // A lone object is tolerated and wrapped into a one-element list.
            Some(Value::Object(obj)) => {
                decode_or_default::<Vec<Module>>(Value::Array(vec![Value::Object(obj)]), "modules")
            }
            Some(value @ Value::Array(_)) => decode_or_default::<Vec<Module>>(value, "modules"),
            Some(other) => {
                warn!("Stage extract_modules returned neither a list nor an object: {}", other);
                Vec::new()
            }
            None => Vec::new(),
        };

        if modules.is_empty() {
            return vec![Module {
                name: "Module 1".to_string(),
                description: "Extracted from requirements".to_string(),
            }];
        }
        modules
    }

    /// Stage 2: generate user stories. Stories are optional — on any
    /// failure the result is empty rather than fabricated.
    async fn generate_user_stories(
        &self,
        client: &dyn TextGeneration,
        requirement_text: &str,
        modules_json: &str,
    ) -> Vec<UserStory> {
        let prompt = prompts::user_stories_prompt(requirement_text, modules_json);
        match self
            .stage_value(client, prompts::USER_STORIES_SYSTEM, prompt, "user_stories")
            .await
        {
            Some(value) => decode_or_default(value, "user_stories"),
            None => Vec::new(),
        }
    }

    /// Stage 3: one call for API endpoints, DB schema, and edge cases.
    /// Each of the three keys defaults independently — a missing or
    /// unparseable key must not blank the other two.
    async fn generate_api_db_edge_cases(
        &self,
        client: &dyn TextGeneration,
        requirement_text: &str,
        modules_json: &str,
    ) -> ApiDbEdgeCases {
        let prompt = prompts::api_db_edge_cases_prompt(requirement_text, modules_json);
        let value = self
            .stage_value(
                client,
                prompts::API_DB_EDGE_CASES_SYSTEM,
                prompt,
                "api_db_edge_cases",
            )
            .await;

        match value {
            Some(value) => ApiDbEdgeCases {
                api_endpoints: decode_entries(value.get("api_endpoints"), "api_endpoints"),
                db_schema: decode_entries(value.get("db_schema"), "db_schema"),
                edge_cases: decode_entries(value.get("edge_cases"), "edge_cases"),
            },
            None => ApiDbEdgeCases {
                api_endpoints: Vec::new(),
                db_schema: Vec::new(),
                edge_cases: Vec::new(),
            },
        }
    }

    /// Run one completion call and extract its JSON payload.
    ///
    /// Transport failure and extraction failure are treated
    /// identically: log at warn and let the caller apply the stage
    /// default.
    async fn stage_value(
        &self,
        client: &dyn TextGeneration,
        system: &str,
        prompt: String,
        stage: &str,
    ) -> Option<Value> {
        match client.complete(system, &prompt).await {
            Ok(raw) => match extract_json(&raw) {
                Ok(value) => Some(value),
                Err(e) => {
                    warn!("Stage {} response was not valid JSON: {}", stage, e);
                    None
                }
            },
            Err(e) => {
                warn!("Stage {} completion call failed: {}", stage, e);
                None
            }
        }
    }
}

fn to_json_or_empty_array<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "[]".to_string())
}

/// Decode an entire stage payload, falling back to the type default on
/// schema mismatch.
fn decode_or_default<T: DeserializeOwned + Default>(value: Value, stage: &str) -> T {
    match serde_json::from_value(value) {
        Ok(parsed) => parsed,
        Err(e) => {
            warn!("Stage {} payload did not match the expected shape: {}", stage, e);
            T::default()
        }
    }
}

/// Decode one key of the combined stage-3 payload entry by entry.
/// Entries that fail to decode are dropped individually so a bad entry
/// under one key never blanks a sibling key.
fn decode_entries<T: DeserializeOwned>(value: Option<&Value>, key: &str) -> Vec<T> {
    let items = match value {
        Some(Value::Array(items)) => items,
        Some(other) => {
            warn!("Key {} was not a JSON array: {}", key, other);
            return Vec::new();
        }
        None => return Vec::new(),
    };

    items
        .iter()
        .filter_map(|item| match serde_json::from_value(item.clone()) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                warn!("Dropping {} entry that failed to decode: {}", key, e);
                None
            }
        })
        .collect()
}
