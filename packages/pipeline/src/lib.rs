// ABOUTME: Speccraft pipeline library - turns free-form requirements into structured specifications
// ABOUTME: Provides the staged generation pipeline, JSON extraction, and the deterministic mock fallback

pub mod extract;
pub mod mock;
pub mod pipeline;
pub mod prompts;
pub mod types;

pub use extract::{extract_json, ExtractError};
pub use mock::mock_specification;
pub use pipeline::SpecPipeline;
pub use types::{ApiEndpoint, DbColumn, DbTable, EdgeCase, Module, Specification, UserStory};
