// ABOUTME: Text-generation client boundary for Speccraft
// ABOUTME: Provides the TextGeneration trait, the Anthropic implementation, and injected config

pub mod client;
pub mod config;

pub use client::{AiError, AiResult, AnthropicClient, TextGeneration, Usage};
pub use config::AiConfig;
