//! Shared Application State
//!
//! This module defines the `AppState` struct and the startup helpers that
//! validate the agent chain and build the model client it runs against.

use crate::{config::Config, prompts::load_prompts};
use anyhow::Context;
use async_openai::config::OpenAIConfig;
use mlviz_core::{Chain, ChainConfig, ConversationDriver, ModelClient, OpenAICompatibleClient};
use std::{path::Path, sync::Arc, time::Duration};
use tracing::{info, warn};

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub driver: ConversationDriver,
}

impl AppState {
    pub fn new(chain: Arc<Chain>, client: Arc<dyn ModelClient>, turn_timeout: Duration) -> Self {
        Self {
            driver: ConversationDriver::new(chain, client).with_turn_timeout(turn_timeout),
        }
    }
}

/// Applies prompt overrides and validates the chain. Any error here is fatal.
pub fn build_chain(mut chain_config: ChainConfig, prompts_path: Option<&Path>) -> anyhow::Result<Chain> {
    if let Some(path) = prompts_path {
        let prompts = load_prompts(path)?;
        for unknown in chain_config.override_instructions(&prompts) {
            warn!(prompt = %unknown, "Prompt file does not match any role; ignoring");
        }
        info!(count = prompts.len(), path = %path.display(), "Loaded role prompts");
    }
    Chain::build(chain_config).context("Invalid agent chain configuration")
}

/// Builds the OpenAI-compatible client for the configured provider.
pub fn build_model_client(config: &Config, chain: &Chain) -> Arc<dyn ModelClient> {
    let mut openai_config = OpenAIConfig::new().with_api_base(config.provider.api_base());
    match config.api_key() {
        Some(key) => openai_config = openai_config.with_api_key(key),
        None => warn!(provider = ?config.provider, "No API key configured for provider"),
    }

    let client = OpenAICompatibleClient::new(
        openai_config,
        config.chat_model.clone(),
        config.temperature,
    );
    if config.send_introductions {
        Arc::new(client.with_introductions(chain.roles()))
    } else {
        Arc::new(client)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mlviz_core::ConfigurationError;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_build_default_chain() {
        let chain = build_chain(ChainConfig::ml_explainer(), None).unwrap();
        assert_eq!(chain.roles().len(), 6);
    }

    #[test]
    fn test_build_chain_applies_prompt_overrides() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("visualization_agent.md"), "Draw ASCII art.\n").unwrap();
        fs::write(dir.path().join("system_prompt.md"), "unused").unwrap();

        let chain = build_chain(ChainConfig::ml_explainer(), Some(dir.path())).unwrap();
        let id = chain.role_id("visualization_agent").unwrap();
        assert_eq!(chain.role(id).instruction, "Draw ASCII art.");
    }

    #[test]
    fn test_malformed_table_fails_startup() {
        let mut config = ChainConfig::ml_explainer();
        config
            .transitions
            .push(("output_formatter".to_string(), vec!["image_generator".to_string()]));

        let err = build_chain(config, None).unwrap_err();
        assert_eq!(
            err.downcast_ref::<ConfigurationError>(),
            Some(&ConfigurationError::UnknownRole("image_generator".to_string()))
        );
    }

    #[test]
    fn test_missing_prompts_directory_fails_startup() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(build_chain(ChainConfig::ml_explainer(), Some(&missing)).is_err());
    }
}
