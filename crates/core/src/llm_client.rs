use crate::role::{Message, Role};
use async_openai::{
    Client,
    config::OpenAIConfig,
    error::OpenAIError,
    types::{
        ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs, CreateChatCompletionResponse,
    },
};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// Failures of the hosted model collaborator. None of them are retried.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("model request failed: {0}")]
    Api(#[from] OpenAIError),
    #[error("model response had no text content")]
    EmptyResponse,
    #[error("model call timed out after {0:?}")]
    Timeout(Duration),
}

/// The external model collaborator: produces one turn of text for a role.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Asks the model to speak as `role`, given everything said so far.
    async fn complete(&self, role: &Role, log: &[Message]) -> Result<String, UpstreamError>;
}

/// An implementation of `ModelClient` for any OpenAI-compatible API.
pub struct OpenAICompatibleClient {
    client: Client<OpenAIConfig>,
    model: String,
    temperature: f32,
    introductions: Option<String>,
}

impl OpenAICompatibleClient {
    /// Creates a new client for an OpenAI-compatible service.
    ///
    /// # Arguments
    ///
    /// * `config` - The configuration for the OpenAI client, including API key and base URL.
    /// * `model` - The model identifier to use for chat completions (e.g., "gpt-3.5-turbo").
    /// * `temperature` - Sampling temperature applied to every turn.
    pub fn new(config: OpenAIConfig, model: String, temperature: f32) -> Self {
        Self {
            client: Client::with_config(config),
            model,
            temperature,
            introductions: None,
        }
    }

    /// Appends a participant roster to every system prompt.
    pub fn with_introductions<'a>(mut self, participants: impl IntoIterator<Item = &'a Role>) -> Self {
        self.introductions = Some(introductions(participants));
        self
    }
}

/// Renders the roster block that tells each role who else is in the conversation.
pub fn introductions<'a>(participants: impl IntoIterator<Item = &'a Role>) -> String {
    let mut block = String::from("Hello everyone. We have assembled a great team today to answer questions and solve tasks. In attendance are:\n");
    for role in participants {
        block.push('\n');
        block.push_str(&role.name);
        block.push_str(": ");
        block.push_str(role.instruction.lines().next().unwrap_or_default());
    }
    block
}

/// Builds the chat transcript seen by `role`.
///
/// Messages the role wrote itself are replayed as assistant turns; everything
/// else arrives as a named user turn.
pub fn build_transcript(
    role: &Role,
    log: &[Message],
    introductions: Option<&str>,
) -> Result<Vec<ChatCompletionRequestMessage>, OpenAIError> {
    let system_prompt = match introductions {
        Some(intro) => format!("{}\n\n{}", role.instruction, intro),
        None => role.instruction.clone(),
    };

    let mut messages: Vec<ChatCompletionRequestMessage> = vec![
        ChatCompletionRequestSystemMessageArgs::default()
            .content(system_prompt)
            .build()?
            .into(),
    ];
    for msg in log {
        if msg.sender == role.name {
            messages.push(
                ChatCompletionRequestAssistantMessageArgs::default()
                    .content(msg.content.clone())
                    .build()?
                    .into(),
            );
        } else {
            messages.push(
                ChatCompletionRequestUserMessageArgs::default()
                    .content(msg.content.clone())
                    .name(msg.sender.clone())
                    .build()?
                    .into(),
            );
        }
    }
    Ok(messages)
}

#[async_trait]
impl ModelClient for OpenAICompatibleClient {
    async fn complete(&self, role: &Role, log: &[Message]) -> Result<String, UpstreamError> {
        let messages = build_transcript(role, log, self.introductions.as_deref())?;

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .temperature(self.temperature)
            .messages(messages)
            .build()?;

        debug!(role = %role.name, history = log.len(), model = %self.model, "Requesting completion");
        let response: CreateChatCompletionResponse = self.client.chat().create(request).await?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(UpstreamError::EmptyResponse)
    }
}
