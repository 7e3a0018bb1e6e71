//! `LlmClient` backed by the OpenAI chat completions API.

use async_openai::config::OpenAIConfig;
use async_openai::types::{
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
    CreateChatCompletionRequestArgs,
};
use async_openai::Client;
use async_trait::async_trait;

use crate::error::AgentError;
use crate::message::Message;

use super::{LlmClient, LlmResponse, LlmUsage};

/// Talks to an OpenAI-compatible chat completions endpoint.
///
/// `Message::Function` entries (tool observations) are rendered as assistant
/// turns prefixed with the tool name: the chat completions API has no
/// first-class "function result" role that fits this crate's message shape
/// once tool calling is driven by the plan parser rather than native
/// tool-calling.
pub struct ChatOpenAI {
    client: Client<OpenAIConfig>,
    model: String,
}

impl ChatOpenAI {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            model: model.into(),
        }
    }

    pub fn with_api_key(model: impl Into<String>, api_key: impl Into<String>) -> Self {
        let config = OpenAIConfig::new().with_api_key(api_key);
        Self {
            client: Client::with_config(config),
            model: model.into(),
        }
    }

    fn to_request_messages(
        messages: &[Message],
    ) -> Result<Vec<ChatCompletionRequestMessage>, AgentError> {
        messages
            .iter()
            .map(|message| {
                let built = match message {
                    Message::Human(text) => ChatCompletionRequestUserMessageArgs::default()
                        .content(text.clone())
                        .build()
                        .map(ChatCompletionRequestMessage::from),
                    Message::System(text) => ChatCompletionRequestSystemMessageArgs::default()
                        .content(text.clone())
                        .build()
                        .map(ChatCompletionRequestMessage::from),
                    Message::Ai(text) => ChatCompletionRequestAssistantMessageArgs::default()
                        .content(text.clone())
                        .build()
                        .map(ChatCompletionRequestMessage::from),
                    Message::Function { name, content, .. } => {
                        ChatCompletionRequestAssistantMessageArgs::default()
                            .content(format!("[{name}] {content}"))
                            .build()
                            .map(ChatCompletionRequestMessage::from)
                    }
                };
                built.map_err(|e| AgentError::Llm(e.to_string()))
            })
            .collect()
    }
}

#[async_trait]
impl LlmClient for ChatOpenAI {
    async fn invoke(&self, messages: &[Message]) -> Result<LlmResponse, AgentError> {
        let request = CreateChatCompletionRequestArgs::default()
            .model(self.model.clone())
            .messages(Self::to_request_messages(messages)?)
            .build()
            .map_err(|e| AgentError::Llm(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| AgentError::Llm(e.to_string()))?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AgentError::Llm("openai returned no choices".to_string()))?;
        let content = choice.message.content.unwrap_or_default();
        let usage = response.usage.map(|u| LlmUsage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        });

        Ok(LlmResponse { content, usage })
    }
}
