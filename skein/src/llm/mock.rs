//! Scripted LLM client for deterministic planner/joiner tests.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::AgentError;
use crate::message::Message;

use super::{LlmClient, LlmResponse};

/// Returns one scripted response per call, in order. Used to drive S5's
/// replan round-trip deterministically without a network call: script the
/// first plan, the joiner's `Replan`, the second plan, then the joiner's
/// `FinalResponse`.
pub struct MockLlm {
    responses: Mutex<Vec<String>>,
}

impl MockLlm {
    pub fn new(responses: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().map(Into::into).rev().collect()),
        }
    }

    /// A client that always returns the same fixed response.
    pub fn fixed(response: impl Into<String>) -> Self {
        Self::new([response.into()])
    }
}

#[async_trait]
impl LlmClient for MockLlm {
    async fn invoke(&self, _messages: &[Message]) -> Result<LlmResponse, AgentError> {
        let mut responses = self.responses.lock().expect("mock llm mutex poisoned");
        let content = responses
            .pop()
            .ok_or_else(|| AgentError::Llm("MockLlm ran out of scripted responses".to_string()))?;
        Ok(LlmResponse { content, usage: None })
    }
}
