//! Joiner stage (§4.6): asks the LLM to judge whether the plan's observations
//! answer the user's question, parsing its tolerant-JSON response.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::AgentError;
use crate::graph::{Next, Node, RunContext};
use crate::llm::LlmClient;
use crate::message::Message;
use crate::prompts::ConductorPrompts;

use super::state::ConductorState;

pub const JOIN: &str = "join";

#[derive(Debug, Deserialize)]
struct RawJoinOutputs {
    thought: String,
    action: RawAction,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum RawAction {
    Finish { response: String },
    Replan { feedback: String },
}

/// Extracts the constrained JSON object from an LLM response: the slice from
/// the first `{` to the last `}`, tolerating any surrounding prose.
fn extract_json(content: &str) -> Result<&str, AgentError> {
    let start = content
        .find('{')
        .ok_or_else(|| AgentError::SchemaViolation("no JSON object found in joiner response".to_string()))?;
    let end = content
        .rfind('}')
        .ok_or_else(|| AgentError::SchemaViolation("no JSON object found in joiner response".to_string()))?;
    if end < start {
        return Err(AgentError::SchemaViolation(
            "malformed JSON object in joiner response".to_string(),
        ));
    }
    Ok(&content[start..=end])
}

fn parse_join_outputs(content: &str) -> Result<RawJoinOutputs, AgentError> {
    let json = extract_json(content)?;
    serde_json::from_str(json).map_err(|e| AgentError::SchemaViolation(e.to_string()))
}

/// Trims `messages` to the "recent" window (§4.6): scan from the end until a
/// `HumanMessage` is encountered (inclusive), then restore chronological order.
fn recent_messages(messages: &[Message]) -> Vec<Message> {
    let mut collected = Vec::new();
    for message in messages.iter().rev() {
        let is_human = message.is_human();
        collected.push(message.clone());
        if is_human {
            break;
        }
    }
    collected.reverse();
    collected
}

pub struct JoinerNode {
    llm: Arc<dyn LlmClient>,
    prompts: Arc<ConductorPrompts>,
    max_rounds: usize,
}

impl JoinerNode {
    pub fn new(llm: Arc<dyn LlmClient>, prompts: Arc<ConductorPrompts>, max_rounds: usize) -> Self {
        Self {
            llm,
            prompts,
            max_rounds,
        }
    }
}

#[async_trait]
impl Node<ConductorState> for JoinerNode {
    fn id(&self) -> &str {
        JOIN
    }

    async fn run(&self, state: ConductorState) -> Result<(ConductorState, Next), AgentError> {
        self.run_with_context(state, &RunContext::noop()).await
    }

    async fn run_with_context(
        &self,
        state: ConductorState,
        _ctx: &RunContext<ConductorState>,
    ) -> Result<(ConductorState, Next), AgentError> {
        let recent = recent_messages(&state.messages);

        let mut llm_messages = Vec::with_capacity(recent.len() + 1);
        llm_messages.push(Message::system(self.prompts.join_system_prompt()));
        llm_messages.extend(recent);

        let response = self.llm.invoke(&llm_messages).await?;
        let outputs = parse_join_outputs(&response.content)?;

        let mut messages = state.messages;
        messages.push(Message::ai(format!("Thought: {}", outputs.thought)));

        match outputs.action {
            RawAction::Finish { response } => {
                messages.push(Message::ai(response));
                Ok((
                    ConductorState {
                        messages,
                        round: state.round,
                    },
                    Next::Continue,
                ))
            }
            RawAction::Replan { feedback } => {
                if state.round + 1 >= self.max_rounds {
                    return Err(AgentError::RoundLimitExceeded(self.max_rounds));
                }
                messages.push(Message::system(format!("Context from last attempt: {feedback}")));
                Ok((
                    ConductorState {
                        messages,
                        round: state.round + 1,
                    },
                    Next::Continue,
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_json_tolerates_surrounding_prose() {
        let content = "here you go: {\"thought\": \"ok\", \"action\": {\"type\": \"finish\", \"response\": \"done\"}} thanks";
        let json = extract_json(content).unwrap();
        let parsed = parse_join_outputs(json).unwrap();
        assert_eq!(parsed.thought, "ok");
        assert!(matches!(parsed.action, RawAction::Finish { response } if response == "done"));
    }

    #[test]
    fn parse_join_outputs_rejects_missing_json() {
        assert!(parse_join_outputs("no json here").is_err());
    }

    #[test]
    fn recent_messages_scans_back_to_last_human_inclusive() {
        let messages = vec![
            Message::human("first"),
            Message::ai("ignored earlier turn"),
            Message::human("second"),
            Message::function("search", "R-a", 1, Default::default()),
        ];
        let recent = recent_messages(&messages);
        assert_eq!(recent.len(), 2);
        assert!(recent[0].is_human());
        assert_eq!(recent[0].text(), "second");
    }
}
