//! Planner stage (§4.5): composes the plan/replan prompt, streams the LLM's
//! plan text into the scheduler, and appends the resulting `FunctionMessage`s.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::error::AgentError;
use crate::graph::{Next, Node, RunContext};
use crate::llm::LlmClient;
use crate::message::Message;
use crate::prompts::ConductorPrompts;
use crate::scheduler::Scheduler;
use crate::stream::ChunkToStreamSender;
use crate::tools::ToolCatalog;

use super::state::ConductorState;

pub const PLAN_AND_SCHEDULE: &str = "plan_and_schedule";

pub struct PlannerNode {
    llm: Arc<dyn LlmClient>,
    catalog: Arc<ToolCatalog>,
    prompts: Arc<ConductorPrompts>,
}

impl PlannerNode {
    pub fn new(llm: Arc<dyn LlmClient>, catalog: Arc<ToolCatalog>, prompts: Arc<ConductorPrompts>) -> Self {
        Self { llm, catalog, prompts }
    }

    fn system_prompt(&self, is_replan: bool, original_query: &str) -> String {
        let num_tools = self.catalog.num_tools();
        let descriptions = self.catalog.tool_descriptions();
        if is_replan {
            self.prompts.replan_system_prompt(num_tools, &descriptions, original_query)
        } else {
            self.prompts.plan_system_prompt(num_tools, &descriptions)
        }
    }
}

#[async_trait]
impl Node<ConductorState> for PlannerNode {
    fn id(&self) -> &str {
        PLAN_AND_SCHEDULE
    }

    async fn run(&self, state: ConductorState) -> Result<(ConductorState, Next), AgentError> {
        self.run_with_context(state, &RunContext::noop()).await
    }

    async fn run_with_context(
        &self,
        state: ConductorState,
        ctx: &RunContext<ConductorState>,
    ) -> Result<(ConductorState, Next), AgentError> {
        let is_replan = matches!(state.messages.last(), Some(Message::System(_)));
        let original_query = state
            .messages
            .iter()
            .find_map(|m| match m {
                Message::Human(text) => Some(text.as_str()),
                _ => None,
            })
            .unwrap_or_default();
        let system_prompt = self.system_prompt(is_replan, original_query);

        let mut llm_messages = Vec::with_capacity(state.messages.len() + 1);
        llm_messages.push(Message::system(system_prompt));
        llm_messages.extend(state.messages.iter().cloned());

        let (chunk_tx, mut chunk_rx) = mpsc::channel(32);
        let (text_tx, text_rx) = mpsc::channel(32);
        let sender = ChunkToStreamSender::new(ctx.stream_writer().clone(), self.id());

        let forward = tokio::spawn(async move {
            while let Some(chunk) = chunk_rx.recv().await {
                let content = chunk.content.clone();
                sender.send(chunk);
                if text_tx.send(content).await.is_err() {
                    break;
                }
            }
        });

        let scheduler = Scheduler::new(self.catalog.clone());
        let prior_messages = state.messages.clone();

        let (invoke_result, schedule_result) = tokio::join!(
            self.llm.invoke_stream(&llm_messages, Some(chunk_tx)),
            scheduler.schedule(&prior_messages, text_rx),
        );
        let _ = forward.await;

        invoke_result?;
        let new_messages = schedule_result?;

        let mut messages = state.messages;
        messages.extend(new_messages);

        Ok((
            ConductorState {
                messages,
                round: state.round,
            },
            Next::Continue,
        ))
    }
}
