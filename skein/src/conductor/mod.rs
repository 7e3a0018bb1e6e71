//! Conductor (§4.7): the two-node plan_and_schedule/join state machine that
//! drives one user turn to completion (or a replan round-trip).

mod joiner;
mod planner;
mod state;

pub use joiner::JoinerNode;
pub use planner::PlannerNode;
pub use state::ConductorState;

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::error::AgentError;
use crate::graph::{CompiledStateGraph, RunContext, StateGraph, END, START};
use crate::llm::LlmClient;
use crate::prompts::ConductorPrompts;
use crate::stream::StreamWriter;
use crate::tools::ToolCatalog;

use joiner::JOIN;
use planner::PLAN_AND_SCHEDULE;

/// Default replan round cap (§4.7): the core mandates no cap, but every
/// implementation should carry one for safety.
pub const DEFAULT_MAX_ROUNDS: usize = 10;

#[derive(Clone, Debug)]
pub struct ConductorOptions {
    pub max_rounds: usize,
    pub cancellation: Option<CancellationToken>,
}

impl Default for ConductorOptions {
    fn default() -> Self {
        Self {
            max_rounds: DEFAULT_MAX_ROUNDS,
            cancellation: None,
        }
    }
}

/// Owns the compiled plan_and_schedule/join graph for a fixed LLM client,
/// tool catalog, and prompt set; `run` drives one conversation turn to
/// completion (or `AgentError::RoundLimitExceeded`).
pub struct Conductor {
    graph: CompiledStateGraph<ConductorState>,
    cancellation: Option<CancellationToken>,
}

impl Conductor {
    pub fn new(
        llm: Arc<dyn LlmClient>,
        catalog: Arc<ToolCatalog>,
        prompts: Arc<ConductorPrompts>,
        options: ConductorOptions,
    ) -> Result<Self, AgentError> {
        let mut graph: StateGraph<ConductorState> = StateGraph::new();
        graph.add_node(
            PLAN_AND_SCHEDULE,
            Arc::new(PlannerNode::new(llm.clone(), catalog, prompts.clone())),
        );
        graph.add_node(JOIN, Arc::new(JoinerNode::new(llm, prompts, options.max_rounds)));
        graph.add_edge(START, PLAN_AND_SCHEDULE);
        graph.add_edge(PLAN_AND_SCHEDULE, JOIN);
        graph.add_conditional_edges(
            JOIN,
            Arc::new(|state: &ConductorState| {
                if state.is_done() {
                    END.to_string()
                } else {
                    PLAN_AND_SCHEDULE.to_string()
                }
            }),
            None,
        );

        let graph = graph.compile()?;
        Ok(Self {
            graph,
            cancellation: options.cancellation,
        })
    }

    /// Runs one conversation turn to completion, discarding stream events.
    pub async fn run(&self, human_message: impl Into<String>) -> Result<ConductorState, AgentError> {
        self.run_stream(human_message, StreamWriter::noop()).await
    }

    /// Runs one conversation turn, emitting `StreamEvent`s through `writer` as the run progresses.
    pub async fn run_stream(
        &self,
        human_message: impl Into<String>,
        writer: StreamWriter<ConductorState>,
    ) -> Result<ConductorState, AgentError> {
        let state = ConductorState::new(human_message);
        let ctx = RunContext::new(writer, self.cancellation.clone());
        self.graph.invoke_with_context(state, &ctx).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::MockLlm;
    use crate::tools::mock::SearchTool;

    fn catalog() -> Arc<ToolCatalog> {
        let mut c = ToolCatalog::new();
        c.register(Arc::new(SearchTool::default()));
        Arc::new(c)
    }

    /// S5-shaped round trip: the first plan's observation isn't enough, the
    /// joiner asks to replan, the second plan supplies what's missing, and
    /// the joiner finishes.
    #[tokio::test]
    async fn replan_round_trip_reaches_final_response() {
        let llm = Arc::new(MockLlm::new([
            "Thought: search first\n1. search(query=\"a\")\n2. join()\n",
            r#"{"thought": "need more", "action": {"type": "replan", "feedback": "need b too"}}"#,
            "Thought: search second\n3. search(query=\"b\")\n4. join()\n",
            r#"{"thought": "enough now", "action": {"type": "finish", "response": "R-a and R-b"}}"#,
        ]));
        let conductor = Conductor::new(
            llm,
            catalog(),
            Arc::new(crate::prompts::default_from_embedded()),
            ConductorOptions::default(),
        )
        .unwrap();

        let state = conductor.run("find a and b").await.unwrap();
        assert!(state.is_done());
        assert_eq!(state.final_response(), Some("R-a and R-b"));
        assert!(state.messages.iter().any(|m| m.is_system()));
    }

    #[tokio::test]
    async fn single_round_finishes_without_replan() {
        let llm = Arc::new(MockLlm::new([
            "Thought: search\n1. search(query=\"a\")\n2. join()\n",
            r#"{"thought": "done", "action": {"type": "finish", "response": "R-a"}}"#,
        ]));
        let conductor = Conductor::new(
            llm,
            catalog(),
            Arc::new(crate::prompts::default_from_embedded()),
            ConductorOptions::default(),
        )
        .unwrap();

        let state = conductor.run("find a").await.unwrap();
        assert_eq!(state.final_response(), Some("R-a"));
    }

    #[tokio::test]
    async fn exceeding_max_rounds_surfaces_round_limit_error() {
        let llm = Arc::new(MockLlm::new([
            "1. search(query=\"a\")\n2. join()\n",
            r#"{"thought": "again", "action": {"type": "replan", "feedback": "still missing"}}"#,
        ]));
        let conductor = Conductor::new(
            llm,
            catalog(),
            Arc::new(crate::prompts::default_from_embedded()),
            ConductorOptions {
                max_rounds: 1,
                cancellation: None,
            },
        )
        .unwrap();

        let err = conductor.run("find a").await.unwrap_err();
        assert!(matches!(err, AgentError::RoundLimitExceeded(1)));
    }
}
