//! # Skein
//!
//! An LLM Compiler execution engine: a streaming plan parser, a DAG-aware
//! task scheduler, and a plan/schedule/join conductor loop that drives a
//! large language model through multi-step, tool-using tasks.
//!
//! ## Design
//!
//! The user's message enters the [`conductor::Conductor`]. Each round, the
//! planner prompt (or a re-plan prompt, when the last message carries replan
//! context) is built from the running conversation and the registered tool
//! catalog, then streamed from the LLM. The [`plan::PlanParser`] turns that
//! token stream into `Task` records as soon as each numbered action line
//! completes; the [`scheduler::Scheduler`] dispatches ready tasks concurrently,
//! resolving `$N` placeholders from already-completed tasks' outputs. Once
//! every task has run, the joiner asks the LLM whether the accumulated
//! observations answer the question — if not, it appends replan context and
//! the loop runs again, up to a configurable round cap.
//!
//! ## Main modules
//!
//! - [`conductor`]: [`Conductor`], [`ConductorOptions`], [`ConductorState`] — the plan/schedule/join loop.
//! - [`plan`]: [`PlanParser`], [`Task`] — streaming plan parsing and placeholder resolution.
//! - [`scheduler`]: [`Scheduler`] — DAG-aware task dispatch.
//! - [`tools`]: [`Tool`], [`ToolCatalog`], [`ToolSpec`] — the tool registry consulted by the planner.
//! - [`llm`]: [`LlmClient`] trait, [`MockLlm`], [`ChatOpenAI`].
//! - [`prompts`]: embedded plan/replan/join prompt YAML, [`ConductorPrompts`].
//! - [`graph`]: [`StateGraph`], [`CompiledStateGraph`], [`Node`], [`Next`] — the graph runtime the conductor runs on.
//! - [`message`]: [`Message`] — the conversation entry shared by every stage.
//! - [`stream`]: [`StreamWriter`], [`StreamEvent`] — live observability of a run.
//! - [`config`]: [`RunConfigSummary`], [`build_config_summary`] — startup summary for the CLI.
//! - [`cli_run`]: glue used by the `skein` binary to build and run a conductor from `RunOptions`.
//!
//! Key types are re-exported at crate root: `use skein::{Conductor, ConductorOptions, Message};`.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use skein::{ChatOpenAI, Conductor, ConductorOptions, ConductorPrompts, LlmClient, ToolCatalog};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let llm: Arc<dyn LlmClient> = Arc::new(ChatOpenAI::new("gpt-4o-mini"));
//! let catalog = Arc::new(ToolCatalog::new());
//! let prompts = Arc::new(skein::default_conductor_prompts());
//! let conductor = Conductor::new(llm, catalog, prompts, ConductorOptions::default())?;
//!
//! let state = conductor.run("what's 2 + 2?").await?;
//! println!("{}", state.final_response().unwrap_or_default());
//! # Ok(())
//! # }
//! ```

pub mod cli_run;
pub mod conductor;
pub mod config;
pub mod error;
pub mod graph;
pub mod llm;
pub mod message;
pub mod plan;
pub mod prompts;
pub mod scheduler;
pub mod stream;
pub mod tools;

pub use conductor::{Conductor, ConductorOptions, ConductorState, DEFAULT_MAX_ROUNDS};
pub use config::{
    build_config_summary, ConductorConfigSummary, ConfigSection, LlmConfigSummary,
    RunConfigSummary, RunConfigSummarySource, ToolConfigSummary,
};
pub use error::AgentError;
pub use graph::{
    log_graph_complete, log_graph_error, log_graph_start, log_node_complete, log_node_start,
    CompilationError, CompiledStateGraph, NameNode, Next, Node, NodeMiddleware, RunContext,
    StateGraph, END, START,
};
pub use llm::{ChatOpenAI, LlmClient, LlmResponse, LlmUsage, MockLlm, ToolCallDelta, ToolChoiceMode};
pub use message::Message;
pub use plan::{resolve_value, ParseError, PlanParser, Task, TaskTool};
pub use prompts::{
    default_from_embedded as default_conductor_prompts, load as load_conductor_prompts,
    load_or_default as load_conductor_prompts_or_default, ConductorPrompts, JoinPromptsFile,
    LoadError as PromptsLoadError, PlanPromptsFile, ReplanPromptsFile,
};
pub use scheduler::Scheduler;
pub use stream::{
    ChunkToStreamSender, MessageChunk, StreamEvent, StreamMetadata, StreamMode, StreamWriter,
    ToolStreamWriter,
};
pub use tools::{Tool, ToolCallContext, ToolCatalog, ToolError, ToolSpec};

pub use cli_run::{build_conductor, run_agent, RunError, RunOptions};

/// When running `cargo test -p skein`, initializes tracing from `RUST_LOG` so that
/// unit tests in `src/**` can print logs with `--nocapture`.
#[cfg(test)]
mod test_logging {
    use ctor::ctor;
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::Layer;

    #[ctor]
    fn init() {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        let _ = tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_test_writer()
                    .with_filter(filter),
            )
            .try_init();
    }
}
