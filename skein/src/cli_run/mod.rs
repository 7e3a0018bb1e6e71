//! Run orchestration for the conductor loop: builds an LLM client, tool
//! catalog, and prompt set from [`RunOptions`], then drives one turn.
//!
//! Used by the `skein` CLI binary (local, single-process) for both the
//! one-shot and `-i/--interactive` REPL paths.

use std::sync::Arc;

use thiserror::Error;

use crate::conductor::{Conductor, ConductorOptions, ConductorState};
use crate::error::AgentError;
use crate::llm::{ChatOpenAI, LlmClient};
use crate::prompts;
use crate::stream::{StreamEvent, StreamWriter};
use crate::tools::mock::{GetTempTool, SearchTool, SendMailTool};
use crate::tools::ToolCatalog;

/// Env var naming the chat completion model; defaults to [`DEFAULT_MODEL`].
pub const MODEL_ENV: &str = "SKEIN_MODEL";
const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Options for one conductor run, supplied by the CLI.
#[derive(Clone, Debug)]
pub struct RunOptions {
    pub message: String,
    /// Chat completion model name; `None` falls back to `SKEIN_MODEL` or [`DEFAULT_MODEL`].
    pub model: Option<String>,
    /// Replan round cap; `None` falls back to `Conductor`'s default.
    pub max_rounds: Option<usize>,
    pub verbose: bool,
    pub output_json: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            message: String::new(),
            model: None,
            max_rounds: None,
            verbose: false,
            output_json: false,
        }
    }
}

#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Agent(#[from] AgentError),
}

fn resolved_model(opts: &RunOptions) -> String {
    opts.model
        .clone()
        .or_else(|| std::env::var(MODEL_ENV).ok())
        .unwrap_or_else(|| DEFAULT_MODEL.to_string())
}

/// The demo tool catalog shipped with the CLI: `search`, `get_temp`, `send_mail`.
///
/// Real-world tool implementations are out of scope for this crate (§1); this
/// small set is what the spec earmarks for both scenario tests and demos.
pub fn demo_tool_catalog() -> ToolCatalog {
    let mut catalog = ToolCatalog::new();
    catalog
        .register(Arc::new(SearchTool::default()))
        .register(Arc::new(GetTempTool { temperature: 22 }))
        .register(Arc::new(SendMailTool::default()));
    catalog
}

/// Builds a `Conductor` wired to `ChatOpenAI`, the demo tool catalog, and the
/// embedded (or on-disk override) prompt set.
pub fn build_conductor(opts: &RunOptions) -> Result<Conductor, RunError> {
    let llm: Arc<dyn LlmClient> = Arc::new(ChatOpenAI::new(resolved_model(opts)));
    let catalog = Arc::new(demo_tool_catalog());
    let prompts = Arc::new(prompts::load_or_default(None));
    let conductor_opts = ConductorOptions {
        max_rounds: opts
            .max_rounds
            .unwrap_or(crate::conductor::DEFAULT_MAX_ROUNDS),
        cancellation: None,
    };
    Ok(Conductor::new(llm, catalog, prompts, conductor_opts)?)
}

/// Runs one conversation turn. When `on_event` is `Some`, every `StreamEvent`
/// is forwarded to it as the run progresses; otherwise the run executes with
/// a no-op writer and only the final state is returned.
pub async fn run_agent(
    opts: &RunOptions,
    on_event: Option<Box<dyn FnMut(StreamEvent<ConductorState>) + Send>>,
) -> Result<ConductorState, RunError> {
    let conductor = build_conductor(opts)?;

    let Some(mut on_event) = on_event else {
        return Ok(conductor.run(opts.message.clone()).await?);
    };

    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    let forward = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            on_event(event);
        }
    });
    let writer = StreamWriter::channel(tx);
    let state = conductor.run_stream(opts.message.clone(), writer).await?;
    forward.abort();
    Ok(state)
}
