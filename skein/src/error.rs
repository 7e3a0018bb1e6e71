//! Crate-wide error type.

use thiserror::Error;

use crate::graph::CompilationError;
use crate::plan::ParseError;

/// Top-level error surfaced to callers of the conductor.
///
/// Per-task failures inside a plan (argument resolution, tool invocation) are
/// never represented here: they are captured as `ERROR (...)` observation
/// strings per the scheduler's contract so a single bad task never aborts a
/// run. `AgentError` is reserved for failures the conductor cannot route
/// around: a malformed plan, an LLM transport failure, a joiner whose output
/// doesn't match the expected schema, a bad graph, or too many replan rounds.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("failed to parse plan: {0}")]
    Parse(#[from] ParseError),

    #[error("llm call failed: {0}")]
    Llm(String),

    #[error("joiner output did not match the expected schema: {0}")]
    SchemaViolation(String),

    #[error("graph error: {0}")]
    Graph(String),

    #[error("graph compilation failed: {0}")]
    Compilation(#[from] CompilationError),

    #[error("exceeded maximum replan rounds ({0})")]
    RoundLimitExceeded(usize),

    #[error("tool error: {0}")]
    Tool(String),

    #[error("prompt load error: {0}")]
    Prompt(#[from] crate::prompts::LoadError),
}
