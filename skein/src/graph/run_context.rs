//! Per-invocation context threaded through a compiled graph run.

use std::fmt::Debug;
use std::marker::PhantomData;

use tokio_util::sync::CancellationToken;

use crate::stream::StreamWriter;

/// Context available to a node via `Node::run_with_context`.
///
/// Carries the stream writer used to emit `StreamEvent`s during a run and an
/// optional cancellation token. Unlike the teacher's `Runtime`, this carries
/// no checkpointer/store handles: this crate persists nothing across runs.
pub struct RunContext<S> {
    stream_writer: StreamWriter<S>,
    cancellation: Option<CancellationToken>,
    _marker: PhantomData<fn() -> S>,
}

impl<S> RunContext<S>
where
    S: Clone + Send + Sync + Debug + 'static,
{
    /// Builds a context with a no-op stream writer and no cancellation token.
    pub fn noop() -> Self {
        Self {
            stream_writer: StreamWriter::noop(),
            cancellation: None,
            _marker: PhantomData,
        }
    }

    /// Builds a context from an explicit stream writer and cancellation token.
    pub fn new(stream_writer: StreamWriter<S>, cancellation: Option<CancellationToken>) -> Self {
        Self {
            stream_writer,
            cancellation,
            _marker: PhantomData,
        }
    }

    /// The stream writer nodes should emit `StreamEvent`s through.
    pub fn stream_writer(&self) -> &StreamWriter<S> {
        &self.stream_writer
    }

    /// True once the caller has requested cancellation.
    pub fn is_cancelled(&self) -> bool {
        self.cancellation
            .as_ref()
            .map(|c| c.is_cancelled())
            .unwrap_or(false)
    }

    /// The raw cancellation token, if one was attached to this run.
    pub fn cancellation_token(&self) -> Option<&CancellationToken> {
        self.cancellation.as_ref()
    }
}

impl<S> Clone for RunContext<S> {
    fn clone(&self) -> Self {
        Self {
            stream_writer: self.stream_writer.clone(),
            cancellation: self.cancellation.clone(),
            _marker: PhantomData,
        }
    }
}
