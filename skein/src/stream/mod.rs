//! Streaming event types emitted during a conductor run.
//!
//! Simplified relative to the teacher's original: no Checkpoints/Tasks/Debug
//! variants (those are tied to persistence and multi-agent-type dispatch,
//! both out of scope here). A run can still be observed live via
//! `StreamWriter`, which the CLI and `--json` output consume.

use std::fmt::Debug;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::mpsc;

/// Which kinds of events a caller wants to receive from a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreamMode {
    /// Full state snapshot after each node.
    Values,
    /// `(node_id, state)` after each node.
    Updates,
    /// Token-level chunks as the LLM streams a response.
    Messages,
    /// Tool-emitted custom events.
    Custom,
}

/// Metadata attached to a `Messages` event: which conductor node is streaming.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StreamMetadata {
    pub node: String,
}

/// One chunk of an LLM's streamed response.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MessageChunk {
    pub content: String,
}

/// An event observable during a conductor run.
#[derive(Clone, Debug)]
pub enum StreamEvent<S> {
    Values(S),
    Updates { node_id: String, state: S },
    Messages {
        chunk: MessageChunk,
        metadata: StreamMetadata,
    },
    Custom(Value),
}

/// Type-erased sink nodes/tools emit `StreamEvent`s through.
///
/// Construction is generic over `S`; the emit closure is boxed so callers
/// don't need to thread a channel type through every node signature.
#[derive(Clone)]
pub struct StreamWriter<S> {
    emit_fn: Arc<dyn Fn(StreamEvent<S>) -> bool + Send + Sync>,
}

impl<S> StreamWriter<S>
where
    S: Clone + Send + Sync + Debug + 'static,
{
    /// A writer that discards every event; used when streaming isn't requested.
    pub fn noop() -> Self {
        Self {
            emit_fn: Arc::new(|_| true),
        }
    }

    /// Builds a writer backed by an mpsc sender.
    pub fn channel(tx: mpsc::UnboundedSender<StreamEvent<S>>) -> Self {
        Self {
            emit_fn: Arc::new(move |event| tx.send(event).is_ok()),
        }
    }

    /// Emits an event; returns `false` if the receiving end has gone away.
    pub fn emit(&self, event: StreamEvent<S>) -> bool {
        (self.emit_fn)(event)
    }

    /// Narrows this writer to a tool-facing handle that only emits `Custom` events.
    pub fn as_tool_writer(&self) -> ToolStreamWriter {
        let emit_fn = self.emit_fn.clone();
        ToolStreamWriter {
            emit_fn: Arc::new(move |value| {
                emit_fn(StreamEvent::Custom(value));
                true
            }),
        }
    }
}

/// A narrower writer handed to tools: they can only emit `Custom` JSON events,
/// not full state snapshots (tools don't know the conductor's state type).
#[derive(Clone)]
pub struct ToolStreamWriter {
    emit_fn: Arc<dyn Fn(Value) -> bool + Send + Sync>,
}

impl ToolStreamWriter {
    pub fn noop() -> Self {
        Self {
            emit_fn: Arc::new(|_| true),
        }
    }

    pub fn emit_custom(&self, value: Value) -> bool {
        (self.emit_fn)(value)
    }
}

impl Debug for ToolStreamWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ToolStreamWriter")
    }
}

/// Bridges a channel of `MessageChunk`s into `StreamEvent::Messages` on a `StreamWriter`.
pub struct ChunkToStreamSender<S> {
    writer: StreamWriter<S>,
    node: String,
}

impl<S> ChunkToStreamSender<S>
where
    S: Clone + Send + Sync + Debug + 'static,
{
    pub fn new(writer: StreamWriter<S>, node: impl Into<String>) -> Self {
        Self {
            writer,
            node: node.into(),
        }
    }

    pub fn send(&self, chunk: MessageChunk) -> bool {
        self.writer.emit(StreamEvent::Messages {
            chunk,
            metadata: StreamMetadata {
                node: self.node.clone(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug)]
    struct DummyState(i32);

    #[test]
    fn noop_writer_accepts_every_event_and_reports_success() {
        let writer: StreamWriter<DummyState> = StreamWriter::noop();
        assert!(writer.emit(StreamEvent::Values(DummyState(1))));
    }

    #[tokio::test]
    async fn channel_writer_delivers_events_to_receiver() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let writer: StreamWriter<DummyState> = StreamWriter::channel(tx);
        assert!(writer.emit(StreamEvent::Values(DummyState(5))));
        let event = rx.recv().await.unwrap();
        match event {
            StreamEvent::Values(DummyState(v)) => assert_eq!(v, 5),
            _ => panic!("expected Values event"),
        }
    }

    #[test]
    fn tool_writer_only_forwards_custom_events() {
        let (tx, _rx) = mpsc::unbounded_channel::<StreamEvent<DummyState>>();
        let writer: StreamWriter<DummyState> = StreamWriter::channel(tx);
        let tool_writer = writer.as_tool_writer();
        assert!(tool_writer.emit_custom(serde_json::json!({"a": 1})));
    }
}
