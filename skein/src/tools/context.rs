//! Per-call context passed into tool invocations.

use crate::message::Message;
use crate::stream::ToolStreamWriter;

/// Context available to a tool during a single `Execute` call (§4.4).
///
/// Carries the conversation messages visible at dispatch time and an
/// optional stream writer tools can use to emit progress events. Unlike the
/// teacher's context this carries no `thread_id`/`user_id`: this crate keeps
/// no cross-run session state to key them against.
#[derive(Debug, Clone, Default)]
pub struct ToolCallContext {
    pub recent_messages: Vec<Message>,
    pub stream_writer: Option<ToolStreamWriter>,
}

impl ToolCallContext {
    pub fn new(recent_messages: Vec<Message>) -> Self {
        Self {
            recent_messages,
            stream_writer: None,
        }
    }

    pub fn with_stream_writer(recent_messages: Vec<Message>, stream_writer: ToolStreamWriter) -> Self {
        Self {
            recent_messages,
            stream_writer: Some(stream_writer),
        }
    }

    pub fn emit_custom(&self, value: serde_json::Value) -> bool {
        self.stream_writer
            .as_ref()
            .map(|w| w.emit_custom(value))
            .unwrap_or(false)
    }
}
