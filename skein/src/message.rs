//! Conversation message shape shared by the planner, scheduler, and joiner.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One entry in the conductor's running conversation.
///
/// `Function` is emitted once per executed task (§4.3/§4.4): `idx` is the
/// task's plan index, `args` are the pre-resolution arguments the planner
/// emitted, and `content` is the stringified observation (tool output, or an
/// `ERROR (...)` string on failure). `System` doubles as the re-plan context
/// carrier: when it is the *last* message in the conversation, the planner
/// takes the replan branch instead of the initial-plan branch.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum Message {
    Human(String),
    System(String),
    Ai(String),
    Function {
        name: String,
        content: String,
        idx: i64,
        args: BTreeMap<String, Value>,
    },
}

impl Message {
    pub fn human(text: impl Into<String>) -> Self {
        Self::Human(text.into())
    }

    pub fn system(text: impl Into<String>) -> Self {
        Self::System(text.into())
    }

    pub fn ai(text: impl Into<String>) -> Self {
        Self::Ai(text.into())
    }

    pub fn function(
        name: impl Into<String>,
        content: impl Into<String>,
        idx: i64,
        args: BTreeMap<String, Value>,
    ) -> Self {
        Self::Function {
            name: name.into(),
            content: content.into(),
            idx,
            args,
        }
    }

    pub fn is_human(&self) -> bool {
        matches!(self, Self::Human(_))
    }

    pub fn is_ai(&self) -> bool {
        matches!(self, Self::Ai(_))
    }

    pub fn is_system(&self) -> bool {
        matches!(self, Self::System(_))
    }

    /// Task index for `Function` messages, `None` otherwise.
    pub fn function_idx(&self) -> Option<i64> {
        match self {
            Self::Function { idx, .. } => Some(*idx),
            _ => None,
        }
    }

    /// The human-readable text payload, regardless of variant.
    pub fn text(&self) -> &str {
        match self {
            Self::Human(t) | Self::System(t) | Self::Ai(t) => t,
            Self::Function { content, .. } => content,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn function_idx_only_set_on_function_messages() {
        assert_eq!(Message::human("hi").function_idx(), None);
        let f = Message::function("search", "ok", 3, BTreeMap::new());
        assert_eq!(f.function_idx(), Some(3));
    }

    #[test]
    fn last_message_system_marks_replan_context() {
        let messages = vec![Message::human("q"), Message::system("ctx")];
        assert!(messages.last().unwrap().is_system());
    }
}
