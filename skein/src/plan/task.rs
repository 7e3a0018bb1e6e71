use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use serde_json::Value;

use crate::tools::Tool;

/// A task's tool binding: either the plan-terminating `join` sentinel or a
/// bound tool handle. See the spec's own note on preferring a tagged variant
/// here over a magic tool name.
#[derive(Clone)]
pub enum TaskTool {
    Join,
    Call(Arc<dyn Tool>),
}

impl TaskTool {
    pub fn name(&self) -> &str {
        match self {
            TaskTool::Join => "join",
            TaskTool::Call(tool) => tool.name(),
        }
    }
}

impl std::fmt::Debug for TaskTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TaskTool({})", self.name())
    }
}

/// A single parsed plan entry.
///
/// `args` holds the pre-resolution values exactly as parsed (placeholders
/// still embedded); `dependencies` is derived once at parse time from those
/// same values (or, for `join`, from every prior task index).
#[derive(Clone, Debug)]
pub struct Task {
    pub idx: i64,
    pub tool: TaskTool,
    pub args: BTreeMap<String, Value>,
    pub dependencies: BTreeSet<i64>,
    pub thought: Option<String>,
}

impl Task {
    pub fn is_join(&self) -> bool {
        matches!(self.tool, TaskTool::Join)
    }
}
