use std::collections::BTreeMap;

use serde_json::Value;

use crate::plan::{resolve_value, Task, TaskTool};
use crate::tools::ToolCallContext;

use super::observations::Observations;

/// Runs one task to its observation string (§4.4).
///
/// `join` writes the literal string `"join"` without invoking anything.
/// Argument resolution here is total (§4.2: a missing placeholder index is
/// left as a literal `$N`, never an error), so the "args could not be
/// resolved" failure mode from the scheduler's error taxonomy never
/// triggers in this implementation — only tool invocation itself can fail.
pub async fn execute_task(task: &Task, observations: &Observations, ctx: Option<&ToolCallContext>) -> String {
    let tool = match &task.tool {
        TaskTool::Join => return "join".to_string(),
        TaskTool::Call(tool) => tool,
    };

    let resolved: BTreeMap<String, Value> = task
        .args
        .iter()
        .map(|(k, v)| (k.clone(), resolve_value(v, observations.inner())))
        .collect();

    match tool.call(resolved.clone(), ctx).await {
        Ok(result) => result,
        Err(err) => format!(
            "ERROR (Failed to call {} with args {:?}. Args resolved to {:?}. Error: {err})",
            tool.name(),
            task.args,
            resolved,
        ),
    }
}
