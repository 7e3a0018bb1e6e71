use std::collections::BTreeMap;

use async_trait::async_trait;
use serde_json::Value;

use super::{ToolCallContext, ToolError, ToolSpec};

/// A single tool invocable from a parsed plan.
///
/// Unlike a JSON-Schema-validated tool call, plan arguments arrive as a
/// resolved `name -> value` map built from the plan parser's single-argument
/// convention (§4.1): the parser binds the task's raw argument text to the
/// tool's first declared parameter name. `call` receives that map after
/// placeholder resolution has already run.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use async_trait::async_trait;
/// use serde_json::Value;
/// use skein::tools::{Tool, ToolCallContext, ToolError, ToolSpec};
///
/// struct Echo;
///
/// #[async_trait]
/// impl Tool for Echo {
///     fn name(&self) -> &str {
///         "echo"
///     }
///
///     fn spec(&self) -> ToolSpec {
///         ToolSpec::new("echo", "Echoes its input back", ["text"])
///     }
///
///     async fn call(
///         &self,
///         args: BTreeMap<String, Value>,
///         _ctx: Option<&ToolCallContext>,
///     ) -> Result<String, ToolError> {
///         Ok(args.get("text").map(|v| v.to_string()).unwrap_or_default())
///     }
/// }
/// ```
#[async_trait]
pub trait Tool: Send + Sync {
    /// Unique name as it appears in parsed plans.
    fn name(&self) -> &str;

    /// Description and ordered parameter names injected into the planner prompt.
    fn spec(&self) -> ToolSpec;

    /// Executes the tool with resolved arguments.
    ///
    /// Returns the stringified result on success. Failures become
    /// `ToolError`; the scheduler (§4.4) converts those into an `ERROR (...)`
    /// observation rather than aborting the plan.
    async fn call(
        &self,
        args: BTreeMap<String, Value>,
        ctx: Option<&ToolCallContext>,
    ) -> Result<String, ToolError>;
}
