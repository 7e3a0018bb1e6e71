//! Mock tools used by scheduler/conductor tests (§8 scenarios S1, S2, S4).

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use super::{Tool, ToolCallContext, ToolError, ToolSpec};

/// Sleeps briefly, then returns `"R-<query>"`. Used to demonstrate that
/// independent tasks run concurrently (S1).
#[derive(Default)]
pub struct SearchTool {
    pub delay: Option<Duration>,
}

#[async_trait]
impl Tool for SearchTool {
    fn name(&self) -> &str {
        "search"
    }

    fn spec(&self) -> ToolSpec {
        ToolSpec::new("search", "Searches for information about a query", ["query"])
    }

    async fn call(
        &self,
        args: BTreeMap<String, Value>,
        _ctx: Option<&ToolCallContext>,
    ) -> Result<String, ToolError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let query = args
            .get("query")
            .and_then(Value::as_str)
            .unwrap_or_default();
        Ok(format!("R-{query}"))
    }
}

/// Returns a fixed temperature for any city. Used in the linear-dependency
/// scenario (S2): `send_mail(body="$1")` resolves against this tool's output.
#[derive(Default)]
pub struct GetTempTool {
    pub temperature: i64,
}

#[async_trait]
impl Tool for GetTempTool {
    fn name(&self) -> &str {
        "get_temp"
    }

    fn spec(&self) -> ToolSpec {
        ToolSpec::new("get_temp", "Looks up the current temperature for a city", ["city"])
    }

    async fn call(
        &self,
        _args: BTreeMap<String, Value>,
        _ctx: Option<&ToolCallContext>,
    ) -> Result<String, ToolError> {
        Ok(self.temperature.to_string())
    }
}

/// Always fails. Used to exercise the scheduler's `ERROR (...)` observation
/// path without aborting the rest of the plan (S4).
#[derive(Default)]
pub struct SendMailTool {
    pub fail: bool,
}

#[async_trait]
impl Tool for SendMailTool {
    fn name(&self) -> &str {
        "send_mail"
    }

    fn spec(&self) -> ToolSpec {
        ToolSpec::new("send_mail", "Sends an email with the given body", ["body"])
    }

    async fn call(
        &self,
        args: BTreeMap<String, Value>,
        _ctx: Option<&ToolCallContext>,
    ) -> Result<String, ToolError> {
        if self.fail {
            return Err(ToolError::failed("mail server unreachable"));
        }
        let body = args.get("body").and_then(Value::as_str).unwrap_or_default();
        Ok(format!("sent: {body}"))
    }
}
