//! DAG-aware task scheduler: dispatches parsed tasks against a worker pool,
//! resolving placeholder arguments from an observations map (§4.3/§4.4).

mod execute;
mod observations;

pub use execute::execute_task;
pub use observations::Observations;

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::error::AgentError;
use crate::message::Message;
use crate::plan::{PlanParser, Task};
use crate::tools::{ToolCallContext, ToolCatalog};

const POLL_INTERVAL: Duration = Duration::from_millis(250);

type TaskResult = (i64, String, std::collections::BTreeMap<String, serde_json::Value>, bool);

/// Executes one plan-and-schedule pass: parses a token stream into tasks,
/// dispatches ready tasks immediately, parks pending ones, and returns the
/// newly produced `FunctionMessage`s sorted by task index ascending.
pub struct Scheduler {
    catalog: Arc<ToolCatalog>,
}

impl Scheduler {
    pub fn new(catalog: Arc<ToolCatalog>) -> Self {
        Self { catalog }
    }

    pub async fn schedule(
        &self,
        messages: &[Message],
        mut chunks: mpsc::Receiver<String>,
    ) -> Result<Vec<Message>, AgentError> {
        let observations = Observations::seed_from_messages(messages);
        let originals: BTreeSet<i64> = observations.keys().into_iter().collect();
        let ctx = Arc::new(ToolCallContext::new(messages.to_vec()));

        let mut parser = PlanParser::new(self.catalog.clone());
        let mut handles: Vec<JoinHandle<TaskResult>> = Vec::new();

        while let Some(chunk) = chunks.recv().await {
            for task in parser.ingest(&chunk)? {
                handles.push(self.spawn_task(task, observations.clone(), ctx.clone()));
            }
        }
        for task in parser.finish()? {
            handles.push(self.spawn_task(task, observations.clone(), ctx.clone()));
        }

        let mut produced = Vec::with_capacity(handles.len());
        for handle in handles {
            let result = handle
                .await
                .map_err(|e| AgentError::Graph(format!("task panicked: {e}")))?;
            produced.push(result);
        }
        // The `join` sentinel writes an observation (so dependents relying on
        // "all prior tasks done" resolve correctly) but is never itself a
        // real tool invocation, so it is excluded from emitted messages.
        produced.retain(|(idx, _, _, is_join)| !originals.contains(idx) && !is_join);
        produced.sort_by_key(|(idx, ..)| *idx);

        Ok(produced
            .into_iter()
            .map(|(idx, name, args, _)| {
                let content = observations
                    .inner()
                    .get(&idx)
                    .map(|v| v.value().clone())
                    .unwrap_or_default();
                Message::function(name, content, idx, args)
            })
            .collect())
    }

    fn spawn_task(
        &self,
        task: Task,
        observations: Observations,
        ctx: Arc<ToolCallContext>,
    ) -> JoinHandle<TaskResult> {
        tokio::spawn(async move {
            let idx = task.idx;
            let name = task.tool.name().to_string();
            let args = task.args.clone();
            let deps = task.dependencies.clone();
            let is_join = task.is_join();

            while !observations.contains_all(&deps) {
                tokio::time::sleep(POLL_INTERVAL).await;
            }

            debug!(idx, tool = %name, "dispatching task");
            let result = execute_task(&task, &observations, Some(ctx.as_ref())).await;
            observations.insert(idx, result);
            debug!(idx, tool = %name, "task complete");

            (idx, name, args, is_join)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::mock::{GetTempTool, SearchTool, SendMailTool};
    use std::time::{Duration, Instant};

    fn catalog_with(tools: Vec<Arc<dyn crate::tools::Tool>>) -> Arc<ToolCatalog> {
        let mut c = ToolCatalog::new();
        for t in tools {
            c.register(t);
        }
        Arc::new(c)
    }

    async fn feed(tx: mpsc::Sender<String>, text: &str) {
        tx.send(text.to_string()).await.unwrap();
        drop(tx);
    }

    /// S1: independent tasks run in parallel — total wall clock stays near a
    /// single task's delay, not the sum of both.
    #[tokio::test]
    async fn independent_tasks_run_concurrently() {
        let catalog = catalog_with(vec![Arc::new(SearchTool {
            delay: Some(Duration::from_millis(100)),
        })]);
        let scheduler = Scheduler::new(catalog);
        let (tx, rx) = mpsc::channel(8);
        let plan = "1. search(query=\"a\")\n2. search(query=\"b\")\n3. join()\n";

        let start = Instant::now();
        let (_, messages) = tokio::join!(feed(tx, plan), scheduler.schedule(&[], rx));
        let messages = messages.unwrap();
        assert!(start.elapsed() < Duration::from_millis(180));
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].text(), "R-a");
        assert_eq!(messages[1].text(), "R-b");
    }

    /// S2: linear dependency resolves `$1` into the second task's args.
    #[tokio::test]
    async fn linear_dependency_resolves_placeholder() {
        let catalog = catalog_with(vec![
            Arc::new(GetTempTool { temperature: 23 }),
            Arc::new(SendMailTool::default()),
        ]);
        let scheduler = Scheduler::new(catalog);
        let (tx, rx) = mpsc::channel(8);
        let plan = "1. get_temp(city=\"Seoul\")\n2. send_mail(body=\"$1\")\n3. join()\n";

        let (_, messages) = tokio::join!(feed(tx, plan), scheduler.schedule(&[], rx));
        let messages = messages.unwrap();
        assert_eq!(messages[0].function_idx(), Some(1));
        assert_eq!(messages[1].function_idx(), Some(2));
        assert_eq!(messages[1].text(), "sent: 23");
    }

    /// S4: a failing tool produces an ERROR observation but doesn't abort the plan.
    #[tokio::test]
    async fn tool_failure_produces_error_observation() {
        let catalog = catalog_with(vec![Arc::new(SendMailTool { fail: true })]);
        let scheduler = Scheduler::new(catalog);
        let (tx, rx) = mpsc::channel(8);
        let plan = "1. send_mail(body=\"hi\")\n2. join()\n";

        let (_, messages) = tokio::join!(feed(tx, plan), scheduler.schedule(&[], rx));
        let messages = messages.unwrap();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].text().starts_with("ERROR "));
    }

    /// Observations seeded from a prior plan's FunctionMessages are not re-emitted.
    #[tokio::test]
    async fn seeded_observations_are_not_reemitted() {
        let catalog = catalog_with(vec![Arc::new(SearchTool::default())]);
        let scheduler = Scheduler::new(catalog);
        let prior = vec![Message::function("search", "R-a", 1, Default::default())];
        let (tx, rx) = mpsc::channel(8);
        let plan = "2. search(query=\"b\")\n3. join()\n";

        let (_, messages) = tokio::join!(feed(tx, plan), scheduler.schedule(&prior, rx));
        let messages = messages.unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].function_idx(), Some(2));
    }
}
