//! Compiled, executable state graph produced by `StateGraph::compile`.

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;

use crate::error::AgentError;
use crate::graph::conditional::NextEntry;
use crate::graph::logging::{log_graph_start, log_node_complete, log_node_start};
use crate::graph::next::Next;
use crate::graph::node::Node;
use crate::graph::node_middleware::NodeMiddleware;
use crate::graph::run_context::RunContext;
use crate::graph::state_graph::END;

/// An executable graph: nodes plus resolved routing, ready for `invoke`.
///
/// Produced by `StateGraph::compile()`. Holds no persistence handles; every
/// `invoke` call starts fresh from the given state and runs to completion or
/// until a node returns `Next::End`.
pub struct CompiledStateGraph<S> {
    pub(crate) nodes: HashMap<String, Arc<dyn Node<S>>>,
    pub(crate) first_node_id: String,
    pub(crate) edge_order: Vec<String>,
    pub(crate) next_map: HashMap<String, NextEntry<S>>,
    pub(crate) middleware: Option<Arc<dyn NodeMiddleware<S>>>,
}

impl<S> CompiledStateGraph<S>
where
    S: Clone + Send + Sync + Debug + 'static,
{
    /// Runs the graph from `state` with a no-op run context.
    pub async fn invoke(&self, state: S) -> Result<S, AgentError> {
        self.invoke_with_context(state, &RunContext::noop()).await
    }

    /// Runs the graph from `state`, threading `ctx` through every node.
    pub async fn invoke_with_context(
        &self,
        mut state: S,
        ctx: &RunContext<S>,
    ) -> Result<S, AgentError> {
        log_graph_start(&self.first_node_id);
        let mut current = self.first_node_id.clone();
        loop {
            if ctx.is_cancelled() {
                return Ok(state);
            }
            let node = self
                .nodes
                .get(&current)
                .ok_or_else(|| AgentError::Graph(format!("node not found at runtime: {current}")))?
                .clone();

            log_node_start(&current);
            let (next_state, directive) = match &self.middleware {
                Some(mw) => {
                    let node = node.clone();
                    let ctx_owned = ctx.clone();
                    mw.around_run(
                        &current,
                        state,
                        Box::new(move |s| Box::pin(async move { node.run_with_context(s, &ctx_owned).await })),
                    )
                    .await?
                }
                None => node.run_with_context(state, ctx).await?,
            };
            log_node_complete(&current);
            state = next_state;

            let next_id = match directive {
                Next::End => return Ok(state),
                Next::Node(id) => id,
                Next::Continue => match self.next_map.get(&current) {
                    Some(NextEntry::Unconditional(to)) => to.clone(),
                    Some(NextEntry::Conditional(router)) => router.resolve(&state),
                    None => END.to_string(),
                },
            };

            if next_id == END {
                return Ok(state);
            }
            current = next_id;
        }
    }

    /// Node ids in the order the linear chain visits them (empty when the
    /// graph uses conditional edges, since order is state-dependent).
    pub fn edge_order(&self) -> &[String] {
        &self.edge_order
    }
}
