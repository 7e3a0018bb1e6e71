//! State graph: nodes + linear edges, compile and invoke.
//!
//! `StateGraph` builds a node/edge graph (add nodes and edges, optional
//! conditional edges), `compile()` validates it, and the resulting
//! `CompiledStateGraph` can be `invoke`d with a state. This is the runtime
//! the conductor's plan-and-schedule/join loop is built on.

mod compile_error;
mod compiled;
mod conditional;
mod logging;
mod name_node;
mod next;
mod node;
mod node_middleware;
mod run_context;
mod state_graph;

pub use compile_error::CompilationError;
pub use compiled::CompiledStateGraph;
pub use conditional::{ConditionalRouter, ConditionalRouterFn, NextEntry};
pub use logging::{
    log_graph_complete, log_graph_error, log_graph_start, log_node_complete, log_node_start,
};
pub use name_node::NameNode;
pub use next::Next;
pub use node::Node;
pub use node_middleware::NodeMiddleware;
pub use run_context::RunContext;
pub use state_graph::{StateGraph, END, START};
