//! Tracing helpers for graph compilation and execution.

use tracing::debug;

pub fn log_graph_start(first_node_id: &str) {
    debug!(node = first_node_id, "graph run starting");
}

pub fn log_node_start(node_id: &str) {
    debug!(node = node_id, "node starting");
}

pub fn log_node_complete(node_id: &str) {
    debug!(node = node_id, "node complete");
}

pub fn log_graph_complete() {
    debug!("graph run complete");
}

pub fn log_graph_error(err: &str) {
    debug!(error = err, "graph run failed");
}
