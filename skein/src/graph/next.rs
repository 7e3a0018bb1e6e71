//! Routing decision returned by a node after it runs.

/// What the graph runner should do after a node finishes.
///
/// `Continue` follows the linear edge order recorded at compile time.
/// `Node(id)` jumps directly to the named node (used by conditional routers).
/// `End` stops the run immediately, regardless of remaining edges.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Next {
    /// Follow the next edge in compile-time order.
    Continue,
    /// Jump to the node with this id.
    Node(String),
    /// Stop the run.
    End,
}
