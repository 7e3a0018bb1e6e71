//! Conditional edge routing: a function from state to the next node id.

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;

/// Routing function: inspects the post-node state and returns a routing key.
///
/// The key is used directly as the next node id, or looked up in a
/// `path_map` when one is supplied to `add_conditional_edges`.
pub type ConditionalRouterFn<S> = Arc<dyn Fn(&S) -> String + Send + Sync>;

/// A compiled conditional edge: the router function plus an optional key→node map.
pub struct ConditionalRouter<S> {
    pub router: ConditionalRouterFn<S>,
    pub path_map: Option<HashMap<String, String>>,
}

impl<S> ConditionalRouter<S> {
    pub fn new(router: ConditionalRouterFn<S>, path_map: Option<HashMap<String, String>>) -> Self {
        Self { router, path_map }
    }

    /// Resolves the routing key returned by `router` against `path_map`, falling
    /// back to the key itself when no map was supplied or the key is absent.
    pub fn resolve(&self, state: &S) -> String {
        let key = (self.router)(state);
        match &self.path_map {
            Some(map) => map.get(&key).cloned().unwrap_or(key),
            None => key,
        }
    }
}

impl<S> Clone for ConditionalRouter<S> {
    fn clone(&self) -> Self {
        Self {
            router: self.router.clone(),
            path_map: self.path_map.clone(),
        }
    }
}

/// A compiled next-hop entry for a node: either a fixed successor or a
/// conditional router resolved from post-node state.
pub enum NextEntry<S> {
    Unconditional(String),
    Conditional(ConditionalRouter<S>),
}

impl<S> Clone for NextEntry<S> {
    fn clone(&self) -> Self {
        match self {
            Self::Unconditional(s) => Self::Unconditional(s.clone()),
            Self::Conditional(r) => Self::Conditional(r.clone()),
        }
    }
}

impl<S> Debug for NextEntry<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unconditional(s) => write!(f, "Unconditional({s})"),
            Self::Conditional(_) => write!(f, "Conditional(..)"),
        }
    }
}
