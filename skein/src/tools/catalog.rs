//! Ordered, read-only-after-construction registry of tools available to the planner.

use std::collections::HashMap;
use std::fmt::Write as _;
use std::sync::Arc;

use super::Tool;

/// The set of tools a conductor run can invoke.
///
/// Insertion order is preserved for prompt rendering (`tool_descriptions`)
/// and for the `num_tools` count fed to the planner prompt. Lookup by name is
/// O(1) via an index into the ordered vector.
#[derive(Clone, Default)]
pub struct ToolCatalog {
    order: Vec<Arc<dyn Tool>>,
    by_name: HashMap<String, usize>,
}

impl ToolCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a tool, replacing any prior tool with the same name in place.
    pub fn register(&mut self, tool: Arc<dyn Tool>) -> &mut Self {
        let name = tool.name().to_string();
        if let Some(&idx) = self.by_name.get(&name) {
            self.order[idx] = tool;
        } else {
            self.by_name.insert(name, self.order.len());
            self.order.push(tool);
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.by_name.get(name).map(|&idx| self.order[idx].clone())
    }

    pub fn names(&self) -> Vec<String> {
        self.order.iter().map(|t| t.name().to_string()).collect()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Tool>> {
        self.order.iter()
    }

    /// `num_tools` per the planner prompt contract (§4.5): registered tools
    /// plus the implicit `join` sentinel.
    pub fn num_tools(&self) -> usize {
        self.order.len() + 1
    }

    /// Newline-delimited, 1-indexed `name: description` block for the planner prompt.
    pub fn tool_descriptions(&self) -> String {
        let mut out = String::new();
        for (i, tool) in self.order.iter().enumerate() {
            let spec = tool.spec();
            let _ = writeln!(out, "{}. {}: {}", i + 1, spec.name, spec.description);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::mock::SearchTool;

    #[test]
    fn num_tools_counts_the_implicit_join() {
        let mut catalog = ToolCatalog::new();
        catalog.register(Arc::new(SearchTool::default()));
        assert_eq!(catalog.num_tools(), 2);
    }

    #[test]
    fn register_replaces_same_name_in_place() {
        let mut catalog = ToolCatalog::new();
        catalog.register(Arc::new(SearchTool::default()));
        catalog.register(Arc::new(SearchTool::default()));
        assert_eq!(catalog.len(), 1);
    }
}
