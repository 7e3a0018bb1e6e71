//! Tool catalog block for run config summary.

use super::ConfigSection;

/// Tool configuration summary: number of registered tools (plus the implicit `join`).
pub struct ToolConfigSummary {
    /// Count returned by `ToolCatalog::num_tools()` (registered tools + implicit `join`).
    pub num_tools: usize,
    /// Registered tool names, in catalog order (excludes `join`).
    pub names: Vec<String>,
}

impl ConfigSection for ToolConfigSummary {
    fn section_name(&self) -> &str {
        "Tools"
    }

    fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("num_tools", self.num_tools.to_string()),
            ("names", self.names.join(",")),
        ]
    }
}
