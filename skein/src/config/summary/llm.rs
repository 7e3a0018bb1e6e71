//! LLM config block for run config summary.
//!
//! Implements [`ConfigSection`](super::ConfigSection). Does not include api_key.

use super::ConfigSection;

/// LLM configuration summary: model and api_base only (no api_key).
pub struct LlmConfigSummary {
    /// Model name passed to the chat completions endpoint.
    pub model: String,
    /// API base URL; `None` when using the provider's default.
    pub api_base: Option<String>,
}

impl ConfigSection for LlmConfigSummary {
    fn section_name(&self) -> &str {
        "LLM config"
    }

    fn entries(&self) -> Vec<(&'static str, String)> {
        let mut out = vec![("model", self.model.clone())];
        if let Some(ref base) = self.api_base {
            out.push(("api_base", base.clone()));
        }
        out
    }
}
