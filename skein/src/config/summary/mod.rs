//! Config section trait and run config summary aggregate.
//!
//! [`ConfigSection`] is implemented by [`LlmConfigSummary`], [`ToolConfigSummary`],
//! and [`ConductorConfigSummary`]. [`RunConfigSummary`] holds multiple sections and
//! prints them in order at CLI startup.

use std::io::Write;

mod conductor;
mod llm;
mod tools;

pub use conductor::ConductorConfigSummary;
pub use llm::LlmConfigSummary;
pub use tools::ToolConfigSummary;

/// One block of run config (LLM, tools, conductor) for display and printing.
pub trait ConfigSection: Send + Sync {
    /// Section label, e.g. `"LLM config"`, `"Tools"`, `"Conductor config"`.
    fn section_name(&self) -> &str;
    /// Key-value pairs (no secrets). Keys are `&'static str` for use in display and tests.
    fn entries(&self) -> Vec<(&'static str, String)>;
    /// Print one line to stderr in the form `[section_name] k1=v1 k2=v2 ...`. Best-effort.
    fn print_to_stderr(&self) {
        let entries: Vec<String> = self
            .entries()
            .into_iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect();
        let _ = writeln!(
            std::io::stderr(),
            "[{}] {}",
            self.section_name(),
            entries.join(" ")
        );
        let _ = std::io::stderr().flush();
    }
}

/// Aggregated run config summary (LLM, tools, conductor sections).
pub struct RunConfigSummary {
    sections: Vec<Box<dyn ConfigSection>>,
}

impl RunConfigSummary {
    pub fn new() -> Self {
        Self { sections: vec![] }
    }

    pub fn with_section(mut self, s: Box<dyn ConfigSection>) -> Self {
        self.sections.push(s);
        self
    }

    pub fn sections(&self) -> &[Box<dyn ConfigSection>] {
        self.sections.as_slice()
    }

    /// Prints each section to stderr, one line per section. Best-effort.
    pub fn print_to_stderr(&self) {
        for s in &self.sections {
            s.print_to_stderr();
        }
    }
}

impl Default for RunConfigSummary {
    fn default() -> Self {
        Self::new()
    }
}

/// Source of the three config sections used to build a [`RunConfigSummary`].
///
/// Implement this trait for your run config type so that
/// [`build_config_summary`] can produce a summary printed at CLI startup.
pub trait RunConfigSummarySource: Send + Sync {
    /// LLM section (model, api_base).
    fn llm_section(&self) -> LlmConfigSummary;
    /// Tools section (num_tools, names).
    fn tools_section(&self) -> ToolConfigSummary;
    /// Conductor section (max_rounds).
    fn conductor_section(&self) -> ConductorConfigSummary;
}

/// Builds a run config summary from any source that implements [`RunConfigSummarySource`].
pub fn build_config_summary(source: &impl RunConfigSummarySource) -> RunConfigSummary {
    RunConfigSummary::new()
        .with_section(Box::new(source.llm_section()))
        .with_section(Box::new(source.tools_section()))
        .with_section(Box::new(source.conductor_section()))
}
