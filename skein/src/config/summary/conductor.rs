//! Conductor round-limit block for run config summary.

use super::ConfigSection;

/// Conductor configuration summary: the replan round cap (§4.7).
pub struct ConductorConfigSummary {
    pub max_rounds: usize,
}

impl ConfigSection for ConductorConfigSummary {
    fn section_name(&self) -> &str {
        "Conductor config"
    }

    fn entries(&self) -> Vec<(&'static str, String)> {
        vec![("max_rounds", self.max_rounds.to_string())]
    }
}
