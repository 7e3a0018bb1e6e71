//! Embedded and directory-overridable prompt templates for the planner,
//! replanner, and joiner stages (§6).

mod load;
mod resolve;

pub use load::{default_from_embedded, load, load_or_default, LoadError};
pub use resolve::{ConductorPrompts, JoinPromptsFile, PlanPromptsFile, ReplanPromptsFile};
