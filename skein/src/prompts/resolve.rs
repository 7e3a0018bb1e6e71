//! Typed shapes of the three YAML prompt files, and the variable
//! substitution (§6) that turns them into the system prompt text each stage
//! sends to the LLM.

use serde::Deserialize;

/// `prompts/plan.yaml`: supports `replan`, `num_tools`, `tool_descriptions`.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct PlanPromptsFile {
    #[serde(default)]
    pub system_prompt: String,
    #[serde(default)]
    pub replan_addendum: String,
}

/// `prompts/replan.yaml`: a string appended under plan's `replan` slot.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ReplanPromptsFile {
    #[serde(default)]
    pub text: String,
}

/// `prompts/join.yaml`: supports `examples`.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct JoinPromptsFile {
    #[serde(default)]
    pub system_prompt: String,
    #[serde(default)]
    pub examples: String,
}

/// The three loaded prompt files, bundled together for the conductor.
#[derive(Clone, Debug, Default)]
pub struct ConductorPrompts {
    pub plan: PlanPromptsFile,
    pub replan: ReplanPromptsFile,
    pub join: JoinPromptsFile,
}

impl ConductorPrompts {
    /// Renders the planner's system prompt for an initial (non-replan) round.
    pub fn plan_system_prompt(&self, num_tools: usize, tool_descriptions: &str) -> String {
        self.plan
            .system_prompt
            .replace("{num_tools}", &num_tools.to_string())
            .replace("{tool_descriptions}", tool_descriptions)
    }

    /// Renders the planner's system prompt for a replan round: the base plan
    /// prompt followed by the replan addendum with `{replan}` substituted.
    /// `query` fills the `{query}` placeholder in `replan.yaml`'s text with
    /// the user's original message, so the replanner is reminded what it was
    /// originally asked.
    pub fn replan_system_prompt(&self, num_tools: usize, tool_descriptions: &str, query: &str) -> String {
        let base = self.plan_system_prompt(num_tools, tool_descriptions);
        let replan_text = self.replan.text.replace("{query}", query);
        let addendum = self.plan.replan_addendum.replace("{replan}", &replan_text);
        format!("{base}\n{addendum}")
    }

    /// Renders the joiner's system prompt with `{examples}` substituted.
    pub fn join_system_prompt(&self) -> String {
        self.join.system_prompt.replace("{examples}", &self.join.examples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_system_prompt_substitutes_tool_count_and_descriptions() {
        let prompts = ConductorPrompts {
            plan: PlanPromptsFile {
                system_prompt: "{num_tools} tools:\n{tool_descriptions}".to_string(),
                replan_addendum: String::new(),
            },
            ..Default::default()
        };
        let rendered = prompts.plan_system_prompt(3, "1. search(query)\n2. get_temp(city)");
        assert_eq!(rendered, "3 tools:\n1. search(query)\n2. get_temp(city)");
    }

    #[test]
    fn replan_system_prompt_appends_addendum_with_replan_text() {
        let prompts = ConductorPrompts {
            plan: PlanPromptsFile {
                system_prompt: "base".to_string(),
                replan_addendum: "addendum: {replan}".to_string(),
            },
            replan: ReplanPromptsFile {
                text: "continue from here".to_string(),
            },
            ..Default::default()
        };
        let rendered = prompts.replan_system_prompt(1, "", "");
        assert_eq!(rendered, "base\naddendum: continue from here");
    }

    #[test]
    fn replan_system_prompt_substitutes_query_into_replan_text() {
        let prompts = ConductorPrompts {
            plan: PlanPromptsFile {
                system_prompt: "base".to_string(),
                replan_addendum: "addendum: {replan}".to_string(),
            },
            replan: ReplanPromptsFile {
                text: "original query was: {query}".to_string(),
            },
            ..Default::default()
        };
        let rendered = prompts.replan_system_prompt(1, "", "find a and b");
        assert_eq!(rendered, "base\naddendum: original query was: find a and b");
    }

    #[test]
    fn join_system_prompt_substitutes_examples() {
        let prompts = ConductorPrompts {
            join: JoinPromptsFile {
                system_prompt: "see: {examples}".to_string(),
                examples: "Example one".to_string(),
            },
            ..Default::default()
        };
        assert_eq!(prompts.join_system_prompt(), "see: Example one");
    }
}
