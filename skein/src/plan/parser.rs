//! Streaming, line-oriented plan parser.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use thiserror::Error;

use crate::tools::ToolCatalog;

use super::task::{Task, TaskTool};

static ACTION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(\d+)\.\s*(\w+)\((.*)\)(?:\s*#\w+)?\s*$").unwrap());

/// Parse failure: an action line names a tool the catalog doesn't recognize.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("unknown tool '{name}'; available tools: {}", .available.join(", "))]
    UnknownTool { name: String, available: Vec<String> },
}

/// Converts a token stream from the LLM into `Task`s as action lines complete.
///
/// Feed chunks via `ingest`; each call returns every `Task` whose line became
/// complete as a result of that chunk. Call `finish` once the upstream token
/// stream ends to flush any buffered trailing line. A parser instance is not
/// restartable — build a fresh one per plan-and-schedule pass.
pub struct PlanParser {
    catalog: Arc<ToolCatalog>,
    buffer: String,
    thought: Option<String>,
}

impl PlanParser {
    pub fn new(catalog: Arc<ToolCatalog>) -> Self {
        Self {
            catalog,
            buffer: String::new(),
            thought: None,
        }
    }

    /// Appends `chunk` to the buffered tail and parses every newly completed line.
    pub fn ingest(&mut self, chunk: &str) -> Result<Vec<Task>, ParseError> {
        self.buffer.push_str(chunk);
        let mut tasks = Vec::new();
        while let Some(pos) = self.buffer.find('\n') {
            let line: String = self.buffer.drain(..=pos).collect();
            if let Some(task) = self.parse_line(line.trim_end_matches(['\n', '\r']))? {
                tasks.push(task);
            }
        }
        Ok(tasks)
    }

    /// Flushes any buffered partial line once the stream has ended.
    pub fn finish(&mut self) -> Result<Vec<Task>, ParseError> {
        if self.buffer.trim().is_empty() {
            self.buffer.clear();
            return Ok(Vec::new());
        }
        let line = std::mem::take(&mut self.buffer);
        Ok(self.parse_line(line.trim_end_matches(['\n', '\r']))?.into_iter().collect())
    }

    fn parse_line(&mut self, line: &str) -> Result<Option<Task>, ParseError> {
        if let Some(rest) = line.trim_start().strip_prefix("Thought:") {
            self.thought = Some(rest.trim().to_string());
            return Ok(None);
        }

        let Some(caps) = ACTION_RE.captures(line) else {
            return Ok(None);
        };

        let idx: i64 = match caps[1].parse() {
            Ok(v) => v,
            Err(_) => return Ok(None),
        };
        let name = caps[2].to_string();
        let raw_args = caps[3].trim().to_string();
        let thought = self.thought.take();

        if name == "join" {
            let dependencies = (1..idx).collect::<BTreeSet<_>>();
            return Ok(Some(Task {
                idx,
                tool: TaskTool::Join,
                args: BTreeMap::new(),
                dependencies,
                thought,
            }));
        }

        let Some(tool) = self.catalog.get(&name) else {
            return Err(ParseError::UnknownTool {
                name,
                available: self.catalog.names(),
            });
        };

        let dependencies = extract_dependencies(&raw_args, idx);
        let mut args = BTreeMap::new();
        if let Some(param) = tool.spec().first_param() {
            args.insert(param.to_string(), Value::String(raw_args));
        }

        Ok(Some(Task {
            idx,
            tool: TaskTool::Call(tool),
            args,
            dependencies,
            thought,
        }))
    }
}

static ID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\$\{?(\d+)\}?").unwrap());

fn extract_dependencies(raw_args: &str, idx: i64) -> BTreeSet<i64> {
    ID_RE
        .captures_iter(raw_args)
        .filter_map(|caps| caps[1].parse::<i64>().ok())
        .filter(|&n| n > 0 && n < idx)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::mock::SearchTool;
    use std::sync::Arc as StdArc;

    fn catalog() -> StdArc<ToolCatalog> {
        let mut c = ToolCatalog::new();
        c.register(StdArc::new(SearchTool::default()));
        StdArc::new(c)
    }

    #[test]
    fn parses_thought_then_action_line() {
        let mut parser = PlanParser::new(catalog());
        let tasks = parser
            .ingest("Thought: let's search\n1. search(query=\"rust\")\n")
            .unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].thought.as_deref(), Some("let's search"));
        assert_eq!(tasks[0].idx, 1);
    }

    #[test]
    fn join_depends_on_every_prior_task() {
        let mut parser = PlanParser::new(catalog());
        let tasks = parser
            .ingest("1. search(query=\"a\")\n2. search(query=\"b\")\n3. join()\n")
            .unwrap();
        assert_eq!(tasks[2].dependencies, BTreeSet::from([1, 2]));
        assert!(tasks[2].is_join());
    }

    #[test]
    fn unknown_tool_raises_parse_error_listing_catalog() {
        let mut parser = PlanParser::new(catalog());
        let err = parser.ingest("1. xyz(a=\"b\")\n").unwrap_err();
        match err {
            ParseError::UnknownTool { name, available } => {
                assert_eq!(name, "xyz");
                assert_eq!(available, vec!["search".to_string()]);
            }
        }
    }

    #[test]
    fn streams_across_chunk_boundaries() {
        let mut parser = PlanParser::new(catalog());
        assert!(parser.ingest("1. sea").unwrap().is_empty());
        let tasks = parser.ingest("rch(query=\"x\")\n").unwrap();
        assert_eq!(tasks.len(), 1);
    }

    #[test]
    fn finish_flushes_buffered_tail_without_trailing_newline() {
        let mut parser = PlanParser::new(catalog());
        assert!(parser.ingest("1. search(query=\"x\")").unwrap().is_empty());
        let tasks = parser.finish().unwrap();
        assert_eq!(tasks.len(), 1);
    }

    #[test]
    fn dependency_extraction_ignores_forward_references() {
        let deps = extract_dependencies("$1 $5", 3);
        assert_eq!(deps, BTreeSet::from([1]));
    }
}
