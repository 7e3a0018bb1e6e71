//! Load conductor prompts from a directory of YAML files, falling back to
//! the embedded defaults.
//!
//! **Canonical source**: Default prompt text lives in `skein/prompts/*.yaml`; they are
//! embedded at compile time and used when no `PROMPTS_DIR` or directory is present.
//! See [`load`], [`load_or_default`], [`default_from_embedded`], and [`LoadError`].

use std::path::Path;

use serde::Deserialize;

use super::{JoinPromptsFile, PlanPromptsFile, ReplanPromptsFile};

/// Embedded default YAML (canonical source: `skein/prompts/*.yaml`).
macro_rules! embed_prompt_yaml {
    ($name:literal) => {
        include_str!(concat!("../../prompts/", $name))
    };
}
const EMBED_PLAN: &str = embed_prompt_yaml!("plan.yaml");
const EMBED_REPLAN: &str = embed_prompt_yaml!("replan.yaml");
const EMBED_JOIN: &str = embed_prompt_yaml!("join.yaml");

/// Error when loading prompts from a directory (missing dir, invalid YAML).
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("prompts directory not found or not readable: {0}")]
    DirNotFound(String),
    #[error("failed to read prompts file {path}: {message}")]
    ReadFile { path: String, message: String },
    #[error("failed to parse YAML in {path}: {message}")]
    ParseYaml { path: String, message: String },
}

const PLAN_FILE: &str = "plan.yaml";
const REPLAN_FILE: &str = "replan.yaml";
const JOIN_FILE: &str = "join.yaml";

/// Default directory name when `PROMPTS_DIR` is not set.
const DEFAULT_PROMPTS_DIR: &str = "prompts";

/// Returns the directory to load prompts from: `dir` if `Some`, else `PROMPTS_DIR` env, else `DEFAULT_PROMPTS_DIR`.
fn prompts_dir(dir: Option<&Path>) -> std::path::PathBuf {
    dir.map(std::path::PathBuf::from).unwrap_or_else(|| {
        std::env::var("PROMPTS_DIR")
            .ok()
            .map(std::path::PathBuf::from)
            .unwrap_or_else(|| std::path::PathBuf::from(DEFAULT_PROMPTS_DIR))
    })
}

/// Tries to read and parse a YAML file into `T`. Missing file or parse error returns `None` or error.
fn read_yaml_file<T>(dir: &Path, name: &str) -> Result<Option<T>, LoadError>
where
    T: for<'de> Deserialize<'de>,
{
    let path = dir.join(name);
    let content = match std::fs::read_to_string(&path) {
        Ok(c) => c,
        Err(e) => {
            if e.kind() == std::io::ErrorKind::NotFound {
                return Ok(None);
            }
            return Err(LoadError::ReadFile {
                path: path.display().to_string(),
                message: e.to_string(),
            });
        }
    };
    let value: T = serde_yaml::from_str(&content).map_err(|e| LoadError::ParseYaml {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    Ok(Some(value))
}

/// Loads prompts from a directory: reads `plan.yaml`, `replan.yaml`, `join.yaml`
/// and returns a [`ConductorPrompts`](super::resolve::ConductorPrompts).
///
/// If `dir` is `None`, uses `PROMPTS_DIR` env or default `./prompts`. Missing files are
/// ignored (that pattern keeps code defaults). Only returns error when the directory is
/// required but missing, or when a present file fails to parse.
pub fn load(dir: Option<&Path>) -> Result<super::resolve::ConductorPrompts, LoadError> {
    let base = prompts_dir(dir);
    if !base.exists() || !base.is_dir() {
        return Err(LoadError::DirNotFound(base.display().to_string()));
    }

    let plan = read_yaml_file::<PlanPromptsFile>(&base, PLAN_FILE)?.unwrap_or_default();
    let replan = read_yaml_file::<ReplanPromptsFile>(&base, REPLAN_FILE)?.unwrap_or_default();
    let join = read_yaml_file::<JoinPromptsFile>(&base, JOIN_FILE)?.unwrap_or_default();

    Ok(super::resolve::ConductorPrompts { plan, replan, join })
}

/// Returns default prompts by parsing the embedded YAML in `skein/prompts/*.yaml`.
///
/// This is the single source of truth for default prompt text; no duplicate strings in Rust.
/// Used by [`load_or_default`] when no directory is present and by tests.
pub fn default_from_embedded() -> super::resolve::ConductorPrompts {
    let plan: PlanPromptsFile = serde_yaml::from_str(EMBED_PLAN).unwrap_or_default();
    let replan: ReplanPromptsFile = serde_yaml::from_str(EMBED_REPLAN).unwrap_or_default();
    let join: JoinPromptsFile = serde_yaml::from_str(EMBED_JOIN).unwrap_or_default();
    super::resolve::ConductorPrompts { plan, replan, join }
}

/// Loads prompts from `dir` if the directory exists; otherwise returns default from embedded YAML.
pub fn load_or_default(dir: Option<&Path>) -> super::resolve::ConductorPrompts {
    load(dir).unwrap_or_else(|_| default_from_embedded())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_nonexistent_dir_returns_error() {
        let result = load(Some(Path::new("/nonexistent_prompts_dir_12345")));
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), LoadError::DirNotFound(_)));
    }

    #[test]
    fn load_or_default_nonexistent_returns_default_from_embedded() {
        let p = load_or_default(Some(Path::new("/nonexistent_prompts_dir_12345")));
        assert!(p.plan.system_prompt.contains("{tool_descriptions}"));
    }

    #[test]
    fn load_from_dir_with_plan_yaml() {
        let temp = tempfile::TempDir::new().unwrap();
        let dir = temp.path();
        std::fs::write(dir.join("plan.yaml"), "system_prompt: \"From file.\"\n").unwrap();
        let p = load(Some(dir)).unwrap();
        assert_eq!(p.plan.system_prompt, "From file.");
    }

    #[test]
    fn load_invalid_yaml_returns_parse_error() {
        let temp = tempfile::TempDir::new().unwrap();
        let dir = temp.path();
        std::fs::write(dir.join("plan.yaml"), "system_prompt: [not closed").unwrap();
        let err = load(Some(dir)).unwrap_err();
        assert!(matches!(err, LoadError::ParseYaml { .. }));
    }

    #[test]
    fn load_uses_prompts_dir_env_when_dir_is_none() {
        let temp = tempfile::TempDir::new().unwrap();
        let dir = temp.path();
        std::fs::write(dir.join("plan.yaml"), "system_prompt: \"From env dir\"").unwrap();
        let old = std::env::var("PROMPTS_DIR").ok();
        std::env::set_var("PROMPTS_DIR", dir);
        let p = load(None).unwrap();
        assert_eq!(p.plan.system_prompt, "From env dir");
        if let Some(v) = old {
            std::env::set_var("PROMPTS_DIR", v);
        } else {
            std::env::remove_var("PROMPTS_DIR");
        }
    }

    #[test]
    fn load_missing_files_are_ignored() {
        let temp = tempfile::TempDir::new().unwrap();
        let p = load(Some(temp.path())).unwrap();
        assert!(p.plan.system_prompt.is_empty());
        assert!(p.join.system_prompt.is_empty());
    }
}
