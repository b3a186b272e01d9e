//! Session configuration

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{ReplError, Result};

/// Configuration for a REPL session.
///
/// Read from an optional JSON file and then overridden by command-line
/// flags. Every field has a default, so an empty object is a valid file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ReplConfig {
    /// Prompt printed before each input line
    pub prompt: String,

    /// Name of the branch every fresh session starts on
    pub main_branch: String,

    /// Where line-editor history is persisted between runs
    pub history_file: Option<PathBuf>,

    /// Maximum number of history entries kept by the line editor
    pub max_history: usize,

    /// Whether to colour output by result class
    pub color: bool,

    /// Whether to log every evaluated command (for debugging)
    pub trace: bool,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            prompt: ">>> ".to_string(),
            main_branch: "main".to_string(),
            history_file: None,
            max_history: 1000,
            color: true,
            trace: false,
        }
    }
}

impl ReplConfig {
    /// Create a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration whose sessions start on a custom branch.
    pub fn with_main_branch(name: impl Into<String>) -> Self {
        Self {
            main_branch: name.into(),
            ..Default::default()
        }
    }

    /// Parse a configuration from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(ReplError::internal)
    }

    /// Load a configuration from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| ReplError::Internal(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ReplConfig::new();
        assert_eq!(config.prompt, ">>> ");
        assert_eq!(config.main_branch, "main");
        assert_eq!(config.max_history, 1000);
        assert!(config.color);
        assert!(!config.trace);
        assert!(config.history_file.is_none());
    }

    #[test]
    fn test_with_main_branch() {
        let config = ReplConfig::with_main_branch("trunk");
        assert_eq!(config.main_branch, "trunk");
        assert_eq!(config.prompt, ">>> ");
    }

    #[test]
    fn test_from_json_partial() {
        let config = ReplConfig::from_json(r#"{"prompt": "strata> ", "color": false}"#).unwrap();
        assert_eq!(config.prompt, "strata> ");
        assert!(!config.color);
        assert_eq!(config.main_branch, "main");
    }

    #[test]
    fn test_from_json_empty_object() {
        assert_eq!(ReplConfig::from_json("{}").unwrap(), ReplConfig::default());
    }

    #[test]
    fn test_from_json_invalid() {
        let err = ReplConfig::from_json("not json").unwrap_err();
        assert!(err.to_string().starts_with("Error: "));
    }
}
