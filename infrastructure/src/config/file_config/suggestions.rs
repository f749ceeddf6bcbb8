//! Suggestion configuration from TOML (`[suggestions]` section)

use concord_domain::{ConfigIssue, ConfigIssueCode, ModePreference, Severity};
use serde::{Deserialize, Serialize};

/// Raw suggestion configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSuggestionsConfig {
    /// Maximum suggestions per request (0 = all)
    pub limit: usize,
    /// "suggest" | "explore" | "mixed"
    pub default_mode: String,
}

impl Default for FileSuggestionsConfig {
    fn default() -> Self {
        Self {
            limit: 10,
            default_mode: ModePreference::default().as_str().to_string(),
        }
    }
}

impl FileSuggestionsConfig {
    /// Parse default_mode into a ModePreference
    ///
    /// Unknown values fall back to `mixed` with a warning.
    pub fn parse_default_mode(&self) -> (ModePreference, Vec<ConfigIssue>) {
        match self.default_mode.parse::<ModePreference>() {
            Ok(mode) => (mode, vec![]),
            Err(_) => {
                let issue = ConfigIssue {
                    severity: Severity::Warning,
                    code: ConfigIssueCode::InvalidEnumValue {
                        field: "suggestions.default_mode".to_string(),
                        value: self.default_mode.clone(),
                        valid_values: vec![
                            "suggest".to_string(),
                            "explore".to_string(),
                            "mixed".to_string(),
                        ],
                    },
                    message: format!(
                        "suggestions.default_mode: unknown value '{}', falling back to 'mixed'",
                        self.default_mode
                    ),
                };
                (ModePreference::default(), vec![issue])
            }
        }
    }
}
