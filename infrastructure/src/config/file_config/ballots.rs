//! Seed ballots from TOML (`[[ballots]]` array)
//!
//! ```toml
//! [[ballots]]
//! label = "Lunch"
//! options = ["Pizza", "Sushi", "Tacos"]
//! ```

use concord_domain::{ConfigIssue, ConfigIssueCode, Severity};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One ballot created at start-up
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileBallotConfig {
    pub label: String,
    pub options: Vec<String>,
}

/// Check seed ballots for blank and duplicate labels
pub fn validate_ballots(ballots: &[FileBallotConfig]) -> Vec<ConfigIssue> {
    let mut issues = Vec::new();
    let mut seen_ballots = HashSet::new();

    for (i, ballot) in ballots.iter().enumerate() {
        let label = ballot.label.trim();
        if label.is_empty() {
            issues.push(ConfigIssue {
                severity: Severity::Error,
                code: ConfigIssueCode::EmptyLabel {
                    field: format!("ballots[{}].label", i),
                },
                message: format!("ballots[{}].label: ballot label must not be empty", i),
            });
        } else if !seen_ballots.insert(label.to_string()) {
            issues.push(ConfigIssue {
                severity: Severity::Error,
                code: ConfigIssueCode::DuplicateBallot {
                    label: label.to_string(),
                },
                message: format!("ballots: '{}' is defined more than once", label),
            });
        }

        let mut seen_options = HashSet::new();
        for (j, option) in ballot.options.iter().enumerate() {
            let option = option.trim();
            if option.is_empty() {
                issues.push(ConfigIssue {
                    severity: Severity::Error,
                    code: ConfigIssueCode::EmptyLabel {
                        field: format!("ballots[{}].options[{}]", i, j),
                    },
                    message: format!(
                        "ballots[{}].options[{}]: option label must not be empty",
                        i, j
                    ),
                });
            } else if !seen_options.insert(option.to_string()) {
                issues.push(ConfigIssue {
                    severity: Severity::Error,
                    code: ConfigIssueCode::DuplicateOption {
                        ballot: label.to_string(),
                        label: option.to_string(),
                    },
                    message: format!(
                        "ballots[{}]: option '{}' appears more than once in '{}'",
                        i, option, label
                    ),
                });
            }
        }
    }

    issues
}
