//! Mode preference for interactive clients.
//!
//! A client either sticks to one [`SuggestionMode`] or alternates between
//! them, so that exploration and exploitation take turns.

use crate::scoring::SuggestionMode;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which suggestion mode a client asks for next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModePreference {
    Suggest,
    Explore,
    /// Alternate explore / suggest, starting with explore
    #[default]
    Mixed,
}

impl ModePreference {
    /// Mode for the `round`-th request (0-based)
    pub fn mode_for_round(&self, round: usize) -> SuggestionMode {
        match self {
            ModePreference::Suggest => SuggestionMode::Suggest,
            ModePreference::Explore => SuggestionMode::Explore,
            ModePreference::Mixed => {
                if round % 2 == 0 {
                    SuggestionMode::Explore
                } else {
                    SuggestionMode::Suggest
                }
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ModePreference::Suggest => "suggest",
            ModePreference::Explore => "explore",
            ModePreference::Mixed => "mixed",
        }
    }
}

impl fmt::Display for ModePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ModePreference {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "suggest" => Ok(ModePreference::Suggest),
            "explore" => Ok(ModePreference::Explore),
            "mixed" => Ok(ModePreference::Mixed),
            _ => Err(format!(
                "Unknown mode: {}. Valid: suggest, explore, mixed",
                s
            )),
        }
    }
}
