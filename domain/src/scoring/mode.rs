//! Suggestion mode definitions.
//!
//! Defines [`SuggestionMode`], the tagged strategy selector for ranking
//! candidate options:
//! - Suggest: rank by how likely the session is to approve
//! - Explore: rank by how much a vote would reveal about the session

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Strategy used to rank candidate options for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionMode {
    /// Likelihood: options the session most probably approves come first.
    /// Options another session in the room rejected are withheld.
    Suggest,
    /// Significance: options whose answer would most change the other
    /// predictions come first, weighted toward uncertain outcomes.
    Explore,
}

impl SuggestionMode {
    pub const ALL: [SuggestionMode; 2] = [SuggestionMode::Suggest, SuggestionMode::Explore];

    pub fn as_str(&self) -> &'static str {
        match self {
            SuggestionMode::Suggest => "suggest",
            SuggestionMode::Explore => "explore",
        }
    }

    /// Get a human-readable description of this mode
    pub fn description(&self) -> &'static str {
        match self {
            SuggestionMode::Suggest => "suggest: options you are most likely to approve",
            SuggestionMode::Explore => "explore: options whose answer tells the most about you",
        }
    }

    /// Resolve an optional request parameter into a mode.
    ///
    /// Absent and unknown values are both invalid-argument conditions.
    pub fn from_param(param: Option<&str>) -> Result<Self, DomainError> {
        match param {
            Some(raw) => raw.parse(),
            None => Err(Self::invalid_mode_error()),
        }
    }

    fn invalid_mode_error() -> DomainError {
        DomainError::invalid_argument(format!(
            "param 'mode' must be either '{}' or '{}'",
            SuggestionMode::Suggest.as_str(),
            SuggestionMode::Explore.as_str()
        ))
    }
}

impl fmt::Display for SuggestionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SuggestionMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "suggest" => Ok(SuggestionMode::Suggest),
            "explore" => Ok(SuggestionMode::Explore),
            _ => Err(Self::invalid_mode_error()),
        }
    }
}
