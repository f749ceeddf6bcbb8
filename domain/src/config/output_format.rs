//! Output format value object

use serde::{Deserialize, Serialize};

/// Output format for suggestions, consensus and listings
///
/// This is a domain concept representing how results should be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Colored human-readable text (default)
    #[default]
    Text,
    /// JSON output
    Json,
}
