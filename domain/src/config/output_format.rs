//! Output format value object

use serde::{Deserialize, Serialize};

/// Output format for workflow results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Every field of the result, with headers
    Full,
    /// Status line plus the most relevant field (default)
    #[default]
    Summary,
    /// JSON output
    Json,
}
