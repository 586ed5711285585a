use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const SCHEMA_VERSION: u32 = 1;

/// One language that could not be filled for a row, with the provider's
/// reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LanguageFailure {
    pub lang: String,
    pub reason: String,
}

/// What happened to a single row during a fill pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum RowOutcome {
    /// Nothing was missing, the provider was never called.
    Skipped,
    /// Every requested language was filled.
    Succeeded { filled: Vec<String> },
    /// Some languages were filled, the listed ones were not.
    PartiallyFailed {
        filled: Vec<String>,
        failures: Vec<LanguageFailure>,
    },
    /// No cell was filled for this row.
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RowReport {
    /// 0-based row index in the table.
    pub row: usize,
    pub key: String,
    pub outcome: RowOutcome,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum PassStatus {
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SyncSummary {
    pub rows: usize,
    pub skipped: usize,
    pub succeeded: usize,
    pub partial: usize,
    pub failed: usize,
    pub cells_filled: usize,
    pub cells_failed: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SyncRunReport {
    pub schema_version: u32,
    pub status: PassStatus,
    pub outcomes: Vec<RowReport>,
    pub summary: SyncSummary,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CheckIssue {
    pub schema_version: u32,
    /// "duplicate" | "empty-source" | "missing" | "placeholder"
    pub kind: String,
    pub key: Option<String>,
    pub lang: Option<String>,
    pub count: Option<usize>,
    pub message: String,
}
