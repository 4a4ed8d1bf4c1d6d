use crate::outcome::{FileOutcome, RunSummary};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_id: Option<Uuid>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<DateTime<Utc>>,

    /// Root directories the pass scanned, in configured order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub roots: Vec<String>,
}

/// On-disk report artifact for one fix pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HebfixReport {
    pub schema: String,
    pub tool: ToolInfo,

    #[serde(default)]
    pub run: RunInfo,

    /// True when the pass computed outcomes without writing any file.
    pub dry_run: bool,

    #[serde(default)]
    pub results: Vec<FileOutcome>,

    pub summary: RunSummary,
}

impl HebfixReport {
    pub fn new(tool: ToolInfo) -> Self {
        Self {
            schema: crate::schema::HEBFIX_REPORT_V1.to_string(),
            tool,
            run: RunInfo::default(),
            dry_run: false,
            results: vec![],
            summary: RunSummary::default(),
        }
    }
}
