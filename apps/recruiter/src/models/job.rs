use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Job identifiers arrive as numbers from the seeded data and as strings from
/// hand-edited job files; both are accepted and echoed back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JobId {
    Number(u64),
    Text(String),
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobId::Number(n) => write!(f, "{n}"),
            JobId::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for JobId {
    fn from(raw: &str) -> Self {
        match raw.trim().parse::<u64>() {
            Ok(n) => JobId::Number(n),
            Err(_) => JobId::Text(raw.trim().to_string()),
        }
    }
}

/// An open position. Read-only on the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<JobId>,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub skills_required: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Fields this client does not interpret, kept so the job can be echoed back.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
