use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::models::candidate::CandidateId;

/// Summary row in the shortlist index.
///
/// `name` is the persistence key. It is compared byte-for-byte: no trimming,
/// no case folding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortlistSummary {
    pub name: String,
    /// Candidate names, for preview only.
    #[serde(default)]
    pub candidates: Vec<String>,
    #[serde(default)]
    pub count: usize,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShortlistIndex {
    #[serde(default)]
    pub shortlists: Vec<ShortlistSummary>,
}

/// Full roster of one shortlist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortlistDetail {
    pub name: String,
    #[serde(default)]
    pub candidates: Vec<ShortlistMember>,
}

/// A persisted candidate as the shortlist store returns it.
///
/// Older records carry `name`/`experience`, newer ones `firstName`/`lastName`/
/// `experienceYears`; each field is serialized under the key it arrived with
/// and unknown keys are kept in `extra`, so a roster is resent verbatim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortlistMember {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub first_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience_years: Option<u32>,
    #[serde(default)]
    pub skills: Vec<String>,
    /// Pipeline stage label, e.g. "Screening".
    #[serde(default)]
    pub stage: String,
    #[serde(default)]
    pub availability: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ShortlistMember {
    pub fn display_name(&self) -> String {
        if !self.name.trim().is_empty() {
            return self.name.trim().to_string();
        }
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    pub fn years_of_experience(&self) -> Option<u32> {
        self.experience_years.or(self.experience)
    }

    /// Availability as a calendar date, when the store sent an ISO date.
    pub fn available_on(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.availability.trim(), "%Y-%m-%d").ok()
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateShortlistRequest<'a> {
    pub name: &'a str,
    pub candidate_indices: &'a [CandidateId],
}

/// Acknowledgement of a write. The client does not interpret it.
#[derive(Debug, Clone, PartialEq)]
pub enum Ack {
    Json(Value),
    Text(String),
}
