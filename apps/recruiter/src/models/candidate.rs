use serde::{Deserialize, Serialize};

use crate::models::job::Job;

/// Position of a candidate within the result page that produced it.
/// Only meaningful against that page.
pub type CandidateId = u32;

/// One ranked search hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub index: CandidateId,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub experience_years: u32,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub score: f64,
    /// Human-readable explanation of the match, supplied by the ranking engine.
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub recommended_jobs: Vec<JobRecommendation>,
}

impl Candidate {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// Two-letter initials for compact listings.
    pub fn initials(&self) -> String {
        self.first_name
            .chars()
            .take(1)
            .chain(self.last_name.chars().take(1))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRecommendation {
    pub job: Job,
    #[serde(default)]
    pub match_score: f64,
    #[serde(default)]
    pub matched_skills: Vec<String>,
    #[serde(default)]
    pub location_match: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchRequest<'a> {
    pub query: &'a str,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<Candidate>,
}
