//! Scripted in-memory backend for workflow tests.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;

use crate::errors::GatewayError;
use crate::gateway::RemoteGateway;
use crate::models::analytics::AnalyticsSnapshot;
use crate::models::candidate::{Candidate, CandidateId};
use crate::models::email::{DraftEmailRequest, EmailDraft, HtmlPreview};
use crate::models::job::{Job, JobId};
use crate::models::shortlist::{Ack, ShortlistDetail, ShortlistMember, ShortlistSummary};

/// One recorded gateway call, with its full payload.
#[derive(Debug, Clone, PartialEq)]
pub enum GatewayCall {
    Search(String),
    CreateShortlist {
        name: String,
        candidate_ids: Vec<CandidateId>,
    },
    ListShortlists,
    GetShortlist(String),
    DraftEmail(DraftEmailRequest),
    RenderEmailHtml {
        subject: String,
        text: String,
    },
    GetAnalytics,
    ListJobs,
    GetJob(JobId),
}

#[derive(Default)]
pub struct FakeGateway {
    calls: Mutex<Vec<GatewayCall>>,
    search_results: Mutex<HashMap<String, Result<Vec<Candidate>, GatewayError>>>,
    search_delays: Mutex<HashMap<String, Duration>>,
    create_error: Mutex<Option<GatewayError>>,
    summaries: Mutex<Option<Result<Vec<ShortlistSummary>, GatewayError>>>,
    details: Mutex<HashMap<String, Result<ShortlistDetail, GatewayError>>>,
    detail_delays: Mutex<HashMap<String, Duration>>,
    draft_error: Mutex<Option<GatewayError>>,
    html_error: Mutex<Option<GatewayError>>,
    analytics: Mutex<Option<Result<AnalyticsSnapshot, GatewayError>>>,
    jobs: Mutex<Vec<Job>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn not_found(what: &str) -> GatewayError {
    GatewayError::Api {
        status: 404,
        body: format!("{what} not found"),
    }
}

impl FakeGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<GatewayCall> {
        lock(&self.calls).clone()
    }

    pub fn draft_requests(&self) -> Vec<DraftEmailRequest> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                GatewayCall::DraftEmail(request) => Some(request),
                _ => None,
            })
            .collect()
    }

    pub fn set_search(&self, query: &str, results: Result<Vec<Candidate>, GatewayError>) {
        lock(&self.search_results).insert(query.to_string(), results);
    }

    pub fn set_search_delay(&self, query: &str, delay: Duration) {
        lock(&self.search_delays).insert(query.to_string(), delay);
    }

    pub fn set_create_error(&self, error: Option<GatewayError>) {
        *lock(&self.create_error) = error;
    }

    pub fn set_summaries(&self, summaries: Result<Vec<ShortlistSummary>, GatewayError>) {
        *lock(&self.summaries) = Some(summaries);
    }

    pub fn set_detail(&self, name: &str, detail: Result<ShortlistDetail, GatewayError>) {
        lock(&self.details).insert(name.to_string(), detail);
    }

    pub fn set_detail_delay(&self, name: &str, delay: Duration) {
        lock(&self.detail_delays).insert(name.to_string(), delay);
    }

    pub fn set_draft_error(&self, error: Option<GatewayError>) {
        *lock(&self.draft_error) = error;
    }

    pub fn set_html_error(&self, error: Option<GatewayError>) {
        *lock(&self.html_error) = error;
    }

    pub fn set_analytics(&self, analytics: Result<AnalyticsSnapshot, GatewayError>) {
        *lock(&self.analytics) = Some(analytics);
    }

    pub fn set_jobs(&self, jobs: Vec<Job>) {
        *lock(&self.jobs) = jobs;
    }

    fn record(&self, call: GatewayCall) {
        lock(&self.calls).push(call);
    }
}

#[async_trait]
impl RemoteGateway for FakeGateway {
    async fn search(&self, query: &str) -> Result<Vec<Candidate>, GatewayError> {
        self.record(GatewayCall::Search(query.to_string()));
        let delay = lock(&self.search_delays).get(query).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        lock(&self.search_results)
            .get(query)
            .cloned()
            .unwrap_or_else(|| Ok(vec![]))
    }

    async fn create_shortlist(
        &self,
        name: &str,
        candidate_ids: &[CandidateId],
    ) -> Result<Ack, GatewayError> {
        self.record(GatewayCall::CreateShortlist {
            name: name.to_string(),
            candidate_ids: candidate_ids.to_vec(),
        });
        match lock(&self.create_error).clone() {
            Some(err) => Err(err),
            None => Ok(Ack::Json(serde_json::json!({ "success": true }))),
        }
    }

    async fn list_shortlists(&self) -> Result<Vec<ShortlistSummary>, GatewayError> {
        self.record(GatewayCall::ListShortlists);
        lock(&self.summaries).clone().unwrap_or_else(|| Ok(vec![]))
    }

    async fn get_shortlist(&self, name: &str) -> Result<ShortlistDetail, GatewayError> {
        self.record(GatewayCall::GetShortlist(name.to_string()));
        let delay = lock(&self.detail_delays).get(name).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        lock(&self.details)
            .get(name)
            .cloned()
            .unwrap_or_else(|| Err(not_found("Shortlist")))
    }

    async fn draft_email(&self, request: &DraftEmailRequest) -> Result<EmailDraft, GatewayError> {
        self.record(GatewayCall::DraftEmail(request.clone()));
        if let Some(err) = lock(&self.draft_error).clone() {
            return Err(err);
        }
        let subject = if request.custom_subject.is_empty() {
            format!("{} opportunity", request.job_title)
        } else {
            request.custom_subject.clone()
        };
        let closing = if request.custom_closing.is_empty() {
            "Best regards".to_string()
        } else {
            request.custom_closing.clone()
        };
        Ok(EmailDraft {
            subject,
            text: format!("Hello ({})\n\n{}", request.tone, closing),
            recipient_count: request.recipients.len(),
        })
    }

    async fn render_email_html(
        &self,
        subject: &str,
        text: &str,
    ) -> Result<HtmlPreview, GatewayError> {
        self.record(GatewayCall::RenderEmailHtml {
            subject: subject.to_string(),
            text: text.to_string(),
        });
        match lock(&self.html_error).clone() {
            Some(err) => Err(err),
            None => Ok(HtmlPreview {
                html: format!("<html><h1>{subject}</h1><p>{text}</p></html>"),
            }),
        }
    }

    async fn get_analytics(&self) -> Result<AnalyticsSnapshot, GatewayError> {
        self.record(GatewayCall::GetAnalytics);
        lock(&self.analytics)
            .clone()
            .unwrap_or_else(|| Ok(AnalyticsSnapshot::default()))
    }

    async fn list_jobs(&self) -> Result<Vec<Job>, GatewayError> {
        self.record(GatewayCall::ListJobs);
        Ok(lock(&self.jobs).clone())
    }

    async fn get_job(&self, id: &JobId) -> Result<Job, GatewayError> {
        self.record(GatewayCall::GetJob(id.clone()));
        lock(&self.jobs)
            .iter()
            .find(|job| job.id.as_ref() == Some(id))
            .cloned()
            .ok_or_else(|| not_found("Job"))
    }
}

pub fn candidate(index: CandidateId, first_name: &str, skills: &[&str]) -> Candidate {
    Candidate {
        index,
        first_name: first_name.to_string(),
        last_name: "Tester".to_string(),
        location: "Casablanca".to_string(),
        experience_years: 3,
        email: format!("{}@example.com", first_name.to_lowercase()),
        skills: skills.iter().map(|s| s.to_string()).collect(),
        score: 5.0,
        reason: format!("Matches {}", skills.join(", ")),
        recommended_jobs: vec![],
    }
}

pub fn member(name: &str) -> ShortlistMember {
    ShortlistMember {
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
        location: "Rabat".to_string(),
        experience: Some(4),
        skills: vec!["Go".to_string()],
        stage: "Screening".to_string(),
        availability: "2024-06-01".to_string(),
        ..Default::default()
    }
}

pub fn shortlist(name: &str, members: &[&str]) -> ShortlistDetail {
    ShortlistDetail {
        name: name.to_string(),
        candidates: members.iter().map(|m| member(m)).collect(),
    }
}

pub fn summary(name: &str, members: &[&str]) -> ShortlistSummary {
    ShortlistSummary {
        name: name.to_string(),
        candidates: members.iter().map(|m| m.to_string()).collect(),
        count: members.len(),
    }
}
