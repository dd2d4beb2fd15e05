//! Remote gateway: the single point of entry for all backend calls.
//!
//! ARCHITECTURAL RULE: workflows never build HTTP requests themselves.
//! They only talk to `dyn RemoteGateway`.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::errors::GatewayError;
use crate::models::analytics::AnalyticsSnapshot;
use crate::models::candidate::{Candidate, CandidateId, SearchRequest, SearchResponse};
use crate::models::email::{DraftEmailRequest, EmailDraft, HtmlPreview, HtmlPreviewRequest};
use crate::models::job::{Job, JobId};
use crate::models::shortlist::{
    Ack, CreateShortlistRequest, ShortlistDetail, ShortlistIndex, ShortlistSummary,
};

const JSON_CONTENT_TYPE: &str = "application/json";

/// Typed request/response functions against the recruiting backend.
///
/// Every call is a single request/response; there is no retry, pagination
/// or streaming at this boundary.
#[async_trait]
pub trait RemoteGateway: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<Candidate>, GatewayError>;

    async fn create_shortlist(
        &self,
        name: &str,
        candidate_ids: &[CandidateId],
    ) -> Result<Ack, GatewayError>;

    async fn list_shortlists(&self) -> Result<Vec<ShortlistSummary>, GatewayError>;

    /// `name` is sent as a single escaped path segment.
    async fn get_shortlist(&self, name: &str) -> Result<ShortlistDetail, GatewayError>;

    async fn draft_email(&self, request: &DraftEmailRequest) -> Result<EmailDraft, GatewayError>;

    async fn render_email_html(
        &self,
        subject: &str,
        text: &str,
    ) -> Result<HtmlPreview, GatewayError>;

    async fn get_analytics(&self) -> Result<AnalyticsSnapshot, GatewayError>;

    async fn list_jobs(&self) -> Result<Vec<Job>, GatewayError>;

    async fn get_job(&self, id: &JobId) -> Result<Job, GatewayError>;
}

/// A successful response body, split by negotiated content type.
#[derive(Debug)]
enum ResponseBody {
    Json(String),
    Text(String),
}

/// HTTP implementation of `RemoteGateway` over reqwest.
#[derive(Clone)]
pub struct HttpGateway {
    client: Client,
    base_url: Url,
}

impl HttpGateway {
    pub fn new(base_url: &str) -> Result<Self, GatewayError> {
        let base_url = Url::parse(base_url).map_err(|e| GatewayError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(GatewayError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: "URL cannot carry a path".to_string(),
            });
        }

        let client = Client::builder()
            .user_agent(concat!("recruiter/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, base_url })
    }

    /// Appends path segments to the base URL, escaping each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, GatewayError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| GatewayError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: "URL cannot carry a path".to_string(),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Sends one request and converts any non-success status into `GatewayError::Api`.
    async fn send(&self, request: RequestBuilder) -> Result<ResponseBody, GatewayError> {
        let response = request
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .send()
            .await?;

        let status = response.status();
        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|ct| ct.contains(JSON_CONTENT_TYPE))
            .unwrap_or(false);
        let body = response.text().await?;

        if !status.is_success() {
            warn!("Backend returned {}: {}", status, body);
            return Err(GatewayError::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(if is_json {
            ResponseBody::Json(body)
        } else {
            ResponseBody::Text(body)
        })
    }

    async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, GatewayError> {
        let url = self.endpoint(segments)?;
        debug!("GET {}", url.path());
        decode(self.send(self.client.get(url)).await?)
    }

    async fn post<B, T>(&self, segments: &[&str], body: &B) -> Result<T, GatewayError>
    where
        B: serde::Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let url = self.endpoint(segments)?;
        debug!("POST {}", url.path());
        decode(self.send(self.client.post(url).json(body)).await?)
    }
}

/// Parses a structured body. Plain text where a structured body is required
/// is a decode failure; plain-text acknowledgements go through `Ack` instead.
fn decode<T: DeserializeOwned>(body: ResponseBody) -> Result<T, GatewayError> {
    match body {
        ResponseBody::Json(text) => Ok(serde_json::from_str(&text)?),
        ResponseBody::Text(text) => Err(GatewayError::Decode {
            message: format!(
                "expected a JSON body, got text: {:?}",
                text.chars().take(80).collect::<String>()
            ),
        }),
    }
}

#[async_trait]
impl RemoteGateway for HttpGateway {
    async fn search(&self, query: &str) -> Result<Vec<Candidate>, GatewayError> {
        let response: SearchResponse = self.post(&["search"], &SearchRequest { query }).await?;
        Ok(response.results)
    }

    async fn create_shortlist(
        &self,
        name: &str,
        candidate_ids: &[CandidateId],
    ) -> Result<Ack, GatewayError> {
        let url = self.endpoint(&["shortlists"])?;
        debug!("POST {}", url.path());
        let body = CreateShortlistRequest {
            name,
            candidate_indices: candidate_ids,
        };
        match self.send(self.client.post(url).json(&body)).await? {
            ResponseBody::Json(text) => Ok(Ack::Json(serde_json::from_str(&text)?)),
            ResponseBody::Text(text) => Ok(Ack::Text(text)),
        }
    }

    async fn list_shortlists(&self) -> Result<Vec<ShortlistSummary>, GatewayError> {
        let index: ShortlistIndex = self.get(&["shortlists"]).await?;
        Ok(index.shortlists)
    }

    async fn get_shortlist(&self, name: &str) -> Result<ShortlistDetail, GatewayError> {
        self.get(&["shortlist", name]).await
    }

    async fn draft_email(&self, request: &DraftEmailRequest) -> Result<EmailDraft, GatewayError> {
        self.post(&["draft-email"], request).await
    }

    async fn render_email_html(
        &self,
        subject: &str,
        text: &str,
    ) -> Result<HtmlPreview, GatewayError> {
        let body = HtmlPreviewRequest {
            subject: subject.to_string(),
            text: text.to_string(),
        };
        self.post(&["html-preview"], &body).await
    }

    async fn get_analytics(&self) -> Result<AnalyticsSnapshot, GatewayError> {
        self.get(&["analytics"]).await
    }

    async fn list_jobs(&self) -> Result<Vec<Job>, GatewayError> {
        self.get(&["jobs"]).await
    }

    async fn get_job(&self, id: &JobId) -> Result<Job, GatewayError> {
        let id = id.to_string();
        self.get(&["jobs", id.as_str()]).await
    }
}
