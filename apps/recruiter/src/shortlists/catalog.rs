#![allow(dead_code)]

//! Shortlist catalog: the summary index plus at most one opened roster.

use tracing::{debug, info, warn};

use crate::errors::{GatewayError, WorkflowError};
use crate::gateway::RemoteGateway;
use crate::models::shortlist::{ShortlistDetail, ShortlistSummary};
use crate::sequence::{RequestSequence, RequestTicket, Resolution};

#[derive(Debug, Clone)]
pub struct PendingRefresh {
    pub ticket: RequestTicket,
}

#[derive(Debug, Clone)]
pub struct PendingOpen {
    pub ticket: RequestTicket,
    pub name: String,
}

/// What the catalog currently shows.
#[derive(Debug, PartialEq)]
pub enum CatalogView<'a> {
    Summaries(&'a [ShortlistSummary]),
    Opening(&'a str),
    Detail(&'a ShortlistDetail),
}

#[derive(Debug, Default)]
pub struct ShortlistCatalog {
    summaries: Vec<ShortlistSummary>,
    selected: Option<String>,
    detail: Option<ShortlistDetail>,
    loading_summaries: bool,
    loading_detail: bool,
    error: Option<String>,
    list_requests: RequestSequence,
    detail_requests: RequestSequence,
}

impl ShortlistCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn summaries(&self) -> &[ShortlistSummary] {
        &self.summaries
    }

    /// Summary for an exact, case-sensitive name.
    pub fn find_summary(&self, name: &str) -> Option<&ShortlistSummary> {
        self.summaries.iter().find(|s| s.name == name)
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn detail(&self) -> Option<&ShortlistDetail> {
        self.detail.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading_summaries || self.loading_detail
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn view(&self) -> CatalogView<'_> {
        match (&self.selected, &self.detail) {
            (Some(_), Some(detail)) => CatalogView::Detail(detail),
            (Some(name), None) if self.loading_detail => CatalogView::Opening(name),
            _ => CatalogView::Summaries(&self.summaries),
        }
    }

    // ── Summary list ────────────────────────────────────────────────────────

    pub fn begin_refresh(&mut self) -> PendingRefresh {
        self.loading_summaries = true;
        self.error = None;
        PendingRefresh {
            ticket: self.list_requests.issue(),
        }
    }

    /// Replaces the summary list wholesale. On failure the previous list stays.
    pub fn apply_refresh(
        &mut self,
        pending: &PendingRefresh,
        result: Result<Vec<ShortlistSummary>, GatewayError>,
    ) -> Resolution {
        if !self.list_requests.is_current(pending.ticket) {
            debug!("Dropping stale shortlist index #{}", pending.ticket.seq());
            return Resolution::Stale;
        }
        self.loading_summaries = false;

        match result {
            Ok(summaries) => {
                info!("Loaded {} shortlists", summaries.len());
                self.summaries = summaries;
                Resolution::Applied
            }
            Err(e) => {
                warn!("Loading shortlists failed: {e}");
                self.error = Some(e.to_string());
                Resolution::Failed
            }
        }
    }

    pub async fn refresh(&mut self, gateway: &dyn RemoteGateway) -> Resolution {
        let pending = self.begin_refresh();
        let result = gateway.list_shortlists().await;
        self.apply_refresh(&pending, result)
    }

    // ── Detail ──────────────────────────────────────────────────────────────

    /// Selects a shortlist by exact name and discards any previously held roster.
    pub fn begin_open(&mut self, name: &str) -> Result<PendingOpen, WorkflowError> {
        if name.is_empty() {
            return Err(WorkflowError::validation("shortlist name cannot be empty"));
        }

        let ticket = self.detail_requests.issue();
        self.selected = Some(name.to_string());
        self.detail = None;
        self.loading_detail = true;
        self.error = None;

        debug!("Opening shortlist {:?} (#{})", name, ticket.seq());
        Ok(PendingOpen {
            ticket,
            name: name.to_string(),
        })
    }

    /// Stores the roster. A failure is reported without touching the summary list.
    pub fn apply_open(
        &mut self,
        pending: &PendingOpen,
        result: Result<ShortlistDetail, GatewayError>,
    ) -> Resolution {
        if !self.detail_requests.is_current(pending.ticket) {
            debug!("Dropping stale roster for {:?}", pending.name);
            return Resolution::Stale;
        }
        self.loading_detail = false;

        match result {
            Ok(detail) => {
                info!(
                    "Opened shortlist {:?} with {} candidates",
                    pending.name,
                    detail.candidates.len()
                );
                self.detail = Some(detail);
                Resolution::Applied
            }
            Err(e) => {
                warn!("Opening shortlist {:?} failed: {e}", pending.name);
                self.error = Some(e.to_string());
                Resolution::Failed
            }
        }
    }

    pub async fn open(
        &mut self,
        gateway: &dyn RemoteGateway,
        name: &str,
    ) -> Result<Resolution, WorkflowError> {
        let pending = self.begin_open(name)?;
        let result = gateway.get_shortlist(&pending.name).await;
        Ok(self.apply_open(&pending, result))
    }

    /// Back to the summary view. No network call; an open still in flight is ignored.
    pub fn close(&mut self) {
        self.detail_requests.invalidate();
        self.selected = None;
        self.detail = None;
        self.loading_detail = false;
    }
}
