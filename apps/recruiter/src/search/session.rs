#![allow(dead_code)]

//! Search session: query → ranked results → selection → saved shortlist.
//!
//! Flow: begin_submit (clears results and selection) → gateway.search →
//!       apply_search (ignored if superseded) → toggle candidates →
//!       begin_save → gateway.create_shortlist → apply_save.

use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::errors::{GatewayError, WorkflowError};
use crate::gateway::RemoteGateway;
use crate::models::candidate::{Candidate, CandidateId};
use crate::models::shortlist::Ack;
use crate::search::selection::SelectionSet;
use crate::sequence::{RequestSequence, RequestTicket, Resolution};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchStatus {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

/// An issued search request. Carries everything the gateway call needs.
#[derive(Debug, Clone)]
pub struct PendingSearch {
    pub ticket: RequestTicket,
    pub query: String,
}

/// An issued shortlist-create request.
#[derive(Debug, Clone)]
pub struct PendingSave {
    pub ticket: RequestTicket,
    /// Search that produced the page the selection was taken from.
    page: Option<RequestTicket>,
    pub name: String,
    pub candidate_ids: Vec<CandidateId>,
}

#[derive(Debug, Clone)]
struct Confirmation {
    message: String,
    expires_at: Instant,
}

pub struct SearchSession {
    query: String,
    status: SearchStatus,
    results: Vec<Candidate>,
    error: Option<String>,
    selection: SelectionSet,
    searches: RequestSequence,
    saves: RequestSequence,
    page: Option<RequestTicket>,
    confirmation: Option<Confirmation>,
    confirmation_ttl: Duration,
}

impl SearchSession {
    pub fn new(confirmation_ttl: Duration) -> Self {
        Self {
            query: String::new(),
            status: SearchStatus::Idle,
            results: Vec::new(),
            error: None,
            selection: SelectionSet::new(),
            searches: RequestSequence::new(),
            saves: RequestSequence::new(),
            page: None,
            confirmation: None,
            confirmation_ttl,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn status(&self) -> SearchStatus {
        self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status == SearchStatus::Submitting
    }

    pub fn results(&self) -> &[Candidate] {
        &self.results
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn is_selected(&self, id: CandidateId) -> bool {
        self.selection.contains(id)
    }

    /// Candidates of the current page that are selected, in pick order.
    pub fn selected_candidates(&self) -> Vec<&Candidate> {
        self.selection
            .ids()
            .iter()
            .filter_map(|&id| self.results.iter().find(|c| c.index == id))
            .collect()
    }

    /// The "shortlist saved" message, until its lifetime runs out.
    pub fn confirmation(&self) -> Option<&str> {
        self.confirmation
            .as_ref()
            .filter(|c| Instant::now() < c.expires_at)
            .map(|c| c.message.as_str())
    }

    // ── Search ──────────────────────────────────────────────────────────────

    /// Starts a search. Results and selection are cleared immediately, before
    /// any response arrives. Any search still in flight becomes stale.
    pub fn begin_submit(&mut self, query: &str) -> Result<PendingSearch, WorkflowError> {
        if query.trim().is_empty() {
            return Err(WorkflowError::validation("search query cannot be empty"));
        }

        let ticket = self.searches.issue();
        self.query = query.to_string();
        self.status = SearchStatus::Submitting;
        self.results.clear();
        self.selection.clear();
        self.error = None;
        self.page = Some(ticket);

        info!("Search #{} submitted: {:?}", ticket.seq(), query);
        Ok(PendingSearch {
            ticket,
            query: query.to_string(),
        })
    }

    pub fn apply_search(
        &mut self,
        pending: &PendingSearch,
        result: Result<Vec<Candidate>, GatewayError>,
    ) -> Resolution {
        if !self.searches.is_current(pending.ticket) {
            debug!(
                "Dropping stale search #{} ({:?})",
                pending.ticket.seq(),
                pending.query
            );
            return Resolution::Stale;
        }

        match result {
            Ok(results) => {
                info!(
                    "Search #{} returned {} candidates",
                    pending.ticket.seq(),
                    results.len()
                );
                self.results = results;
                self.status = SearchStatus::Succeeded;
                Resolution::Applied
            }
            Err(e) => {
                warn!("Search #{} failed: {e}", pending.ticket.seq());
                self.error = Some(e.to_string());
                self.status = SearchStatus::Failed;
                Resolution::Failed
            }
        }
    }

    pub async fn submit(
        &mut self,
        gateway: &dyn RemoteGateway,
        query: &str,
    ) -> Result<Resolution, WorkflowError> {
        let pending = self.begin_submit(query)?;
        let result = gateway.search(&pending.query).await;
        Ok(self.apply_search(&pending, result))
    }

    // ── Selection ───────────────────────────────────────────────────────────

    /// Flips selection of a candidate on the current page.
    /// Returns whether the candidate is selected afterwards.
    pub fn toggle(&mut self, id: CandidateId) -> Result<bool, WorkflowError> {
        if !self.results.iter().any(|c| c.index == id) {
            return Err(WorkflowError::validation(format!(
                "candidate {id} is not on the current result page"
            )));
        }
        Ok(self.selection.toggle(id))
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    // ── Save ────────────────────────────────────────────────────────────────

    /// Starts persisting the current selection as a new shortlist.
    /// `name` is sent exactly as given; it only has to be non-blank.
    /// A previous save failure is cleared when the retry starts.
    pub fn begin_save(&mut self, name: &str) -> Result<PendingSave, WorkflowError> {
        if self.selection.is_empty() {
            return Err(WorkflowError::validation(
                "select at least one candidate before saving a shortlist",
            ));
        }
        if name.trim().is_empty() {
            return Err(WorkflowError::validation("shortlist name cannot be empty"));
        }

        let ticket = self.saves.issue();
        self.error = None;
        info!(
            "Saving shortlist {:?} with {} candidates",
            name,
            self.selection.len()
        );
        Ok(PendingSave {
            ticket,
            page: self.page,
            name: name.to_string(),
            candidate_ids: self.selection.ids().to_vec(),
        })
    }

    /// On success shows the confirmation and clears the selection, unless a
    /// newer search has already replaced the page the selection came from.
    /// On failure the selection is kept so the save can be retried.
    pub fn apply_save(
        &mut self,
        pending: &PendingSave,
        result: Result<Ack, GatewayError>,
    ) -> Resolution {
        if !self.saves.is_current(pending.ticket) {
            debug!("Dropping stale save of {:?}", pending.name);
            return Resolution::Stale;
        }

        match result {
            Ok(_) => {
                info!("Shortlist {:?} saved", pending.name);
                self.confirmation = Some(Confirmation {
                    message: format!("Shortlist \"{}\" saved successfully!", pending.name),
                    expires_at: Instant::now() + self.confirmation_ttl,
                });
                if pending.page == self.page {
                    self.selection.clear();
                }
                Resolution::Applied
            }
            Err(e) => {
                warn!("Saving shortlist {:?} failed: {e}", pending.name);
                self.error = Some(e.to_string());
                Resolution::Failed
            }
        }
    }

    pub async fn save_selection(
        &mut self,
        gateway: &dyn RemoteGateway,
        name: &str,
    ) -> Result<Resolution, WorkflowError> {
        let pending = self.begin_save(name)?;
        let result = gateway
            .create_shortlist(&pending.name, &pending.candidate_ids)
            .await;
        Ok(self.apply_save(&pending, result))
    }
}
