#![allow(dead_code)]

use tracing::{debug, info, warn};

use crate::analytics::report::AnalyticsReport;
use crate::errors::GatewayError;
use crate::gateway::RemoteGateway;
use crate::models::analytics::AnalyticsSnapshot;
use crate::sequence::{RequestSequence, RequestTicket, Resolution};

#[derive(Debug, Clone)]
pub struct PendingAnalytics {
    pub ticket: RequestTicket,
}

#[derive(Debug, PartialEq)]
pub enum AnalyticsView<'a> {
    /// Nothing fetched yet.
    Idle,
    Loading,
    Failed(&'a str),
    /// Fetched, but no candidate is in any stage.
    NoData(&'a AnalyticsReport),
    Ready(&'a AnalyticsReport),
}

/// Read-only dashboard over the last fetched snapshot.
#[derive(Debug, Default)]
pub struct AnalyticsAggregator {
    snapshot: Option<AnalyticsSnapshot>,
    report: Option<AnalyticsReport>,
    loading: bool,
    error: Option<String>,
    requests: RequestSequence,
}

impl AnalyticsAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Option<&AnalyticsSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn report(&self) -> Option<&AnalyticsReport> {
        self.report.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn view(&self) -> AnalyticsView<'_> {
        if self.loading {
            return AnalyticsView::Loading;
        }
        if let Some(error) = &self.error {
            return AnalyticsView::Failed(error);
        }
        match &self.report {
            None => AnalyticsView::Idle,
            Some(report) if report.is_empty() => AnalyticsView::NoData(report),
            Some(report) => AnalyticsView::Ready(report),
        }
    }

    pub fn begin_refresh(&mut self) -> PendingAnalytics {
        self.loading = true;
        self.error = None;
        PendingAnalytics {
            ticket: self.requests.issue(),
        }
    }

    /// Caches the snapshot and its derived report. A failed refresh keeps the
    /// previous snapshot cached.
    pub fn apply_refresh(
        &mut self,
        pending: &PendingAnalytics,
        result: Result<AnalyticsSnapshot, GatewayError>,
    ) -> Resolution {
        if !self.requests.is_current(pending.ticket) {
            debug!("Dropping stale analytics #{}", pending.ticket.seq());
            return Resolution::Stale;
        }
        self.loading = false;

        match result {
            Ok(snapshot) => {
                let report = AnalyticsReport::from_snapshot(&snapshot);
                info!(
                    "Analytics refreshed: {} candidates across {} stages",
                    report.total_candidates,
                    report.stages.len()
                );
                self.snapshot = Some(snapshot);
                self.report = Some(report);
                Resolution::Applied
            }
            Err(e) => {
                warn!("Loading analytics failed: {e}");
                self.error = Some(e.to_string());
                Resolution::Failed
            }
        }
    }

    pub async fn refresh(&mut self, gateway: &dyn RemoteGateway) -> Resolution {
        let pending = self.begin_refresh();
        let result = gateway.get_analytics().await;
        self.apply_refresh(&pending, result)
    }
}
