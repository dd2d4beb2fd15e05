use std::sync::Arc;

use anyhow::Context;
use tokio::sync::mpsc;

use crate::analytics::aggregator::AnalyticsAggregator;
use crate::config::Config;
use crate::gateway::{HttpGateway, RemoteGateway};
use crate::models::email::HtmlPreview;
use crate::outreach::draft::EmailDraftWorkflow;
use crate::search::session::SearchSession;
use crate::shortlists::catalog::ShortlistCatalog;

/// Shared application state handed to every command.
///
/// Workflows are never stored here: each activation gets fresh per-session
/// state from the factories below.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub gateway: Arc<dyn RemoteGateway>,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let gateway = HttpGateway::new(&config.api_url)
            .with_context(|| format!("RECRUITER_API_URL is not usable: {}", config.api_url))?;
        Ok(Self::with_gateway(config, Arc::new(gateway)))
    }

    pub fn with_gateway(config: Config, gateway: Arc<dyn RemoteGateway>) -> Self {
        Self { config, gateway }
    }

    pub fn gateway(&self) -> &dyn RemoteGateway {
        self.gateway.as_ref()
    }

    pub fn search_session(&self) -> SearchSession {
        SearchSession::new(self.config.confirmation_ttl)
    }

    pub fn shortlist_catalog(&self) -> ShortlistCatalog {
        ShortlistCatalog::new()
    }

    pub fn email_workflow(&self) -> (EmailDraftWorkflow, mpsc::UnboundedReceiver<HtmlPreview>) {
        EmailDraftWorkflow::with_preview_channel()
    }

    pub fn analytics(&self) -> AnalyticsAggregator {
        AnalyticsAggregator::new()
    }
}
