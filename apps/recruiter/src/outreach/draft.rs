#![allow(dead_code)]

//! Outreach email drafting for one shortlist at a time.
//!
//! Flow: select_shortlist → (roster loaded) → draft → edit overrides →
//!       redraft … → request_html_preview (side channel, no state change).
//!
//! The backend is stateless per call: every draft request carries the full
//! roster and every parameter, never a diff against the previous request.

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::errors::{GatewayError, WorkflowError};
use crate::gateway::RemoteGateway;
use crate::models::email::{DraftEmailRequest, EmailDraft, HtmlPreview};
use crate::models::shortlist::{ShortlistDetail, ShortlistMember};
use crate::outreach::tone::Tone;
use crate::sequence::{RequestSequence, RequestTicket, Resolution};
use crate::shortlists::catalog::{PendingOpen, ShortlistCatalog};

pub const DEFAULT_JOB_TITLE: &str = "Software Developer";

/// Number of recipient names shown before collapsing into "and N more".
const RECIPIENT_PREVIEW_LEN: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftStage {
    NoRecipients,
    Ready,
    Drafting,
    Drafted,
}

/// User edits layered over the generated draft. Scoped to one shortlist.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftOverrides {
    pub custom_subject: String,
    pub custom_closing: String,
}

#[derive(Debug, Clone)]
pub struct PendingDraft {
    pub ticket: RequestTicket,
    pub request: DraftEmailRequest,
}

#[derive(Debug, Clone)]
pub struct PendingPreview {
    pub ticket: RequestTicket,
    pub subject: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipientPreview {
    pub names: Vec<String>,
    pub remaining: usize,
}

pub struct EmailDraftWorkflow {
    catalog: ShortlistCatalog,
    shortlist: Option<String>,
    selecting: Option<String>,
    recipients: Vec<ShortlistMember>,
    job_title: String,
    tone: Tone,
    overrides: DraftOverrides,
    draft: Option<EmailDraft>,
    drafting: bool,
    error: Option<String>,
    preview_error: Option<String>,
    drafts: RequestSequence,
    previews: RequestSequence,
    preview_tx: mpsc::UnboundedSender<HtmlPreview>,
}

impl EmailDraftWorkflow {
    /// Rendered previews are delivered on `preview_tx`, outside the draft state.
    pub fn new(preview_tx: mpsc::UnboundedSender<HtmlPreview>) -> Self {
        Self {
            catalog: ShortlistCatalog::new(),
            shortlist: None,
            selecting: None,
            recipients: Vec::new(),
            job_title: DEFAULT_JOB_TITLE.to_string(),
            tone: Tone::default(),
            overrides: DraftOverrides::default(),
            draft: None,
            drafting: false,
            error: None,
            preview_error: None,
            drafts: RequestSequence::new(),
            previews: RequestSequence::new(),
            preview_tx,
        }
    }

    pub fn with_preview_channel() -> (Self, mpsc::UnboundedReceiver<HtmlPreview>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }

    pub fn stage(&self) -> DraftStage {
        if self.recipients.is_empty() {
            DraftStage::NoRecipients
        } else if self.drafting {
            DraftStage::Drafting
        } else if self.draft.is_some() {
            DraftStage::Drafted
        } else {
            DraftStage::Ready
        }
    }

    pub fn catalog(&self) -> &ShortlistCatalog {
        &self.catalog
    }

    pub fn shortlist(&self) -> Option<&str> {
        self.shortlist.as_deref()
    }

    pub fn recipients(&self) -> &[ShortlistMember] {
        &self.recipients
    }

    pub fn recipient_preview(&self) -> RecipientPreview {
        RecipientPreview {
            names: self
                .recipients
                .iter()
                .take(RECIPIENT_PREVIEW_LEN)
                .map(ShortlistMember::display_name)
                .collect(),
            remaining: self.recipients.len().saturating_sub(RECIPIENT_PREVIEW_LEN),
        }
    }

    pub fn job_title(&self) -> &str {
        &self.job_title
    }

    pub fn tone(&self) -> Tone {
        self.tone
    }

    pub fn overrides(&self) -> &DraftOverrides {
        &self.overrides
    }

    pub fn current_draft(&self) -> Option<&EmailDraft> {
        self.draft.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn preview_error(&self) -> Option<&str> {
        self.preview_error.as_deref()
    }

    // ── Parameters ──────────────────────────────────────────────────────────

    pub fn set_job_title(&mut self, job_title: &str) {
        self.job_title = job_title.to_string();
    }

    pub fn set_tone(&mut self, tone: &str) -> Result<(), WorkflowError> {
        self.tone = tone.parse()?;
        Ok(())
    }

    pub fn set_custom_subject(&mut self, subject: &str) {
        self.overrides.custom_subject = subject.to_string();
    }

    pub fn set_custom_closing(&mut self, closing: &str) {
        self.overrides.custom_closing = closing.to_string();
    }

    // ── Shortlists ──────────────────────────────────────────────────────────

    pub async fn load_shortlists(&mut self, gateway: &dyn RemoteGateway) -> Resolution {
        let resolution = self.catalog.refresh(gateway).await;
        if resolution == Resolution::Failed {
            self.error = self.catalog.error().map(str::to_string);
        }
        resolution
    }

    /// Starts loading a shortlist's roster. Current roster, draft and overrides
    /// stay in place until the new roster arrives.
    pub fn begin_select(&mut self, name: &str) -> Result<PendingOpen, WorkflowError> {
        let pending = self.catalog.begin_open(name)?;
        self.selecting = Some(pending.name.clone());
        self.error = None;
        Ok(pending)
    }

    /// Swaps in the new roster and discards the previous shortlist's draft and
    /// overrides. A failed load leaves everything as it was.
    pub fn apply_select(
        &mut self,
        pending: &PendingOpen,
        result: Result<ShortlistDetail, GatewayError>,
    ) -> Resolution {
        let resolution = self.catalog.apply_open(pending, result);
        match resolution {
            Resolution::Applied => {
                self.selecting = None;
                if let Some(detail) = self.catalog.detail() {
                    info!(
                        "Recipients set to shortlist {:?} ({} candidates)",
                        detail.name,
                        detail.candidates.len()
                    );
                    self.shortlist = Some(detail.name.clone());
                    self.recipients = detail.candidates.clone();
                }
                self.reset_draft();
            }
            Resolution::Failed => {
                self.selecting = None;
                self.error = self.catalog.error().map(str::to_string);
                // The catalog must not keep pointing at the shortlist that failed to load.
                self.catalog.close();
            }
            Resolution::Stale => {}
        }
        resolution
    }

    pub async fn select_shortlist(
        &mut self,
        gateway: &dyn RemoteGateway,
        name: &str,
    ) -> Result<Resolution, WorkflowError> {
        let pending = self.begin_select(name)?;
        let result = gateway.get_shortlist(&pending.name).await;
        Ok(self.apply_select(&pending, result))
    }

    /// Deselects the shortlist entirely.
    pub fn clear_shortlist(&mut self) {
        self.catalog.close();
        self.selecting = None;
        self.shortlist = None;
        self.recipients.clear();
        self.reset_draft();
    }

    fn reset_draft(&mut self) {
        self.drafts.invalidate();
        self.previews.invalidate();
        self.drafting = false;
        self.draft = None;
        self.overrides = DraftOverrides::default();
        self.preview_error = None;
    }

    // ── Drafting ────────────────────────────────────────────────────────────

    /// Stores the given parameters and starts a draft for the full roster.
    pub fn begin_draft(
        &mut self,
        job_title: &str,
        tone: &str,
        custom_subject: &str,
        custom_closing: &str,
    ) -> Result<PendingDraft, WorkflowError> {
        let tone: Tone = tone.parse()?;
        self.ensure_recipients()?;

        self.job_title = job_title.to_string();
        self.tone = tone;
        self.overrides = DraftOverrides {
            custom_subject: custom_subject.to_string(),
            custom_closing: custom_closing.to_string(),
        };
        Ok(self.issue_draft())
    }

    /// Re-sends the current roster and parameters, including any override
    /// edits made since the last draft. Requires an existing draft.
    pub fn begin_redraft(&mut self) -> Result<PendingDraft, WorkflowError> {
        self.ensure_recipients()?;
        if self.draft.is_none() {
            return Err(WorkflowError::validation(
                "generate a draft before updating it",
            ));
        }
        Ok(self.issue_draft())
    }

    fn ensure_recipients(&self) -> Result<(), WorkflowError> {
        if let Some(name) = &self.selecting {
            return Err(WorkflowError::validation(format!(
                "recipients for shortlist {name:?} are still loading"
            )));
        }
        if self.recipients.is_empty() {
            return Err(WorkflowError::validation(
                "please select a shortlist with recipients",
            ));
        }
        Ok(())
    }

    fn issue_draft(&mut self) -> PendingDraft {
        let ticket = self.drafts.issue();
        self.drafting = true;
        self.error = None;

        debug!(
            "Draft #{}: {} recipients, job_title={:?}, tone={}",
            ticket.seq(),
            self.recipients.len(),
            self.job_title,
            self.tone
        );
        PendingDraft {
            ticket,
            request: DraftEmailRequest {
                recipients: self.recipients.clone(),
                job_title: self.job_title.clone(),
                tone: self.tone,
                custom_subject: self.overrides.custom_subject.clone(),
                custom_closing: self.overrides.custom_closing.clone(),
            },
        }
    }

    /// Stores the new draft. On failure the previous draft is kept.
    pub fn apply_draft(
        &mut self,
        pending: &PendingDraft,
        result: Result<EmailDraft, GatewayError>,
    ) -> Resolution {
        if !self.drafts.is_current(pending.ticket) {
            debug!("Dropping stale draft #{}", pending.ticket.seq());
            return Resolution::Stale;
        }
        self.drafting = false;

        match result {
            Ok(draft) => {
                info!(
                    "Draft ready for {} recipients: {:?}",
                    draft.recipient_count, draft.subject
                );
                self.draft = Some(draft);
                Resolution::Applied
            }
            Err(e) => {
                warn!("Drafting email failed: {e}");
                self.error = Some(e.to_string());
                Resolution::Failed
            }
        }
    }

    pub async fn draft(
        &mut self,
        gateway: &dyn RemoteGateway,
        job_title: &str,
        tone: &str,
        custom_subject: &str,
        custom_closing: &str,
    ) -> Result<Resolution, WorkflowError> {
        let pending = self.begin_draft(job_title, tone, custom_subject, custom_closing)?;
        let result = gateway.draft_email(&pending.request).await;
        Ok(self.apply_draft(&pending, result))
    }

    pub async fn redraft(
        &mut self,
        gateway: &dyn RemoteGateway,
    ) -> Result<Resolution, WorkflowError> {
        let pending = self.begin_redraft()?;
        let result = gateway.draft_email(&pending.request).await;
        Ok(self.apply_draft(&pending, result))
    }

    // ── HTML preview ────────────────────────────────────────────────────────

    /// Starts rendering the current draft. Does not change the draft stage.
    pub fn begin_preview(&mut self) -> Result<PendingPreview, WorkflowError> {
        let draft = match (self.stage(), &self.draft) {
            (DraftStage::Drafted, Some(draft)) => draft,
            _ => {
                return Err(WorkflowError::validation(
                    "an HTML preview needs a finished draft",
                ))
            }
        };

        let pending = PendingPreview {
            ticket: self.previews.issue(),
            subject: draft.subject.clone(),
            text: draft.text.clone(),
        };
        self.preview_error = None;
        Ok(pending)
    }

    /// Delivers rendered markup on the preview channel. Failures are recorded
    /// in `preview_error`, separate from drafting errors.
    pub fn apply_preview(
        &mut self,
        pending: &PendingPreview,
        result: Result<HtmlPreview, GatewayError>,
    ) -> Resolution {
        if !self.previews.is_current(pending.ticket) {
            debug!("Dropping stale HTML preview #{}", pending.ticket.seq());
            return Resolution::Stale;
        }

        match result {
            Ok(preview) => {
                if self.preview_tx.send(preview).is_err() {
                    warn!("HTML preview rendered but no surface is listening");
                    self.preview_error = Some("preview surface is closed".to_string());
                    return Resolution::Failed;
                }
                Resolution::Applied
            }
            Err(e) => {
                warn!("HTML preview failed: {e}");
                self.preview_error = Some(e.to_string());
                Resolution::Failed
            }
        }
    }

    pub async fn request_html_preview(
        &mut self,
        gateway: &dyn RemoteGateway,
    ) -> Result<Resolution, WorkflowError> {
        let pending = self.begin_preview()?;
        let result = gateway
            .render_email_html(&pending.subject, &pending.text)
            .await;
        Ok(self.apply_preview(&pending, result))
    }
}
