use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;

use crate::analytics::aggregator::AnalyticsView;
use crate::models::candidate::{Candidate, CandidateId};
use crate::models::job::{Job, JobId};
use crate::outreach::draft::{DraftStage, EmailDraftWorkflow, DEFAULT_JOB_TITLE};
use crate::outreach::tone::Tone;
use crate::sequence::Resolution;
use crate::shortlists::catalog::CatalogView;
use crate::state::AppState;

#[derive(Parser, Debug)]
#[command(
    name = "recruiter",
    about = "Search candidates, curate shortlists, draft outreach and review pipeline analytics",
    version
)]
pub struct Cli {
    /// Override the configured backend base URL
    #[arg(long, global = true)]
    pub api_url: Option<String>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a natural-language candidate search
    Search(SearchArgs),
    /// List saved shortlists
    Shortlists,
    /// Show the full roster of one shortlist
    Shortlist {
        /// Exact shortlist name
        name: String,
    },
    /// Draft an outreach email for a shortlist
    Email(EmailArgs),
    /// Show pipeline and skills analytics
    Analytics,
    /// List open jobs
    Jobs,
    /// Show one job
    Job {
        /// Job identifier (numeric or text)
        id: String,
    },
}

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Free-text query, e.g. "react developers in Casablanca"
    pub query: String,
    /// Candidate index to select from the result page (repeatable)
    #[arg(long = "select")]
    pub select: Vec<CandidateId>,
    /// Save the selected candidates as a new shortlist
    #[arg(long)]
    pub save: Option<String>,
}

#[derive(Args, Debug)]
pub struct EmailArgs {
    /// Shortlist whose candidates receive the email
    pub shortlist: String,
    #[arg(long, default_value = DEFAULT_JOB_TITLE)]
    pub job_title: String,
    /// friendly or professional
    #[arg(long, default_value = "friendly")]
    pub tone: String,
    /// Replace the generated subject line
    #[arg(long, default_value = "")]
    pub subject: String,
    /// Replace the generated closing
    #[arg(long, default_value = "")]
    pub closing: String,
    /// After the first draft, set this subject and regenerate
    #[arg(long)]
    pub revise_subject: Option<String>,
    /// After the first draft, set this closing and regenerate
    #[arg(long)]
    pub revise_closing: Option<String>,
    /// Render the draft as HTML and write it to this file
    #[arg(long)]
    pub html: Option<PathBuf>,
}

pub async fn run(command: Command, state: AppState) -> Result<()> {
    match command {
        Command::Search(args) => search(&state, args).await,
        Command::Shortlists => list_shortlists(&state).await,
        Command::Shortlist { name } => show_shortlist(&state, &name).await,
        Command::Email(args) => email(&state, args).await,
        Command::Analytics => analytics(&state).await,
        Command::Jobs => list_jobs(&state).await,
        Command::Job { id } => show_job(&state, &JobId::from(id.as_str())).await,
    }
}

async fn search(state: &AppState, args: SearchArgs) -> Result<()> {
    let mut session = state.search_session();

    if session.submit(state.gateway(), &args.query).await? == Resolution::Failed {
        bail!("search failed: {}", session.error().unwrap_or("unknown error"));
    }
    for id in &args.select {
        session.toggle(*id)?;
    }

    println!(
        "{} candidates for {:?}",
        session.results().len(),
        session.query()
    );
    for candidate in session.results() {
        print_candidate(candidate, session.is_selected(candidate.index));
    }

    if let Some(name) = args.save {
        if session.save_selection(state.gateway(), &name).await? == Resolution::Failed {
            bail!(
                "saving shortlist {name:?} failed: {}",
                session.error().unwrap_or("unknown error")
            );
        }
        if let Some(confirmation) = session.confirmation() {
            println!("\n{confirmation}");
        }
    }
    Ok(())
}

fn print_candidate(candidate: &Candidate, selected: bool) {
    let mark = if selected { "[x]" } else { "[ ]" };
    println!(
        "{mark} #{:<4} {:<4} {:<28} {:<16} {:>2}y  score {:.1}",
        candidate.index,
        candidate.initials(),
        candidate.full_name(),
        candidate.location,
        candidate.experience_years,
        candidate.score
    );
    if !candidate.skills.is_empty() {
        println!("           skills: {}", candidate.skills.join(", "));
    }
    if !candidate.reason.is_empty() {
        println!("           {}", candidate.reason);
    }
    for rec in &candidate.recommended_jobs {
        let location = if rec.location_match { ", location match" } else { "" };
        println!(
            "           -> {} ({:.0}% match{location}) {}",
            rec.job.title,
            rec.match_score,
            rec.matched_skills.join(", ")
        );
    }
}

async fn list_shortlists(state: &AppState) -> Result<()> {
    let mut catalog = state.shortlist_catalog();
    if catalog.refresh(state.gateway()).await == Resolution::Failed {
        bail!(
            "loading shortlists failed: {}",
            catalog.error().unwrap_or("unknown error")
        );
    }

    if let CatalogView::Summaries(summaries) = catalog.view() {
        if summaries.is_empty() {
            println!("No shortlists yet");
        }
        for summary in summaries {
            println!("{:<32} {:>3} candidates", summary.name, summary.count);
            if !summary.candidates.is_empty() {
                println!("    {}", summary.candidates.join(", "));
            }
        }
    }
    Ok(())
}

async fn show_shortlist(state: &AppState, name: &str) -> Result<()> {
    let mut catalog = state.shortlist_catalog();
    if catalog.open(state.gateway(), name).await? == Resolution::Failed {
        bail!(
            "opening shortlist {name:?} failed: {}",
            catalog.error().unwrap_or("unknown error")
        );
    }

    if let CatalogView::Detail(detail) = catalog.view() {
        println!("{} ({} candidates)", detail.name, detail.candidates.len());
        for member in &detail.candidates {
            let years = member
                .years_of_experience()
                .map(|y| format!("{y}y"))
                .unwrap_or_default();
            let available = match member.available_on() {
                Some(date) => date.format("%b %-d, %Y").to_string(),
                None => member.availability.clone(),
            };
            println!(
                "  {:<28} {:<14} {:<16} {:>4}  available {}",
                member.display_name(),
                member.stage,
                member.location,
                years,
                available
            );
            println!("      {}  {}", member.email, member.skills.join(", "));
        }
    }
    Ok(())
}

async fn email(state: &AppState, args: EmailArgs) -> Result<()> {
    let tone: Tone = args.tone.parse()?;
    let (mut workflow, mut previews) = state.email_workflow();

    if workflow.load_shortlists(state.gateway()).await == Resolution::Failed {
        info!("Continuing without the shortlist index");
    }
    if workflow
        .select_shortlist(state.gateway(), &args.shortlist)
        .await?
        == Resolution::Failed
    {
        bail!(
            "loading shortlist {:?} failed: {}",
            args.shortlist,
            workflow.error().unwrap_or("unknown error")
        );
    }
    if workflow.stage() == DraftStage::NoRecipients {
        bail!("shortlist {:?} has no recipients", args.shortlist);
    }

    let preview = workflow.recipient_preview();
    let mut recipients = preview.names.join(", ");
    if preview.remaining > 0 {
        recipients.push_str(&format!(" and {} more", preview.remaining));
    }
    println!("To:      {recipients}");
    println!("Tone:    {} ({})", tone.label(), tone.description());

    let resolution = workflow
        .draft(
            state.gateway(),
            &args.job_title,
            tone.as_str(),
            &args.subject,
            &args.closing,
        )
        .await?;
    if resolution == Resolution::Failed {
        bail!(
            "drafting failed: {}",
            workflow.error().unwrap_or("unknown error")
        );
    }

    print_draft(&workflow);

    if args.revise_subject.is_some() || args.revise_closing.is_some() {
        if let Some(subject) = &args.revise_subject {
            workflow.set_custom_subject(subject);
        }
        if let Some(closing) = &args.revise_closing {
            workflow.set_custom_closing(closing);
        }
        if workflow.redraft(state.gateway()).await? == Resolution::Failed {
            bail!(
                "updating the draft failed: {}",
                workflow.error().unwrap_or("unknown error")
            );
        }
        println!("\n--- updated draft ---");
        print_draft(&workflow);
    }

    if let Some(path) = args.html {
        if workflow.request_html_preview(state.gateway()).await? == Resolution::Failed {
            bail!(
                "HTML preview failed: {}",
                workflow.preview_error().unwrap_or("unknown error")
            );
        }
        if let Ok(preview) = previews.try_recv() {
            tokio::fs::write(&path, preview.html)
                .await
                .with_context(|| format!("writing HTML preview to {}", path.display()))?;
            println!("\nHTML preview written to {}", path.display());
        }
    }
    Ok(())
}

fn print_draft(workflow: &EmailDraftWorkflow) {
    if let Some(draft) = workflow.current_draft() {
        println!("Subject: {}\n", draft.subject);
        println!("{}", draft.text);
    }
}

async fn analytics(state: &AppState) -> Result<()> {
    let mut dashboard = state.analytics();
    dashboard.refresh(state.gateway()).await;

    match dashboard.view() {
        AnalyticsView::Failed(error) => bail!("loading analytics failed: {error}"),
        AnalyticsView::NoData(report) | AnalyticsView::Ready(report) => print!("{report}"),
        AnalyticsView::Idle | AnalyticsView::Loading => {}
    }
    Ok(())
}

fn print_job(job: &Job) {
    let id = job.id.as_ref().map(JobId::to_string).unwrap_or_default();
    let company = job.company.as_deref().unwrap_or("");
    println!("{id:<6} {:<32} {company:<20} {}", job.title, job.location);
    if !job.skills_required.is_empty() {
        println!("       {}", job.skills_required.join(", "));
    }
}

async fn list_jobs(state: &AppState) -> Result<()> {
    let jobs = state.gateway().list_jobs().await?;
    if jobs.is_empty() {
        println!("No open jobs");
    }
    for job in &jobs {
        print_job(job);
    }
    Ok(())
}

async fn show_job(state: &AppState, id: &JobId) -> Result<()> {
    let job = state.gateway().get_job(id).await?;
    print_job(&job);
    if let Some(description) = &job.description {
        println!("\n{description}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use crate::config::Config;
    use crate::test_support::{candidate, shortlist, FakeGateway, GatewayCall};

    fn state(gateway: Arc<FakeGateway>) -> AppState {
        AppState::with_gateway(Config::default(), gateway)
    }

    #[test]
    fn test_parses_search_with_selection_and_save() {
        let cli = Cli::try_parse_from([
            "recruiter", "search", "react developers", "--select", "1", "--select", "3",
            "--save", "Finalists",
        ])
        .unwrap();
        let Command::Search(args) = cli.command else {
            panic!("expected search");
        };
        assert_eq!(args.query, "react developers");
        assert_eq!(args.select, vec![1, 3]);
        assert_eq!(args.save.as_deref(), Some("Finalists"));
    }

    #[test]
    fn test_email_defaults() {
        let cli = Cli::try_parse_from(["recruiter", "email", "Finalists"]).unwrap();
        let Command::Email(args) = cli.command else {
            panic!("expected email");
        };
        assert_eq!(args.job_title, "Software Developer");
        assert_eq!(args.tone, "friendly");
        assert!(args.subject.is_empty());
        assert!(args.html.is_none());
    }

    #[tokio::test]
    async fn test_search_command_saves_selected_candidates() {
        let gateway = Arc::new(FakeGateway::new());
        gateway.set_search(
            "react",
            Ok(vec![candidate(1, "Sara", &["React"]), candidate(2, "Omar", &["React"])]),
        );

        search(
            &state(gateway.clone()),
            SearchArgs {
                query: "react".to_string(),
                select: vec![2],
                save: Some("Finalists".to_string()),
            },
        )
        .await
        .unwrap();

        assert!(gateway.calls().contains(&GatewayCall::CreateShortlist {
            name: "Finalists".to_string(),
            candidate_ids: vec![2],
        }));
    }

    #[tokio::test]
    async fn test_email_command_rejects_unknown_tone_before_any_request() {
        let gateway = Arc::new(FakeGateway::new());
        gateway.set_detail("Finalists", Ok(shortlist("Finalists", &["Sara Idrissi"])));

        let result = email(
            &state(gateway.clone()),
            EmailArgs {
                shortlist: "Finalists".to_string(),
                job_title: DEFAULT_JOB_TITLE.to_string(),
                tone: "casual".to_string(),
                subject: String::new(),
                closing: String::new(),
                revise_subject: None,
                revise_closing: None,
                html: None,
            },
        )
        .await;

        assert!(result.is_err());
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn test_shortlist_command_reports_missing_shortlist() {
        let gateway = Arc::new(FakeGateway::new());
        let err = show_shortlist(&state(gateway), "Nope").await.unwrap_err();
        assert!(err.to_string().contains("HTTP 404"));
    }

    #[tokio::test]
    async fn test_job_lookup_accepts_numeric_ids() {
        let gateway = Arc::new(FakeGateway::new());
        gateway.set_jobs(vec![serde_json::from_value(serde_json::json!({
            "id": 7,
            "title": "Backend Engineer",
            "location": "Rabat",
            "skillsRequired": ["Go"]
        }))
        .unwrap()]);

        show_job(&state(gateway.clone()), &JobId::from("7")).await.unwrap();
        list_jobs(&state(gateway.clone())).await.unwrap();

        assert_eq!(
            gateway.calls(),
            vec![GatewayCall::GetJob(JobId::Number(7)), GatewayCall::ListJobs]
        );
    }

    #[tokio::test]
    async fn test_email_command_revises_subject_with_full_roster() {
        let gateway = Arc::new(FakeGateway::new());
        gateway.set_detail(
            "Finalists",
            Ok(shortlist("Finalists", &["Sara Idrissi", "Karim Tazi"])),
        );

        email(
            &state(gateway.clone()),
            EmailArgs {
                shortlist: "Finalists".to_string(),
                job_title: "Data Engineer".to_string(),
                tone: "professional".to_string(),
                subject: String::new(),
                closing: "Cheers".to_string(),
                revise_subject: Some("Hi there".to_string()),
                revise_closing: None,
                html: None,
            },
        )
        .await
        .unwrap();

        let requests = gateway.draft_requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[1].recipients.len(), 2);
        assert_eq!(requests[1].job_title, "Data Engineer");
        assert_eq!(requests[1].tone, Tone::Professional);
        assert_eq!(requests[1].custom_subject, "Hi there");
        assert_eq!(requests[1].custom_closing, "Cheers");
    }
}
