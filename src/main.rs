use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use morningbrief_lib::error::{BriefError, ViewError};
use morningbrief_lib::feedback::{FeedbackSink, HttpFeedbackSink, MockFeedbackSink};
use morningbrief_lib::journal::{self, JournalEntry, MockJournalSink};
use morningbrief_lib::notification::LogNotifier;
use morningbrief_lib::provider::{ContentProvider, HttpProvider, MockProvider};
use morningbrief_lib::state::{self, Config, ProviderKind};
use morningbrief_lib::store::{JsonFileStore, PersistedStore};
use morningbrief_lib::theme;
use morningbrief_lib::types::{Priority, WorkloadTier};
use morningbrief_lib::{BriefView, LoadOutcome, LoadState};

#[derive(Parser)]
#[command(name = "morningbrief")]
#[command(about = "Evening journal in, strategic morning brief out")]
struct Cli {
    /// Path to configuration file (defaults to ~/.morningbrief/config.json)
    #[arg(short, long, env = "MORNINGBRIEF_CONFIG")]
    config: Option<std::path::PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load and print today's brief with checklist progress
    Show,
    /// Check (or with --off, uncheck) a checklist item by id
    Toggle {
        id: String,
        #[arg(long)]
        off: bool,
    },
    /// Mark every checklist item complete
    CompleteAll,
    /// Clear checklist progress
    Reset,
    /// Rate the brief (1-5) and submit the rating
    Rate { rating: u8 },
    /// Print the theme, or flip it with --toggle
    Theme {
        #[arg(long)]
        toggle: bool,
    },
    /// Submit tonight's journal entry
    Journal {
        #[arg(long, default_value_t = journal::DEFAULT_ENERGY_LEVEL)]
        energy: u8,
        #[arg(long)]
        hours: f64,
        #[arg(long)]
        workload: WorkloadTier,
        #[arg(long, default_value = "")]
        focus: String,
        #[arg(long)]
        completed_today: bool,
        #[arg(long, default_value = "")]
        blocker: String,
        /// Team requests; implies partner coordination
        #[arg(long)]
        delegate: Option<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let view_error = ViewError::from(&e);
            eprintln!("{}: {}", view_error.title, view_error.message);
            eprintln!("{}", view_error.recovery_suggestion);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), BriefError> {
    let config = match &cli.config {
        Some(path) => state::load_config_from(path)?,
        None => state::load_config()?,
    };
    let store: Arc<dyn PersistedStore> = Arc::new(JsonFileStore::new(config.resolved_store_path()?));

    match cli.command {
        Command::Theme { toggle } => {
            let current = if toggle {
                theme::toggle_theme(store.as_ref())?
            } else {
                theme::load_theme(store.as_ref())
            };
            println!("{}", current.as_str());
            Ok(())
        }
        Command::Journal {
            energy,
            hours,
            workload,
            focus,
            completed_today,
            blocker,
            delegate,
        } => {
            let entry = JournalEntry {
                energy_level: energy,
                available_hours: hours,
                workload: Some(workload),
                key_focus_areas: focus,
                completed_today,
                blocker_description: blocker,
                partner_coordination: delegate.is_some(),
                coordination_requests: delegate.unwrap_or_default(),
                ..Default::default()
            };
            println!("Planning for: {}", journal::planning_date_today());
            println!("Energy: {}/10 ({})", entry.energy_level, entry.energy_label());
            if let Some(advice) = entry.workload_advice() {
                println!("{}: {}", advice.headline, advice.details);
            }
            let sink = MockJournalSink::new(config.mock_delay());
            journal::submit_journal(&entry, &sink).await?;
            println!("Journal saved. Your brief will be ready in the morning.");
            Ok(())
        }
        command => run_brief_command(command, &config, store).await,
    }
}

async fn run_brief_command(
    command: Command,
    config: &Config,
    store: Arc<dyn PersistedStore>,
) -> Result<(), BriefError> {
    let mut view = build_view(config, store)?;

    if view.mount().await != LoadOutcome::Ready {
        if let LoadState::Failed(message) = view.load_state() {
            return Err(BriefError::Acquisition(message));
        }
        return Err(BriefError::NotReady);
    }

    match command {
        Command::Show => print_brief(&view),
        Command::Toggle { id, off } => {
            view.toggle(&id, !off)?;
            print_progress(&view)
        }
        Command::CompleteAll => {
            view.complete_all()?;
            print_progress(&view)
        }
        Command::Reset => {
            view.reset()?;
            print_progress(&view)
        }
        Command::Rate { rating } => {
            view.set_rating(rating)?;
            view.submit_feedback().await?;
            println!("Thanks for rating this brief {}/5.", rating);
            Ok(())
        }
        Command::Theme { .. } | Command::Journal { .. } => Ok(()),
    }
}

fn build_view(config: &Config, store: Arc<dyn PersistedStore>) -> Result<BriefView, BriefError> {
    let provider: Arc<dyn ContentProvider> = match config.provider {
        ProviderKind::Mock => Arc::new(MockProvider::new(config.mock_delay())),
        ProviderKind::Http => {
            let url = config
                .brief_endpoint()?
                .ok_or_else(|| BriefError::Config("briefUrl is not set".to_string()))?;
            Arc::new(HttpProvider::new(url))
        }
    };

    let sink: Arc<dyn FeedbackSink> = match config.feedback_endpoint()? {
        Some(url) => Arc::new(HttpFeedbackSink::new(url)),
        None => Arc::new(MockFeedbackSink::new(config.feedback_delay())),
    };

    Ok(BriefView::new(provider, sink, store, Arc::new(LogNotifier)))
}

fn print_brief(view: &BriefView) -> Result<(), BriefError> {
    let brief = view.content()?;
    let ctx = &brief.context;

    println!("Strategic Morning Brief: {}", brief.date);
    println!("Generated: {}", brief.generated_at);
    println!();
    println!(
        "Energy {}/10 ({}) | {}h available | {} workload | {}h estimated",
        ctx.energy_level,
        ctx.energy_label(),
        ctx.available_hours,
        ctx.workload,
        ctx.estimated_duration
    );
    println!();
    println!("Primary directive:\n  {}", brief.primary_directive);

    if !brief.supporting_activities.is_empty() {
        println!("\nSupporting activities:");
        for (i, activity) in brief.supporting_activities.iter().enumerate() {
            println!("  {}. {}", i + 1, activity);
        }
    }
    if !brief.team_delegations.is_empty() {
        println!("\nTeam coordination:");
        for delegation in &brief.team_delegations {
            println!("  - {}", delegation);
        }
    }
    if !brief.alternatives.is_empty() {
        println!("\nAlternatives & contingencies:");
        for alternative in &brief.alternatives {
            println!("  - {}", alternative);
        }
    }

    println!("\nChecklist:");
    for item in view.action_items()? {
        let mark = if view.is_completed(&item.id)? { "x" } else { " " };
        let tier = match item.priority {
            Priority::High => "high",
            Priority::Medium => "med ",
            Priority::Low => "low ",
        };
        println!("  [{}] {} {:<14} {}", mark, tier, item.id, item.text);
    }
    println!();
    print_progress(view)
}

fn print_progress(view: &BriefView) -> Result<(), BriefError> {
    let progress = view.progress()?;
    println!(
        "Progress: {}% ({} of {} tasks completed)",
        progress.percentage, progress.completed, progress.total
    );
    if progress.all_complete {
        println!("Excellent work! All tasks completed.");
    }
    Ok(())
}
