#![forbid(unsafe_code)]

mod cmd;
mod output;

use chrono::NaiveDate;
use clap::{CommandFactory, Parser, Subcommand};
use output::OutputMode;
use questlog_core::config;
use std::env;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "questlog: today, week, and catalog views over your task list",
    long_about = None
)]
struct Cli {
    /// Enable debug logging for questlog (`QUESTLOG_LOG` still wins).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (default: pretty on a terminal, text when piped).
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Shorthand for `--format json`.
    #[arg(long, global = true, hide = true)]
    json: bool,

    /// Task snapshot exported from the task service (JSON).
    #[arg(long, global = true, value_name = "PATH")]
    snapshot: Option<PathBuf>,

    /// Treat this date as today instead of the local clock.
    #[arg(long, global = true, value_name = "YYYY-MM-DD", value_parser = cmd::parse_date)]
    today: Option<NaiveDate>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Calendar",
        about = "Show tasks due today",
        long_about = "Show tasks whose deadline is today and recurring tasks scheduled for today's weekday.",
        after_help = "EXAMPLES:\n    # Today's list\n    ql today\n\n    # Only what is still open\n    ql today --open\n\n    # Pretend it is a given day\n    ql --today 2024-06-10 today --json"
    )]
    Today(cmd::today::TodayArgs),

    #[command(
        next_help_heading = "Calendar",
        about = "Show the days after today",
        long_about = "Show deadline and recurring tasks for each of the next N days (today excluded).",
        after_help = "EXAMPLES:\n    # The next seven days\n    ql week\n\n    # A fortnight\n    ql week --days 14"
    )]
    Week(cmd::week::WeekArgs),

    #[command(
        next_help_heading = "Catalogs",
        about = "Show tasks grouped by catalog",
        long_about = "Show every catalog with its dated tasks by date, then tasks without a date.",
        after_help = "EXAMPLES:\n    # All catalogs\n    ql board\n\n    # One catalog\n    ql board --catalog 3"
    )]
    Board(cmd::board::BoardArgs),

    #[command(
        next_help_heading = "Catalogs",
        about = "Show the next due date of each task",
        after_help = "EXAMPLES:\n    # Next occurrence per task\n    ql upcoming\n\n    # Only the first five\n    ql upcoming -n 5"
    )]
    Upcoming(cmd::upcoming::UpcomingArgs),

    #[command(
        next_help_heading = "Catalogs",
        about = "Show unfinished tasks past their deadline",
        after_help = "EXAMPLES:\n    # Overdue tasks\n    ql overdue --json"
    )]
    Overdue(cmd::overdue::OverdueArgs),

    #[command(
        next_help_heading = "Maintenance",
        about = "Generate shell completion scripts",
        after_help = "EXAMPLES:\n    # Generate bash completions\n    ql completions bash"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("QUESTLOG_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "questlog_core=debug,questlog_cli=debug,info"
        } else {
            "warn"
        })
    });

    let format = env::var("QUESTLOG_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    if cli.verbose {
        info!("Verbose mode enabled");
    }

    if let Commands::Completions(args) = &cli.command {
        let mut command = Cli::command();
        return cmd::completions::run_completions(args.shell, &mut command);
    }

    // user config can still change the mode; failures loading it use flags and env only
    let early_output = output::resolve_output_mode(cli.format, cli.json, None);
    let (project_root, user, project) = cmd::load_config(early_output)?;
    let output = output::resolve_output_mode(cli.format, cli.json, user.output.as_deref());

    let snapshot = cmd::open_snapshot(
        output,
        cli.snapshot.as_deref(),
        &project_root,
        &project,
        &user,
    )?;
    let today = cli
        .today
        .unwrap_or_else(|| chrono::Local::now().date_naive());
    info!(%today, tasks = snapshot.tasks.len(), command = ?cli.command, "dispatching");

    match &cli.command {
        Commands::Today(args) => cmd::today::run_today(args, output, &snapshot.tasks, today),
        Commands::Week(args) => {
            let window_days = config::resolve_window_days(args.days, &project);
            cmd::week::run_week(output, &snapshot.tasks, today, window_days)
        }
        Commands::Board(args) => cmd::board::run_board(args, output, &snapshot),
        Commands::Upcoming(args) => {
            cmd::upcoming::run_upcoming(args, output, &snapshot.tasks, today)
        }
        Commands::Overdue(args) => cmd::overdue::run_overdue(args, output, &snapshot.tasks, today),
        Commands::Completions(_) => Ok(()),
    }
}
