use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use tusk_core::{Config, ProjectLayout, DEFAULT_CONFIG_FILE};
use tusk_db::{Database, PostgresDatabase};
use tusk_engine::{Action, Orchestrator, RunError, EXIT_SETUP, EXIT_SUCCESS};

/// Tusk - snapshot tests for SQL queries
#[derive(Parser)]
#[command(name = "tusk")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Action to run
    #[arg(value_enum)]
    action: ActionArg,

    /// Project directory holding seeds/, tests/, expected/, out/ and the config file
    #[arg(short, long, default_value = ".")]
    path: PathBuf,

    /// Config file name, relative to --path
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ActionArg {
    /// Populate the database from seeds/ (no rollback)
    Seed,

    /// Record query results in expected/
    Update,

    /// Compare query results against expected/
    Test,
}

impl From<ActionArg> for Action {
    fn from(arg: ActionArg) -> Self {
        match arg {
            ActionArg::Seed => Action::Seed,
            ActionArg::Update => Action::Update,
            ActionArg::Test => Action::Test,
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // A .env file may carry TUSK_DATABASE_URL
    dotenvy::dotenv().ok();
    init_tracing(cli.verbose);

    let code = match run(&cli).await {
        Ok(()) => EXIT_SUCCESS,
        Err(err) => report_error(&err),
    };

    std::process::exit(code);
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

async fn run(cli: &Cli) -> Result<()> {
    let config_path = cli.path.join(&cli.config);
    let config = Config::from_file(&config_path)?.with_env_override();
    config.validate()?;

    if cli.verbose {
        eprintln!("{} {}", "Using config:".cyan(), config_path.display());
    }

    let layout = ProjectLayout::new(&cli.path)?;

    let mut db = PostgresDatabase::connect(&config.database)
        .await
        .context("Could not connect to the database")?;

    if cli.verbose {
        eprintln!(
            "{} {} ({} on {})",
            "Connected to".cyan(),
            db.name(),
            db.database(),
            db.host()
        );
    }

    let stdout = std::io::stdout();
    let mut orchestrator = Orchestrator::new(&layout, &mut db, stdout.lock());
    orchestrator.run(cli.action.into()).await?;

    Ok(())
}

/// Print an error and pick the exit code for it
fn report_error(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<RunError>() {
        // The summary line is already on stdout
        Some(RunError::TestsFailed(_)) => {}
        Some(RunError::MissingBaseline { .. }) => {
            eprintln!("{}", "Run `tusk update` to record the missing baseline.".yellow());
        }
        _ => eprintln!("{} {:#}", "Error:".red().bold(), err),
    }

    err.downcast_ref::<RunError>()
        .map(RunError::exit_code)
        .unwrap_or(EXIT_SETUP)
}
