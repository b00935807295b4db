use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use gorr::cli::{run_passthrough, run_release, run_unrelease};
use gorr::config;
use gorr::domain::ReleaseRequest;
use gorr::git::SystemGit;
use gorr::releaser::ExternalReleaser;
use gorr::ui::{self, TerminalPrompt};
use gorr::GorrError;

#[derive(clap::Parser)]
#[command(
    name = "gorr",
    disable_help_subcommand = true,
    about = "Bump the semantic version tag, push it and hand the release to goreleaser"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(long, help = "Log every git and release tool command")]
    verbose: bool,

    #[arg(short = 'v', long, help = "Print version information")]
    version: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Tag the next version, push it and run the release tool
    Release {
        #[arg(value_name = "TYPE", help = "patch, minor, major or local")]
        release_type: String,

        #[arg(
            value_name = "ARGS",
            trailing_var_arg = true,
            allow_hyphen_values = true,
            help = "Passed to the release tool unchanged (--snapshot skips tagging)"
        )]
        args: Vec<String>,
    },

    /// Delete the latest release tag locally and remotely (unsafe on shared repositories)
    Unrelease,

    #[command(external_subcommand)]
    Passthrough(Vec<String>),
}

/// A command whose arguments have been validated
enum Workflow {
    Release(ReleaseRequest),
    Unrelease,
    Passthrough(Vec<String>),
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
        }
    };

    init_tracing(args.verbose);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            ui::display_error(&format!("{:#}", e));
            if e
                .downcast_ref::<GorrError>()
                .is_some_and(GorrError::is_precondition)
            {
                ui::display_status("Nothing was tagged or pushed.");
            }
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .init();
}

fn run(args: Args) -> Result<()> {
    if args.version {
        println!("gorr {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let Some(command) = args.command else {
        ui::display_usage();
        return Err(GorrError::usage("missing command").into());
    };

    // The release type is checked before the config or any external command.
    let workflow = match command {
        Command::Release { release_type, args } => {
            Workflow::Release(ReleaseRequest::parse(&release_type, args)?)
        }
        Command::Unrelease => Workflow::Unrelease,
        Command::Passthrough(args) => Workflow::Passthrough(args),
    };

    let config = config::load_config(args.config.as_deref()).context("Error loading config")?;
    let releaser = ExternalReleaser::new(config.release.tool.clone());

    match workflow {
        Workflow::Release(request) => {
            let repo = SystemGit::open(".");
            let outcome = run_release(&request, &repo, &releaser, &config)?;
            tracing::debug!(?outcome, "release finished");
        }
        Workflow::Unrelease => {
            let repo = SystemGit::open(".");
            let outcome = run_unrelease(&repo, &TerminalPrompt, &config)?;
            tracing::debug!(?outcome, "unrelease finished");
        }
        Workflow::Passthrough(args) => {
            run_passthrough(&args, &releaser)
                .with_context(|| format!("{} failed", config.release.tool))?;
        }
    }

    Ok(())
}
