//! Applicant Intake CLI - server, migrations and session maintenance.
//!
//! # Usage
//!
//! ```bash
//! # Run the server
//! intake-cli serve
//!
//! # Apply database migrations
//! intake-cli migrate
//!
//! # Inspect or delete one session
//! intake-cli sessions show <SESSION_ID>
//! intake-cli sessions clear <SESSION_ID>
//!
//! # Delete expired sessions
//! intake-cli sessions purge-expired
//! ```
//!
//! All commands read `INTAKE_DATABASE_URL` (or `DATABASE_URL`), loading
//! `.env` if present.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::process::ExitCode;

use applicant_intake_server::{IntakeConfig, telemetry};
use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "intake-cli")]
#[command(author, version, about = "Applicant Intake CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server
    Serve,
    /// Run database migrations
    Migrate,
    /// Inspect and maintain stored sessions
    Sessions {
        #[command(subcommand)]
        action: SessionAction,
    },
}

#[derive(Subcommand)]
enum SessionAction {
    /// Show whether a session's applicant entry decodes
    Show {
        /// Session id (the value of the `intake_session` cookie)
        session_id: String,
    },
    /// Delete one session
    Clear {
        /// Session id (the value of the `intake_session` cookie)
        session_id: String,
    },
    /// Delete all expired sessions
    PurgeExpired,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match IntakeConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            init_plain_tracing();
            tracing::error!("Command failed: {e}");
            return ExitCode::FAILURE;
        }
    };

    // The server installs Sentry and the full subscriber; other commands
    // only need plain output.
    let _sentry_guard = if matches!(cli.command, Commands::Serve) {
        let guard = telemetry::init_sentry(&config.sentry);
        telemetry::init_tracing();
        guard
    } else {
        init_plain_tracing();
        None
    };

    match run(cli, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Command failed: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Plain fmt output at `info` unless `RUST_LOG` says otherwise.
fn init_plain_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
}

async fn run(cli: Cli, config: IntakeConfig) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Serve => applicant_intake_server::run(config).await?,
        Commands::Migrate => commands::migrate::run(&config).await?,
        Commands::Sessions { action } => match action {
            SessionAction::Show { session_id } => {
                commands::sessions::show(&config, &session_id).await?;
            }
            SessionAction::Clear { session_id } => {
                commands::sessions::clear(&config, &session_id).await?;
            }
            SessionAction::PurgeExpired => commands::sessions::purge_expired(&config).await?,
        },
    }
    Ok(())
}
