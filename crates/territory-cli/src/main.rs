//! # territory CLI entry point
//!
//! Parses command-line arguments, resolves configuration, and dispatches to
//! subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use territory_cli::client::{run_client, ClientArgs};
use territory_cli::config::Config;
use territory_cli::event::{run_event, EventArgs};
use territory_cli::report::{run_conflicts, run_stats, ConflictsArgs, StatsArgs};
use territory_cli::transfer::{
    run_export, run_import, run_template, ExportArgs, ImportArgs, TemplateArgs,
};
use territory_cli::Context;

/// Territory Manager
///
/// Assigns postal-code territories to clients and schedules client events,
/// warning when events overlap in time within the conflict radius.
#[derive(Parser, Debug)]
#[command(name = "territory", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to configuration file. Defaults to ./territory.yaml if present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Store file, overriding the configured store_path.
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// Conflict radius in miles, overriding the configured value.
    #[arg(long, global = true)]
    radius: Option<f64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Manage clients and their postal-code territories.
    Client(ClientArgs),

    /// Manage events (add, edit, status, remove, list, show).
    Event(EventArgs),

    /// List conflicting event pairs and contested postal codes.
    Conflicts(ConflictsArgs),

    /// Show summary counts.
    Stats(StatsArgs),

    /// Import clients from a CSV file.
    Import(ImportArgs),

    /// Export all data as JSON.
    Export(ExportArgs),

    /// Write the CSV client import template.
    Template(TemplateArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    tracing::debug!("territory CLI starting");

    let work_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let config = match Config::discover(cli.config.as_deref(), &work_dir)
        .and_then(|c| c.with_overrides(cli.store.clone(), cli.radius))
    {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{e:#}");
            return ExitCode::from(1);
        }
    };
    let ctx = Context::from_config(&config, &work_dir);

    tracing::debug!(
        store = %ctx.store.path().display(),
        radius_miles = ctx.rule.radius_miles,
        "resolved configuration"
    );

    let result = match &cli.command {
        Commands::Client(args) => run_client(args, &ctx),
        Commands::Event(args) => run_event(args, &ctx),
        Commands::Conflicts(args) => run_conflicts(args, &ctx),
        Commands::Stats(args) => run_stats(args, &ctx),
        Commands::Import(args) => run_import(args, &ctx),
        Commands::Export(args) => run_export(args, &ctx),
        Commands::Template(args) => run_template(args, &ctx),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
