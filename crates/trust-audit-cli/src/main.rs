//! trust-audit — entry point.

use clap::{Parser, Subcommand};

use trust_audit_cli::command;
use trust_audit_cli::config::{DEFAULT_BASE_URL, DEFAULT_OUTPUT};

#[derive(Parser)]
#[command(
    name = "trust-audit",
    about = "Audit a deployed finance UI for load times, trust markers, and data provenance",
    version
)]
struct Cli {
    /// Base URL to audit.
    #[arg(long, global = true, default_value = DEFAULT_BASE_URL)]
    url: String,

    /// Output file for the JSON report.
    #[arg(long, global = true, default_value = DEFAULT_OUTPUT)]
    output: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full audit (default).
    Audit,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command.unwrap_or(Commands::Audit) {
        Commands::Audit => command::run(&cli.url, &cli.output).await.map(|_| ()),
    };

    if let Err(e) = &result {
        eprintln!("  Error: {e:#}");
        std::process::exit(1);
    }

    result
}
