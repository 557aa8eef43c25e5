use analytics::ReportPipeline;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use configuration::{load_config, ConfigArgs};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod render;

/// The main entry point for the Tradelens application.
#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so `--format json` output stays machine-readable.
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Parse command-line arguments
    let cli = Cli::parse();

    let mut config = load_config(cli.config.config.as_deref())
        .context("Failed to load configuration")?;

    // Execute the appropriate command
    match cli.command {
        Commands::Report(args) => handle_report(args, &config),
        Commands::Serve(args) => {
            if let Some(addr) = args.addr {
                config.server.addr = addr;
            }
            web_server::run_server(config).await
        }
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Profitability analysis for a betting/trading history export.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    config: ConfigArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyse a CSV export and print the report.
    Report(ReportArgs),
    /// Start the HTTP upload server.
    Serve(ServeArgs),
}

#[derive(Parser)]
struct ReportArgs {
    /// Path to the CSV history export.
    file: PathBuf,

    /// Output format.
    #[arg(long, short, value_enum, default_value = "table")]
    format: OutputFormat,

    /// How many teams to list in the most/least profitable tables.
    /// Defaults to `report.top_teams` from the configuration.
    #[arg(long)]
    top: Option<usize>,
}

#[derive(Parser)]
struct ServeArgs {
    /// Address to bind, e.g. "0.0.0.0:8080". Overrides `server.addr`.
    #[arg(long)]
    addr: Option<String>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

// ==============================================================================
// Report Command Logic
// ==============================================================================

/// Loads the export, builds the report and prints it in the requested format.
fn handle_report(args: ReportArgs, config: &configuration::Config) -> Result<()> {
    let pipeline = ReportPipeline::from_config(config)?;
    let report = match pipeline.run_path(&args.file) {
        Ok(report) => report,
        Err(err) => {
            tracing::error!(kind = err.kind(), error = %err, "Report generation failed.");
            return Err(err)
                .with_context(|| format!("Failed to process {}", args.file.display()));
        }
    };

    match args.format {
        OutputFormat::Table => {
            let top = args.top.unwrap_or(config.report.top_teams);
            render::print_report(&report, top);
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}
