use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use partner_models::PartnerModelError;
use partner_models::config::{Assignment, build_store, parse_assignment};
use partner_models::report::{comparison_table, fields_table};

#[derive(Parser, Debug)]
#[command(
    name = "partner-models",
    about = "Compare fee-based, equity-based and hybrid partner compensation across AUM levels"
)]
struct Cli {
    /// Repeat for more verbosity (-v, -vv, -vvv). RUST_LOG takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// JSON file with a full or partial parameter set.
    #[arg(long, global = true)]
    params: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the dashboard and its JSON API.
    Serve {
        #[arg(long, env = "PARTNER_MODELS_PORT", default_value_t = 8080)]
        port: u16,
    },
    /// Print the comparison table for the configured parameters.
    Compare {
        /// Override one field, e.g. --set model1SetupFee=9000. Repeatable.
        #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = parse_set_arg)]
        assignments: Vec<Assignment>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// List every parameter field with its current value.
    Fields,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

fn parse_set_arg(text: &str) -> Result<Assignment, String> {
    parse_assignment(text).map_err(|e| e.to_string())
}

fn default_log_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn init_tracing(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_log_level(verbose)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum RunError {
    #[error(transparent)]
    Model(#[from] PartnerModelError),
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
    #[error("failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),
}

async fn run(cli: Cli) -> Result<(), RunError> {
    match cli.command {
        Command::Serve { port } => {
            let store = build_store(cli.params.as_deref(), &[])?;
            partner_models::api::run_http_server(port, store).await?;
        }
        Command::Compare {
            assignments,
            format,
        } => {
            let store = build_store(cli.params.as_deref(), &assignments)?;
            let rows = store.comparison();
            match format {
                OutputFormat::Table => println!("{}", comparison_table(&rows)),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rows)?),
            }
        }
        Command::Fields => {
            let store = build_store(cli.params.as_deref(), &[])?;
            println!("{}", fields_table(store.parameters()));
        }
    }
    Ok(())
}
