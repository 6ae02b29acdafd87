//! NoteMate CLI entrypoint.

use clap::Parser;
use console::style;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod client;
mod commands;
mod handlers;

use client::ApiClient;
use commands::Commands;

#[derive(Parser)]
#[command(name = "notemate")]
#[command(author, version, about = "NoteMate license command-line client", long_about = None)]
struct Cli {
    /// NoteMate server URL
    #[arg(long, env = "NOTEMATE_SERVER", default_value = "http://localhost:4000", global = true)]
    server: String,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let client = ApiClient::new(&cli.server);

    let result = match cli.command {
        Commands::Activate {
            license_key,
            host_id,
            device_tag,
        } => handlers::activate(&client, &license_key, host_id, device_tag).await,
        Commands::State => handlers::state(&client).await,
        Commands::Clear => handlers::clear(&client).await,
        Commands::Feature { feature_id } => handlers::feature(&client, &feature_id).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("error:").red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
