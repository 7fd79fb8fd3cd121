mod commands;

use bpkio_plugin::{ProviderServer, serve_io};
use bpkio_provider::BpkioProvider;
use clap::{Parser, Subcommand};
use tokio::io::BufReader;
use tracing::info;

#[derive(Parser)]
#[command(name = "terraform-provider-bpkio")]
#[command(about = "Manage broadpeak.io sources and services as infrastructure", long_about = None)]
struct Cli {
    /// Log filter, e.g. `debug` or `bpkio_plugin=trace`
    #[arg(long, global = true, env = "BPKIO_LOG", default_value = "info")]
    log: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the provider protocol on stdin/stdout (default)
    Serve,
    /// Print the provider schema as JSON
    Schema {
        /// Only print the schema of this resource or data source
        #[arg(short, long)]
        name: Option<String>,
        /// Indent the output
        #[arg(short, long)]
        pretty: bool,
    },
    /// List the resources and data sources
    Resources,
    /// Show version information
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // stdout carries the protocol, logs go to stderr
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(&cli.log))?;
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_ansi(false)
        .init();

    let provider = BpkioProvider::new();
    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            let server = ProviderServer::new(provider);
            info!(version = env!("CARGO_PKG_VERSION"), "serving provider on stdio");
            let stdin = BufReader::new(tokio::io::stdin());
            serve_io(&server, stdin, tokio::io::stdout()).await?;
        }
        Commands::Schema { name, pretty } => commands::schema(&provider, name.as_deref(), pretty)?,
        Commands::Resources => commands::resources(&provider),
        Commands::Version => {
            println!("terraform-provider-bpkio {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
