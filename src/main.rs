use anyhow::Context;
use clap::{Parser, Subcommand};
use corsgate::config::Config;
use corsgate::server;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// corsgate - serve a browser dashboard behind a validated CORS policy
#[derive(Parser, Debug)]
#[command(name = "corsgate")]
#[command(version)]
#[command(about = "Serve a browser dashboard behind a validated CORS policy", long_about = None)]
struct Cli {
    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the web server
    Server {
        /// Host to bind to (overrides SERVER_HOST env var)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (overrides SERVER_PORT env var)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Validate the configuration and print the effective CORS policy
    Check,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(Level::INFO.to_string()));
    if cli.json_logs {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    // Load configuration
    let config = Config::from_env().context("failed to load configuration")?;

    match cli.command {
        Commands::Server { host, port } => {
            // Override config with CLI args if provided
            let mut config = config;
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            config
                .validate()
                .context("invalid server options")?;
            let addr = config.server.addr();

            server::run_server(config, addr)
                .await
                .context("server exited with an error")
        }
        Commands::Check => {
            let rendered = serde_json::to_string_pretty(&config.cors)
                .context("failed to render CORS policy")?;
            println!("{}", rendered);
            Ok(())
        }
    }
}
