use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use parley::config::loader;
use parley::server;

#[derive(Parser)]
#[command(name = "parley")]
#[command(
    author,
    version,
    about = "Conversation analysis service: diarized transcripts and per-speaker insights"
)]
struct Cli {
    /// Bind address (overrides config)
    #[arg(long)]
    host: Option<String>,

    /// Bind port (overrides config)
    #[arg(long)]
    port: Option<u16>,

    /// Path to an alternate config file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> parley::Result<()> {
    let mut config = match &cli.config {
        Some(path) => loader::load_config_from(path)?,
        None => loader::load_config()?,
    };
    loader::apply_env_overrides(&mut config);

    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    std::fs::create_dir_all(&config.server.upload_dir)?;

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, server::router(config)).await?;

    Ok(())
}
