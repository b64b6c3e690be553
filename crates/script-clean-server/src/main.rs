use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use script_clean_server::{config::load as load_config, serve};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "script-clean-server",
    version,
    about = "Serve the script cleaning endpoint over HTTP"
)]
struct Cli {
    /// Listen address, overriding configuration (e.g. 0.0.0.0:3001)
    #[arg(short, long)]
    listen: Option<String>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = load_config().context("failed to load configuration")?;
    if let Some(listen) = cli.listen {
        config.server.listen_addr = listen;
    }
    tracing::debug!(?config, "configuration loaded");

    serve(config).await.context("server terminated with an error")?;
    Ok(())
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
