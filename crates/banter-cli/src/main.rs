use anyhow::Result;
use banter_cli::{ApiClient, Session};
use clap::Parser;
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "banter", version, about = "Chat with the banter backend from a terminal")]
struct Cli {
    /// Base URL of the banter API
    #[arg(long, env = "BANTER_API_URL", default_value = "http://localhost:4000")]
    api_url: String,

    /// Model id to select instead of the first catalog entry
    #[arg(long)]
    model: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Diagnostics go to stderr and stay quiet unless RUST_LOG asks for them
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let client = ApiClient::new(&cli.api_url)?;
    tracing::debug!(api_url = client.base_url(), "starting session");

    let mut stdout = std::io::stdout();
    let mut session = Session::new(client);
    session.load(cli.model.as_deref(), &mut stdout).await?;
    session
        .run(BufReader::new(tokio::io::stdin()), &mut stdout)
        .await
}
