use clap::Parser;
use profitcast::adapter::inbound::cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    Cli::parse().run().await?;
    Ok(())
}
