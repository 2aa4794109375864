use anyhow::Result;
use clap::Parser;

use advisor::{cli::Cli, runtime::Orchestrator};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    let orchestrator = Orchestrator::new(cli)?;
    orchestrator.run().await
}
