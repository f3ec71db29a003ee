use clap::Parser;
use cocoa_atlas::cli::{run, Cli};
use cocoa_atlas::error::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    run(cli).await
}
