//! Binary entry point for the weather front end web server.

use clap::Parser;

use frontend_web::cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cmd = cli::Cli::parse();
    cmd.run().await
}
