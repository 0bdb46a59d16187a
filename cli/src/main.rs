use clap::Parser;
use infrastructure::config::Config;
use presentation::cli::{Cli, CliApp};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    shared::logging::init("info");
    let cli = Cli::parse();
    let mut config = Config::load();
    cli.apply(&mut config);
    let app = CliApp::new(&config)?;
    app.run(cli).await
}
