use anyhow::Context;
use clap::Parser;
use qr_restyle::{cli, converter};
use cli::{Cli, MISSING_DIRECTORY};
use tracing::Level;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::WARN)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let Some(folder) = cli.folder else {
        eprintln!("{}", MISSING_DIRECTORY);
        std::process::exit(1);
    };

    converter::convert_folder(&folder)
        .await
        .with_context(|| format!("× Failed to convert {}", folder.display()))?;

    Ok(())
}
