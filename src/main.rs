use anyhow::Context;
use inventory_store::{config::load_config, shell::Shell, telemetry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init();

    let config = load_config().context("loading config.toml")?;
    let shell = Shell::new(&config).await;
    shell.start().await?;

    Ok(())
}
