use pilgrim_stats::frontend::start_all;
use pilgrim_stats::logging;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init()?;

    info!("Pilgrim statistics API is starting...");
    start_all().await?;

    Ok(())
}
