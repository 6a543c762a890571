use studygrid::startup;
use tracing::info;

#[tokio::main]
async fn main() -> miette::Result<()> {
    // Initialize logging
    startup::init_logging()?;

    info!("Starting studygrid");

    // Load configuration
    let config = startup::load_config()?;

    // Run one feed pass
    startup::run(config).await
}
