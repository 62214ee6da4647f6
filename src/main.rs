use anyhow::Result;
use enyaq::config::Config;
use enyaq::connector::Connector;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid config: {}", e))?;
    enyaq::logging::init_logging(&config.logging)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    info!("Enyaq Skoda Connect connector starting up");

    let connector = Arc::new(Mutex::new(Connector::new(config.connector.clone())));

    #[cfg(feature = "web")]
    {
        enyaq::web::serve(connector, &config.web).await?;
    }

    #[cfg(not(feature = "web"))]
    {
        let _ = connector;
        info!("Web feature disabled; nothing to serve");
    }

    Ok(())
}
