//! Kulture Node binary
//!
//! Serves the kulture REST API over local storage.

use kulture_server::{KultureNode, NodeConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kulture_node=info,kulture_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Kulture Node");

    let config = NodeConfig::from_env()?;

    let node = KultureNode::new(config).await?;
    node.run().await?;

    Ok(())
}
