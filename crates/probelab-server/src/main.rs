//! Probelab node binary
//!
//! Serves the hash placement simulator over HTTP.

use probelab_server::{NodeConfig, ProbeNode};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "probelab_server=info,probelab_engine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Probelab node");

    let config = NodeConfig::from_env()?;
    let node = ProbeNode::new(config);
    node.run().await?;

    Ok(())
}
