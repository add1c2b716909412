//! Probelab node - the main application entry point.
//!
//! Architecture:
//! - Single process with one shared in-memory bucket table
//! - HTTP API for clients (hash insertion, node queries, reset)
//! - Table reinitializes to empty on every start; nothing persists

use crate::api;
use crate::error::{Error, Result};
use probelab_engine::BucketTable;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::RwLock;

const DEFAULT_API_ADDR: &str = "0.0.0.0:3001";
const DEFAULT_NODE_COUNT: usize = 4;
const DEFAULT_NODE_CAPACITY: u32 = 1000;

/// Configuration for a Probelab node.
#[derive(Debug, Clone)]
pub struct NodeConfig {
    /// HTTP API listen address
    pub api_addr: SocketAddr,

    /// Number of storage nodes in the bucket table
    pub node_count: usize,

    /// Per-node capacity, in item units
    pub node_capacity: u32,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            api_addr: DEFAULT_API_ADDR.parse().unwrap(),
            node_count: DEFAULT_NODE_COUNT,
            node_capacity: DEFAULT_NODE_CAPACITY,
        }
    }
}

impl NodeConfig {
    /// Create config from environment variables with sensible defaults.
    pub fn from_env() -> Result<Self> {
        let api_addr = std::env::var("PROBELAB_API_ADDR")
            .unwrap_or_else(|_| DEFAULT_API_ADDR.to_string())
            .parse()
            .map_err(|e| Error::Config(format!("PROBELAB_API_ADDR: {e}")))?;

        let node_count: usize = std::env::var("PROBELAB_NODE_COUNT")
            .map(|s| {
                s.parse()
                    .map_err(|e| Error::Config(format!("PROBELAB_NODE_COUNT: {e}")))
            })
            .unwrap_or(Ok(DEFAULT_NODE_COUNT))?;
        if node_count == 0 {
            return Err(Error::Config(
                "PROBELAB_NODE_COUNT must be at least 1".to_string(),
            ));
        }

        let node_capacity: u32 = std::env::var("PROBELAB_NODE_CAPACITY")
            .map(|s| {
                s.parse()
                    .map_err(|e| Error::Config(format!("PROBELAB_NODE_CAPACITY: {e}")))
            })
            .unwrap_or(Ok(DEFAULT_NODE_CAPACITY))?;

        Ok(Self {
            api_addr,
            node_count,
            node_capacity,
        })
    }
}

/// Shared state for the node - the single bucket table behind one lock.
///
/// Every insert and reset takes the write lock for its whole duration,
/// so a probe sequence always observes a consistent occupancy snapshot.
pub struct AppState {
    pub table: BucketTable,
    pub config: NodeConfig,
}

/// Handle to the shared state, for API handlers.
pub type SharedState = Arc<RwLock<AppState>>;

/// A Probelab node instance.
pub struct ProbeNode {
    state: SharedState,
    config: NodeConfig,
}

impl ProbeNode {
    /// Create a new node with a freshly-built empty table.
    pub fn new(config: NodeConfig) -> Self {
        let table = BucketTable::new(config.node_count, config.node_capacity);
        let state = Arc::new(RwLock::new(AppState {
            table,
            config: config.clone(),
        }));
        Self { state, config }
    }

    /// Get the shared state (for API handlers and tests).
    pub fn state(&self) -> SharedState {
        Arc::clone(&self.state)
    }

    /// Run the node (starts the HTTP server).
    pub async fn run(self) -> Result<()> {
        tracing::info!("Probelab node starting");
        tracing::info!("  API: http://{}", self.config.api_addr);
        tracing::info!(
            "  Table: {} nodes, capacity {} each",
            self.config.node_count,
            self.config.node_capacity
        );

        let app = api::build_router(self.state.clone());

        let listener = tokio::net::TcpListener::bind(self.config.api_addr).await?;
        tracing::info!("HTTP server listening on {}", self.config.api_addr);

        axum::serve(listener, app).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = NodeConfig::default();
        assert_eq!(config.api_addr.port(), 3001);
        assert_eq!(config.node_count, 4);
        assert_eq!(config.node_capacity, 1000);
    }

    #[tokio::test]
    async fn new_node_starts_empty() {
        let node = ProbeNode::new(NodeConfig::default());
        let state = node.state();
        let state = state.read().await;
        assert_eq!(state.table.node_count(), 4);
        assert!(state.table.summaries().iter().all(|s| s.used_capacity == 0));
    }
}
