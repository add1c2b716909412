//! Probelab Server
//!
//! HTTP transport for the Probelab hash placement simulator. The
//! engine crate owns all placement semantics; this crate adds the
//! JSON/CORS surface, env-driven configuration, and process startup.
//!
//! # Example
//!
//! ```no_run
//! use probelab_server::{NodeConfig, ProbeNode};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = NodeConfig::from_env()?;
//!     let node = ProbeNode::new(config);
//!     node.run().await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod error;
pub mod node;

pub use error::{Error, Result};
pub use node::{AppState, NodeConfig, ProbeNode, SharedState};
