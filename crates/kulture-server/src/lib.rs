//! Kulture Node - REST Service for World Cells
//!
//! Stores kultures in an embedded document store and keeps an in-memory
//! kluster of them for spatial queries on the hex grid.
//!
//! # Architecture
//!
//! - **Storage**: RocksDB-backed persistence of kulture records
//! - **Node**: configuration, shared state and server startup
//! - **API**: HTTP endpoints for kulture CRUD and kluster queries
//!
//! # Example
//!
//! ```no_run
//! use kulture_server::{KultureNode, NodeConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = NodeConfig::from_env()?;
//!     let node = KultureNode::new(config).await?;
//!     node.run().await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod error;
pub mod node;
pub mod storage;

pub use error::{Error, Result};
pub use node::{KultureNode, NodeConfig, NodeState};
pub use storage::Storage;
