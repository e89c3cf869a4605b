//! Kulture Node - the main application entry point.
//!
//! Architecture:
//! - Single daemon process with one RocksDB storage instance
//! - In-memory kluster seeded from storage at startup and kept in step with
//!   every write
//! - HTTP API for clients

use crate::api;
use crate::error::{Error, Result};
use crate::storage::Storage;
use kulture_core::Kluster;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Configuration for a kulture node.
#[derive(Debug, Clone)]
pub struct NodeConfig {
    /// Data directory for storage
    pub data_dir: PathBuf,

    /// HTTP API listen address
    pub api_addr: SocketAddr,

    /// Reject writes whose location is off the hex plane (`x + y + z != 0`)
    pub require_hex_plane: bool,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./kulture-data"),
            api_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            require_hex_plane: false,
        }
    }
}

impl NodeConfig {
    /// Create config from environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let data_dir = std::env::var("KULTURE_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.data_dir);

        let api_addr = match std::env::var("KULTURE_API_ADDR") {
            Ok(addr) => addr
                .parse()
                .map_err(|_| Error::Config(format!("invalid KULTURE_API_ADDR: {addr}")))?,
            Err(_) => defaults.api_addr,
        };

        let require_hex_plane = match std::env::var("KULTURE_REQUIRE_HEX_PLANE") {
            Ok(flag) => parse_flag(&flag).ok_or_else(|| {
                Error::Config(format!("invalid KULTURE_REQUIRE_HEX_PLANE: {flag}"))
            })?,
            Err(_) => defaults.require_hex_plane,
        };

        Ok(Self {
            data_dir,
            api_addr,
            require_hex_plane,
        })
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

/// Shared state for the node.
///
/// Writers hold the write lock across the storage write and the kluster
/// update, so readers never see the two out of step.
pub struct NodeState {
    pub storage: Arc<Storage>,
    pub kluster: Kluster,
    pub config: NodeConfig,
}

impl NodeState {
    /// Open storage and seed the kluster from every stored kulture.
    pub fn open(config: NodeConfig) -> Result<Self> {
        let storage = Arc::new(Storage::open(&config.data_dir)?);
        let kluster = Kluster::new(storage.list()?)?;
        tracing::info!(count = kluster.count(), "kluster loaded from storage");
        Ok(Self {
            storage,
            kluster,
            config,
        })
    }
}

/// A kulture node instance.
pub struct KultureNode {
    state: Arc<RwLock<NodeState>>,
    config: NodeConfig,
}

impl KultureNode {
    /// Create a new node.
    pub async fn new(config: NodeConfig) -> Result<Self> {
        // Ensure data directory exists
        std::fs::create_dir_all(&config.data_dir)?;

        let state = Arc::new(RwLock::new(NodeState::open(config.clone())?));

        Ok(Self { state, config })
    }

    /// Get the shared state (for API handlers).
    pub fn state(&self) -> Arc<RwLock<NodeState>> {
        Arc::clone(&self.state)
    }

    /// Run the node's HTTP server until it stops.
    pub async fn run(self) -> Result<()> {
        tracing::info!("Kulture node starting");
        tracing::info!("  API: http://{}", self.config.api_addr);
        tracing::info!("  Data: {:?}", self.config.data_dir);
        tracing::info!("  Hex plane enforced: {}", self.config.require_hex_plane);

        let app = api::build_router(self.state());

        let listener = tokio::net::TcpListener::bind(self.config.api_addr).await?;
        tracing::info!("HTTP server listening on {}", self.config.api_addr);

        axum::serve(listener, app).await?;

        Ok(())
    }
}
