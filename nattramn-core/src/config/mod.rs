//! Configuration system for the page server
//!
//! Server settings resolve through the usual supersedence chain (highest
//! priority wins):
//!
//! 1. **Environment variables** (`NT_*`)
//! 2. **Config file** (`nattramn.toml`, `[server]` table)
//! 3. **Defaults**
//!
//! Pages cannot come from a file - they carry handler callbacks - so the
//! router side is always built in code via [`RouterConfig::builder`]. The
//! assembled [`NattramnConfig`] is immutable for the life of the process:
//! the server wraps it in an `Arc` and every component reads it by
//! reference.

pub mod router;
pub mod server;

pub use router::{Page, RouterBuilder, RouterConfig};
pub use server::{CompressionMethod, ServerConfig};

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Complete page-server configuration, frozen after construction
#[derive(Debug, Clone)]
pub struct NattramnConfig {
    pub server: ServerConfig,
    pub router: RouterConfig,
}

/// On-disk shape of the config file
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    server: ServerConfig,
}

impl NattramnConfig {
    pub fn new(server: ServerConfig, router: RouterConfig) -> Self {
        Self { server, router }
    }

    /// Resolve server settings with full supersedence, then attach the pages
    pub fn load(router: RouterConfig) -> Result<Self> {
        Self::load_from("nattramn.toml", router)
    }

    /// Resolve server settings from a specific file path
    pub fn load_from(path: impl AsRef<Path>, router: RouterConfig) -> Result<Self> {
        let path = path.as_ref();

        let mut server = ServerConfig::default();

        if path.exists() {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            let file: ConfigFile = toml::from_str(&raw)
                .with_context(|| format!("Failed to parse config from {}", path.display()))?;
            server.merge(file.server);
        }

        server.apply_env_vars();
        server.validate()?;

        Ok(Self { server, router })
    }
}
