//! Server configuration

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::str::FromStr;

/// Response compression method negotiated against the client's
/// `Accept-Encoding` header. A single method is configured; the finalizer
/// applies it only when the client accepts it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CompressionMethod {
    None,
    Gzip,
    #[default]
    Br,
}

impl FromStr for CompressionMethod {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "none" => Ok(Self::None),
            "gzip" => Ok(Self::Gzip),
            "br" => Ok(Self::Br),
            other => bail!("unknown compression method {:?} (expected none, gzip or br)", other),
        }
    }
}

impl fmt::Display for CompressionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Gzip => write!(f, "gzip"),
            Self::Br => write!(f, "br"),
        }
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server listening port
    /// Env: NT_PORT
    /// Default: 5000
    pub port: u16,

    /// Server listening address
    /// Env: NT_HOST
    /// Default: "127.0.0.1"
    pub host: String,

    /// Compression method applied when the client accepts it
    /// Env: NT_COMPRESSION ("none" | "gzip" | "br")
    /// Default: br
    pub compression: CompressionMethod,

    /// Static-serving prefix (directory below the working directory); absent
    /// means extensioned paths have no static fallback
    /// Env: NT_SERVE_STATIC
    /// Default: None
    pub serve_static: Option<String>,

    /// Emit a structured JSON access-log line per response
    /// Env: NT_ACCESS_LOG
    /// Default: false
    pub access_log: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 5000,
            host: "127.0.0.1".to_string(),
            compression: CompressionMethod::default(),
            serve_static: None,
            access_log: false,
        }
    }
}

impl ServerConfig {
    /// Merge another config into this one (other takes priority)
    pub fn merge(&mut self, other: Self) {
        self.port = other.port;
        self.host = other.host;
        self.compression = other.compression;
        self.serve_static = other.serve_static;
        self.access_log = other.access_log;
    }

    /// Apply environment variables
    pub fn apply_env_vars(&mut self) {
        if let Ok(port) = env::var("NT_PORT") {
            if let Ok(p) = port.parse() {
                self.port = p;
            }
        }

        if let Ok(host) = env::var("NT_HOST") {
            self.host = host;
        }

        if let Ok(method) = env::var("NT_COMPRESSION") {
            if let Ok(m) = method.parse() {
                self.compression = m;
            }
        }

        if let Ok(prefix) = env::var("NT_SERVE_STATIC") {
            self.serve_static = Some(prefix);
        }

        if let Ok(enabled) = env::var("NT_ACCESS_LOG") {
            self.access_log = enabled == "1" || enabled.eq_ignore_ascii_case("true");
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.port == 0 {
            bail!("Invalid port: port must be between 1 and 65535");
        }

        if self.host.is_empty() {
            bail!("Invalid host: host cannot be empty");
        }

        if let Some(prefix) = &self.serve_static {
            if prefix.is_empty() {
                bail!("Invalid serve_static: prefix cannot be empty");
            }
            if prefix.starts_with('/') {
                bail!("Invalid serve_static: prefix must be relative (no leading '/')");
            }
            if prefix.contains("..") {
                bail!("Invalid serve_static: prefix must not contain '..'");
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = ServerConfig::default();
        assert_eq!(cfg.port, 5000);
        assert_eq!(cfg.compression, CompressionMethod::Br);
        assert!(cfg.serve_static.is_none());
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_compression_method_parse() {
        assert_eq!("gzip".parse::<CompressionMethod>().unwrap(), CompressionMethod::Gzip);
        assert_eq!("br".parse::<CompressionMethod>().unwrap(), CompressionMethod::Br);
        assert_eq!("none".parse::<CompressionMethod>().unwrap(), CompressionMethod::None);
        assert!("zstd".parse::<CompressionMethod>().is_err());
    }

    #[test]
    fn test_serve_static_leading_slash_fails() {
        let cfg =
            ServerConfig { serve_static: Some("/public".to_string()), ..Default::default() };
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("no leading '/'"));
    }

    #[test]
    fn test_serve_static_traversal_fails() {
        let cfg =
            ServerConfig { serve_static: Some("../secrets".to_string()), ..Default::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_port_zero_fails() {
        let cfg = ServerConfig { port: 0, ..Default::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_toml_compression_names() {
        let cfg: ServerConfig = toml::from_str("compression = \"gzip\"").unwrap();
        assert_eq!(cfg.compression, CompressionMethod::Gzip);
        let cfg: ServerConfig = toml::from_str("compression = \"br\"").unwrap();
        assert_eq!(cfg.compression, CompressionMethod::Br);
    }
}
