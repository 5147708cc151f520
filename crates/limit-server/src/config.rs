//! Configuration for the limit-order TCP server.
//!
//! Sources, lowest precedence first:
//! 1. built-in defaults
//! 2. environment variables
//! 3. an optional TOML file (see [`Config::merge_file`])
//! 4. command-line flags (applied in `main`)
//!
//! Environment variables:
//!
//! - `LIMIT_BIND_ADDR`       (default: "0.0.0.0")
//! - `LIMIT_PORT`            (default: "9100")
//! - `LIMIT_MAX_CLIENTS`     (default: "1024")
//! - `LIMIT_MAX_ORDER_QTY`   (default: "1000000")
//! - `LIMIT_HALTED_PRODUCTS` (default: "", comma separated)

use std::env;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}'")]
    InvalidEnv { key: String, value: String },

    #[error("cannot read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// Server configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// IP address / interface to bind to (e.g. "0.0.0.0" or "127.0.0.1").
    pub bind_addr: String,

    /// TCP port to listen on.
    pub port: u16,

    /// Maximum number of simultaneously connected clients.
    pub max_clients: usize,

    /// Paper backend rejects executions above this quantity.
    pub max_order_qty: u64,

    /// Paper backend rejects every execution on these products.
    pub halted_products: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bind_addr: "0.0.0.0".to_string(),
            port: 9100,
            max_clients: 1024,
            max_order_qty: 1_000_000,
            halted_products: Vec::new(),
        }
    }
}

/// Shape of the optional TOML file; every key may be omitted.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    bind_addr: Option<String>,
    port: Option<u16>,
    max_clients: Option<usize>,
    max_order_qty: Option<u64>,
    halted_products: Option<Vec<String>>,
}

impl Config {
    /// Construct a `Config` from environment variables, falling back
    /// to the defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Config::default();

        let bind_addr = env::var("LIMIT_BIND_ADDR").unwrap_or(defaults.bind_addr);
        let port = read_env_or_default("LIMIT_PORT", defaults.port)?;
        let max_clients = read_env_or_default("LIMIT_MAX_CLIENTS", defaults.max_clients)?;
        let max_order_qty = read_env_or_default("LIMIT_MAX_ORDER_QTY", defaults.max_order_qty)?;
        let halted_products = env::var("LIMIT_HALTED_PRODUCTS")
            .map(|v| parse_product_list(&v))
            .unwrap_or(defaults.halted_products);

        Ok(Config {
            bind_addr,
            port,
            max_clients,
            max_order_qty,
            halted_products,
        })
    }

    /// Overlay the keys present in a TOML file.
    pub fn merge_file(self, path: &Path) -> Result<Self, ConfigError> {
        let display = path.display().to_string();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: display.clone(),
            source,
        })?;
        self.merge_toml(&text).map_err(|source| ConfigError::Parse {
            path: display,
            source,
        })
    }

    fn merge_toml(mut self, text: &str) -> Result<Self, toml::de::Error> {
        let file: FileConfig = toml::from_str(text)?;

        if let Some(v) = file.bind_addr {
            self.bind_addr = v;
        }
        if let Some(v) = file.port {
            self.port = v;
        }
        if let Some(v) = file.max_clients {
            self.max_clients = v;
        }
        if let Some(v) = file.max_order_qty {
            self.max_order_qty = v;
        }
        if let Some(v) = file.halted_products {
            self.halted_products = v;
        }
        Ok(self)
    }

    /// Convenience: `addr:port` socket string.
    pub fn socket_addr_string(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

fn read_env_or_default<T: FromStr>(key: &str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(val) => val.trim().parse::<T>().map_err(|_| ConfigError::InvalidEnv {
            key: key.to_string(),
            value: val,
        }),
        Err(_) => Ok(default),
    }
}

fn parse_product_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}
