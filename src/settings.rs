//! Runtime configuration, read from an optional `rowsift.toml` next to the
//! binary and overridable through `ROWSIFT_*` environment variables
//! (e.g. `ROWSIFT_SERVER__PORT=8080`).

use serde::Deserialize;

use crate::error::Result;

fn default_address() -> String {
    "127.0.0.1".to_string()
}
fn default_port() -> u16 {
    8420
}
// The preview cap mirrors how many result rows are worth showing inline;
// the full set is always available through export.
fn default_preview_rows() -> usize {
    10
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_address")]
    pub address: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            address: default_address(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default = "default_preview_rows")]
    pub preview_rows: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerSettings::default(),
            preview_rows: default_preview_rows(),
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::File::with_name("rowsift").required(false))
            .add_source(config::Environment::with_prefix("ROWSIFT").separator("__"))
            .build()?;
        Ok(cfg.try_deserialize()?)
    }
}
