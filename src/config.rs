use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Serial line settings for the bus.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub port: String,
    pub baud_rate: u32,
    /// Write timeout on the serial device
    pub timeout_ms: u64,
    /// Pause after opening the port before the first byte is sent
    pub settle_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: "/dev/ttyUSB0".to_string(),
            baud_rate: 19200,
            timeout_ms: 1000,
            settle_ms: 100,
        }
    }
}

impl Config {
    /// Load settings from a JSON file. Missing fields keep their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read {}: {}", path.display(), e)))?;
        Self::from_json(&data)
    }

    pub fn from_json(data: &str) -> Result<Self> {
        serde_json::from_str(data).map_err(|e| Error::Config(e.to_string()))
    }
}
