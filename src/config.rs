// Copyright 2026 BtLink Team
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Configuration module.
//!
//! Handles loading and saving server settings. The service identifiers are
//! compile-time constants in [`crate::server::constants`]; only adapter
//! presentation knobs live here.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Bluetooth settings.
    pub bluetooth: BluetoothConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BluetoothConfig {
    /// Device alias advertised while discoverable.
    pub device_name: String,

    /// Open secure (authenticated) sessions instead of insecure ones.
    pub secure: bool,

    /// Power the adapter on automatically at startup.
    pub auto_power_on: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bluetooth: BluetoothConfig {
                device_name: "BtLink".to_string(),
                secure: true,
                auto_power_on: true,
            },
        }
    }
}

impl Config {
    /// Load configuration from the user config directory, writing defaults
    /// on first run.
    pub fn load() -> Result<Self> {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("btlink");

        std::fs::create_dir_all(&config_dir)?;

        Self::load_from(&config_dir.join("config.toml"))
    }

    /// Load configuration from a specific path, writing defaults if the file
    /// does not exist yet.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Ok(toml::from_str(&content)?)
        } else {
            let config = Self::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    /// Save configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_written_on_first_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let config = Config::load_from(&path).unwrap();

        assert!(path.exists());
        assert_eq!(config.bluetooth.device_name, "BtLink");
        assert!(config.bluetooth.secure);
        assert!(config.bluetooth.auto_power_on);
    }

    #[test]
    fn test_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.bluetooth.device_name = "Rendezvous".to_string();
        config.bluetooth.secure = false;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.bluetooth.device_name, "Rendezvous");
        assert!(!loaded.bluetooth.secure);
    }
}
