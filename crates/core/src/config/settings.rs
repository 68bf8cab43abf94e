use crate::error::{Error, Result};
use crate::plugin::{
    ArchivePluginStrategy, BASIC_CONFIGURATOR, ComponentContainer, DirectoryPluginStrategy,
    MojoBridge,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::PhaseJoin;

pub const CONFIG_FILE_NAME: &str = ".pom-bridge.json";
const ALTERNATE_CONFIG_FILE_NAME: &str = "pom-bridge.json";

fn default_configurator() -> String {
    BASIC_CONFIGURATOR.to_string()
}

fn default_root_unit() -> String {
    "root".to_string()
}

fn default_joins() -> Vec<PhaseJoin> {
    vec![PhaseJoin::clean()]
}

/// How plugin classes are located
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PluginDiscovery {
    /// Packaged archives only; loose class directories are skipped
    #[default]
    Archive,
    /// Archives and class directories carrying their own descriptor
    Directory,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Configurator used for mojos that do not name one
    #[serde(default = "default_configurator")]
    pub default_configurator: String,
    /// Name of the root unit when the target tree is derived from the reactor
    #[serde(default = "default_root_unit")]
    pub root_unit: String,
    #[serde(default)]
    pub plugin_discovery: PluginDiscovery,
    #[serde(default = "default_joins")]
    pub joins: Vec<PhaseJoin>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_configurator: default_configurator(),
            root_unit: default_root_unit(),
            plugin_discovery: PluginDiscovery::default(),
            joins: default_joins(),
        }
    }
}

impl Config {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&contents)
            .map_err(|e| Error::ConfigError(format!("Failed to parse config: {e}")))?;
        Ok(config)
    }

    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| Error::ConfigError(format!("Failed to serialize config: {e}")))?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    pub fn find_config_file(start_path: &Path) -> Option<PathBuf> {
        let mut current = start_path;

        loop {
            let config_path = current.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                return Some(config_path);
            }

            let config_path = current.join(ALTERNATE_CONFIG_FILE_NAME);
            if config_path.exists() {
                return Some(config_path);
            }

            current = current.parent()?;
        }
    }

    /// Nearest config above `start_path`, or the defaults
    pub fn discover(start_path: &Path) -> Result<Self> {
        match Self::find_config_file(start_path) {
            Some(path) => Self::load_from_file(&path),
            None => Ok(Self::default()),
        }
    }

    /// Fresh container for one build invocation
    pub fn container(&self, name: impl Into<String>) -> ComponentContainer {
        ComponentContainer::new(name).with_default_configurator(&self.default_configurator)
    }

    pub fn bridge(&self) -> MojoBridge {
        match self.plugin_discovery {
            PluginDiscovery::Archive => MojoBridge::new(Arc::new(ArchivePluginStrategy)),
            PluginDiscovery::Directory => MojoBridge::new(Arc::new(DirectoryPluginStrategy)),
        }
    }
}
