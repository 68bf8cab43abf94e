//! Configuration for pom-bridge, read from `.pom-bridge.json`

mod join;
mod settings;

pub use join::{MAVEN_CLEAN_MOJO, MAVEN_CLEAN_PLUGIN_KEY, PhaseJoin};
pub use settings::{CONFIG_FILE_NAME, Config, PluginDiscovery};
