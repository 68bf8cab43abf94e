use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::{Coordinates, DependencyDeclaration, Packaging, PluginDeclaration, Repository};

/// One node of the reactor: a module with its declared dependencies and plugins
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    #[serde(flatten)]
    pub coordinates: Coordinates,
    #[serde(default)]
    pub packaging: Packaging,
    pub base_directory: PathBuf,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<DependencyDeclaration>,
    #[serde(default, with = "plugin_list", skip_serializing_if = "IndexMap::is_empty")]
    pub plugins: IndexMap<String, PluginDeclaration>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub repositories: Vec<Repository>,
}

impl Module {
    pub fn new(
        coordinates: Coordinates,
        packaging: Packaging,
        base_directory: impl Into<PathBuf>,
    ) -> Self {
        Self {
            coordinates,
            packaging,
            base_directory: base_directory.into(),
            dependencies: Vec::new(),
            plugins: IndexMap::new(),
            repositories: Vec::new(),
        }
    }

    pub fn with_dependency(mut self, dependency: DependencyDeclaration) -> Self {
        self.dependencies.push(dependency);
        self
    }

    pub fn with_plugin(mut self, plugin: PluginDeclaration) -> Self {
        self.plugins.insert(plugin.key.clone(), plugin);
        self
    }

    pub fn with_repository(mut self, id: impl Into<String>, url: impl Into<String>) -> Self {
        self.repositories.push(Repository {
            id: id.into(),
            url: url.into(),
        });
        self
    }

    pub fn plugin(&self, key: &str) -> Option<&PluginDeclaration> {
        self.plugins.get(key)
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    /// Last path component of the base directory
    pub fn base_dir_name(&self) -> Option<&str> {
        self.base_directory.file_name().and_then(|n| n.to_str())
    }

    /// `<basedir>/target`, the legacy build output directory
    pub fn build_directory(&self) -> PathBuf {
        self.base_directory.join("target")
    }
}

/// Plugins travel as a list in JSON and are keyed by `PluginDeclaration::key` in memory
mod plugin_list {
    use indexmap::IndexMap;
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::types::PluginDeclaration;

    pub fn serialize<S>(
        plugins: &IndexMap<String, PluginDeclaration>,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(plugins.values())
    }

    pub fn deserialize<'de, D>(
        deserializer: D,
    ) -> Result<IndexMap<String, PluginDeclaration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let list = Vec::<PluginDeclaration>::deserialize(deserializer)?;
        Ok(list.into_iter().map(|p| (p.key.clone(), p)).collect())
    }
}
