//! General project settings carried over from a reactor module

use serde::{Deserialize, Serialize};

use crate::types::Module;

/// Status used for non-snapshot versions
pub const DEFAULT_STATUS: &str = "integration";
/// Status used for `-SNAPSHOT` versions
pub const SNAPSHOT_STATUS: &str = "SNAPSHOT";

/// Named repository registered on the target build
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetRepository {
    pub name: String,
    pub url: String,
}

/// Identity, status, applied plugin and repositories for one target unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSettings {
    pub group: String,
    pub version: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_plugin: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub repositories: Vec<TargetRepository>,
}

impl ProjectSettings {
    pub fn from_module(module: &Module) -> Self {
        let status = if module.coordinates.is_snapshot() {
            SNAPSHOT_STATUS
        } else {
            DEFAULT_STATUS
        };

        Self {
            group: module.coordinates.group_id.clone(),
            version: module.coordinates.version.clone(),
            status: status.to_string(),
            target_plugin: module.packaging.target_plugin().map(str::to_string),
            repositories: module
                .repositories
                .iter()
                .map(|r| TargetRepository {
                    name: r.id.clone(),
                    url: r.url.clone(),
                })
                .collect(),
        }
    }
}
