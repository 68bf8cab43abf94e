//! Reactor snapshot: the modules of one multi-module legacy build

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};
use crate::target::TargetBuildTree;
use crate::types::{DependencyDeclaration, Module};

/// Immutable set of modules taking part in one build.
///
/// The first module is the top-level (aggregator) module.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reactor {
    modules: Vec<Module>,
}

impl Reactor {
    pub fn new(modules: Vec<Module>) -> Self {
        Self { modules }
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn from_json(contents: &str) -> Result<Self> {
        serde_json::from_str(contents)
            .map_err(|e| Error::ConfigError(format!("Failed to parse reactor snapshot: {e}")))
    }

    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    pub fn root_module(&self) -> Option<&Module> {
        self.modules.first()
    }

    pub fn find_by_artifact_id(&self, artifact_id: &str) -> Option<&Module> {
        self.modules
            .iter()
            .find(|m| m.coordinates.artifact_id == artifact_id)
    }

    /// Every module whose coordinates match `dependency` exactly
    pub fn modules_matching<'a, 'd>(
        &'a self,
        dependency: &'d DependencyDeclaration,
    ) -> impl Iterator<Item = &'a Module> + use<'a, 'd> {
        self.modules.iter().filter(move |m| {
            m.coordinates.matches(
                &dependency.group_id,
                &dependency.artifact_id,
                &dependency.version,
            )
        })
    }

    /// Build a target tree with one child unit per non-root module.
    ///
    /// Units are named `<root>:<base directory name>`; modules without a
    /// usable directory name get no unit.
    pub fn derive_target_tree(&self, root_name: &str) -> TargetBuildTree {
        let mut tree = TargetBuildTree::new(root_name);
        let root = tree.root();
        for module in self.modules.iter().skip(1) {
            if let Some(dir_name) = module.base_dir_name() {
                tree.push_unit(root, format!("{root_name}:{dir_name}"));
            }
        }
        tree
    }
}
