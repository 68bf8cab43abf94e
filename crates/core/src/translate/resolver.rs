//! Matches dependencies against the reactor and reactor modules against the target tree

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::reactor::Reactor;
use crate::target::{BuildUnit, ResolvedDependency, TargetBuildTree, UnitId};
use crate::types::{DependencyDeclaration, Module};

/// Reactor Reference Resolver.
///
/// Holds read-only borrows of both models; nothing is cached between calls.
#[derive(Debug, Clone, Copy)]
pub struct ReactorReferenceResolver<'a> {
    reactor: &'a Reactor,
    tree: &'a TargetBuildTree,
}

impl<'a> ReactorReferenceResolver<'a> {
    pub fn new(reactor: &'a Reactor, tree: &'a TargetBuildTree) -> Self {
        Self { reactor, tree }
    }

    /// The unique reactor module with exactly the dependency's coordinates.
    ///
    /// Zero matches and multiple matches both yield `None`; ties never pick a module.
    pub fn find_sibling(&self, dependency: &DependencyDeclaration) -> Option<&'a Module> {
        let mut matches = self.reactor.modules_matching(dependency);
        let first = matches.next()?;
        let extra = matches.count();
        if extra > 0 {
            warn!(
                "{} reactor modules match {}, treating it as an external artifact",
                extra + 1,
                dependency
            );
            return None;
        }
        Some(first)
    }

    /// First unit under `scope` with a name segment equal to the module's base directory name
    pub fn find_unit(&self, module: &Module, scope: UnitId) -> Option<&'a BuildUnit> {
        let dir_name = module.base_dir_name()?;
        self.tree
            .all_units(scope)
            .into_iter()
            .find(|unit| unit.matches_dir_name(dir_name))
    }

    /// Unit that represents `module` itself in the target build
    pub fn unit_for_module(&self, module: &Module) -> Option<UnitId> {
        if self.reactor.root_module() == Some(module) {
            return Some(self.tree.root());
        }
        self.find_unit(module, self.tree.root()).map(BuildUnit::id)
    }

    /// Classify one dependency of `module`, whose unit in the target tree is `current`
    pub fn resolve(
        &self,
        module: &Module,
        dependency: &DependencyDeclaration,
        current: UnitId,
    ) -> Result<ResolvedDependency> {
        let Some(sibling) = self.find_sibling(dependency) else {
            debug!("{} is an external artifact", dependency);
            return Ok(ResolvedDependency::ExternalArtifact {
                group: dependency.group_id.clone(),
                artifact: dependency.artifact_id.clone(),
                version: dependency.version.clone(),
                exclusions: dependency.exclusions.clone(),
            });
        };

        let scope = self.tree.sibling_scope(current);
        let unit = self.find_unit(sibling, scope).ok_or_else(|| {
            Error::SiblingUnitNotFound {
                module: module.coordinates.to_string(),
                dependency: dependency.to_string(),
                base_dir: sibling.base_directory().display().to_string(),
            }
        })?;

        debug!("{} resolved to unit {}", dependency, unit.name());
        Ok(ResolvedDependency::SiblingModule {
            unit: unit.name().to_string(),
        })
    }
}
