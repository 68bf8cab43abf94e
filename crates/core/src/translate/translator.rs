//! Dependency Graph Translator

use indexmap::IndexMap;
use tracing::{debug, info};

use super::resolver::ReactorReferenceResolver;
use super::scope_mapper::configuration_for;
use crate::error::{Error, Result};
use crate::reactor::Reactor;
use crate::target::{ConfigurationAssignment, TargetBuildTree, UnitId};
use crate::types::{DependencyDeclaration, DependencyScope, Module};

/// Turns the declared dependencies of a module into target configuration membership
#[derive(Debug, Clone, Copy)]
pub struct DependencyGraphTranslator<'a> {
    resolver: ReactorReferenceResolver<'a>,
}

impl<'a> DependencyGraphTranslator<'a> {
    pub fn new(reactor: &'a Reactor, tree: &'a TargetBuildTree) -> Self {
        Self {
            resolver: ReactorReferenceResolver::new(reactor, tree),
        }
    }

    pub fn resolver(&self) -> &ReactorReferenceResolver<'a> {
        &self.resolver
    }

    /// Translate every dependency of `module`, whose unit in the target tree is `unit`.
    ///
    /// Either every dependency is assigned or an error is returned and nothing is.
    pub fn translate(&self, module: &Module, unit: UnitId) -> Result<ConfigurationAssignment> {
        info!("Adding project dependencies for {}", module.coordinates);

        let mut by_scope: IndexMap<DependencyScope, Vec<&DependencyDeclaration>> =
            IndexMap::new();
        for dependency in &module.dependencies {
            by_scope.entry(dependency.scope).or_default().push(dependency);
        }

        let mut assignment = ConfigurationAssignment::new();
        for (scope, dependencies) in by_scope {
            let configuration = configuration_for(scope, &module.packaging).ok_or_else(|| {
                Error::ConfigurationNotFound {
                    module: module.coordinates.to_string(),
                    dependency: dependencies
                        .first()
                        .map(|d| d.to_string())
                        .unwrap_or_default(),
                    scope: scope.to_string(),
                    packaging: module.packaging.to_string(),
                }
            })?;

            for dependency in dependencies {
                let resolved = self.resolver.resolve(module, dependency, unit)?;
                debug!("{} -> {} in {}", dependency, resolved, configuration);
                assignment.add(configuration, resolved);
            }
        }

        Ok(assignment)
    }
}
