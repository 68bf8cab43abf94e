//! Translation of reactor metadata into the target build model
//!
//! This module provides:
//! - the fixed scope-to-configuration table
//! - the Reactor Reference Resolver (reactor and target-tree matching)
//! - the Dependency Graph Translator
//! - general project settings carried over per module

pub mod resolver;
pub mod scope_mapper;
pub mod settings;
pub mod translator;

pub use resolver::ReactorReferenceResolver;
pub use scope_mapper::configuration_for;
pub use settings::{ProjectSettings, TargetRepository};
pub use translator::DependencyGraphTranslator;

use serde::Serialize;
use tracing::info;

use crate::error::{Error, Result};
use crate::reactor::Reactor;
use crate::target::{ConfigurationAssignment, TargetBuildTree};
use crate::types::{Coordinates, Module};

/// Everything migrated for one module
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleMigration {
    pub module: Coordinates,
    pub unit: String,
    pub settings: ProjectSettings,
    pub dependencies: ConfigurationAssignment,
}

/// Migrate one module: locate its unit, carry over settings, translate dependencies
pub fn migrate_module(
    reactor: &Reactor,
    tree: &TargetBuildTree,
    module: &Module,
) -> Result<ModuleMigration> {
    let translator = DependencyGraphTranslator::new(reactor, tree);
    let unit_id = translator
        .resolver()
        .unit_for_module(module)
        .ok_or_else(|| Error::UnknownUnit(module.coordinates.to_string()))?;
    let unit = tree
        .unit(unit_id)
        .map(|u| u.name().to_string())
        .unwrap_or_default();

    info!("Configuring general settings for {}", unit);
    let settings = ProjectSettings::from_module(module);
    let dependencies = translator.translate(module, unit_id)?;

    Ok(ModuleMigration {
        module: module.coordinates.clone(),
        unit,
        settings,
        dependencies,
    })
}

/// Migrate every reactor module, stopping at the first failure
pub fn migrate_reactor(reactor: &Reactor, tree: &TargetBuildTree) -> Result<Vec<ModuleMigration>> {
    reactor
        .modules()
        .iter()
        .map(|module| migrate_module(reactor, tree, module))
        .collect()
}
