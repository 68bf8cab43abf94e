//! Target build model: unit tree and dependency configurations

mod build_tree;
mod configuration;

pub use build_tree::{BuildUnit, TargetBuildTree, UnitId, UnitSpec};
pub use configuration::{ConfigurationAssignment, ResolvedDependency, TargetConfiguration};
