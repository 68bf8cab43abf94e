pub mod config_node;
pub mod coordinates;
pub mod dependency;
pub mod module;
pub mod packaging;
pub mod plugin;

// Re-export commonly used types
pub use config_node::ConfigNode;
pub use coordinates::Coordinates;
pub use dependency::{DependencyDeclaration, DependencyScope, ExclusionRule};
pub use module::Module;
pub use packaging::{Packaging, PackagingFamily};
pub use plugin::{PluginDeclaration, PluginExecution, Repository};
