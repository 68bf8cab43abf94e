//! pom-bridge - Carries a legacy multi-module build over to a target build model
//!
//! This crate provides functionality to:
//! - Translate each reactor module's declared dependencies into target build configurations
//! - Resolve references between reactor modules onto units of the target build tree
//! - Run legacy plugin goals as deferred actions of host tasks
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod plugin;
pub mod reactor;
pub mod target;
pub mod tasks;
pub mod translate;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;

// Re-export main API components
pub use config::Config;
pub use lifecycle::{BridgeContext, join_phases};
pub use plugin::{MojoBridge, PluginDescriptor};
pub use reactor::Reactor;
pub use target::{ConfigurationAssignment, ResolvedDependency, TargetBuildTree, TargetConfiguration};
pub use tasks::{BuildInvocation, Task, TaskGraph};
pub use translate::{DependencyGraphTranslator, ModuleMigration, ReactorReferenceResolver};
