//! Bridge for running legacy build plugin goals inside the host task graph.
//!
//! A [`MojoBridge`] binds a plugin goal to a deferred [`BoundMojo`] action. When
//! the host runs the action, the configured [`PluginStrategy`] locates the
//! plugin descriptor, builds an isolated [`ClassRealm`], instantiates the mojo,
//! registers it in the invocation's [`ComponentContainer`] and hands it to the
//! build plugin manager.

pub mod bridge;
pub mod container;
pub mod descriptor;
pub mod loader;
pub mod mojo;
pub mod realm;
pub mod session;
pub mod strategy;
mod xml;

pub use bridge::{BindingState, BoundMojo, MojoBridge};
pub use container::{
    BASIC_CONFIGURATOR, BasicConfigurator, BuildPluginManager, ComponentConfigurator,
    ComponentContainer, DefaultBuildPluginManager,
};
pub use descriptor::{
    DEFAULT_MOJO_ROLE, MojoDescriptor, PLUGIN_DESCRIPTOR_PATH, Parameter, PluginDescriptor,
};
pub use loader::{ClassLoader, CodeLocation, MojoClass};
pub use mojo::{Mojo, MojoContext, MojoError, MojoExecution, MojoFactory};
pub use realm::{ClassRealm, PLUGIN_REALM_ID};
pub use session::{ExecutionRequest, ExecutionResult, ExecutionSession, SessionContext};
pub use strategy::{
    ArchivePluginStrategy, DirectoryPluginStrategy, PluginStrategy, read_archive_descriptor,
};
