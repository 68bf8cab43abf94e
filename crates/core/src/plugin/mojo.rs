//! The executable unit of plugin logic and the data handed to it at run time

use super::descriptor::MojoDescriptor;
use super::session::ExecutionSession;
use crate::error::BoxedCause;
use crate::types::ConfigNode;

/// Error raised by a mojo's own code
pub type MojoError = BoxedCause;

/// What a running mojo can see
pub struct MojoContext<'a> {
    pub session: &'a ExecutionSession,
    pub execution: &'a MojoExecution,
}

/// A single plugin goal implementation.
///
/// Parameters are injected by a component configurator before `execute` is called.
pub trait Mojo: Send {
    /// Receive one evaluated configuration parameter. Unknown parameters are ignored by default.
    fn set_parameter(&mut self, _name: &str, _value: &ConfigNode) -> Result<(), MojoError> {
        Ok(())
    }

    fn execute(&mut self, context: &MojoContext<'_>) -> Result<(), MojoError>;
}

/// Produces fresh mojo instances for a defined class
pub trait MojoFactory: Send + Sync {
    fn instantiate(&self) -> Box<dyn Mojo>;
}

impl<F> MojoFactory for F
where
    F: Fn() -> Box<dyn Mojo> + Send + Sync,
{
    fn instantiate(&self) -> Box<dyn Mojo> {
        self()
    }
}

/// One planned run of a goal: plugin, goal, execution id and the merged configuration
#[derive(Debug, Clone)]
pub struct MojoExecution {
    pub plugin_key: String,
    pub goal: String,
    pub execution_id: String,
    pub descriptor: Option<MojoDescriptor>,
    pub configuration: ConfigNode,
}

impl MojoExecution {
    pub fn new(
        plugin_key: impl Into<String>,
        goal: impl Into<String>,
        execution_id: impl Into<String>,
    ) -> Self {
        Self {
            plugin_key: plugin_key.into(),
            goal: goal.into(),
            execution_id: execution_id.into(),
            descriptor: None,
            configuration: ConfigNode::new("configuration"),
        }
    }

    pub fn with_descriptor(mut self, descriptor: MojoDescriptor) -> Self {
        self.descriptor = Some(descriptor);
        self
    }

    pub fn with_configuration(mut self, configuration: ConfigNode) -> Self {
        self.configuration = configuration;
        self
    }

    /// `groupId:artifactId:goal@execution`
    pub fn key(&self) -> String {
        format!("{}:{}@{}", self.plugin_key, self.goal, self.execution_id)
    }
}
