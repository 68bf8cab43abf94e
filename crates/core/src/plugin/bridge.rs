//! Binds a foreign plugin goal to a deferred task action

use std::sync::Arc;
use tracing::{debug, info};

use super::container::ComponentContainer;
use super::loader::MojoClass;
use super::mojo::MojoExecution;
use super::session::{ExecutionSession, SessionContext};
use super::strategy::{ArchivePluginStrategy, PluginStrategy};
use crate::error::{Error, Result};
use crate::tasks::{BuildInvocation, TaskAction};
use crate::types::{ConfigNode, PluginDeclaration, PluginExecution};

/// Lifecycle of a bound action. Each binding runs at most once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingState {
    Bound,
    Executing,
    Succeeded,
    Failed,
}

#[derive(Clone)]
pub struct MojoBridge {
    strategy: Arc<dyn PluginStrategy>,
}

impl std::fmt::Debug for MojoBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MojoBridge")
            .field("strategy", &self.strategy.name())
            .finish()
    }
}

impl Default for MojoBridge {
    fn default() -> Self {
        Self::archive()
    }
}

impl MojoBridge {
    pub fn new(strategy: Arc<dyn PluginStrategy>) -> Self {
        Self { strategy }
    }

    /// Bridge that only runs archive-packaged plugins
    pub fn archive() -> Self {
        Self::new(Arc::new(ArchivePluginStrategy))
    }

    pub fn strategy(&self) -> &dyn PluginStrategy {
        self.strategy.as_ref()
    }

    /// Capture everything needed to run `goal` later. Nothing is read or loaded here.
    pub fn bind(
        &self,
        mojo_class: MojoClass,
        plugin: &PluginDeclaration,
        execution: &PluginExecution,
        goal: impl Into<String>,
        session: SessionContext,
    ) -> BoundMojo {
        let goal = goal.into();
        debug!(
            "Binding {}:{} (execution {}) to {}",
            plugin.key,
            goal,
            execution.id,
            mojo_class.name()
        );
        BoundMojo {
            strategy: Arc::clone(&self.strategy),
            mojo_class,
            plugin: plugin.clone(),
            execution: execution.clone(),
            goal,
            session,
            state: BindingState::Bound,
        }
    }
}

/// A deferred plugin goal run, attached to a host task
pub struct BoundMojo {
    strategy: Arc<dyn PluginStrategy>,
    mojo_class: MojoClass,
    plugin: PluginDeclaration,
    execution: PluginExecution,
    goal: String,
    session: SessionContext,
    state: BindingState,
}

impl std::fmt::Debug for BoundMojo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoundMojo")
            .field("strategy", &self.strategy.name())
            .field("mojo_class", &self.mojo_class)
            .field("plugin", &self.plugin.key)
            .field("execution", &self.execution.id)
            .field("goal", &self.goal)
            .field("state", &self.state)
            .finish()
    }
}

impl BoundMojo {
    pub fn state(&self) -> BindingState {
        self.state
    }

    pub fn goal(&self) -> &str {
        &self.goal
    }

    /// Descriptor defaults, overridden by plugin configuration, overridden by execution configuration
    fn merged_configuration(&self, defaults: Option<&ConfigNode>) -> ConfigNode {
        let mut merged = defaults
            .cloned()
            .unwrap_or_else(|| ConfigNode::new("configuration"));
        if let Some(plugin) = &self.plugin.configuration {
            merged = plugin.merged_over(&merged);
        }
        if let Some(execution) = &self.execution.configuration {
            merged = execution.merged_over(&merged);
        }
        merged
    }

    fn perform(&self, container: &mut ComponentContainer) -> Result<()> {
        let Some(descriptor) = self.strategy.locate_descriptor(&self.mojo_class)? else {
            return Ok(());
        };

        let realm = self.strategy.create_realm(&self.mojo_class);
        let mojo_descriptor = descriptor
            .mojo(&self.goal)
            .cloned()
            .ok_or_else(|| Error::GoalNotFound {
                goal: self.goal.clone(),
                plugin: descriptor.key(),
            })?;

        let configuration = self.merged_configuration(mojo_descriptor.configuration.as_ref());
        let execution = MojoExecution::new(descriptor.key(), &self.goal, &self.execution.id)
            .with_descriptor(mojo_descriptor.clone())
            .with_configuration(configuration);
        let (role, hint) = (&mojo_descriptor.role, &mojo_descriptor.role_hint);

        let mut session = ExecutionSession::new(&self.session);
        let configurator = self.strategy.configure(container, &mojo_descriptor)?;
        let mojo = self.strategy.instantiate(&realm, &mojo_descriptor)?;

        container.add_component(role, hint, mojo);
        let outcome = self
            .strategy
            .run(container, &mut session, &execution, configurator.as_ref());
        container.remove_component(role, hint);

        match outcome {
            Ok(()) => Ok(()),
            Err(e @ Error::PluginExecutionFailed { .. }) => Err(e),
            Err(e) => Err(Error::PluginExecutionFailed {
                goal: self.goal.clone(),
                execution: self.execution.id.clone(),
                source: Box::new(e),
            }),
        }
    }
}

impl TaskAction for BoundMojo {
    fn name(&self) -> String {
        format!("{}:{}@{}", self.plugin.key, self.goal, self.execution.id)
    }

    fn execute(&mut self, invocation: &mut BuildInvocation) -> Result<()> {
        if self.state != BindingState::Bound {
            return Err(Error::AlreadyExecuted);
        }

        self.state = BindingState::Executing;
        info!(
            "Executing {}:{} for {}",
            self.plugin.key, self.goal, self.session.project.coordinates
        );
        let outcome = self.perform(invocation.container_mut());
        self.state = if outcome.is_ok() {
            BindingState::Succeeded
        } else {
            BindingState::Failed
        };
        outcome
    }
}
