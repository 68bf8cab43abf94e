//! Component container owned by one build invocation.
//!
//! Holds the registered component configurators, the build plugin manager and
//! the mojo instances registered under `(role, role hint)` while they run.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

use super::mojo::{Mojo, MojoContext, MojoExecution};
use super::session::{ExecutionSession, ExpressionEvaluator};
use crate::error::{BoxedCause, Error, Result};
use crate::types::ConfigNode;

/// Id of the baseline configurator used when a mojo declares none
pub const BASIC_CONFIGURATOR: &str = "basic";

/// Applies configuration to a mojo instance
pub trait ComponentConfigurator: Send + Sync {
    fn configure(
        &self,
        mojo: &mut dyn Mojo,
        configuration: &ConfigNode,
        evaluator: &ExpressionEvaluator<'_>,
    ) -> Result<()>;
}

/// Evaluates each top-level configuration child and hands it to the mojo as a parameter
#[derive(Debug, Default)]
pub struct BasicConfigurator;

impl ComponentConfigurator for BasicConfigurator {
    fn configure(
        &self,
        mojo: &mut dyn Mojo,
        configuration: &ConfigNode,
        evaluator: &ExpressionEvaluator<'_>,
    ) -> Result<()> {
        for child in &configuration.children {
            let evaluated = evaluator.evaluate_node(child);
            if evaluated.value.is_none() && evaluated.children.is_empty() {
                debug!("Parameter '{}' has no value, leaving it unset", child.name);
                continue;
            }
            mojo.set_parameter(&child.name, &evaluated).map_err(|e| {
                Error::ConfigError(format!("Cannot set parameter '{}': {e}", child.name))
            })?;
        }
        Ok(())
    }
}

/// Runs a registered mojo: configure it, execute it and record the outcome on the session
pub trait BuildPluginManager: Send + Sync {
    fn execute_mojo(
        &self,
        container: &mut ComponentContainer,
        session: &mut ExecutionSession,
        execution: &MojoExecution,
        configurator: &dyn ComponentConfigurator,
    ) -> Result<()>;
}

#[derive(Debug, Default)]
pub struct DefaultBuildPluginManager;

impl BuildPluginManager for DefaultBuildPluginManager {
    fn execute_mojo(
        &self,
        container: &mut ComponentContainer,
        session: &mut ExecutionSession,
        execution: &MojoExecution,
        configurator: &dyn ComponentConfigurator,
    ) -> Result<()> {
        let descriptor = execution
            .descriptor
            .as_ref()
            .ok_or_else(|| Error::GoalNotFound {
                goal: execution.goal.clone(),
                plugin: execution.plugin_key.clone(),
            })?;

        let mut mojo = container
            .take_component(&descriptor.role, &descriptor.role_hint)
            .ok_or_else(|| Error::ComponentLookup {
                role: descriptor.role.clone(),
                hint: descriptor.role_hint.clone(),
            })?;

        let configured =
            configurator.configure(mojo.as_mut(), &execution.configuration, &session.evaluator());
        let outcome = match configured {
            Ok(()) => {
                let context = MojoContext {
                    session: &*session,
                    execution,
                };
                mojo.execute(&context)
            }
            Err(e) => Err(Box::new(e) as BoxedCause),
        };

        container.add_component(&descriptor.role, &descriptor.role_hint, mojo);

        match outcome {
            Ok(()) => {
                info!("Executed {}", execution.key());
                session.result_mut().executed.push(execution.key());
                Ok(())
            }
            Err(source) => {
                session.result_mut().failures.push(execution.key());
                Err(Error::PluginExecutionFailed {
                    goal: execution.goal.clone(),
                    execution: execution.execution_id.clone(),
                    source,
                })
            }
        }
    }
}

pub struct ComponentContainer {
    name: String,
    default_configurator: String,
    configurators: HashMap<String, Arc<dyn ComponentConfigurator>>,
    plugin_manager: Arc<dyn BuildPluginManager>,
    components: HashMap<(String, String), Box<dyn Mojo>>,
}

impl fmt::Debug for ComponentContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut configurators: Vec<_> = self.configurators.keys().collect();
        configurators.sort();
        f.debug_struct("ComponentContainer")
            .field("name", &self.name)
            .field("default_configurator", &self.default_configurator)
            .field("configurators", &configurators)
            .field("components", &self.components.len())
            .finish()
    }
}

impl ComponentContainer {
    pub fn new(name: impl Into<String>) -> Self {
        let mut configurators: HashMap<String, Arc<dyn ComponentConfigurator>> = HashMap::new();
        configurators.insert(BASIC_CONFIGURATOR.to_string(), Arc::new(BasicConfigurator));

        Self {
            name: name.into(),
            default_configurator: BASIC_CONFIGURATOR.to_string(),
            configurators,
            plugin_manager: Arc::new(DefaultBuildPluginManager),
            components: HashMap::new(),
        }
    }

    pub fn with_default_configurator(mut self, id: impl Into<String>) -> Self {
        self.default_configurator = id.into();
        self
    }

    pub fn with_plugin_manager(mut self, manager: Arc<dyn BuildPluginManager>) -> Self {
        self.plugin_manager = manager;
        self
    }

    pub fn register_configurator(
        &mut self,
        id: impl Into<String>,
        configurator: Arc<dyn ComponentConfigurator>,
    ) {
        self.configurators.insert(id.into(), configurator);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Configurator by id, or the default one when `id` is `None`
    pub fn lookup_configurator(&self, id: Option<&str>) -> Result<Arc<dyn ComponentConfigurator>> {
        let id = id.unwrap_or(&self.default_configurator);
        self.configurators
            .get(id)
            .cloned()
            .ok_or_else(|| Error::ComponentLookup {
                role: "ComponentConfigurator".to_string(),
                hint: id.to_string(),
            })
    }

    pub fn plugin_manager(&self) -> Arc<dyn BuildPluginManager> {
        Arc::clone(&self.plugin_manager)
    }

    pub fn add_component(&mut self, role: &str, hint: &str, component: Box<dyn Mojo>) {
        self.components
            .insert((role.to_string(), hint.to_string()), component);
    }

    pub fn has_component(&self, role: &str, hint: &str) -> bool {
        self.components
            .contains_key(&(role.to_string(), hint.to_string()))
    }

    pub fn take_component(&mut self, role: &str, hint: &str) -> Option<Box<dyn Mojo>> {
        self.components.remove(&(role.to_string(), hint.to_string()))
    }

    pub fn remove_component(&mut self, role: &str, hint: &str) -> bool {
        self.take_component(role, hint).is_some()
    }

    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// Release every registered component
    pub fn dispose(&mut self) {
        if !self.components.is_empty() {
            debug!(
                "Disposing {} component(s) from container {}",
                self.components.len(),
                self.name
            );
        }
        self.components.clear();
    }
}
