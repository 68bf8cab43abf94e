//! Joins reactor lifecycle phases onto host tasks through the plugin bridge

use std::sync::Arc;
use tracing::{debug, info};

use crate::config::Config;
use crate::plugin::{ClassLoader, ExecutionRequest, MojoBridge, MojoClass, SessionContext};
use crate::tasks::TaskGraph;
use crate::types::Module;

/// What the bridge needs besides the module: the strategy, the plugin class loader and the request
#[derive(Debug, Clone)]
pub struct BridgeContext {
    pub bridge: MojoBridge,
    pub loader: Arc<ClassLoader>,
    pub request: Arc<ExecutionRequest>,
}

impl BridgeContext {
    pub fn new(bridge: MojoBridge, loader: Arc<ClassLoader>, request: Arc<ExecutionRequest>) -> Self {
        Self {
            bridge,
            loader,
            request,
        }
    }
}

/// Attach every configured join that applies to `module`; returns how many were attached.
///
/// A join is skipped when the module does not declare the plugin, no execution is
/// bound to the phase, the host task does not exist or the mojo class is not defined.
pub fn join_phases(
    module: &Module,
    graph: &mut TaskGraph,
    context: &BridgeContext,
    config: &Config,
) -> usize {
    let project = Arc::new(module.clone());
    let mut joined = 0;

    for join in &config.joins {
        let Some(plugin) = module.plugin(&join.plugin_key) else {
            debug!("{} does not declare {}", module.coordinates, join.plugin_key);
            continue;
        };
        let Some(execution) = plugin.execution_for_phase(&join.phase) else {
            debug!("{} has no execution bound to {}", join.plugin_key, join.phase);
            continue;
        };
        let Some(task) = graph.find_by_name_mut(&join.task) else {
            debug!("No task named {}", join.task);
            continue;
        };
        let Some(mojo_class) = MojoClass::load(&context.loader, &join.mojo_class) else {
            debug!(
                "Class {} is not defined by loader {}",
                join.mojo_class,
                context.loader.name()
            );
            continue;
        };

        let session = SessionContext::new(Arc::clone(&project), Arc::clone(&context.request));
        task.do_last(context.bridge.bind(mojo_class, plugin, execution, &join.goal, session));
        info!(
            "Joined {}:{} (execution {}) to task {}",
            join.plugin_key, join.goal, execution.id, join.task
        );
        joined += 1;
    }

    joined
}
