use serde::{Deserialize, Serialize};

use super::ConfigNode;

fn default_execution_id() -> String {
    "default".to_string()
}

/// Binds a lifecycle phase to goals of a declared plugin
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginExecution {
    #[serde(default = "default_execution_id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub goals: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configuration: Option<ConfigNode>,
}

impl PluginExecution {
    pub fn new(id: impl Into<String>, phase: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            phase: Some(phase.into()),
            goals: Vec::new(),
            configuration: None,
        }
    }

    pub fn with_goal(mut self, goal: impl Into<String>) -> Self {
        self.goals.push(goal.into());
        self
    }

    pub fn with_configuration(mut self, configuration: ConfigNode) -> Self {
        self.configuration = Some(configuration);
        self
    }

    pub fn is_bound_to(&self, phase: &str) -> bool {
        self.phase.as_deref() == Some(phase)
    }
}

/// A build plugin declared by a reactor module
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginDeclaration {
    /// `groupId:artifactId`
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configuration: Option<ConfigNode>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub executions: Vec<PluginExecution>,
}

impl PluginDeclaration {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            version: None,
            configuration: None,
            executions: Vec::new(),
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn with_configuration(mut self, configuration: ConfigNode) -> Self {
        self.configuration = Some(configuration);
        self
    }

    pub fn with_execution(mut self, execution: PluginExecution) -> Self {
        self.executions.push(execution);
        self
    }

    /// First execution bound to `phase`
    pub fn execution_for_phase(&self, phase: &str) -> Option<&PluginExecution> {
        self.executions.iter().find(|e| e.is_bound_to(phase))
    }
}

/// A remote artifact repository declared by a module
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub id: String,
    pub url: String,
}
