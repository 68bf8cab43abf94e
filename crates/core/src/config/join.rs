use serde::{Deserialize, Serialize};

pub const MAVEN_CLEAN_PLUGIN_KEY: &str = "org.apache.maven.plugins:maven-clean-plugin";
pub const MAVEN_CLEAN_MOJO: &str = "org.apache.maven.plugin.clean.CleanMojo";

/// Attach a plugin goal, bound to `phase` in the reactor, to a host task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PhaseJoin {
    pub plugin_key: String,
    pub phase: String,
    pub goal: String,
    pub task: String,
    pub mojo_class: String,
}

impl PhaseJoin {
    pub fn new(
        plugin_key: impl Into<String>,
        phase: impl Into<String>,
        goal: impl Into<String>,
        task: impl Into<String>,
        mojo_class: impl Into<String>,
    ) -> Self {
        Self {
            plugin_key: plugin_key.into(),
            phase: phase.into(),
            goal: goal.into(),
            task: task.into(),
            mojo_class: mojo_class.into(),
        }
    }

    /// maven-clean-plugin's `clean` goal joined to the host `clean` task
    pub fn clean() -> Self {
        Self::new(MAVEN_CLEAN_PLUGIN_KEY, "clean", "clean", "clean", MAVEN_CLEAN_MOJO)
    }
}
