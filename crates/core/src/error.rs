use std::io;
use std::path::PathBuf;

/// Boxed cause carried by execution failures
pub type BoxedCause = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur during pom-bridge operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unrecognized dependency scope '{0}'")]
    UnrecognizedScope(String),

    #[error(
        "No configuration for scope '{scope}' with packaging '{packaging}' \
         (module {module}, dependency {dependency})"
    )]
    ConfigurationNotFound {
        module: String,
        dependency: String,
        scope: String,
        packaging: String,
    },

    #[error(
        "Module {module} depends on reactor module {dependency}, but no build unit \
         matches its base directory '{base_dir}'"
    )]
    SiblingUnitNotFound {
        module: String,
        dependency: String,
        base_dir: String,
    },

    #[error("Unknown build unit: {0}")]
    UnknownUnit(String),

    #[error("Plugin descriptor not found in {}", archive.display())]
    PluginDescriptorMissing { archive: PathBuf },

    #[error("Invalid plugin descriptor: {0}")]
    InvalidDescriptor(String),

    #[error("Goal '{goal}' not found in plugin {plugin}")]
    GoalNotFound { goal: String, plugin: String },

    #[error("Class {0} not found")]
    ClassNotFound(String),

    #[error("No component registered for role {role} with hint '{hint}'")]
    ComponentLookup { role: String, hint: String },

    #[error("Failed to execute mojo {goal} (execution {execution}): {source}")]
    PluginExecutionFailed {
        goal: String,
        execution: String,
        #[source]
        source: BoxedCause,
    },

    #[error("Bound mojo action has already run")]
    AlreadyExecuted,

    #[error("Unknown task: {0}")]
    UnknownTask(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("Archive error: {0}")]
    ArchiveError(#[from] zip::result::ZipError),

    #[error("XML error: {0}")]
    XmlError(#[from] quick_xml::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Result type alias for pom-bridge operations
pub type Result<T> = std::result::Result<T, Error>;
