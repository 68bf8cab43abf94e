use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;
use crate::impl_from_str_serde;
use crate::types::ExclusionRule;

/// Named dependency bucket of the target build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TargetConfiguration {
    Compile,
    Runtime,
    TestCompile,
    TestRuntime,
    CompileOnly,
    ProvidedCompile,
    ProvidedRuntime,
}

impl TargetConfiguration {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Compile => "compile",
            Self::Runtime => "runtime",
            Self::TestCompile => "testCompile",
            Self::TestRuntime => "testRuntime",
            Self::CompileOnly => "compileOnly",
            Self::ProvidedCompile => "providedCompile",
            Self::ProvidedRuntime => "providedRuntime",
        }
    }
}

impl FromStr for TargetConfiguration {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "compile" => Ok(Self::Compile),
            "runtime" => Ok(Self::Runtime),
            "testCompile" => Ok(Self::TestCompile),
            "testRuntime" => Ok(Self::TestRuntime),
            "compileOnly" => Ok(Self::CompileOnly),
            "providedCompile" => Ok(Self::ProvidedCompile),
            "providedRuntime" => Ok(Self::ProvidedRuntime),
            other => Err(Error::ConfigError(format!("unknown configuration '{other}'"))),
        }
    }
}

impl fmt::Display for TargetConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl_from_str_serde!(TargetConfiguration);

/// Classification of one declared dependency
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResolvedDependency {
    /// Published artifact fetched from a repository
    ExternalArtifact {
        group: String,
        artifact: String,
        version: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        exclusions: Vec<ExclusionRule>,
    },
    /// Another unit of the same target build
    SiblingModule { unit: String },
}

impl ResolvedDependency {
    pub fn is_sibling(&self) -> bool {
        matches!(self, Self::SiblingModule { .. })
    }
}

impl fmt::Display for ResolvedDependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExternalArtifact {
                group,
                artifact,
                version,
                exclusions,
            } => {
                write!(f, "{group}:{artifact}:{version}")?;
                if !exclusions.is_empty() {
                    let excluded: Vec<String> = exclusions
                        .iter()
                        .map(|e| format!("{}:{}", e.group_id, e.artifact_id))
                        .collect();
                    write!(f, " (exclude {})", excluded.join(", "))?;
                }
                Ok(())
            }
            Self::SiblingModule { unit } => write!(f, "project({unit})"),
        }
    }
}

/// Resolved dependencies grouped by configuration.
///
/// Configurations keep the order in which their first scope was seen; each
/// sequence keeps declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigurationAssignment {
    entries: IndexMap<TargetConfiguration, Vec<ResolvedDependency>>,
}

impl ConfigurationAssignment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, configuration: TargetConfiguration, dependency: ResolvedDependency) {
        self.entries.entry(configuration).or_default().push(dependency);
    }

    pub fn get(&self, configuration: TargetConfiguration) -> &[ResolvedDependency] {
        self.entries
            .get(&configuration)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn configurations(&self) -> impl Iterator<Item = TargetConfiguration> + '_ {
        self.entries.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (TargetConfiguration, &[ResolvedDependency])> {
        self.entries.iter().map(|(c, deps)| (*c, deps.as_slice()))
    }

    /// Total number of resolved dependencies across all configurations
    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Plain-text listing, one configuration block per line group
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (configuration, deps) in self.iter() {
            out.push_str(configuration.name());
            out.push('\n');
            for dep in deps {
                out.push_str("  ");
                out.push_str(&dep.to_string());
                out.push('\n');
            }
        }
        out
    }
}
