use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;
use crate::impl_from_str_serde;

/// Visibility of a declared dependency in the legacy model.
///
/// The set is closed. Anything else, including `import`, is rejected when parsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DependencyScope {
    #[default]
    Compile,
    Provided,
    Runtime,
    Test,
    System,
}

impl DependencyScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Compile => "compile",
            Self::Provided => "provided",
            Self::Runtime => "runtime",
            Self::Test => "test",
            Self::System => "system",
        }
    }
}

impl FromStr for DependencyScope {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "compile" => Ok(Self::Compile),
            "provided" => Ok(Self::Provided),
            "runtime" => Ok(Self::Runtime),
            "test" => Ok(Self::Test),
            "system" => Ok(Self::System),
            other => Err(Error::UnrecognizedScope(other.to_string())),
        }
    }
}

impl fmt::Display for DependencyScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl_from_str_serde!(DependencyScope);

/// Excludes one transitive artifact from a single dependency edge
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExclusionRule {
    pub group_id: String,
    pub artifact_id: String,
}

impl ExclusionRule {
    pub fn new(group_id: impl Into<String>, artifact_id: impl Into<String>) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
        }
    }
}

/// A dependency as declared by a reactor module
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyDeclaration {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    #[serde(default)]
    pub scope: DependencyScope,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclusions: Vec<ExclusionRule>,
}

impl DependencyDeclaration {
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
        scope: DependencyScope,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: version.into(),
            scope,
            exclusions: Vec::new(),
        }
    }

    pub fn with_exclusion(mut self, exclusion: ExclusionRule) -> Self {
        self.exclusions.push(exclusion);
        self
    }
}

impl fmt::Display for DependencyDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{} ({})",
            self.group_id, self.artifact_id, self.version, self.scope
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_scopes() {
        for name in ["compile", "provided", "runtime", "test", "system"] {
            let scope: DependencyScope = name.parse().unwrap();
            assert_eq!(scope.as_str(), name);
        }
    }

    #[test]
    fn test_unknown_scope_is_rejected() {
        let err = "import".parse::<DependencyScope>().unwrap_err();
        assert!(matches!(err, Error::UnrecognizedScope(ref s) if s == "import"));

        // Case matters; the legacy model only uses lowercase scope names.
        assert!("Compile".parse::<DependencyScope>().is_err());
    }

    #[test]
    fn test_missing_scope_defaults_to_compile() {
        let dep: DependencyDeclaration = serde_json::from_str(
            r#"{"groupId": "lib", "artifactId": "util", "version": "1.0"}"#,
        )
        .unwrap();
        assert_eq!(dep.scope, DependencyScope::Compile);
        assert!(dep.exclusions.is_empty());
    }

    #[test]
    fn test_bad_scope_fails_deserialization() {
        let result: Result<DependencyDeclaration, _> = serde_json::from_str(
            r#"{"groupId": "lib", "artifactId": "util", "version": "1.0", "scope": "bogus"}"#,
        );
        let err = result.unwrap_err().to_string();
        assert!(err.contains("Unrecognized dependency scope 'bogus'"));
    }
}
