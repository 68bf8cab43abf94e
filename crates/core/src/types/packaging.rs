use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use crate::impl_from_str_serde;
use crate::target::TargetConfiguration;

const LIBRARY_CONFIGURATIONS: &[TargetConfiguration] = &[
    TargetConfiguration::Compile,
    TargetConfiguration::Runtime,
    TargetConfiguration::TestCompile,
    TargetConfiguration::TestRuntime,
    TargetConfiguration::CompileOnly,
];

const WEB_CONFIGURATIONS: &[TargetConfiguration] = &[
    TargetConfiguration::Compile,
    TargetConfiguration::Runtime,
    TargetConfiguration::TestCompile,
    TargetConfiguration::TestRuntime,
    TargetConfiguration::CompileOnly,
    TargetConfiguration::ProvidedCompile,
    TargetConfiguration::ProvidedRuntime,
];

/// Packaging type of a reactor module
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Packaging {
    #[default]
    Jar,
    Bundle,
    Ejb,
    War,
    MavenPlugin,
    Pom,
    Other(String),
}

/// Coarse grouping that decides which configurations a module exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackagingFamily {
    Library,
    Executable,
    Plugin,
    Aggregator,
}

impl Packaging {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Jar => "jar",
            Self::Bundle => "bundle",
            Self::Ejb => "ejb",
            Self::War => "war",
            Self::MavenPlugin => "maven-plugin",
            Self::Pom => "pom",
            Self::Other(name) => name,
        }
    }

    pub fn family(&self) -> PackagingFamily {
        match self {
            Self::Jar | Self::Bundle | Self::Ejb => PackagingFamily::Library,
            Self::War => PackagingFamily::Executable,
            Self::MavenPlugin => PackagingFamily::Plugin,
            Self::Pom | Self::Other(_) => PackagingFamily::Aggregator,
        }
    }

    /// Configurations the target build exposes for this packaging
    pub fn configurations(&self) -> &'static [TargetConfiguration] {
        match self.family() {
            PackagingFamily::Library | PackagingFamily::Plugin => LIBRARY_CONFIGURATIONS,
            PackagingFamily::Executable => WEB_CONFIGURATIONS,
            PackagingFamily::Aggregator => &[],
        }
    }

    /// Target build plugin applied for this packaging, if any
    pub fn target_plugin(&self) -> Option<&'static str> {
        match self.family() {
            PackagingFamily::Library | PackagingFamily::Plugin => Some("java"),
            PackagingFamily::Executable => Some("war"),
            PackagingFamily::Aggregator => None,
        }
    }
}

impl FromStr for Packaging {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "jar" => Self::Jar,
            "bundle" => Self::Bundle,
            "ejb" => Self::Ejb,
            "war" => Self::War,
            "maven-plugin" => Self::MavenPlugin,
            "pom" => Self::Pom,
            other => Self::Other(other.to_string()),
        })
    }
}

impl fmt::Display for Packaging {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl_from_str_serde!(Packaging);
