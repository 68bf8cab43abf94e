//! Fixed mapping from legacy dependency scope to target configuration

use crate::target::TargetConfiguration;
use crate::types::{DependencyScope, Packaging, PackagingFamily};

/// Configuration that receives dependencies of `scope` for a module packaged as `packaging`.
///
/// Returns `None` when the packaging does not expose a configuration for the scope.
pub fn configuration_for(
    scope: DependencyScope,
    packaging: &Packaging,
) -> Option<TargetConfiguration> {
    let family = packaging.family();
    let candidate = match (scope, family) {
        (_, PackagingFamily::Aggregator) => return None,
        (DependencyScope::Compile, _) => TargetConfiguration::Compile,
        (DependencyScope::Runtime, _) => TargetConfiguration::Runtime,
        (DependencyScope::Test, _) => TargetConfiguration::TestCompile,
        (DependencyScope::Provided, PackagingFamily::Executable) => {
            TargetConfiguration::ProvidedCompile
        }
        (DependencyScope::Provided, _) => TargetConfiguration::CompileOnly,
        (DependencyScope::System, PackagingFamily::Executable) => {
            TargetConfiguration::ProvidedCompile
        }
        (DependencyScope::System, _) => return None,
    };

    packaging
        .configurations()
        .contains(&candidate)
        .then_some(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_mapping() {
        let jar = Packaging::Jar;
        assert_eq!(
            configuration_for(DependencyScope::Compile, &jar),
            Some(TargetConfiguration::Compile)
        );
        assert_eq!(
            configuration_for(DependencyScope::Runtime, &jar),
            Some(TargetConfiguration::Runtime)
        );
        assert_eq!(
            configuration_for(DependencyScope::Test, &jar),
            Some(TargetConfiguration::TestCompile)
        );
        assert_eq!(
            configuration_for(DependencyScope::Provided, &jar),
            Some(TargetConfiguration::CompileOnly)
        );
        assert_eq!(configuration_for(DependencyScope::System, &jar), None);
    }

    #[test]
    fn test_war_mapping() {
        let war = Packaging::War;
        assert_eq!(
            configuration_for(DependencyScope::Provided, &war),
            Some(TargetConfiguration::ProvidedCompile)
        );
        assert_eq!(
            configuration_for(DependencyScope::System, &war),
            Some(TargetConfiguration::ProvidedCompile)
        );
        assert_eq!(
            configuration_for(DependencyScope::Test, &war),
            Some(TargetConfiguration::TestCompile)
        );
    }

    #[test]
    fn test_plugin_packaging_matches_library() {
        for scope in [
            DependencyScope::Compile,
            DependencyScope::Provided,
            DependencyScope::Runtime,
            DependencyScope::Test,
            DependencyScope::System,
        ] {
            assert_eq!(
                configuration_for(scope, &Packaging::MavenPlugin),
                configuration_for(scope, &Packaging::Jar)
            );
        }
    }

    #[test]
    fn test_aggregator_has_no_configurations() {
        assert_eq!(configuration_for(DependencyScope::Compile, &Packaging::Pom), None);
        assert_eq!(
            configuration_for(DependencyScope::Test, &Packaging::Other("rar".into())),
            None
        );
    }
}
