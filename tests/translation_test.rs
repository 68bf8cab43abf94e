//! Integration tests for reactor translation

use pom_bridge_core::target::UnitSpec;
use pom_bridge_core::translate::{migrate_module, migrate_reactor};
use pom_bridge_core::{
    DependencyGraphTranslator, Error, Reactor, ResolvedDependency, TargetBuildTree,
    TargetConfiguration,
};
use std::fs;
use tempfile::TempDir;

const SHOP_REACTOR: &str = r#"{
  "modules": [
    {
      "groupId": "com.shop",
      "artifactId": "shop",
      "version": "1.0-SNAPSHOT",
      "packaging": "pom",
      "baseDirectory": "/ws/shop",
      "repositories": [
        { "id": "central", "url": "https://repo1.maven.org/maven2" }
      ]
    },
    {
      "groupId": "com.shop",
      "artifactId": "shop-core",
      "version": "1.0-SNAPSHOT",
      "packaging": "jar",
      "baseDirectory": "/ws/shop/Core",
      "dependencies": [
        { "groupId": "commons-lang", "artifactId": "commons-lang", "version": "2.6" }
      ]
    },
    {
      "groupId": "com.shop",
      "artifactId": "shop-web",
      "version": "1.0-SNAPSHOT",
      "packaging": "war",
      "baseDirectory": "/ws/shop/web",
      "dependencies": [
        { "groupId": "com.shop", "artifactId": "shop-core", "version": "1.0-SNAPSHOT", "scope": "compile" },
        { "groupId": "javax.servlet", "artifactId": "servlet-api", "version": "2.5", "scope": "provided" },
        {
          "groupId": "junit", "artifactId": "junit", "version": "4.8.2", "scope": "test",
          "exclusions": [ { "groupId": "org.hamcrest", "artifactId": "hamcrest-core" } ]
        },
        { "groupId": "com.shop", "artifactId": "shop-core", "version": "0.9", "scope": "runtime" }
      ]
    }
  ]
}"#;

fn shop() -> (Reactor, TargetBuildTree) {
    let reactor = Reactor::from_json(SHOP_REACTOR).unwrap();
    let tree = reactor.derive_target_tree("shop");
    (reactor, tree)
}

#[test]
fn test_web_module_configurations() {
    let (reactor, tree) = shop();
    let web = reactor.find_by_artifact_id("shop-web").unwrap();
    let migration = migrate_module(&reactor, &tree, web).unwrap();

    assert_eq!(migration.unit, "shop:web");
    assert_eq!(migration.settings.target_plugin.as_deref(), Some("war"));
    assert_eq!(migration.settings.status, "SNAPSHOT");

    let configurations: Vec<_> = migration.dependencies.configurations().collect();
    assert_eq!(
        configurations,
        vec![
            TargetConfiguration::Compile,
            TargetConfiguration::ProvidedCompile,
            TargetConfiguration::TestCompile,
            TargetConfiguration::Runtime,
        ]
    );

    insta::assert_snapshot!(migration.dependencies.render().trim_end(), @r"
    compile
      project(shop:Core)
    providedCompile
      javax.servlet:servlet-api:2.5
    testCompile
      junit:junit:4.8.2 (exclude org.hamcrest:hamcrest-core)
    runtime
      com.shop:shop-core:0.9
    ");
}

#[test]
fn test_sibling_match_ignores_case_and_exclusions_stay_external() {
    let reactor = Reactor::from_json(SHOP_REACTOR).unwrap();
    let tree = TargetBuildTree::from_spec(
        &UnitSpec::new("shop")
            .with_child(UnitSpec::new("shop:core"))
            .with_child(UnitSpec::new("shop:web")),
    );
    let web = reactor.find_by_artifact_id("shop-web").unwrap();
    let assignment = DependencyGraphTranslator::new(&reactor, &tree)
        .translate(web, tree.find("shop:web").unwrap())
        .unwrap();

    let compile = assignment.get(TargetConfiguration::Compile);
    assert_eq!(
        compile,
        &[ResolvedDependency::SiblingModule {
            unit: "shop:core".to_string()
        }]
    );

    match &assignment.get(TargetConfiguration::TestCompile)[0] {
        ResolvedDependency::ExternalArtifact { exclusions, .. } => {
            assert_eq!(exclusions.len(), 1);
            assert_eq!(exclusions[0].artifact_id, "hamcrest-core");
        }
        other => panic!("expected external artifact, got {other:?}"),
    }
}

#[test]
fn test_translation_is_repeatable() {
    let (reactor, tree) = shop();
    let first = serde_json::to_string(&migrate_reactor(&reactor, &tree).unwrap()).unwrap();
    let second = serde_json::to_string(&migrate_reactor(&reactor, &tree).unwrap()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_explicit_tree_without_sibling_unit_fails_whole_module() {
    let temp_dir = TempDir::new().unwrap();
    let tree_path = temp_dir.path().join("tree.json");
    fs::write(
        &tree_path,
        r#"{ "name": "shop", "children": [ { "name": "shop:web" } ] }"#,
    )
    .unwrap();

    let reactor = Reactor::from_json(SHOP_REACTOR).unwrap();
    let tree = TargetBuildTree::load_from_file(&tree_path).unwrap();
    let web = reactor.find_by_artifact_id("shop-web").unwrap();

    let err = migrate_module(&reactor, &tree, web).unwrap_err();
    match err {
        Error::SiblingUnitNotFound { base_dir, .. } => assert_eq!(base_dir, "/ws/shop/Core"),
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn test_unsupported_scope_aborts_translation() {
    let json = SHOP_REACTOR.replace(
        r#""version": "2.6" }"#,
        r#""version": "2.6", "scope": "system" }"#,
    );
    let reactor = Reactor::from_json(&json).unwrap();
    let tree = reactor.derive_target_tree("shop");

    let err = migrate_reactor(&reactor, &tree).unwrap_err();
    assert!(matches!(err, Error::ConfigurationNotFound { ref scope, .. } if scope == "system"));
}

#[test]
fn test_reactor_file_with_unknown_scope_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("reactor.json");
    fs::write(
        &path,
        SHOP_REACTOR.replace(r#""scope": "provided""#, r#""scope": "import""#),
    )
    .unwrap();

    let err = Reactor::load_from_file(&path).unwrap_err();
    assert!(err.to_string().contains("import"));
}
