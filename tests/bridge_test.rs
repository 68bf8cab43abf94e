//! Integration tests for running plugin goals through host tasks

use pom_bridge_core::config::{MAVEN_CLEAN_MOJO, MAVEN_CLEAN_PLUGIN_KEY};
use pom_bridge_core::plugin::{
    ClassLoader, ExecutionRequest, Mojo, MojoContext, MojoError, PLUGIN_DESCRIPTOR_PATH,
};
use pom_bridge_core::tasks::FnAction;
use pom_bridge_core::{
    BridgeContext, BuildInvocation, Config, ConfigNode, Coordinates, Error, Module, Packaging,
    PluginDeclaration, PluginExecution, Task, TaskGraph, join_phases,
};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use zip::write::SimpleFileOptions;

const CLEAN_DESCRIPTOR: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<plugin>
  <groupId>org.apache.maven.plugins</groupId>
  <artifactId>maven-clean-plugin</artifactId>
  <version>2.4</version>
  <mojos>
    <mojo>
      <goal>clean</goal>
      <implementation>org.apache.maven.plugin.clean.CleanMojo</implementation>
      <parameters>
        <parameter><name>directory</name><type>java.io.File</type><required>true</required></parameter>
        <parameter><name>verbose</name><type>boolean</type></parameter>
      </parameters>
      <configuration>
        <directory implementation="java.io.File">${project.build.directory}</directory>
        <verbose implementation="boolean" default-value="false">${clean.verbose}</verbose>
      </configuration>
    </mojo>
  </mojos>
</plugin>"#;

const HELP_ONLY_DESCRIPTOR: &str = r#"<plugin>
  <groupId>org.apache.maven.plugins</groupId>
  <artifactId>maven-clean-plugin</artifactId>
  <version>2.4</version>
  <mojos>
    <mojo>
      <goal>help</goal>
      <implementation>org.apache.maven.plugin.clean.HelpMojo</implementation>
    </mojo>
  </mojos>
</plugin>"#;

type Seen = Arc<Mutex<Vec<(String, String)>>>;

struct CleanMojo {
    seen: Seen,
    parameters: Vec<(String, String)>,
}

impl Mojo for CleanMojo {
    fn set_parameter(&mut self, name: &str, value: &ConfigNode) -> Result<(), MojoError> {
        self.parameters
            .push((name.to_string(), value.value.clone().unwrap_or_default()));
        Ok(())
    }

    fn execute(&mut self, context: &MojoContext<'_>) -> Result<(), MojoError> {
        let mut seen = self.seen.lock().unwrap();
        seen.extend(self.parameters.drain(..));
        seen.push((
            "project".to_string(),
            context.session.project().coordinates.artifact_id.clone(),
        ));
        Ok(())
    }
}

fn write_plugin_jar(dir: &Path, descriptor: Option<&str>) -> PathBuf {
    let jar = dir.join("maven-clean-plugin-2.4.jar");
    let mut writer = zip::ZipWriter::new(File::create(&jar).unwrap());
    writer
        .start_file(
            "org/apache/maven/plugin/clean/CleanMojo.class",
            SimpleFileOptions::default(),
        )
        .unwrap();
    writer.write_all(b"\xca\xfe\xba\xbe").unwrap();
    if let Some(descriptor) = descriptor {
        writer
            .start_file(PLUGIN_DESCRIPTOR_PATH, SimpleFileOptions::default())
            .unwrap();
        writer.write_all(descriptor.as_bytes()).unwrap();
    }
    writer.finish().unwrap();
    jar
}

fn bridge_context(jar: &Path, seen: &Seen) -> BridgeContext {
    let seen = Arc::clone(seen);
    let loader = ClassLoader::new("maven-clean-plugin")
        .with_class_path(jar)
        .with_class(MAVEN_CLEAN_MOJO, move || {
            Box::new(CleanMojo {
                seen: Arc::clone(&seen),
                parameters: Vec::new(),
            }) as Box<dyn Mojo>
        });
    BridgeContext::new(
        Config::default().bridge(),
        Arc::new(loader),
        Arc::new(ExecutionRequest::new()),
    )
}

fn app_module(base: &Path, execution_config: Option<ConfigNode>) -> Module {
    let mut execution = PluginExecution::new("auto-clean", "clean").with_goal("clean");
    if let Some(configuration) = execution_config {
        execution = execution.with_configuration(configuration);
    }
    Module::new(Coordinates::new("com.shop", "app", "1.0"), Packaging::Jar, base).with_plugin(
        PluginDeclaration::new(MAVEN_CLEAN_PLUGIN_KEY)
            .with_version("2.4")
            .with_configuration(
                ConfigNode::new("configuration").with_child(ConfigNode::leaf("verbose", "true")),
            )
            .with_execution(execution),
    )
}

fn clean_graph(log: &Arc<Mutex<Vec<String>>>) -> TaskGraph {
    let mut graph = TaskGraph::new();
    let log = Arc::clone(log);
    graph
        .add_task(Task::new("clean"))
        .do_last(FnAction::new("delete-outputs", move |_: &mut BuildInvocation| {
            log.lock().unwrap().push("delete-outputs".to_string());
            Ok(())
        }));
    graph
}

#[test]
fn test_clean_goal_runs_with_merged_configuration() {
    let temp_dir = TempDir::new().unwrap();
    let jar = write_plugin_jar(temp_dir.path(), Some(CLEAN_DESCRIPTOR));
    let seen = Seen::default();
    let log = Arc::new(Mutex::new(Vec::new()));
    let config = Config::default();

    let module = app_module(temp_dir.path(), None);
    let mut graph = clean_graph(&log);
    assert_eq!(
        join_phases(&module, &mut graph, &bridge_context(&jar, &seen), &config),
        1
    );

    let mut invocation = BuildInvocation::new(config.container("app"));
    let outcome = graph.run_task("clean", &mut invocation).unwrap();
    assert!(outcome.is_success(), "{:?}", outcome.failures);
    assert_eq!(invocation.container().component_count(), 0);

    let seen = seen.lock().unwrap().clone();
    assert_eq!(
        seen,
        vec![
            ("verbose".to_string(), "true".to_string()),
            (
                "directory".to_string(),
                temp_dir.path().join("target").display().to_string()
            ),
            ("project".to_string(), "app".to_string()),
        ]
    );
    assert!(invocation.finish().is_success());
}

#[test]
fn test_execution_configuration_wins() {
    let temp_dir = TempDir::new().unwrap();
    let jar = write_plugin_jar(temp_dir.path(), Some(CLEAN_DESCRIPTOR));
    let seen = Seen::default();
    let config = Config::default();

    let module = app_module(
        temp_dir.path(),
        Some(
            ConfigNode::new("configuration")
                .with_child(ConfigNode::leaf("directory", "${project.basedir}/out")),
        ),
    );
    let mut graph = clean_graph(&Arc::new(Mutex::new(Vec::new())));
    join_phases(&module, &mut graph, &bridge_context(&jar, &seen), &config);

    let mut invocation = BuildInvocation::new(config.container("app"));
    graph.run_task("clean", &mut invocation).unwrap();

    let seen = seen.lock().unwrap();
    assert_eq!(
        seen[0],
        (
            "directory".to_string(),
            format!("{}/out", temp_dir.path().display())
        )
    );
}

#[test]
fn test_missing_goal_fails_build_but_task_completes() {
    let temp_dir = TempDir::new().unwrap();
    let jar = write_plugin_jar(temp_dir.path(), Some(HELP_ONLY_DESCRIPTOR));
    let seen = Seen::default();
    let log = Arc::new(Mutex::new(Vec::new()));
    let config = Config::default();

    let module = app_module(temp_dir.path(), None);
    let mut graph = clean_graph(&log);
    join_phases(&module, &mut graph, &bridge_context(&jar, &seen), &config);
    graph
        .find_by_name_mut("clean")
        .unwrap()
        .do_last(FnAction::new("report", |_: &mut BuildInvocation| Ok(())));

    let mut invocation = BuildInvocation::new(config.container("app"));
    let outcome = graph.run_task("clean", &mut invocation).unwrap();

    assert_eq!(outcome.completed, vec!["delete-outputs", "report"]);
    assert_eq!(outcome.failures.len(), 1);
    match &outcome.failures[0].error {
        Error::GoalNotFound { goal, plugin } => {
            assert_eq!(goal, "clean");
            assert_eq!(plugin, MAVEN_CLEAN_PLUGIN_KEY);
        }
        other => panic!("unexpected error {other:?}"),
    }
    assert_eq!(*log.lock().unwrap(), vec!["delete-outputs"]);
    assert!(seen.lock().unwrap().is_empty());

    let report = invocation.finish();
    assert!(!report.is_success());
    assert_eq!(report.failed_tasks, vec!["clean"]);
}

#[test]
fn test_archive_without_descriptor() {
    let temp_dir = TempDir::new().unwrap();
    let jar = write_plugin_jar(temp_dir.path(), None);
    let seen = Seen::default();
    let config = Config::default();

    let module = app_module(temp_dir.path(), None);
    let mut graph = clean_graph(&Arc::new(Mutex::new(Vec::new())));
    join_phases(&module, &mut graph, &bridge_context(&jar, &seen), &config);

    let mut invocation = BuildInvocation::new(config.container("app"));
    let outcome = graph.run_task("clean", &mut invocation).unwrap();
    assert!(matches!(
        outcome.failures[0].error,
        Error::PluginDescriptorMissing { ref archive } if archive == &jar
    ));
}

#[test]
fn test_loose_class_directory_is_skipped() {
    let temp_dir = TempDir::new().unwrap();
    let classes = temp_dir.path().join("classes");
    std::fs::create_dir_all(classes.join("org/apache/maven/plugin/clean")).unwrap();
    std::fs::write(
        classes.join("org/apache/maven/plugin/clean/CleanMojo.class"),
        b"\xca\xfe",
    )
    .unwrap();
    let seen = Seen::default();
    let config = Config::default();

    let module = app_module(temp_dir.path(), None);
    let mut graph = clean_graph(&Arc::new(Mutex::new(Vec::new())));
    join_phases(&module, &mut graph, &bridge_context(&classes, &seen), &config);

    let mut invocation = BuildInvocation::new(config.container("app"));
    let outcome = graph.run_task("clean", &mut invocation).unwrap();
    assert!(outcome.is_success());
    assert!(seen.lock().unwrap().is_empty());
}

#[test]
fn test_bound_goal_runs_once() {
    let temp_dir = TempDir::new().unwrap();
    let jar = write_plugin_jar(temp_dir.path(), Some(CLEAN_DESCRIPTOR));
    let seen = Seen::default();
    let config = Config::default();

    let module = app_module(temp_dir.path(), None);
    let mut graph = clean_graph(&Arc::new(Mutex::new(Vec::new())));
    join_phases(&module, &mut graph, &bridge_context(&jar, &seen), &config);

    let mut invocation = BuildInvocation::new(config.container("app"));
    assert!(graph.run_task("clean", &mut invocation).unwrap().is_success());

    let again = graph.run_task("clean", &mut invocation).unwrap();
    assert!(matches!(again.failures[0].error, Error::AlreadyExecuted));
    assert_eq!(seen.lock().unwrap().len(), 3);
}
