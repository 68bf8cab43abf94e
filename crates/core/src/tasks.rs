//! Host task graph: named tasks holding ordered actions, run within one build invocation

use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;
use tracing::{error, info};

use crate::error::{Error, Result};
use crate::plugin::ComponentContainer;

/// Something a task does when it runs
pub trait TaskAction: Send {
    fn name(&self) -> String;

    fn execute(&mut self, invocation: &mut BuildInvocation) -> Result<()>;
}

/// Adapts a closure into a [`TaskAction`]
pub struct FnAction<F> {
    name: String,
    action: F,
}

impl<F> FnAction<F>
where
    F: FnMut(&mut BuildInvocation) -> Result<()> + Send,
{
    pub fn new(name: impl Into<String>, action: F) -> Self {
        Self {
            name: name.into(),
            action,
        }
    }
}

impl<F> TaskAction for FnAction<F>
where
    F: FnMut(&mut BuildInvocation) -> Result<()> + Send,
{
    fn name(&self) -> String {
        self.name.clone()
    }

    fn execute(&mut self, invocation: &mut BuildInvocation) -> Result<()> {
        (self.action)(invocation)
    }
}

#[derive(Debug)]
pub struct ActionFailure {
    pub action: String,
    pub error: Error,
}

/// What happened when a task ran. Every action runs even after an earlier one failed.
#[derive(Debug)]
pub struct TaskOutcome {
    pub task: String,
    pub completed: Vec<String>,
    pub failures: Vec<ActionFailure>,
}

impl TaskOutcome {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

pub struct Task {
    name: String,
    description: Option<String>,
    actions: Vec<Box<dyn TaskAction>>,
}

impl fmt::Debug for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("actions", &self.action_names())
            .finish()
    }
}

impl Task {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            actions: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn do_first(&mut self, action: impl TaskAction + 'static) -> &mut Self {
        self.actions.insert(0, Box::new(action));
        self
    }

    pub fn do_last(&mut self, action: impl TaskAction + 'static) -> &mut Self {
        self.actions.push(Box::new(action));
        self
    }

    pub fn action_names(&self) -> Vec<String> {
        self.actions.iter().map(|a| a.name()).collect()
    }

    pub fn run(&mut self, invocation: &mut BuildInvocation) -> TaskOutcome {
        info!("Running task {}", self.name);
        let mut outcome = TaskOutcome {
            task: self.name.clone(),
            completed: Vec::new(),
            failures: Vec::new(),
        };

        for action in &mut self.actions {
            let name = action.name();
            match action.execute(invocation) {
                Ok(()) => outcome.completed.push(name),
                Err(e) => {
                    error!("Action {} of task {} failed: {}", name, self.name, e);
                    outcome.failures.push(ActionFailure {
                        action: name,
                        error: e,
                    });
                }
            }
        }

        if !outcome.is_success() {
            invocation.mark_failed(&self.name);
        }
        outcome
    }
}

#[derive(Debug, Default)]
pub struct TaskGraph {
    tasks: IndexMap<String, Task>,
}

impl TaskGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a task, replacing any task with the same name
    pub fn add_task(&mut self, task: Task) -> &mut Task {
        let name = task.name.clone();
        self.tasks.insert(name.clone(), task);
        &mut self.tasks[&name]
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Task> {
        self.tasks.get(name)
    }

    pub fn find_by_name_mut(&mut self, name: &str) -> Option<&mut Task> {
        self.tasks.get_mut(name)
    }

    pub fn task_names(&self) -> impl Iterator<Item = &str> {
        self.tasks.keys().map(String::as_str)
    }

    pub fn run_task(&mut self, name: &str, invocation: &mut BuildInvocation) -> Result<TaskOutcome> {
        let task = self
            .tasks
            .get_mut(name)
            .ok_or_else(|| Error::UnknownTask(name.to_string()))?;
        Ok(task.run(invocation))
    }
}

/// One build run. Owns the component container until [`BuildInvocation::finish`] tears it down.
#[derive(Debug)]
pub struct BuildInvocation {
    container: ComponentContainer,
    failed_tasks: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildReport {
    pub failed_tasks: Vec<String>,
}

impl BuildReport {
    pub fn is_success(&self) -> bool {
        self.failed_tasks.is_empty()
    }
}

impl BuildInvocation {
    pub fn new(container: ComponentContainer) -> Self {
        Self {
            container,
            failed_tasks: Vec::new(),
        }
    }

    pub fn container(&self) -> &ComponentContainer {
        &self.container
    }

    pub fn container_mut(&mut self) -> &mut ComponentContainer {
        &mut self.container
    }

    pub fn mark_failed(&mut self, task: &str) {
        if !self.failed_tasks.iter().any(|t| t == task) {
            self.failed_tasks.push(task.to_string());
        }
    }

    pub fn is_failed(&self) -> bool {
        !self.failed_tasks.is_empty()
    }

    pub fn finish(mut self) -> BuildReport {
        self.container.dispose();
        BuildReport {
            failed_tasks: self.failed_tasks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn recorder(log: &Arc<Mutex<Vec<String>>>, name: &str) -> impl TaskAction + 'static {
        let log = Arc::clone(log);
        let label = name.to_string();
        FnAction::new(name, move |_invocation: &mut BuildInvocation| {
            log.lock().unwrap().push(label.clone());
            Ok(())
        })
    }

    #[test]
    fn test_action_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut task = Task::new("clean");
        task.do_last(recorder(&log, "second"));
        task.do_first(recorder(&log, "first"));
        task.do_last(recorder(&log, "third"));

        let mut invocation = BuildInvocation::new(ComponentContainer::new("build"));
        let outcome = task.run(&mut invocation);

        assert!(outcome.is_success());
        assert_eq!(*log.lock().unwrap(), vec!["first", "second", "third"]);
        assert_eq!(outcome.completed, vec!["first", "second", "third"]);
        assert!(!invocation.is_failed());
    }

    #[test]
    fn test_failure_marks_build_but_other_actions_run() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut graph = TaskGraph::new();
        let task = graph.add_task(Task::new("clean"));
        task.do_last(FnAction::new("broken", |_: &mut BuildInvocation| {
            Err(Error::UnknownTask("nope".to_string()))
        }));
        task.do_last(recorder(&log, "after"));

        let mut invocation = BuildInvocation::new(ComponentContainer::new("build"));
        let outcome = graph.run_task("clean", &mut invocation).unwrap();

        assert_eq!(outcome.completed, vec!["after"]);
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.failures[0].action, "broken");
        assert!(invocation.is_failed());

        let report = invocation.finish();
        assert_eq!(report.failed_tasks, vec!["clean"]);
        assert!(!report.is_success());
    }

    #[test]
    fn test_unknown_task() {
        let mut graph = TaskGraph::new();
        graph.add_task(Task::new("build").with_description("Assembles the project"));
        assert_eq!(
            graph.find_by_name("build").unwrap().description(),
            Some("Assembles the project")
        );

        let mut invocation = BuildInvocation::new(ComponentContainer::new("build"));
        assert!(matches!(
            graph.run_task("deploy", &mut invocation),
            Err(Error::UnknownTask(name)) if name == "deploy"
        ));
    }
}
