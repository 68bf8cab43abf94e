//! Per-execution session: the current project, the request and a result container

use regex::{Captures, Regex};
use std::collections::BTreeMap;
use std::sync::{Arc, LazyLock};

use crate::types::{ConfigNode, Coordinates, Module};

static EXPRESSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("expression pattern is valid"));

/// Attribute carrying a parameter's fallback value in descriptor configuration
pub const DEFAULT_VALUE_ATTRIBUTE: &str = "default-value";

/// Build-wide request settings shared by every session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionRequest {
    pub properties: BTreeMap<String, String>,
    pub offline: bool,
}

impl ExecutionRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }
}

/// What a bound mojo captures at bind time to build its session later
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub project: Arc<Module>,
    pub request: Arc<ExecutionRequest>,
}

impl SessionContext {
    pub fn new(project: Arc<Module>, request: Arc<ExecutionRequest>) -> Self {
        Self { project, request }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    pub project: Coordinates,
    /// Keys of executions that completed
    pub executed: Vec<String>,
    pub failures: Vec<String>,
}

impl ExecutionResult {
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

#[derive(Debug)]
pub struct ExecutionSession {
    project: Arc<Module>,
    request: Arc<ExecutionRequest>,
    result: ExecutionResult,
}

impl ExecutionSession {
    pub fn new(context: &SessionContext) -> Self {
        Self {
            project: Arc::clone(&context.project),
            request: Arc::clone(&context.request),
            result: ExecutionResult {
                project: context.project.coordinates.clone(),
                executed: Vec::new(),
                failures: Vec::new(),
            },
        }
    }

    pub fn project(&self) -> &Module {
        &self.project
    }

    pub fn request(&self) -> &ExecutionRequest {
        &self.request
    }

    pub fn result(&self) -> &ExecutionResult {
        &self.result
    }

    pub fn result_mut(&mut self) -> &mut ExecutionResult {
        &mut self.result
    }

    pub fn evaluator(&self) -> ExpressionEvaluator<'_> {
        ExpressionEvaluator { session: self }
    }
}

/// Evaluates `${...}` expressions against a session
pub struct ExpressionEvaluator<'a> {
    session: &'a ExecutionSession,
}

impl ExpressionEvaluator<'_> {
    /// Value of a bare expression such as `project.basedir`
    pub fn lookup(&self, expression: &str) -> Option<String> {
        let project = self.session.project();
        let value = match expression.trim() {
            "project.basedir" | "basedir" => project.base_directory().display().to_string(),
            "project.build.directory" => project.build_directory().display().to_string(),
            "project.groupId" => project.coordinates.group_id.clone(),
            "project.artifactId" => project.coordinates.artifact_id.clone(),
            "project.version" => project.coordinates.version.clone(),
            "project.packaging" => project.packaging.to_string(),
            "session.offline" => self.session.request().offline.to_string(),
            other => return self.session.request().properties.get(other).cloned(),
        };
        Some(value)
    }

    /// Substitute every resolvable expression in `raw`.
    ///
    /// Returns `None` when `raw` is a single expression that cannot be resolved.
    /// Unresolvable expressions embedded in longer text are left as written.
    pub fn evaluate(&self, raw: &str) -> Option<String> {
        let trimmed = raw.trim();
        if let Some(captures) = EXPRESSION.captures(trimmed) {
            if captures.get(0).map(|m| m.as_str()) == Some(trimmed) {
                return self.lookup(&captures[1]);
            }
        }

        let replaced = EXPRESSION.replace_all(raw, |caps: &Captures<'_>| {
            self.lookup(&caps[1]).unwrap_or_else(|| caps[0].to_string())
        });
        Some(replaced.into_owned())
    }

    /// Evaluate a configuration node and its children.
    ///
    /// A node whose value is missing or unresolvable falls back to its `default-value` attribute.
    pub fn evaluate_node(&self, node: &ConfigNode) -> ConfigNode {
        let value = node
            .value
            .as_deref()
            .and_then(|raw| self.evaluate(raw))
            .or_else(|| {
                node.attributes
                    .get(DEFAULT_VALUE_ATTRIBUTE)
                    .and_then(|raw| self.evaluate(raw))
            });

        ConfigNode {
            name: node.name.clone(),
            value,
            attributes: node.attributes.clone(),
            children: node.children.iter().map(|c| self.evaluate_node(c)).collect(),
        }
    }
}
