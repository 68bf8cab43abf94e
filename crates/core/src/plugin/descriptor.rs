//! Plugin descriptor (`META-INF/maven/plugin.xml`) model and parser

use serde::Serialize;
use std::io::BufRead;

use super::xml::parse_document;
use crate::error::{Error, Result};
use crate::types::ConfigNode;

/// Conventional location of the descriptor inside a plugin archive or class directory
pub const PLUGIN_DESCRIPTOR_PATH: &str = "META-INF/maven/plugin.xml";

/// Role assigned to mojos whose descriptor declares none
pub const DEFAULT_MOJO_ROLE: &str = "org.apache.maven.plugin.Mojo";

/// One declared mojo parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Parameter {
    pub name: String,
    pub type_name: Option<String>,
    pub required: bool,
    pub editable: bool,
    pub description: Option<String>,
}

/// Metadata for one goal of a plugin
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MojoDescriptor {
    pub goal: String,
    pub implementation: String,
    pub role: String,
    pub role_hint: String,
    /// Component configurator id; `None` means the container default
    pub configurator: Option<String>,
    pub phase: Option<String>,
    pub parameters: Vec<Parameter>,
    /// Parameter expressions and defaults declared by the descriptor
    pub configuration: Option<ConfigNode>,
}

impl MojoDescriptor {
    pub fn parameter(&self, name: &str) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.name == name)
    }
}

/// Parsed plugin descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PluginDescriptor {
    pub name: Option<String>,
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    pub goal_prefix: Option<String>,
    /// Where the descriptor was read from
    pub source: String,
    pub mojos: Vec<MojoDescriptor>,
}

impl PluginDescriptor {
    pub fn parse<R: BufRead>(input: R, source: impl Into<String>) -> Result<Self> {
        let root = parse_document(input)?;
        Self::from_node(&root, source.into())
    }

    pub fn from_node(root: &ConfigNode, source: String) -> Result<Self> {
        if root.name != "plugin" {
            return Err(Error::InvalidDescriptor(format!(
                "expected <plugin> root element in {source}, found <{}>",
                root.name
            )));
        }

        let group_id = required(root, "groupId", &source)?;
        let artifact_id = required(root, "artifactId", &source)?;
        let version = root.child_value("version").unwrap_or_default().to_string();

        let mut mojos = Vec::new();
        if let Some(list) = root.child("mojos") {
            for node in list.children_named("mojo") {
                mojos.push(parse_mojo(node, &group_id, &artifact_id, &version, &source)?);
            }
        }

        Ok(Self {
            name: root.child_value("name").map(str::to_string),
            group_id,
            artifact_id,
            version,
            goal_prefix: root.child_value("goalPrefix").map(str::to_string),
            source,
            mojos,
        })
    }

    /// `groupId:artifactId`
    pub fn key(&self) -> String {
        format!("{}:{}", self.group_id, self.artifact_id)
    }

    pub fn mojo(&self, goal: &str) -> Option<&MojoDescriptor> {
        self.mojos.iter().find(|m| m.goal == goal)
    }

    pub fn goals(&self) -> impl Iterator<Item = &str> {
        self.mojos.iter().map(|m| m.goal.as_str())
    }
}

fn required(node: &ConfigNode, name: &str, source: &str) -> Result<String> {
    node.child_value(name)
        .map(str::to_string)
        .ok_or_else(|| {
            Error::InvalidDescriptor(format!("<{}> is missing <{name}> in {source}", node.name))
        })
}

fn flag(node: &ConfigNode, name: &str, default: bool) -> bool {
    node.child_value(name)
        .map(|v| v.eq_ignore_ascii_case("true"))
        .unwrap_or(default)
}

fn parse_mojo(
    node: &ConfigNode,
    group_id: &str,
    artifact_id: &str,
    version: &str,
    source: &str,
) -> Result<MojoDescriptor> {
    let goal = required(node, "goal", source)?;
    let implementation = required(node, "implementation", source)?;

    let role = node
        .child_value("role")
        .unwrap_or(DEFAULT_MOJO_ROLE)
        .to_string();
    let role_hint = node
        .child_value("roleHint")
        .map(str::to_string)
        .unwrap_or_else(|| format!("{group_id}:{artifact_id}:{version}:{goal}"));

    let parameters = node
        .child("parameters")
        .map(|list| {
            list.children_named("parameter")
                .filter_map(|p| {
                    Some(Parameter {
                        name: p.child_value("name")?.to_string(),
                        type_name: p.child_value("type").map(str::to_string),
                        required: flag(p, "required", false),
                        editable: flag(p, "editable", true),
                        description: p.child_value("description").map(str::to_string),
                    })
                })
                .collect()
        })
        .unwrap_or_default();

    Ok(MojoDescriptor {
        goal,
        implementation,
        role,
        role_hint,
        configurator: node.child_value("configurator").map(str::to_string),
        phase: node.child_value("phase").map(str::to_string),
        parameters,
        configuration: node.child("configuration").cloned(),
    })
}
