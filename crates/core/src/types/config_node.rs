//! Freeform configuration tree attached to plugins, executions and mojo descriptors

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A named node with an optional text value, attributes and ordered children.
///
/// Mirrors the shape of a `<configuration>` element in the legacy descriptor format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigNode {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ConfigNode>,
}

impl ConfigNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn leaf(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
            ..Default::default()
        }
    }

    pub fn with_child(mut self, child: ConfigNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// First child with the given name
    pub fn child(&self, name: &str) -> Option<&ConfigNode> {
        self.children.iter().find(|c| c.name == name)
    }

    /// All children with the given name, in document order
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a ConfigNode> {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Trimmed text value of the first child with the given name
    pub fn child_value(&self, name: &str) -> Option<&str> {
        self.child(name)
            .and_then(|c| c.value.as_deref())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }

    /// Merge `recessive` under `self`.
    ///
    /// Values and attributes from `self` win. Children are matched by name:
    /// a child present on both sides is merged recursively, a child only
    /// present in `recessive` is appended after the dominant children.
    pub fn merged_over(&self, recessive: &ConfigNode) -> ConfigNode {
        let mut merged = self.clone();

        if merged.value.is_none() {
            merged.value = recessive.value.clone();
        }
        for (key, value) in &recessive.attributes {
            merged
                .attributes
                .entry(key.clone())
                .or_insert_with(|| value.clone());
        }

        for child in &mut merged.children {
            if let Some(other) = recessive.child(&child.name) {
                *child = child.merged_over(other);
            }
        }
        for other in &recessive.children {
            if self.child(&other.name).is_none() {
                merged.children.push(other.clone());
            }
        }

        merged
    }
}
