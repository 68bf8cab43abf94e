//! Read-only view of the target build's unit hierarchy

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};

/// Index of a unit inside its [`TargetBuildTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UnitId(usize);

/// A unit (project) of the target build, identified by a colon-delimited name
#[derive(Debug, Clone)]
pub struct BuildUnit {
    id: UnitId,
    name: String,
    parent: Option<UnitId>,
    children: Vec<UnitId>,
}

impl BuildUnit {
    pub fn id(&self) -> UnitId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<UnitId> {
        self.parent
    }

    /// Colon-separated segments of the unit name
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.name.split(':')
    }

    /// Whether any name segment equals `dir_name`, ignoring case
    pub fn matches_dir_name(&self, dir_name: &str) -> bool {
        let wanted = dir_name.to_lowercase();
        self.segments().any(|segment| segment.to_lowercase() == wanted)
    }
}

/// Serialized form of a unit hierarchy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitSpec {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<UnitSpec>,
}

impl UnitSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
        }
    }

    pub fn with_child(mut self, child: UnitSpec) -> Self {
        self.children.push(child);
        self
    }
}

/// Arena-backed unit tree; unit 0 is always the root
#[derive(Debug, Clone)]
pub struct TargetBuildTree {
    units: Vec<BuildUnit>,
}

impl TargetBuildTree {
    pub fn new(root_name: impl Into<String>) -> Self {
        Self {
            units: vec![BuildUnit {
                id: UnitId(0),
                name: root_name.into(),
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    pub fn from_spec(spec: &UnitSpec) -> Self {
        let mut tree = Self::new(spec.name.clone());
        let root = tree.root();
        tree.add_spec_children(root, spec);
        tree
    }

    fn add_spec_children(&mut self, parent: UnitId, spec: &UnitSpec) {
        for child in &spec.children {
            let id = self.push_unit(parent, child.name.clone());
            self.add_spec_children(id, child);
        }
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let spec: UnitSpec = serde_json::from_str(&contents)
            .map_err(|e| Error::ConfigError(format!("Failed to parse build tree: {e}")))?;
        Ok(Self::from_spec(&spec))
    }

    pub fn root(&self) -> UnitId {
        UnitId(0)
    }

    pub fn add_child(&mut self, parent: UnitId, name: impl Into<String>) -> Result<UnitId> {
        if parent.0 >= self.units.len() {
            return Err(Error::UnknownUnit(format!("#{}", parent.0)));
        }
        Ok(self.push_unit(parent, name.into()))
    }

    pub(crate) fn push_unit(&mut self, parent: UnitId, name: String) -> UnitId {
        let id = UnitId(self.units.len());
        self.units.push(BuildUnit {
            id,
            name,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.units[parent.0].children.push(id);
        id
    }

    pub fn unit(&self, id: UnitId) -> Option<&BuildUnit> {
        self.units.get(id.0)
    }

    pub fn find(&self, name: &str) -> Option<UnitId> {
        self.units.iter().find(|u| u.name == name).map(|u| u.id)
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// `id` and all of its descendants, in pre-order
    pub fn all_units(&self, id: UnitId) -> Vec<&BuildUnit> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            let Some(unit) = self.units.get(next.0) else {
                continue;
            };
            out.push(unit);
            stack.extend(unit.children.iter().rev().copied());
        }
        out
    }

    /// Subtree searched for sibling units of `id`.
    ///
    /// A unit with a parent sees the whole parent subtree; a root unit sees its own.
    pub fn sibling_scope(&self, id: UnitId) -> UnitId {
        self.unit(id).and_then(BuildUnit::parent).unwrap_or(id)
    }

    pub fn to_spec(&self) -> UnitSpec {
        self.spec_for(self.root())
    }

    fn spec_for(&self, id: UnitId) -> UnitSpec {
        let unit = &self.units[id.0];
        UnitSpec {
            name: unit.name.clone(),
            children: unit.children.iter().map(|c| self.spec_for(*c)).collect(),
        }
    }
}
