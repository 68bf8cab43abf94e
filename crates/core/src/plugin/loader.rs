//! Class loaders: a class path of archives and directories plus the classes they define

use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

use super::mojo::{Mojo, MojoFactory};

/// Where a class's bytes live
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeLocation {
    /// Inside a packaged archive (jar)
    Archive { archive: PathBuf, entry: String },
    /// A loose file under a class directory
    Directory { root: PathBuf, entry: String },
}

impl CodeLocation {
    pub fn is_archive(&self) -> bool {
        matches!(self, CodeLocation::Archive { .. })
    }

    /// `jar:file:...!/entry` or `file:...` form
    pub fn url(&self) -> String {
        match self {
            CodeLocation::Archive { archive, entry } => {
                format!("jar:file:{}!/{}", archive.display(), entry)
            }
            CodeLocation::Directory { root, entry } => {
                format!("file:{}", root.join(entry).display())
            }
        }
    }
}

/// Resource path of a class file: `a.b.C` becomes `a/b/C.class`
pub fn class_resource_name(class_name: &str) -> String {
    format!("{}.class", class_name.replace('.', "/"))
}

pub struct ClassLoader {
    name: String,
    class_path: Vec<PathBuf>,
    classes: HashMap<String, Arc<dyn MojoFactory>>,
}

impl fmt::Debug for ClassLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut classes: Vec<_> = self.classes.keys().collect();
        classes.sort();
        f.debug_struct("ClassLoader")
            .field("name", &self.name)
            .field("class_path", &self.class_path)
            .field("classes", &classes)
            .finish()
    }
}

impl ClassLoader {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            class_path: Vec::new(),
            classes: HashMap::new(),
        }
    }

    pub fn with_class_path(mut self, entry: impl Into<PathBuf>) -> Self {
        self.class_path.push(entry.into());
        self
    }

    pub fn with_class<F>(mut self, class_name: impl Into<String>, factory: F) -> Self
    where
        F: Fn() -> Box<dyn Mojo> + Send + Sync + 'static,
    {
        self.define_class(class_name, Arc::new(factory));
        self
    }

    pub fn define_class(&mut self, class_name: impl Into<String>, factory: Arc<dyn MojoFactory>) {
        self.classes.insert(class_name.into(), factory);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn class_path(&self) -> &[PathBuf] {
        &self.class_path
    }

    pub fn defines(&self, class_name: &str) -> bool {
        self.classes.contains_key(class_name)
    }

    pub(crate) fn factory(&self, class_name: &str) -> Option<Arc<dyn MojoFactory>> {
        self.classes.get(class_name).cloned()
    }

    /// First class path entry holding the class file, in class path order
    pub fn resource_location(&self, class_name: &str) -> Option<CodeLocation> {
        let entry = class_resource_name(class_name);

        self.class_path.iter().find_map(|element| {
            if element.is_dir() {
                element.join(&entry).is_file().then(|| CodeLocation::Directory {
                    root: element.clone(),
                    entry: entry.clone(),
                })
            } else if archive_contains(element, &entry) {
                Some(CodeLocation::Archive {
                    archive: element.clone(),
                    entry: entry.clone(),
                })
            } else {
                None
            }
        })
    }
}

fn archive_contains(archive: &Path, entry: &str) -> bool {
    let file = match File::open(archive) {
        Ok(file) => file,
        Err(e) => {
            debug!("Skipping class path entry {}: {}", archive.display(), e);
            return false;
        }
    };
    match zip::ZipArchive::new(file) {
        Ok(contents) => contents.file_names().any(|name| name == entry),
        Err(e) => {
            debug!("Skipping unreadable archive {}: {}", archive.display(), e);
            false
        }
    }
}

/// A class resolved through a specific loader
#[derive(Clone)]
pub struct MojoClass {
    name: String,
    loader: Arc<ClassLoader>,
    factory: Arc<dyn MojoFactory>,
}

impl fmt::Debug for MojoClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MojoClass")
            .field("name", &self.name)
            .field("loader", &self.loader.name)
            .finish()
    }
}

impl MojoClass {
    /// Resolve `class_name` through `loader`
    pub fn load(loader: &Arc<ClassLoader>, class_name: &str) -> Option<Self> {
        let factory = loader.factory(class_name)?;
        Some(Self {
            name: class_name.to_string(),
            loader: Arc::clone(loader),
            factory,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The defining loader
    pub fn loader(&self) -> &Arc<ClassLoader> {
        &self.loader
    }

    pub fn location(&self) -> Option<CodeLocation> {
        self.loader.resource_location(&self.name)
    }

    pub fn instantiate(&self) -> Box<dyn Mojo> {
        self.factory.instantiate()
    }
}
