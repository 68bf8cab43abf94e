//! Isolated class realm scoped to one plugin's loader

use std::sync::Arc;

use super::loader::{ClassLoader, MojoClass};
use crate::error::{Error, Result};

/// Realm id used for plugin execution
pub const PLUGIN_REALM_ID: &str = "maven.plugin";

/// Resolves classes only through the plugin's own loader, so host classes never leak in
#[derive(Debug, Clone)]
pub struct ClassRealm {
    id: String,
    loader: Arc<ClassLoader>,
}

impl ClassRealm {
    pub fn new(id: impl Into<String>, loader: Arc<ClassLoader>) -> Self {
        Self {
            id: id.into(),
            loader,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn loader(&self) -> &Arc<ClassLoader> {
        &self.loader
    }

    pub fn load_class(&self, class_name: &str) -> Result<MojoClass> {
        MojoClass::load(&self.loader, class_name)
            .ok_or_else(|| Error::ClassNotFound(format!("{class_name} in realm {}", self.id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugin::mojo::{Mojo, MojoContext, MojoError};

    struct Noop;

    impl Mojo for Noop {
        fn execute(&mut self, _context: &MojoContext<'_>) -> std::result::Result<(), MojoError> {
            Ok(())
        }
    }

    #[test]
    fn test_realm_sees_only_its_loader() {
        let plugin = Arc::new(
            ClassLoader::new("plugin").with_class("a.Clean", || Box::new(Noop) as Box<dyn Mojo>),
        );
        let host = Arc::new(
            ClassLoader::new("host").with_class("a.Host", || Box::new(Noop) as Box<dyn Mojo>),
        );

        let realm = ClassRealm::new(PLUGIN_REALM_ID, plugin);
        assert!(realm.load_class("a.Clean").is_ok());
        assert!(matches!(
            realm.load_class("a.Host"),
            Err(Error::ClassNotFound(_))
        ));
        assert!(host.defines("a.Host"));
    }
}
