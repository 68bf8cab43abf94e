//! Plugin discovery and execution strategies

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

use super::container::{ComponentConfigurator, ComponentContainer};
use super::descriptor::{MojoDescriptor, PLUGIN_DESCRIPTOR_PATH, PluginDescriptor};
use super::loader::{CodeLocation, MojoClass};
use super::mojo::{Mojo, MojoExecution};
use super::realm::{ClassRealm, PLUGIN_REALM_ID};
use super::session::ExecutionSession;
use crate::error::{Error, Result};

/// The pluggable steps of running a foreign plugin goal.
///
/// Only `locate_descriptor` differs between the built-in strategies; the rest
/// have defaults that go through the realm and the component container.
pub trait PluginStrategy: Send + Sync {
    fn name(&self) -> &str;

    /// Read the plugin descriptor for `class`. `Ok(None)` means the plugin is not runnable here.
    fn locate_descriptor(&self, class: &MojoClass) -> Result<Option<PluginDescriptor>>;

    fn create_realm(&self, class: &MojoClass) -> ClassRealm {
        ClassRealm::new(PLUGIN_REALM_ID, Arc::clone(class.loader()))
    }

    fn instantiate(&self, realm: &ClassRealm, mojo: &MojoDescriptor) -> Result<Box<dyn Mojo>> {
        Ok(realm.load_class(&mojo.implementation)?.instantiate())
    }

    fn configure(
        &self,
        container: &ComponentContainer,
        mojo: &MojoDescriptor,
    ) -> Result<Arc<dyn ComponentConfigurator>> {
        container.lookup_configurator(mojo.configurator.as_deref())
    }

    fn run(
        &self,
        container: &mut ComponentContainer,
        session: &mut ExecutionSession,
        execution: &MojoExecution,
        configurator: &dyn ComponentConfigurator,
    ) -> Result<()> {
        let manager = container.plugin_manager();
        manager.execute_mojo(container, session, execution, configurator)
    }
}

/// Read the descriptor embedded in a plugin archive.
///
/// The archive handle is dropped on every return path.
pub fn read_archive_descriptor(archive: &Path) -> Result<PluginDescriptor> {
    let file = File::open(archive)?;
    let mut contents = zip::ZipArchive::new(file)?;
    let entry = match contents.by_name(PLUGIN_DESCRIPTOR_PATH) {
        Ok(entry) => entry,
        Err(zip::result::ZipError::FileNotFound) => {
            return Err(Error::PluginDescriptorMissing {
                archive: archive.to_path_buf(),
            });
        }
        Err(e) => return Err(e.into()),
    };
    PluginDescriptor::parse(BufReader::new(entry), archive.display().to_string())
}

/// Runs plugins packaged as archives; a class found in a loose directory is skipped
#[derive(Debug, Default)]
pub struct ArchivePluginStrategy;

impl PluginStrategy for ArchivePluginStrategy {
    fn name(&self) -> &str {
        "archive"
    }

    fn locate_descriptor(&self, class: &MojoClass) -> Result<Option<PluginDescriptor>> {
        match class.location() {
            Some(CodeLocation::Archive { archive, .. }) => {
                debug!("Reading plugin descriptor from {}", archive.display());
                read_archive_descriptor(&archive).map(Some)
            }
            Some(location @ CodeLocation::Directory { .. }) => {
                debug!(
                    "{} is not packaged in an archive ({}), skipping",
                    class.name(),
                    location.url()
                );
                Ok(None)
            }
            None => {
                warn!(
                    "No class path entry of loader {} holds {}, skipping",
                    class.loader().name(),
                    class.name()
                );
                Ok(None)
            }
        }
    }
}

/// Also accepts plugins whose classes live in a directory with `META-INF/maven/plugin.xml` beside them
#[derive(Debug, Default)]
pub struct DirectoryPluginStrategy;

impl PluginStrategy for DirectoryPluginStrategy {
    fn name(&self) -> &str {
        "directory"
    }

    fn locate_descriptor(&self, class: &MojoClass) -> Result<Option<PluginDescriptor>> {
        match class.location() {
            Some(CodeLocation::Archive { archive, .. }) => read_archive_descriptor(&archive).map(Some),
            Some(CodeLocation::Directory { root, .. }) => {
                let path = root.join(PLUGIN_DESCRIPTOR_PATH);
                if !path.is_file() {
                    return Err(Error::PluginDescriptorMissing { archive: root });
                }
                debug!("Reading plugin descriptor from {}", path.display());
                let reader = BufReader::new(File::open(&path)?);
                PluginDescriptor::parse(reader, path.display().to_string()).map(Some)
            }
            None => Ok(None),
        }
    }
}
