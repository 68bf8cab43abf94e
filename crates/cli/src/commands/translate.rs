use anyhow::{Context, Result, bail};
use std::env;
use std::path::Path;
use tracing::debug;

use pom_bridge_core::translate::migrate_module;
use pom_bridge_core::{Config, Reactor, TargetBuildTree};

use crate::display::format_migration;

pub fn translate_command(
    reactor_path: &Path,
    tree_path: Option<&Path>,
    module: Option<&str>,
    json: bool,
) -> Result<()> {
    let reactor = Reactor::load_from_file(reactor_path)
        .with_context(|| format!("Failed to load reactor from {}", reactor_path.display()))?;

    let start = match reactor_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(parent) => parent.to_path_buf(),
        None => env::current_dir().context("Failed to get current directory")?,
    };
    let config = Config::discover(&start).context("Failed to load configuration")?;

    let tree = match tree_path {
        Some(path) => TargetBuildTree::load_from_file(path)
            .with_context(|| format!("Failed to load target tree from {}", path.display()))?,
        None => {
            debug!("Deriving target tree with root unit {}", config.root_unit);
            reactor.derive_target_tree(&config.root_unit)
        }
    };

    let modules = match module {
        Some(artifact_id) => match reactor.find_by_artifact_id(artifact_id) {
            Some(found) => vec![found],
            None => bail!("No reactor module with artifactId '{artifact_id}'"),
        },
        None => reactor.modules().iter().collect(),
    };

    let mut migrations = Vec::with_capacity(modules.len());
    for module in modules {
        let migration = migrate_module(&reactor, &tree, module)
            .with_context(|| format!("Failed to translate {}", module.coordinates))?;
        migrations.push(migration);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&migrations)?);
    } else {
        for migration in &migrations {
            print!("{}", format_migration(migration));
        }
    }

    Ok(())
}
