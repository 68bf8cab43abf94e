use anyhow::{Context, Result};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use pom_bridge_core::PluginDescriptor;
use pom_bridge_core::plugin::{PLUGIN_DESCRIPTOR_PATH, read_archive_descriptor};

use crate::display::format_descriptor;

pub fn describe_command(plugin: &Path, json: bool) -> Result<()> {
    let descriptor = if plugin.is_dir() {
        let path = plugin.join(PLUGIN_DESCRIPTOR_PATH);
        let file = File::open(&path)
            .with_context(|| format!("Failed to open {}", path.display()))?;
        PluginDescriptor::parse(BufReader::new(file), path.display().to_string())?
    } else {
        read_archive_descriptor(plugin)
            .with_context(|| format!("Failed to read plugin {}", plugin.display()))?
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&descriptor)?);
    } else {
        print!("{}", format_descriptor(&descriptor));
    }
    Ok(())
}
