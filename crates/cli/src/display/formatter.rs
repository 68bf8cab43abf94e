use std::fmt::Write;

use pom_bridge_core::PluginDescriptor;
use pom_bridge_core::translate::ModuleMigration;

pub fn format_migration(migration: &ModuleMigration) -> String {
    let mut out = String::new();
    let settings = &migration.settings;

    let _ = writeln!(out, "📦 {} -> {}", migration.module, migration.unit);
    let _ = writeln!(out, "   group: {}", settings.group);
    let _ = writeln!(out, "   version: {}", settings.version);
    let _ = writeln!(out, "   status: {}", settings.status);
    if let Some(plugin) = &settings.target_plugin {
        let _ = writeln!(out, "   plugin: {plugin}");
    }
    for repository in &settings.repositories {
        let _ = writeln!(out, "   repository: {} ({})", repository.name, repository.url);
    }

    if migration.dependencies.is_empty() {
        let _ = writeln!(out, "   no dependencies");
    } else {
        for line in migration.dependencies.render().lines() {
            let _ = writeln!(out, "   {line}");
        }
    }
    out
}

pub fn format_descriptor(descriptor: &PluginDescriptor) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "🔌 {}:{} ({})",
        descriptor.key(),
        descriptor.version,
        descriptor.source
    );
    if let Some(prefix) = &descriptor.goal_prefix {
        let _ = writeln!(out, "   prefix: {prefix}");
    }

    for mojo in &descriptor.mojos {
        let configurator = mojo.configurator.as_deref().unwrap_or("default");
        let _ = writeln!(
            out,
            "   {} -> {} [configurator: {}]",
            mojo.goal, mojo.implementation, configurator
        );
        if let Some(phase) = &mojo.phase {
            let _ = writeln!(out, "      phase: {phase}");
        }
        for parameter in &mojo.parameters {
            let marker = if parameter.required { " (required)" } else { "" };
            let _ = writeln!(out, "      - {}{}", parameter.name, marker);
        }
    }
    out
}
