use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::commands::{describe_command, init_command, translate_command};

#[derive(Parser, Debug)]
#[command(name = "pom-bridge")]
#[command(version, about, long_about = None)]
#[command(subcommand_required = true, arg_required_else_help = true)]
#[command(after_help = "ENVIRONMENT:\n    RUST_LOG=debug    Enable debug logging")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Translate reactor modules into target configurations
    #[command(visible_alias = "t")]
    Translate {
        /// Reactor snapshot (JSON)
        reactor: PathBuf,

        /// Target build tree (JSON); derived from the reactor when omitted
        #[arg(long)]
        tree: Option<PathBuf>,

        /// Only translate the module with this artifactId
        #[arg(short, long)]
        module: Option<String>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// List the goals of a plugin archive
    #[command(visible_alias = "d")]
    Describe {
        /// Plugin archive (jar) or class directory
        plugin: PathBuf,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Write a default pom-bridge configuration
    Init {
        /// Specify the current working directory
        #[arg(short, long)]
        cwd: Option<String>,

        /// Force overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },
}

impl Commands {
    /// Execute the command
    pub fn execute(self) -> Result<()> {
        match self {
            Commands::Translate {
                reactor,
                tree,
                module,
                json,
            } => translate_command(&reactor, tree.as_deref(), module.as_deref(), json),
            Commands::Describe { plugin, json } => describe_command(&plugin, json),
            Commands::Init { cwd, force } => init_command(cwd.as_deref(), force),
        }
    }
}
