//! CLI definitions and entry point

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use super::commands;
use buildlogic::core::models::EntryKind;
use buildlogic::output::OutputMode;

/// buildlogic - Composable build conventions
#[derive(Parser, Debug)]
#[command(
    name = "buildlogic",
    version,
    about = "Composable build conventions",
    long_about = "Apply named build conventions to the modules of a multi-module build.\n\n\
                  Conventions declare which conventions they require and are applied once per\n\
                  module, in dependency order. Every coordinate comes from one version catalog."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output in JSON format (machine-readable)
    #[arg(long, global = true)]
    pub json: bool,

    /// Build descriptor (default: $BUILDLOGIC_DESCRIPTOR, then nearest buildlogic.toml)
    #[arg(long, global = true)]
    pub descriptor: Option<PathBuf>,

    /// Version catalog (overrides the descriptor's catalog)
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List registered conventions
    Conventions,

    /// Show the order conventions would be applied in
    Plan {
        /// Convention ids to plan
        #[arg(required = true)]
        conventions: Vec<String>,
    },

    /// Apply conventions and print the resulting module configuration
    Compose {
        /// Only compose this descriptor module (or name the ad-hoc module)
        #[arg(short, long)]
        module: Option<String>,

        /// Compose an ad-hoc module with these conventions instead of the
        /// descriptor's modules
        #[arg(short, long = "convention", value_delimiter = ',')]
        conventions: Vec<String>,
    },

    /// Look up a version catalog entry
    Lookup {
        /// Namespace: library, plugin, version
        kind: EntryKind,

        /// Catalog alias
        key: String,
    },

    /// Show version
    Version,
}

/// Run the CLI
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    let output_mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    let sources = commands::Sources {
        descriptor: cli.descriptor,
        catalog: cli.catalog,
    };

    match cli.command {
        Some(Command::Conventions) => commands::conventions(output_mode),
        Some(Command::Plan { conventions }) => commands::plan(&conventions, output_mode),
        Some(Command::Compose {
            module,
            conventions,
        }) => commands::compose(&sources, module.as_deref(), &conventions, output_mode),
        Some(Command::Lookup { kind, key }) => commands::lookup(&sources, kind, &key, output_mode),
        Some(Command::Version) => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": buildlogic::VERSION
                    })
                );
            } else {
                println!("buildlogic v{}", buildlogic::VERSION);
            }
            Ok(())
        },
        None => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": buildlogic::VERSION,
                        "hint": "Use --help for usage"
                    })
                );
            } else {
                println!("buildlogic v{}", buildlogic::VERSION);
                println!("\nRun 'buildlogic --help' for usage");
                println!("Run 'buildlogic conventions' to see what can be applied");
            }
            Ok(())
        },
    }
}
