//! Prism CLI - Check and edit entity hierarchy files

mod commands;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{dump, property, validate};
use config::PrismConfig;
use prism_updater::{PathResolver, ResolverRegistry};
use tracing::Level;

#[derive(Parser)]
#[command(name = "prism")]
#[command(about = "Check and edit entity hierarchy files", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable debug logging (overrides the configured level)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that every root and child reference resolves
    Validate {
        /// Path to hierarchy file
        file: String,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Print the integrity dump of a hierarchy
    Dump {
        /// Path to hierarchy file
        file: String,
    },

    /// Read a property of an entity (e.g. "Children[0].Name")
    Get {
        /// Path to hierarchy file
        file: String,

        /// Entity id
        entity: String,

        /// Property path
        path: String,
    },

    /// Write a string or number property of an entity and save the file
    Set {
        /// Path to hierarchy file
        file: String,

        /// Entity id
        entity: String,

        /// Property path
        path: String,

        /// New value
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = PrismConfig::load()?;

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        config.log_level
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let registry = ResolverRegistry::with_builtins().install()?;
    let resolver = PathResolver::new(registry);

    match cli.command {
        Commands::Validate { file, format } => validate::run(validate::ValidateArgs {
            file,
            format,
            fail_on_invalid: config.fail_on_invalid,
        }),
        Commands::Dump { file } => dump::run(&file),
        Commands::Get { file, entity, path } => {
            property::get(&resolver, property::GetArgs { file, entity, path })
        }
        Commands::Set {
            file,
            entity,
            path,
            value,
        } => property::set(
            &resolver,
            property::SetArgs {
                file,
                entity,
                path,
                value,
            },
        ),
    }
}
