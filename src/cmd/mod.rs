//! CLI definition and command dispatch.

mod export;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "drawdb-export")]
#[command(version)]
#[command(about = "Export dbt manifest/catalog artifacts as a DrawDB (.ddb) diagram", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Export a manifest/catalog pair to a .ddb diagram file
    Export {
        /// Path to the dbt manifest.json
        manifest: PathBuf,

        /// Path to the dbt catalog.json
        catalog: PathBuf,

        /// Ingestion strategy used to extract tables and relationships
        #[arg(short, long, default_value = "test_relationship")]
        algo: String,

        /// Output file name; also used as the diagram title
        #[arg(short, long)]
        name: Option<String>,

        /// Output directory for the .ddb file
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Export {
            manifest,
            catalog,
            algo,
            name,
            output,
        } => export::run(manifest, catalog, algo, name, output),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let bin_name = cmd.get_name().to_string();
            generate(shell, &mut cmd, bin_name, &mut io::stdout());
            Ok(())
        }
    }
}
