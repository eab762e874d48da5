//! Mongo Studio CLI.
//!
//! ```bash
//! studio serve --port 3001 --models-path ./generated/models
//! studio validate schema.json
//! studio generate Product schema.json --out ./generated/models
//! ```
//!
//! See `studio --help` for all available commands and options.

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "studio", about = "Mongo Studio model generator and API server", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    Serve {
        /// Config file (default: ./studio.toml when present)
        #[arg(long)]
        config: Option<PathBuf>,

        #[arg(long)]
        host: Option<String>,

        #[arg(long)]
        port: Option<u16>,

        /// Directory for generated model files
        #[arg(long)]
        models_path: Option<PathBuf>,
    },

    /// Check a schema file and print the validation report
    Validate {
        /// JSON file holding the field schema
        schema: PathBuf,
    },

    /// Generate model source from a schema file
    Generate {
        /// Model name, e.g. Product
        name: String,

        /// JSON file holding the field schema
        schema: PathBuf,

        /// Emit a plain TypeScript interface instead of the Mongoose model
        #[arg(long)]
        interface: bool,

        /// Write `<name>.model.ts` into this directory instead of printing it
        #[arg(long, conflicts_with = "interface")]
        out: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve { config, host, port, models_path } => {
            let overrides = commands::serve::Overrides { host, port, models_path };
            commands::serve::run(config.as_deref(), overrides).await
        }
        Commands::Validate { schema } => match commands::validate::run(&schema) {
            Ok(true) => Ok(()),
            Ok(false) => std::process::exit(1),
            Err(e) => Err(e),
        },
        Commands::Generate { name, schema, interface, out } => {
            commands::generate::run(&name, &schema, interface, out.as_deref()).await
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
