use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "armforge",
    about = "Typed builder for declarative cloud deployment templates",
    version
)]
pub struct Cli {
    /// Log resolution and rendering steps
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build a deployment template from a description file
    Build {
        /// Path to armforge.toml or its directory (default: current directory)
        #[arg(default_value = ".")]
        path: String,

        /// Output file (default: [deployment].output or template.json)
        #[arg(short, long)]
        output: Option<String>,

        /// Overwrite the output file if it exists
        #[arg(long)]
        overwrite: bool,

        /// Print the template (or a diff against the existing file) without writing
        #[arg(long)]
        dry_run: bool,
    },

    /// Validate a deployment description
    Check {
        /// Path to armforge.toml or its directory (default: current directory)
        #[arg(default_value = ".")]
        path: String,
    },
}
