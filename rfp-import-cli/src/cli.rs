use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Validate RFP import JSON files before loading them")]
pub struct Cli {
    /// Path to the config file (defaults to ~/.rfp-validate.config)
    #[clap(long, global = true)]
    pub config: Option<PathBuf>,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate a categories, requirements or responses JSON file
    Validate {
        /// The JSON file to validate
        file: PathBuf,

        /// Document type: categories, requirements or responses
        r#type: String,

        /// Categories file to check requirement category_name values against
        categories: Option<PathBuf>,

        /// Report unknown fields as warnings instead of errors
        #[clap(long)]
        allow_unknown_fields: bool,

        /// Skip the per-category summary after a valid requirements file
        #[clap(long)]
        no_summary: bool,
    },

    /// Validate a PRD task-tracking JSON file
    Prd {
        /// The PRD JSON file to validate
        file: PathBuf,
    },
}
