//! Command-line interface for pomgen.
//! Provides argument parsing using clap.

use crate::target::DeploymentContext;
use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments structure for pomgen.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "pomgen: generate consistent build descriptors for every module and runtime variant",
    long_about = None
)]
pub struct Args {
    /// Directory the module descriptors are written under
    #[arg(value_name = "OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Only generate this module (repeatable)
    #[arg(short, long = "module", value_name = "MODULE")]
    pub modules: Vec<String>,

    /// Only generate this deployment context: local or release (repeatable)
    #[arg(short, long = "context", value_name = "CONTEXT")]
    pub contexts: Vec<DeploymentContext>,

    /// Override the project version shared by all modules
    #[arg(long, value_name = "VERSION")]
    pub project_version: Option<String>,

    /// Settings file (defaults to pomgen.json, pomgen.yml or pomgen.yaml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Report what would be written without touching any file
    #[arg(long, conflicts_with = "check")]
    pub dry_run: bool,

    /// Compare generated documents with the files on disk and fail if any differ
    #[arg(long)]
    pub check: bool,

    /// List the targets and their output paths, then exit
    #[arg(long)]
    pub list: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Parses command line arguments and returns the Args structure.
pub fn get_args() -> Args {
    Args::parse()
}
