use clap::Parser;
use std::path::PathBuf;

use crate::bom_merge::domain::{SpecVersion, ValidationMode};
use crate::bom_merge::policies::IdentityPolicy;

/// Merge CycloneDX SBOMs into a single document
///
/// `--version` names the version of the merged subject, so the tool's own
/// version is only shown in `--help`.
#[derive(Parser, Debug)]
#[command(name = "cdx-merge")]
#[command(about = "Merge CycloneDX SBOMs into a single document", long_about = None)]
#[command(after_help = concat!("cdx-merge ", env!("CARGO_PKG_VERSION")))]
#[command(disable_version_flag = true)]
pub struct Args {
    /// Input BOM files, merged in the order given
    #[arg(short = 'i', long, value_name = "PATH", num_args = 1..)]
    pub input_files: Vec<PathBuf>,

    /// Files listing input BOM paths, one per line
    #[arg(long, value_name = "PATH", num_args = 1..)]
    pub input_files_list: Vec<PathBuf>,

    /// Files listing input BOM paths separated by NUL characters
    #[arg(long, value_name = "PATH", num_args = 1..)]
    pub input_files_nul_list: Vec<PathBuf>,

    /// Output file path (stdout if omitted or "-")
    #[arg(short, long, value_name = "PATH")]
    pub output_file: Option<PathBuf>,

    /// Nest each input under its own boundary component instead of merging flat
    #[arg(long)]
    pub hierarchical: bool,

    /// Group of the merged subject component
    #[arg(long)]
    pub group: Option<String>,

    /// Name of the merged subject component
    #[arg(long)]
    pub name: Option<String>,

    /// Version of the merged subject component
    #[arg(long)]
    pub version: Option<String>,

    /// Schema validation of the output: none, strict or relaxed
    #[arg(long, value_name = "MODE")]
    pub validation: Option<ValidationMode>,

    /// How duplicate components are recognized: descriptive, bom-ref or exact
    #[arg(long, value_name = "POLICY")]
    pub identity: Option<IdentityPolicy>,

    /// CycloneDX spec version of the output (1.2 to 1.6)
    #[arg(long, value_name = "VERSION")]
    pub output_version: Option<SpecVersion>,

    /// Path to a config file (defaults to ./cdx-merge.config.yml if present)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
