//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use thinpom::sources::ManifestFormat;

/// thinpom - rewrite Maven manifests from override directives
#[derive(Parser)]
#[command(name = "thinpom")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Apply overrides to a manifest and print the result
    Rewrite(RewriteArgs),

    /// Parse artifact coordinates and print their parts
    Coords(CoordsArgs),
}

/// Manifest formats accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// Maven pom.xml
    #[value(alias = "xml")]
    Pom,
    /// JSON manifest model
    Json,
}

impl From<FormatArg> for ManifestFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Pom => ManifestFormat::Pom,
            FormatArg::Json => ManifestFormat::Json,
        }
    }
}

#[derive(Args)]
pub struct RewriteArgs {
    /// Manifest to rewrite
    pub manifest: PathBuf,

    /// Overrides file (.toml or .properties), may be repeated
    #[arg(long = "overrides", value_name = "FILE")]
    pub overrides: Vec<PathBuf>,

    /// Set a single override, may be repeated
    #[arg(long = "set", value_name = "KEY=VALUE")]
    pub set: Vec<String>,

    /// Output format
    #[arg(long, value_enum, default_value = "json")]
    pub format: FormatArg,

    /// Input manifest format
    #[arg(long, value_enum, default_value = "pom")]
    pub input_format: FormatArg,

    /// Write the result to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Do not read ~/.thinpom/overrides.properties
    #[arg(long, env = "THINPOM_NO_GLOBAL", value_parser = clap::builder::BoolishValueParser::new())]
    pub no_global: bool,
}

#[derive(Args)]
pub struct CoordsArgs {
    /// Coordinates to parse
    #[arg(required = true)]
    pub coordinates: Vec<String>,
}
