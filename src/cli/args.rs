//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::cli::commands::{
    completions::CompletionsArgs, init::InitArgs, location::LocationCommands, render::RenderArgs,
    types::TypesArgs, validate::ValidateArgs,
};

#[derive(Parser)]
#[command(name = "lss")]
#[command(author, version, about = "Local SEO Schema - LocalBusiness JSON-LD for your locations")]
#[command(long_about = "Builds schema.org LocalBusiness JSON-LD blocks from a settings document holding one or more business locations.")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug, Default)]
pub struct GlobalOpts {
    /// Settings document (default: from config, else lss-settings.yaml)
    #[arg(long, global = true)]
    pub settings: Option<PathBuf>,

    /// Site URL used for locations without their own URL
    #[arg(long, global = true)]
    pub site_url: Option<String>,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true, conflicts_with = "quiet")]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a project with a starter settings file
    Init(InitArgs),

    /// Print the JSON-LD script blocks for every eligible location
    Render(RenderArgs),

    /// Validate the settings document and the generated JSON-LD
    Validate(ValidateArgs),

    /// Location management
    #[command(subcommand)]
    Location(LocationCommands),

    /// List the schema.org business types
    Types(TypesArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}
