//! `lss init` command - Initialize a project with a starter settings file

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::core::config::DEFAULT_SETTINGS_FILE;
use crate::core::project::{Project, ProjectError, PROJECT_DIR};

#[derive(clap::Args, Debug)]
pub struct InitArgs {
    /// Directory to initialize (default: current directory)
    #[arg(default_value = ".")]
    pub path: std::path::PathBuf,

    /// Overwrite the config and settings files if they exist
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: InitArgs) -> Result<()> {
    let path = if args.path.as_os_str() == "." {
        std::env::current_dir().into_diagnostic()?
    } else {
        args.path.clone()
    };

    if !path.exists() {
        std::fs::create_dir_all(&path).into_diagnostic()?;
        println!(
            "{} Created directory {}",
            style("✓").green(),
            style(path.display()).cyan()
        );
    }

    match Project::init(&path, args.force) {
        Ok(project) => {
            println!(
                "{} Initialized lss project at {}",
                style("✓").green(),
                style(project.root().display()).cyan()
            );
            println!();
            println!("  {} {}/config.yaml", style("config").dim(), PROJECT_DIR);
            println!("  {} {}", style("settings").dim(), DEFAULT_SETTINGS_FILE);
            println!();
            println!("Next steps:");
            println!("  {} Add your first location", style("lss location add").yellow());
            println!("  {} Check the settings", style("lss validate").yellow());
            println!("  {} Print the JSON-LD blocks", style("lss render").yellow());
            Ok(())
        }
        Err(ProjectError::AlreadyExists(path)) => {
            println!(
                "{} lss project already exists at {}",
                style("!").yellow(),
                style(path.display()).cyan()
            );
            println!();
            println!("Use {} to reinitialize", style("lss init --force").yellow());
            Ok(())
        }
        Err(e) => Err(miette::miette!("{}", e)),
    }
}
