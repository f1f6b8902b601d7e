//! `lss types` command - List the business type catalog

use console::style;
use miette::Result;

use crate::cli::GlobalOpts;
use crate::entities::business_type::{is_food_type, CATALOG};

#[derive(clap::Args, Debug)]
pub struct TypesArgs {
    /// Only list food-related types (these get cuisine, reservations and menu)
    #[arg(long)]
    pub food: bool,
}

pub fn run(args: TypesArgs, global: &GlobalOpts) -> Result<()> {
    for group in CATALOG {
        let types: Vec<_> = group
            .types
            .iter()
            .filter(|(t, _)| !args.food || is_food_type(t))
            .collect();
        if types.is_empty() {
            continue;
        }

        if global.quiet {
            for (t, _) in types {
                println!("{}", t);
            }
            continue;
        }

        println!("{}", style(group.label).bold());
        for (t, label) in types {
            println!("  {:<32} {}", style(t).cyan(), style(label).dim());
        }
        println!();
    }
    Ok(())
}
