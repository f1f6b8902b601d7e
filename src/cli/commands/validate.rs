//! `lss validate` command - Validate settings and generated JSON-LD

use console::style;
use miette::Result;

use crate::cli::helpers::{load_config, open_store};
use crate::cli::GlobalOpts;
use crate::core::store::load_locations;
use crate::schema::builder::SchemaBuilder;
use crate::schema::hours::rejected_ranges;
use crate::schema::validator::Validator;

#[derive(clap::Args, Debug)]
pub struct ValidateArgs {
    /// Strict mode - warnings become errors
    #[arg(long)]
    pub strict: bool,

    /// Show summary only, don't show individual problems
    #[arg(long)]
    pub summary: bool,
}

/// Validation statistics
#[derive(Default)]
struct ValidationStats {
    locations_checked: usize,
    documents_generated: usize,
    total_errors: usize,
    total_warnings: usize,
}

pub fn run(args: ValidateArgs, global: &GlobalOpts) -> Result<()> {
    let config = load_config(global);
    let store = open_store(&config);
    let validator = Validator::new();
    let mut stats = ValidationStats::default();
    let show = !args.summary && !global.quiet;

    let filename = store.path().display().to_string();
    let Some(content) = store.read_source()? else {
        println!(
            "{} No settings document at {} (nothing to validate)",
            style("!").yellow(),
            style(&filename).cyan()
        );
        return Ok(());
    };

    if show {
        println!("{} Validating {}...\n", style("→").blue(), style(&filename).cyan());
    }

    // Settings document against its schema
    match validator.validate_settings(&content, &filename) {
        Ok(()) => {
            if show {
                println!("{} settings schema", style("✓").green());
            }
        }
        Err(e) => {
            stats.total_errors += e.violation_count();
            if show {
                println!(
                    "{} settings schema - {} error(s)",
                    style("✗").red(),
                    e.violation_count()
                );
                let report = miette::Report::new(e);
                println!("{:?}", report);
            }
        }
    }

    let locations = match load_locations(&store) {
        Ok(locations) => locations,
        Err(e) => {
            stats.total_errors += 1;
            if show {
                println!("{:?}", miette::Report::new(e));
            }
            return finish(&stats, args.strict);
        }
    };

    let builder = SchemaBuilder::new(config.build_options());

    for (id, record) in &locations {
        stats.locations_checked += 1;
        let mut warnings = Vec::new();
        let mut errors = Vec::new();

        let missing = record.missing_required_fields();
        if !missing.is_empty() {
            warnings.push(format!("skipped, missing: {}", missing.join(", ")));
        }

        for (day, candidate) in rejected_ranges(&record.opening_hours) {
            warnings.push(format!("{} hours '{}' ignored (expected HH:MM-HH:MM)", day.name(), candidate));
        }

        if let Some(document) = builder.build_location(id, record) {
            stats.documents_generated += 1;
            for issue in validator.check_document(&document.to_value()) {
                let mut line = issue.message;
                if let Some(hint) = issue.suggestion {
                    line.push_str(&format!(" ({})", hint));
                }
                errors.push(line);
            }
        }

        stats.total_warnings += warnings.len();
        stats.total_errors += errors.len();

        if !show {
            continue;
        }
        let marker = if !errors.is_empty() {
            style("✗").red()
        } else if !warnings.is_empty() {
            style("!").yellow()
        } else {
            style("✓").green()
        };
        println!("{} {} {}", marker, style(id).cyan(), style(&record.name).dim());
        for error in &errors {
            println!("    {}", style(error).red());
        }
        for warning in &warnings {
            println!("    {}", style(warning).yellow());
        }
    }

    finish(&stats, args.strict)
}

fn finish(stats: &ValidationStats, strict: bool) -> Result<()> {
    println!();
    println!("{}", style("─".repeat(60)).dim());
    println!("{}", style("Validation Summary").bold());
    println!("{}", style("─".repeat(60)).dim());
    println!("  Locations checked:   {}", style(stats.locations_checked).cyan());
    println!("  Documents generated: {}", style(stats.documents_generated).green());
    println!("  Total errors:        {}", style(stats.total_errors).red());
    if stats.total_warnings > 0 {
        println!("  Total warnings:      {}", style(stats.total_warnings).yellow());
    }
    println!();

    if stats.total_errors > 0 {
        Err(miette::miette!(
            "Validation failed: {} error(s)",
            stats.total_errors
        ))
    } else if strict && stats.total_warnings > 0 {
        Err(miette::miette!(
            "Validation failed: {} warning(s) in strict mode",
            stats.total_warnings
        ))
    } else {
        println!("{} Settings passed validation!", style("✓").green().bold());
        Ok(())
    }
}
