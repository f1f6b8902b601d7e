//! `lss render` command - Print the JSON-LD blocks

use miette::Result;

use crate::cli::helpers::{load_config, open_store};
use crate::cli::GlobalOpts;
use crate::core::store::load_locations;
use crate::schema::builder::{LocalBusinessSchema, ReservationStyle, SchemaBuilder};
use crate::schema::render::{digest, to_json_ld, HeadRenderer};

#[derive(clap::Args, Debug)]
pub struct RenderArgs {
    /// Print the documents as a JSON array instead of script blocks
    #[arg(long, conflicts_with = "digest")]
    pub json: bool,

    /// Print only the SHA-256 digest of the script blocks
    #[arg(long)]
    pub digest: bool,

    /// Write acceptsReservations as "True"/"False" strings
    #[arg(long)]
    pub legacy_reservations: bool,
}

pub fn run(args: RenderArgs, global: &GlobalOpts) -> Result<()> {
    let config = load_config(global);
    let mut options = config.build_options();
    if args.legacy_reservations {
        options = options.with_reservations(ReservationStyle::Legacy);
    }

    let store = open_store(&config);
    let locations = load_locations(&store)?;

    let builder = SchemaBuilder::new(options);
    let documents: Vec<LocalBusinessSchema> = builder.build(&locations).collect();
    tracing::debug!(
        locations = locations.len(),
        documents = documents.len(),
        "built documents"
    );

    if args.json {
        println!("{}", to_json_ld(&documents)?);
        return Ok(());
    }

    let blocks = HeadRenderer::new()?.render(&documents)?;
    if args.digest {
        println!("{}", digest(&blocks));
    } else {
        print!("{}", blocks);
    }

    Ok(())
}
