//! `lss location` command - Location management

use clap::Subcommand;
use console::style;
use dialoguer::{theme::ColorfulTheme, Confirm};
use miette::{IntoDiagnostic, Result};
use serde_json::{Map, Value};
use tabled::{builder::Builder, settings::Style};

use crate::cli::helpers::{load_config, open_store, truncate_str};
use crate::cli::GlobalOpts;
use crate::core::identity::LocationId;
use crate::core::sanitize::sanitize_locations;
use crate::core::store::{load_locations, save_locations};
use crate::entities::business_type::{is_known_type, DEFAULT_BUSINESS_TYPE};
use crate::entities::location::{LocationRecord, Locations};
use crate::entities::weekday::Weekday;
use crate::schema::builder::SchemaBuilder;
use crate::schema::render::to_json_ld;
use crate::schema::wizard::LocationWizard;

#[derive(Subcommand, Debug)]
pub enum LocationCommands {
    /// Add a new location
    Add(AddArgs),

    /// List locations in output order
    List(ListArgs),

    /// Show the JSON-LD for one location
    Show(ShowArgs),

    /// Remove a location
    Remove(RemoveArgs),
}

#[derive(clap::Args, Debug, Default)]
pub struct AddArgs {
    /// Location id (default: generated)
    #[arg(long)]
    pub id: Option<String>,

    /// Business name
    #[arg(long)]
    pub name: Option<String>,

    /// schema.org business type (see `lss types`)
    #[arg(long = "type", short = 't')]
    pub business_type: Option<String>,

    #[arg(long)]
    pub street: Option<String>,

    /// City / locality
    #[arg(long)]
    pub city: Option<String>,

    /// State / region
    #[arg(long)]
    pub region: Option<String>,

    #[arg(long)]
    pub postal_code: Option<String>,

    #[arg(long)]
    pub country: Option<String>,

    #[arg(long)]
    pub telephone: Option<String>,

    /// Location page URL
    #[arg(long)]
    pub url: Option<String>,

    /// Image URL
    #[arg(long)]
    pub image: Option<String>,

    /// Price range, e.g. "$$"
    #[arg(long)]
    pub price_range: Option<String>,

    #[arg(long, allow_hyphen_values = true)]
    pub latitude: Option<String>,

    #[arg(long, allow_hyphen_values = true)]
    pub longitude: Option<String>,

    /// Opening hours as DAY=TEXT, e.g. Mo=09:00-17:00 (repeatable)
    #[arg(long = "hours", value_name = "DAY=TEXT")]
    pub hours: Vec<String>,

    /// Areas served (comma-separated)
    #[arg(long)]
    pub area_served: Option<String>,

    /// Map URL
    #[arg(long)]
    pub map_url: Option<String>,

    /// Cuisines served (comma-separated, food types only)
    #[arg(long)]
    pub cuisine: Option<String>,

    /// Accepts reservations: yes or no (food types only)
    #[arg(long)]
    pub reservations: Option<String>,

    /// Menu URL (food types only)
    #[arg(long)]
    pub menu_url: Option<String>,

    /// Don't run the interactive wizard, use the flags as given
    #[arg(long)]
    pub no_edit: bool,
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Print only the location ids
    #[arg(long)]
    pub ids: bool,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Location id
    pub id: String,

    /// Print the stored record instead of the JSON-LD
    #[arg(long)]
    pub raw: bool,
}

#[derive(clap::Args, Debug)]
pub struct RemoveArgs {
    /// Location id
    pub id: String,

    /// Don't ask for confirmation
    #[arg(long, short = 'y')]
    pub yes: bool,
}

pub fn run(cmd: LocationCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        LocationCommands::Add(args) => run_add(args, global),
        LocationCommands::List(args) => run_list(args, global),
        LocationCommands::Show(args) => run_show(args, global),
        LocationCommands::Remove(args) => run_remove(args, global),
    }
}

fn run_add(args: AddArgs, global: &GlobalOpts) -> Result<()> {
    let config = load_config(global);
    let store = open_store(&config);
    let mut locations = load_locations(&store)?;

    let id = match &args.id {
        Some(raw) => LocationId::parse(raw).map_err(|e| miette::miette!("{}", e))?,
        None => LocationId::generate(),
    };
    if locations.contains_key(&id) {
        return Err(miette::miette!("Location '{}' already exists", id));
    }

    let no_edit = args.no_edit;
    let prefill = form_values(args)?;
    let values = if no_edit {
        prefill
    } else {
        LocationWizard::new().run(&prefill)?
    };

    if let Some(t) = values.get("type").and_then(Value::as_str) {
        if !t.is_empty() && !is_known_type(t) {
            tracing::warn!(business_type = t, "business type is not in the catalog");
        }
    }

    let mut raw = Map::new();
    raw.insert(id.to_string(), Value::Object(values));
    let Some((id, record)) = sanitize_locations(&Value::Object(raw)).into_iter().next() else {
        return Err(miette::miette!("Location '{}' could not be sanitized", id));
    };

    let missing = record.missing_required_fields();
    let name = record.name.clone();
    locations.insert(id.clone(), record);
    save_locations(&store, &locations)?;

    if !global.quiet {
        println!(
            "{} Created location {} {}",
            style("✓").green(),
            style(&id).cyan(),
            style(&name).dim()
        );
        if !missing.is_empty() {
            println!(
                "   {} not rendered until these are set: {}",
                style("!").yellow(),
                missing.join(", ")
            );
        }
    } else {
        println!("{}", id);
    }

    Ok(())
}

/// Flag values keyed by settings field name
fn form_values(args: AddArgs) -> Result<Map<String, Value>> {
    let mut values = Map::new();
    let mut put = |key: &str, value: Option<String>| {
        if let Some(v) = value {
            values.insert(key.to_string(), Value::String(v));
        }
    };

    put("name", args.name);
    put("type", args.business_type);
    put("address_street", args.street);
    put("address_locality", args.city);
    put("address_region", args.region);
    put("address_postalcode", args.postal_code);
    put("address_country", args.country);
    put("telephone", args.telephone);
    put("url", args.url);
    put("image", args.image);
    put("price_range", args.price_range);
    put("latitude", args.latitude);
    put("longitude", args.longitude);
    put("area_served", args.area_served);
    put("has_map", args.map_url);
    put("serves_cuisine", args.cuisine);
    put("accepts_reservations", args.reservations.as_deref().map(reservation_form_value).transpose()?);
    put("menu_url", args.menu_url);

    if !args.hours.is_empty() {
        values.insert("opening_hours".to_string(), Value::Object(parse_hours_flags(&args.hours)?));
    }

    Ok(values)
}

fn reservation_form_value(value: &str) -> Result<String> {
    match value.to_lowercase().as_str() {
        "yes" | "y" | "true" => Ok("True".to_string()),
        "no" | "n" | "false" => Ok("False".to_string()),
        "" | "unset" => Ok(String::new()),
        _ => Err(miette::miette!(
            "Invalid reservations value '{}' (expected yes or no)",
            value
        )),
    }
}

fn parse_hours_flags(flags: &[String]) -> Result<Map<String, Value>> {
    let mut days = Map::new();
    for flag in flags {
        let (key, text) = flag
            .split_once('=')
            .ok_or_else(|| miette::miette!("Invalid --hours '{}' (expected DAY=TEXT)", flag))?;
        let day = Weekday::from_key(key.trim()).ok_or_else(|| {
            miette::miette!(
                "Unknown day '{}' (expected one of {})",
                key,
                Weekday::ALL.map(|d| d.key()).join(", ")
            )
        })?;
        days.insert(day.key().to_string(), Value::String(text.to_string()));
    }
    Ok(days)
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let config = load_config(global);
    let store = open_store(&config);
    let locations = load_locations(&store)?;

    if args.ids || global.quiet {
        for id in locations.keys() {
            println!("{}", id);
        }
        return Ok(());
    }

    if locations.is_empty() {
        println!("No locations found.");
        return Ok(());
    }

    println!("{}", location_table(&locations));
    println!();
    println!(
        "{} location(s) found. Use {} to see the JSON-LD.",
        style(locations.len()).cyan(),
        style("lss location show <ID>").yellow()
    );
    Ok(())
}

fn location_table(locations: &Locations) -> String {
    let mut builder = Builder::default();
    builder.push_record(["ID", "NAME", "TYPE", "CITY", "HOURS", "STATUS"]);

    for (id, record) in locations {
        let business_type = if record.business_type.is_empty() {
            DEFAULT_BUSINESS_TYPE
        } else {
            record.business_type.as_str()
        };
        let days_set = Weekday::ALL
            .iter()
            .filter(|day| !record.opening_hours.get(**day).trim().is_empty())
            .count();
        builder.push_record([
            id.to_string(),
            truncate_str(&record.name, 30),
            business_type.to_string(),
            truncate_str(&record.locality, 20),
            format!("{}/7", days_set),
            status_text(record),
        ]);
    }

    builder.build().with(Style::sharp()).to_string()
}

fn status_text(record: &LocationRecord) -> String {
    let missing = record.missing_required_fields();
    if missing.is_empty() {
        "ok".to_string()
    } else {
        format!("skipped (missing {})", missing.join(", "))
    }
}

fn run_show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let config = load_config(global);
    let store = open_store(&config);
    let locations = load_locations(&store)?;

    let id = LocationId::parse(&args.id).map_err(|e| miette::miette!("{}", e))?;
    let record = locations
        .get(&id)
        .ok_or_else(|| miette::miette!("No location found with id '{}'", args.id))?;

    if args.raw {
        print!("{}", serde_yml::to_string(record).into_diagnostic()?);
        return Ok(());
    }

    let builder = SchemaBuilder::new(config.build_options());
    let document = builder.build_location(&id, record).ok_or_else(|| {
        miette::miette!(
            help = "set the missing fields with `lss location add` or by editing the settings file",
            "Location '{}' is missing required fields: {}",
            id,
            record.missing_required_fields().join(", ")
        )
    })?;

    println!("{}", to_json_ld(&document)?);
    Ok(())
}

fn run_remove(args: RemoveArgs, global: &GlobalOpts) -> Result<()> {
    let config = load_config(global);
    let store = open_store(&config);
    let mut locations = load_locations(&store)?;

    let id = LocationId::parse(&args.id).map_err(|e| miette::miette!("{}", e))?;
    let Some(record) = locations.get(&id) else {
        return Err(miette::miette!("No location found with id '{}'", args.id));
    };

    if !args.yes {
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(format!("Remove location {} ({})?", id, record.name))
            .default(false)
            .interact()
            .into_diagnostic()?;
        if !confirmed {
            println!("Aborted.");
            return Ok(());
        }
    }

    // shift_remove keeps the remaining locations in output order
    locations.shift_remove(&id);
    save_locations(&store, &locations)?;

    if !global.quiet {
        println!("{} Removed location {}", style("✓").green(), style(&id).cyan());
    }
    Ok(())
}
