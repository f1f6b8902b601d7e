//! Interactive wizard for location creation
//!
//! Prompts for every location field in form order and returns the raw
//! values, which callers pass through the sanitizer like a form submission.
//! Cuisine, reservations and menu are only asked for food business types.

use console::style;
use dialoguer::{theme::ColorfulTheme, Input, Select};
use miette::{IntoDiagnostic, Result};
use serde_json::{Map, Value};

use crate::entities::business_type::{is_food_type, CATALOG, DEFAULT_BUSINESS_TYPE};
use crate::entities::weekday::Weekday;

/// A wizard for creating locations
pub struct LocationWizard {
    theme: ColorfulTheme,
}

/// How a field is prompted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldKind {
    Text { required: bool },
    Url,
    Coordinate,
    List,
    BusinessType,
    Hours,
    Reservations,
}

/// One prompted field
#[derive(Debug)]
struct FieldInfo {
    key: &'static str,
    label: &'static str,
    kind: FieldKind,
    food_only: bool,
}

const fn field(key: &'static str, label: &'static str, kind: FieldKind) -> FieldInfo {
    FieldInfo {
        key,
        label,
        kind,
        food_only: false,
    }
}

const fn food_field(key: &'static str, label: &'static str, kind: FieldKind) -> FieldInfo {
    FieldInfo {
        key,
        label,
        kind,
        food_only: true,
    }
}

/// Fields in the order the settings form shows them
const FIELDS: &[FieldInfo] = &[
    field("name", "Business name", FieldKind::Text { required: true }),
    field("type", "Business type", FieldKind::BusinessType),
    field("address_street", "Street address", FieldKind::Text { required: true }),
    field("address_locality", "City", FieldKind::Text { required: true }),
    field("address_region", "State / region", FieldKind::Text { required: true }),
    field("address_postalcode", "Postal code", FieldKind::Text { required: true }),
    field("address_country", "Country", FieldKind::Text { required: true }),
    field("telephone", "Telephone", FieldKind::Text { required: false }),
    field("url", "Location URL", FieldKind::Url),
    field("image", "Image URL", FieldKind::Url),
    field("price_range", "Price range (e.g. $$)", FieldKind::Text { required: false }),
    field("latitude", "Latitude", FieldKind::Coordinate),
    field("longitude", "Longitude", FieldKind::Coordinate),
    field("opening_hours", "Opening hours", FieldKind::Hours),
    field("area_served", "Areas served", FieldKind::List),
    field("has_map", "Map URL", FieldKind::Url),
    food_field("serves_cuisine", "Cuisine", FieldKind::List),
    food_field("accepts_reservations", "Accepts reservations", FieldKind::Reservations),
    food_field("menu_url", "Menu URL", FieldKind::Url),
];

const RESERVATION_CHOICES: &[(&str, &str)] = &[("", "Not specified"), ("True", "Yes"), ("False", "No")];

impl LocationWizard {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }

    /// Prompt for all fields; values in `prefill` become the defaults
    pub fn run(&self, prefill: &Map<String, Value>) -> Result<Map<String, Value>> {
        println!();
        println!("{} Creating new location", style("◆").cyan());
        println!("{}", style("─".repeat(50)).dim());
        println!();

        let mut values = Map::new();

        for field in FIELDS {
            if field.food_only {
                let business_type = values.get("type").and_then(Value::as_str).unwrap_or("");
                if !is_food_type(business_type) {
                    continue;
                }
            }

            let value = self.prompt_field(field, prefill.get(field.key))?;
            if let Some(v) = value {
                values.insert(field.key.to_string(), v);
            }
        }

        println!();
        println!("{} Values collected!", style("✓").green());

        Ok(values)
    }

    /// Prompt the user for a field value
    fn prompt_field(&self, field: &FieldInfo, default: Option<&Value>) -> Result<Option<Value>> {
        let default_str = default.map(display_value).unwrap_or_default();

        match field.kind {
            FieldKind::BusinessType => {
                let choices = type_choices();
                let wanted = if default_str.is_empty() {
                    DEFAULT_BUSINESS_TYPE
                } else {
                    default_str.as_str()
                };
                let default_idx = choices.iter().position(|(t, _)| *t == wanted).unwrap_or(0);
                let labels: Vec<&str> = choices.iter().map(|(_, l)| l.as_str()).collect();

                let selection = Select::with_theme(&self.theme)
                    .with_prompt(field.label)
                    .items(&labels)
                    .default(default_idx)
                    .max_length(15)
                    .interact()
                    .into_diagnostic()?;

                Ok(Some(Value::String(choices[selection].0.to_string())))
            }

            FieldKind::Reservations => {
                let labels: Vec<&str> = RESERVATION_CHOICES.iter().map(|(_, l)| *l).collect();
                let default_idx = RESERVATION_CHOICES
                    .iter()
                    .position(|(v, _)| *v == default_str)
                    .unwrap_or(0);

                let selection = Select::with_theme(&self.theme)
                    .with_prompt(field.label)
                    .items(&labels)
                    .default(default_idx)
                    .interact()
                    .into_diagnostic()?;

                Ok(Some(Value::String(RESERVATION_CHOICES[selection].0.to_string())))
            }

            FieldKind::Hours => {
                let existing = default.and_then(Value::as_object);
                println!(
                    "{} {}",
                    style(field.label).bold(),
                    style("(HH:MM-HH:MM, several ranges separated by commas, or 'closed')").dim()
                );

                let mut days = Map::new();
                for day in Weekday::ALL {
                    let day_default = existing
                        .and_then(|m| m.get(day.key()))
                        .map(display_value)
                        .unwrap_or_default();
                    let value = self.input(day.name(), &day_default, false)?;
                    if !value.is_empty() {
                        days.insert(day.key().to_string(), Value::String(value));
                    }
                }
                Ok((!days.is_empty()).then_some(Value::Object(days)))
            }

            FieldKind::List => {
                let prompt = format!("{} {}", field.label, style("(comma-separated)").dim());
                let value = self.input(&prompt, &default_str, false)?;
                Ok((!value.is_empty()).then_some(Value::String(value)))
            }

            FieldKind::Text { required } => {
                let value = self.input(field.label, &default_str, required)?;
                Ok((!value.is_empty()).then_some(Value::String(value)))
            }

            FieldKind::Url | FieldKind::Coordinate => {
                let value = self.input(field.label, &default_str, false)?;
                Ok((!value.is_empty()).then_some(Value::String(value)))
            }
        }
    }

    fn input(&self, prompt: &str, default: &str, required: bool) -> Result<String> {
        let mut input = Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty(!required);
        if !default.is_empty() {
            input = input.default(default.to_string());
        }
        input.interact_text().into_diagnostic()
    }
}

impl Default for LocationWizard {
    fn default() -> Self {
        Self::new()
    }
}

/// Business type choices as (type, "Group › Label")
fn type_choices() -> Vec<(&'static str, String)> {
    CATALOG
        .iter()
        .flat_map(|group| {
            group
                .types
                .iter()
                .map(move |(t, label)| (*t, format!("{} › {}", group.label, label)))
        })
        .collect()
}

/// Text shown as a prompt default for a prefilled value
fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(display_value)
            .collect::<Vec<_>>()
            .join(", "),
        Value::Null => String::new(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        other => other.to_string(),
    }
}
