//! Cleaning of raw location input before it is stored
//!
//! Form submissions and `lss location add` both arrive as loosely typed
//! JSON. [`sanitize_locations`] turns that into typed records: ids become
//! safe keys, text loses markup and line breaks, URLs must be http(s).

use serde_json::{Map, Value};

use crate::core::identity::LocationId;
use crate::entities::location::{coordinate_from_number, parse_coordinate, split_list, LocationRecord, Locations, OpeningHours, Reservations};
use crate::entities::weekday::Weekday;

/// Sanitize a raw id → fields mapping into a location collection
///
/// Entries whose id sanitizes to nothing, or whose value is not a mapping,
/// are dropped. Unknown field keys are ignored.
pub fn sanitize_locations(raw: &Value) -> Locations {
    let mut locations = Locations::new();

    let Some(entries) = raw.as_object() else {
        return locations;
    };

    for (key, fields) in entries {
        let Ok(id) = LocationId::parse(key) else {
            tracing::debug!(key = %key, "dropping location with empty id");
            continue;
        };
        let Some(fields) = fields.as_object() else {
            tracing::debug!(id = %id, "dropping location that is not a mapping");
            continue;
        };
        locations.insert(id, sanitize_location(fields));
    }

    locations
}

/// Sanitize one location's fields
pub fn sanitize_location(fields: &Map<String, Value>) -> LocationRecord {
    let text = |key: &str| fields.get(key).map(sanitize_text_value).unwrap_or_default();
    let url = |key: &str| fields.get(key).map(sanitize_url_value).unwrap_or_default();
    let list = |key: &str| fields.get(key).map(sanitize_list).unwrap_or_default();
    let coordinate = |key: &str| fields.get(key).and_then(coordinate_value);

    LocationRecord {
        name: text("name"),
        business_type: text("type"),
        street_address: text("address_street"),
        locality: text("address_locality"),
        region: text("address_region"),
        postal_code: text("address_postalcode"),
        country: text("address_country"),
        telephone: text("telephone"),
        url: url("url"),
        image: url("image"),
        price_range: text("price_range"),
        latitude: coordinate("latitude"),
        longitude: coordinate("longitude"),
        opening_hours: fields
            .get("opening_hours")
            .map(sanitize_hours)
            .unwrap_or_default(),
        area_served: list("area_served"),
        map_url: url("has_map"),
        serves_cuisine: list("serves_cuisine"),
        accepts_reservations: fields
            .get("accepts_reservations")
            .map(reservations_value)
            .unwrap_or_default(),
        menu_url: url("menu_url"),
    }
}

/// Strip tags, fold line breaks and runs of whitespace, trim
pub fn sanitize_text(raw: &str) -> String {
    let mut stripped = String::with_capacity(raw.len());
    let mut in_tag = false;
    let mut chars = raw.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '<' if !in_tag && chars.peek().is_some_and(|n| n.is_ascii_alphabetic() || matches!(n, '/' | '!' | '?')) => {
                in_tag = true;
            }
            '>' if in_tag => in_tag = false,
            _ if in_tag => {}
            _ => stripped.push(c),
        }
    }

    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Keep a URL only when it is absolute http(s); whitespace is removed
pub fn sanitize_url(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control() && !matches!(c, '<' | '>' | '"' | '`'))
        .collect();

    let lower = cleaned.to_ascii_lowercase();
    let has_host = |scheme: &str| lower.strip_prefix(scheme).is_some_and(|rest| !rest.is_empty());
    if has_host("http://") || has_host("https://") {
        cleaned
    } else {
        String::new()
    }
}

fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn sanitize_text_value(value: &Value) -> String {
    value_text(value).map(|s| sanitize_text(&s)).unwrap_or_default()
}

fn sanitize_url_value(value: &Value) -> String {
    value_text(value).map(|s| sanitize_url(&s)).unwrap_or_default()
}

fn sanitize_list(value: &Value) -> Vec<String> {
    let items: Vec<String> = match value {
        Value::Array(items) => items.iter().filter_map(value_text).collect(),
        other => value_text(other).map(|s| split_list(&s)).unwrap_or_default(),
    };

    items
        .iter()
        .map(|item| sanitize_text(item))
        .filter(|item| !item.is_empty())
        .collect()
}

fn coordinate_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().and_then(coordinate_from_number),
        Value::String(s) => parse_coordinate(s),
        _ => None,
    }
}

fn sanitize_hours(value: &Value) -> OpeningHours {
    let Some(days) = value.as_object() else {
        return OpeningHours::default();
    };

    Weekday::ALL
        .iter()
        .filter_map(|day| {
            let text = days.get(day.key()).map(sanitize_text_value)?;
            Some((day.key(), text))
        })
        .collect()
}

fn reservations_value(value: &Value) -> Reservations {
    match value {
        Value::Bool(true) => Reservations::Accepts,
        Value::Bool(false) => Reservations::Declines,
        Value::String(s) => Reservations::from_form_value(s),
        Value::Number(n) => n.as_f64().map(Reservations::from_number).unwrap_or_default(),
        _ => Reservations::Unset,
    }
}
