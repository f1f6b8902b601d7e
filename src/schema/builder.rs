//! LocalBusiness JSON-LD assembly
//!
//! [`SchemaBuilder`] is a pure function of the location collection and its
//! [`BuildOptions`]: no I/O, no state kept between calls. Locations missing a
//! name or any address part are skipped; malformed optional fields are
//! dropped. Building never fails.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::identity::LocationId;
use crate::entities::business_type::DEFAULT_BUSINESS_TYPE;
use crate::entities::location::{LocationRecord, Locations};
use crate::schema::hours::{opening_hours_specification, OpeningHoursGroup};

pub const SCHEMA_CONTEXT: &str = "https://schema.org";

/// How `acceptsReservations` is written out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStyle {
    /// JSON `true` / `false`
    #[default]
    Boolean,
    /// The strings `"True"` / `"False"` older consumers expect
    Legacy,
}

impl fmt::Display for ReservationStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReservationStyle::Boolean => write!(f, "boolean"),
            ReservationStyle::Legacy => write!(f, "legacy"),
        }
    }
}

impl FromStr for ReservationStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "boolean" | "bool" => Ok(ReservationStyle::Boolean),
            "legacy" | "string" => Ok(ReservationStyle::Legacy),
            _ => Err(format!("Unknown reservation style: {} (expected boolean or legacy)", s)),
        }
    }
}

/// Host-supplied inputs that are not part of a location
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildOptions {
    /// Site-wide URL used when a location has none of its own
    pub site_url: Option<String>,
    pub reservations: ReservationStyle,
}

impl BuildOptions {
    pub fn with_site_url(mut self, url: impl Into<String>) -> Self {
        self.site_url = Some(url.into());
        self
    }

    pub fn with_reservations(mut self, style: ReservationStyle) -> Self {
        self.reservations = style;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostalAddress {
    #[serde(rename = "@type")]
    kind: &'static str,
    #[serde(rename = "streetAddress")]
    pub street_address: String,
    #[serde(rename = "addressLocality")]
    pub locality: String,
    #[serde(rename = "addressRegion")]
    pub region: String,
    #[serde(rename = "postalCode")]
    pub postal_code: String,
    #[serde(rename = "addressCountry")]
    pub country: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeoCoordinates {
    #[serde(rename = "@type")]
    kind: &'static str,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Place {
    #[serde(rename = "@type")]
    kind: &'static str,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ReservationValue {
    Bool(bool),
    Legacy(&'static str),
}

/// One schema.org LocalBusiness document
///
/// Field order is the key order of the emitted JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocalBusinessSchema {
    #[serde(rename = "@context")]
    context: &'static str,
    #[serde(rename = "@type")]
    pub business_type: String,
    pub name: String,
    pub address: PostalAddress,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telephone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(rename = "priceRange", skip_serializing_if = "Option::is_none")]
    pub price_range: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geo: Option<GeoCoordinates>,
    #[serde(rename = "openingHoursSpecification", skip_serializing_if = "Vec::is_empty")]
    pub opening_hours: Vec<OpeningHoursGroup>,
    #[serde(rename = "areaServed", skip_serializing_if = "Vec::is_empty")]
    pub area_served: Vec<Place>,
    #[serde(rename = "hasMap", skip_serializing_if = "Option::is_none")]
    pub has_map: Option<String>,
    #[serde(rename = "servesCuisine", skip_serializing_if = "Vec::is_empty")]
    pub serves_cuisine: Vec<String>,
    #[serde(rename = "acceptsReservations", skip_serializing_if = "Option::is_none")]
    pub accepts_reservations: Option<ReservationValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub menu: Option<String>,
}

impl LocalBusinessSchema {
    pub fn to_value(&self) -> serde_json::Value {
        // Only strings, finite floats and nested structs: cannot fail
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

fn non_empty_entries(values: &[String]) -> impl Iterator<Item = &String> {
    values.iter().filter(|v| !v.is_empty())
}

/// Builds JSON-LD documents from stored locations
#[derive(Debug, Clone, Default)]
pub struct SchemaBuilder {
    options: BuildOptions,
}

impl SchemaBuilder {
    pub fn new(options: BuildOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    /// Lazily build one document per eligible location, in collection order
    pub fn build<'a>(
        &'a self,
        locations: &'a Locations,
    ) -> impl Iterator<Item = LocalBusinessSchema> + 'a {
        locations
            .iter()
            .filter_map(move |(id, record)| self.build_location(id, record))
    }

    /// Build the document for a single location, `None` if it is ineligible
    pub fn build_location(
        &self,
        id: &LocationId,
        record: &LocationRecord,
    ) -> Option<LocalBusinessSchema> {
        let missing = record.missing_required_fields();
        if !missing.is_empty() {
            tracing::debug!(location = %id, missing = ?missing, "skipping location without required fields");
            return None;
        }

        let food = record.is_food_business();

        Some(LocalBusinessSchema {
            context: SCHEMA_CONTEXT,
            business_type: non_empty(&record.business_type)
                .unwrap_or_else(|| DEFAULT_BUSINESS_TYPE.to_string()),
            name: record.name.clone(),
            address: PostalAddress {
                kind: "PostalAddress",
                street_address: record.street_address.clone(),
                locality: record.locality.clone(),
                region: record.region.clone(),
                postal_code: record.postal_code.clone(),
                country: record.country.clone(),
            },
            telephone: non_empty(&record.telephone),
            url: non_empty(&record.url).or_else(|| {
                self.options
                    .site_url
                    .as_deref()
                    .and_then(non_empty)
            }),
            image: non_empty(&record.image),
            price_range: non_empty(&record.price_range),
            geo: record
                .coordinates()
                .map(|(latitude, longitude)| GeoCoordinates {
                    kind: "GeoCoordinates",
                    latitude,
                    longitude,
                }),
            opening_hours: opening_hours_specification(&record.opening_hours),
            area_served: non_empty_entries(&record.area_served)
                .map(|area| Place {
                    kind: "Place",
                    name: area.clone(),
                })
                .collect(),
            has_map: non_empty(&record.map_url),
            serves_cuisine: if food {
                non_empty_entries(&record.serves_cuisine).cloned().collect()
            } else {
                Vec::new()
            },
            accepts_reservations: if food {
                self.reservation_value(record)
            } else {
                None
            },
            menu: if food { non_empty(&record.menu_url) } else { None },
        })
    }

    fn reservation_value(&self, record: &LocationRecord) -> Option<ReservationValue> {
        let accepts = record.accepts_reservations.as_bool()?;
        Some(match self.options.reservations {
            ReservationStyle::Boolean => ReservationValue::Bool(accepts),
            ReservationStyle::Legacy => {
                ReservationValue::Legacy(if accepts { "True" } else { "False" })
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::location::Reservations;
    use crate::entities::weekday::Weekday;
    use serde_json::json;

    fn id(s: &str) -> LocationId {
        LocationId::parse(s).unwrap()
    }

    fn store(name: &str) -> LocationRecord {
        LocationRecord {
            name: name.to_string(),
            street_address: "12 High St".to_string(),
            locality: "Portland".to_string(),
            region: "OR".to_string(),
            postal_code: "97201".to_string(),
            country: "US".to_string(),
            ..Default::default()
        }
    }

    fn build_all(builder: &SchemaBuilder, locations: &Locations) -> Vec<serde_json::Value> {
        builder.build(locations).map(|s| s.to_value()).collect()
    }

    #[test]
    fn test_minimal_location() {
        let builder = SchemaBuilder::default();
        let doc = builder.build_location(&id("a"), &store("Shop")).unwrap();
        assert_eq!(
            doc.to_value(),
            json!({
                "@context": "https://schema.org",
                "@type": "LocalBusiness",
                "name": "Shop",
                "address": {
                    "@type": "PostalAddress",
                    "streetAddress": "12 High St",
                    "addressLocality": "Portland",
                    "addressRegion": "OR",
                    "postalCode": "97201",
                    "addressCountry": "US"
                }
            })
        );
    }

    #[test]
    fn test_each_required_field_skips_location() {
        let builder = SchemaBuilder::default();
        let clears: [fn(&mut LocationRecord); 6] = [
            |r| r.name.clear(),
            |r| r.street_address.clear(),
            |r| r.locality.clear(),
            |r| r.region.clear(),
            |r| r.postal_code.clear(),
            |r| r.country.clear(),
        ];
        for clear in clears {
            let mut record = store("Shop");
            clear(&mut record);
            assert!(builder.build_location(&id("a"), &record).is_none());
        }
    }

    #[test]
    fn test_collection_order_and_skips() {
        let mut locations = Locations::new();
        locations.insert(id("first"), store("First"));
        locations.insert(id("broken"), LocationRecord::default());
        locations.insert(id("second"), store("Second"));

        let builder = SchemaBuilder::default();
        let names: Vec<String> = builder.build(&locations).map(|d| d.name).collect();
        assert_eq!(names, vec!["First", "Second"]);
    }

    #[test]
    fn test_empty_collection() {
        let builder = SchemaBuilder::default();
        assert_eq!(builder.build(&Locations::new()).count(), 0);
    }

    #[test]
    fn test_business_type_passthrough() {
        let mut record = store("Books");
        record.business_type = "BookStore".to_string();
        let doc = SchemaBuilder::default()
            .build_location(&id("a"), &record)
            .unwrap();
        assert_eq!(doc.to_value()["@type"], "BookStore");
    }

    #[test]
    fn test_url_falls_back_to_site_url() {
        let builder = SchemaBuilder::new(BuildOptions::default().with_site_url("https://example.com"));
        let mut record = store("Shop");
        let doc = builder.build_location(&id("a"), &record).unwrap();
        assert_eq!(doc.url.as_deref(), Some("https://example.com"));

        record.url = "https://example.com/shop".to_string();
        let doc = builder.build_location(&id("a"), &record).unwrap();
        assert_eq!(doc.url.as_deref(), Some("https://example.com/shop"));
    }

    #[test]
    fn test_no_url_without_site_url() {
        let doc = SchemaBuilder::default()
            .build_location(&id("a"), &store("Shop"))
            .unwrap();
        assert!(doc.to_value().get("url").is_none());
    }

    #[test]
    fn test_geo_requires_both_coordinates() {
        let builder = SchemaBuilder::default();
        let mut record = store("Shop");
        record.latitude = Some(45.52);
        let doc = builder.build_location(&id("a"), &record).unwrap();
        assert!(doc.to_value().get("geo").is_none());

        record.longitude = Some(-122.68);
        let doc = builder.build_location(&id("a"), &record).unwrap();
        assert_eq!(
            doc.to_value()["geo"],
            json!({"@type": "GeoCoordinates", "latitude": 45.52, "longitude": -122.68})
        );
    }

    #[test]
    fn test_stored_blank_form_values() {
        let record: LocationRecord = serde_json::from_value(json!({
            "name": "Noodle Bar",
            "type": "Restaurant",
            "address_street": "12 High St",
            "address_locality": "Portland",
            "address_region": "OR",
            "address_postalcode": "97201",
            "address_country": "US",
            "latitude": 0.0,
            "longitude": 0.0,
            "accepts_reservations": "yes"
        }))
        .unwrap();

        let value = SchemaBuilder::default()
            .build_location(&id("a"), &record)
            .unwrap()
            .to_value();
        assert!(value.get("geo").is_none());
        assert_eq!(value["acceptsReservations"], json!(true));
    }

    #[test]
    fn test_area_served_drops_empties() {
        let builder = SchemaBuilder::default();
        let mut record = store("Shop");
        record.area_served = vec!["Portland".to_string(), String::new(), "Salem".to_string()];
        let value = builder.build_location(&id("a"), &record).unwrap().to_value();
        assert_eq!(
            value["areaServed"],
            json!([
                {"@type": "Place", "name": "Portland"},
                {"@type": "Place", "name": "Salem"}
            ])
        );

        record.area_served = vec![String::new()];
        let value = builder.build_location(&id("a"), &record).unwrap().to_value();
        assert!(value.get("areaServed").is_none());
    }

    #[test]
    fn test_optional_passthroughs() {
        let mut record = store("Shop");
        record.telephone = "+1 503 555 0100".to_string();
        record.image = "https://example.com/logo.png".to_string();
        record.price_range = "$$".to_string();
        record.map_url = "https://maps.example.com/?q=shop".to_string();
        let value = SchemaBuilder::default()
            .build_location(&id("a"), &record)
            .unwrap()
            .to_value();
        assert_eq!(value["telephone"], "+1 503 555 0100");
        assert_eq!(value["image"], "https://example.com/logo.png");
        assert_eq!(value["priceRange"], "$$");
        assert_eq!(value["hasMap"], "https://maps.example.com/?q=shop");
    }

    #[test]
    fn test_opening_hours_absent_when_nothing_parses() {
        let mut record = store("Shop");
        record.opening_hours.set(Weekday::Monday, "9-5");
        let value = SchemaBuilder::default()
            .build_location(&id("a"), &record)
            .unwrap()
            .to_value();
        assert!(value.get("openingHoursSpecification").is_none());
    }

    #[test]
    fn test_opening_hours_grouped() {
        let mut record = store("Shop");
        record.opening_hours.set(Weekday::Monday, "09:00-17:00");
        record.opening_hours.set(Weekday::Tuesday, "09:00-17:00");
        record.opening_hours.set(Weekday::Wednesday, "10:00-14:00");
        let value = SchemaBuilder::default()
            .build_location(&id("a"), &record)
            .unwrap()
            .to_value();
        assert_eq!(
            value["openingHoursSpecification"],
            json!([
                {
                    "@type": "OpeningHoursSpecification",
                    "dayOfWeek": ["https://schema.org/Monday", "https://schema.org/Tuesday"],
                    "opens": "09:00",
                    "closes": "17:00"
                },
                {
                    "@type": "OpeningHoursSpecification",
                    "dayOfWeek": ["https://schema.org/Wednesday"],
                    "opens": "10:00",
                    "closes": "14:00"
                }
            ])
        );
    }

    fn food_fields(mut record: LocationRecord) -> LocationRecord {
        record.serves_cuisine = vec!["Thai".to_string(), String::new()];
        record.accepts_reservations = Reservations::Accepts;
        record.menu_url = "https://example.com/menu".to_string();
        record
    }

    #[test]
    fn test_food_fields_for_food_types() {
        let mut record = food_fields(store("Noodle Bar"));
        record.business_type = "Restaurant".to_string();
        let value = SchemaBuilder::default()
            .build_location(&id("a"), &record)
            .unwrap()
            .to_value();
        assert_eq!(value["servesCuisine"], json!(["Thai"]));
        assert_eq!(value["acceptsReservations"], json!(true));
        assert_eq!(value["menu"], "https://example.com/menu");
    }

    #[test]
    fn test_food_fields_hidden_for_other_types() {
        for business_type in ["BookStore", ""] {
            let mut record = food_fields(store("Books"));
            record.business_type = business_type.to_string();
            let value = SchemaBuilder::default()
                .build_location(&id("a"), &record)
                .unwrap()
                .to_value();
            assert!(value.get("servesCuisine").is_none());
            assert!(value.get("acceptsReservations").is_none());
            assert!(value.get("menu").is_none());
        }
    }

    #[test]
    fn test_reservations_styles() {
        let mut record = store("Bakery");
        record.business_type = "Bakery".to_string();
        record.accepts_reservations = Reservations::Declines;

        let value = SchemaBuilder::default()
            .build_location(&id("a"), &record)
            .unwrap()
            .to_value();
        assert_eq!(value["acceptsReservations"], json!(false));

        let legacy = SchemaBuilder::new(
            BuildOptions::default().with_reservations(ReservationStyle::Legacy),
        );
        let value = legacy.build_location(&id("a"), &record).unwrap().to_value();
        assert_eq!(value["acceptsReservations"], json!("False"));

        record.accepts_reservations = Reservations::Unset;
        let value = legacy.build_location(&id("a"), &record).unwrap().to_value();
        assert!(value.get("acceptsReservations").is_none());
    }

    #[test]
    fn test_empty_cuisine_list_omitted() {
        let mut record = store("Pub");
        record.business_type = "BarOrPub".to_string();
        record.serves_cuisine = vec![String::new(), String::new()];
        let value = SchemaBuilder::default()
            .build_location(&id("a"), &record)
            .unwrap()
            .to_value();
        assert!(value.get("servesCuisine").is_none());
    }

    #[test]
    fn test_key_order() {
        let mut record = food_fields(store("Cafe"));
        record.business_type = "CafeOrCoffeeShop".to_string();
        record.telephone = "555".to_string();
        record.latitude = Some(1.0);
        record.longitude = Some(2.0);
        record.opening_hours.set(Weekday::Monday, "08:00-16:00");
        record.area_served = vec!["Downtown".to_string()];
        record.map_url = "https://maps.example.com".to_string();
        let builder = SchemaBuilder::new(BuildOptions::default().with_site_url("https://example.com"));
        let value = builder.build_location(&id("a"), &record).unwrap().to_value();
        let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec![
                "@context",
                "@type",
                "name",
                "address",
                "telephone",
                "url",
                "geo",
                "openingHoursSpecification",
                "areaServed",
                "hasMap",
                "servesCuisine",
                "acceptsReservations",
                "menu",
            ]
        );
    }

    #[test]
    fn test_build_is_deterministic() {
        let mut locations = Locations::new();
        let mut record = food_fields(store("Cafe"));
        record.business_type = "Restaurant".to_string();
        record.opening_hours.set(Weekday::Friday, "09:00-12:00, 13:00-22:00");
        record.opening_hours.set(Weekday::Saturday, "13:00-22:00");
        locations.insert(id("a"), record);
        locations.insert(id("b"), store("Shop"));

        let builder = SchemaBuilder::default();
        let first = build_all(&builder, &locations);
        let second = build_all(&builder, &locations);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_reservation_style_parse() {
        assert_eq!("legacy".parse::<ReservationStyle>().unwrap(), ReservationStyle::Legacy);
        assert_eq!("Boolean".parse::<ReservationStyle>().unwrap(), ReservationStyle::Boolean);
        assert!("yes".parse::<ReservationStyle>().is_err());
    }
}
