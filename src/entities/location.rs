//! Location entity type

use indexmap::IndexMap;
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

use crate::core::identity::LocationId;
use crate::entities::business_type::is_food_type;
use crate::entities::weekday::Weekday;

/// All locations, keyed by id, in the order the operator entered them
pub type Locations = IndexMap<LocationId, LocationRecord>;

/// Whether a (food) business takes reservations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Reservations {
    #[default]
    Unset,
    Accepts,
    Declines,
}

impl Reservations {
    pub fn is_unset(&self) -> bool {
        matches!(self, Reservations::Unset)
    }

    /// Boolean view, `None` when unset
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Reservations::Unset => None,
            Reservations::Accepts => Some(true),
            Reservations::Declines => Some(false),
        }
    }

    /// Map the stored form value: "" is unset, "False" declines, anything else accepts
    pub fn from_form_value(value: &str) -> Self {
        match value.trim() {
            "" => Reservations::Unset,
            "False" => Reservations::Declines,
            _ => Reservations::Accepts,
        }
    }

    /// Numeric storage: zero is unset, anything else accepts
    pub fn from_number(value: f64) -> Self {
        if value == 0.0 || value.is_nan() {
            Reservations::Unset
        } else {
            Reservations::Accepts
        }
    }

    /// Form value written back to storage
    pub fn form_value(&self) -> &'static str {
        match self {
            Reservations::Unset => "",
            Reservations::Accepts => "True",
            Reservations::Declines => "False",
        }
    }
}

impl fmt::Display for Reservations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reservations::Unset => write!(f, "unset"),
            Reservations::Accepts => write!(f, "yes"),
            Reservations::Declines => write!(f, "no"),
        }
    }
}

impl Serialize for Reservations {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.form_value())
    }
}

impl<'de> Deserialize<'de> for Reservations {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ReservationsVisitor;

        impl<'de> Visitor<'de> for ReservationsVisitor {
            type Value = Reservations;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("\"True\", \"False\", \"\", a boolean, a number or null")
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                Ok(Reservations::from_number(v as f64))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                Ok(Reservations::from_number(v as f64))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
                Ok(Reservations::from_number(v))
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
                Ok(if v {
                    Reservations::Accepts
                } else {
                    Reservations::Declines
                })
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                Ok(Reservations::from_form_value(v))
            }

            fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(Reservations::Unset)
            }

            fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(Reservations::Unset)
            }
        }

        deserializer.deserialize_any(ReservationsVisitor)
    }
}

/// Raw opening hours text per day key ("Mo" .. "Su")
///
/// Kept as stored so keys outside the weekday table survive a load/save
/// round trip; readers only ever look up the seven known keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OpeningHours(
    #[serde(deserialize_with = "lenient::string_map")] IndexMap<String, String>,
);

impl OpeningHours {
    /// Raw text for a day, "" when not set
    pub fn get(&self, day: Weekday) -> &str {
        self.0.get(day.key()).map(String::as_str).unwrap_or("")
    }

    pub fn set(&mut self, day: Weekday, value: impl Into<String>) {
        self.0.insert(day.key().to_string(), value.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.values().all(|v| v.trim().is_empty())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for OpeningHours {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// One business location as stored in the settings document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    /// Business name
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,

    /// schema.org type, e.g. "Restaurant" (empty means LocalBusiness)
    #[serde(rename = "type", default, deserialize_with = "lenient::string")]
    pub business_type: String,

    #[serde(rename = "address_street", default, deserialize_with = "lenient::string")]
    pub street_address: String,

    #[serde(rename = "address_locality", default, deserialize_with = "lenient::string")]
    pub locality: String,

    #[serde(rename = "address_region", default, deserialize_with = "lenient::string")]
    pub region: String,

    #[serde(rename = "address_postalcode", default, deserialize_with = "lenient::string")]
    pub postal_code: String,

    #[serde(rename = "address_country", default, deserialize_with = "lenient::string")]
    pub country: String,

    #[serde(default, skip_serializing_if = "String::is_empty", deserialize_with = "lenient::string")]
    pub telephone: String,

    /// Location page; the site URL is used when empty
    #[serde(default, skip_serializing_if = "String::is_empty", deserialize_with = "lenient::string")]
    pub url: String,

    #[serde(default, skip_serializing_if = "String::is_empty", deserialize_with = "lenient::string")]
    pub image: String,

    /// Free text such as "$$"
    #[serde(default, skip_serializing_if = "String::is_empty", deserialize_with = "lenient::string")]
    pub price_range: String,

    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::coordinate")]
    pub latitude: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::coordinate")]
    pub longitude: Option<f64>,

    #[serde(default, skip_serializing_if = "OpeningHours::is_empty")]
    pub opening_hours: OpeningHours,

    #[serde(default, skip_serializing_if = "Vec::is_empty", deserialize_with = "lenient::string_list")]
    pub area_served: Vec<String>,

    /// Link to a map of the location
    #[serde(rename = "has_map", default, skip_serializing_if = "String::is_empty", deserialize_with = "lenient::string")]
    pub map_url: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty", deserialize_with = "lenient::string_list")]
    pub serves_cuisine: Vec<String>,

    #[serde(default, skip_serializing_if = "Reservations::is_unset")]
    pub accepts_reservations: Reservations,

    #[serde(default, skip_serializing_if = "String::is_empty", deserialize_with = "lenient::string")]
    pub menu_url: String,
}

impl LocationRecord {
    /// Names of the required fields that are empty
    ///
    /// A location with any of these missing produces no schema output.
    pub fn missing_required_fields(&self) -> Vec<&'static str> {
        [
            ("name", &self.name),
            ("address_street", &self.street_address),
            ("address_locality", &self.locality),
            ("address_region", &self.region),
            ("address_postalcode", &self.postal_code),
            ("address_country", &self.country),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(field, _)| field)
        .collect()
    }

    pub fn is_eligible(&self) -> bool {
        self.missing_required_fields().is_empty()
    }

    pub fn is_food_business(&self) -> bool {
        is_food_type(&self.business_type)
    }

    /// Both coordinates, when both are present
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        Some((self.latitude?, self.longitude?))
    }
}

/// Deserializers that accept what loosely-typed settings documents contain:
/// nulls for empty strings, numbers where text was expected, numeric strings
/// for coordinates, and comma-separated strings for lists.
mod lenient {
    use indexmap::IndexMap;
    use serde::de::{self, Deserializer, MapAccess, SeqAccess, Visitor};
    use std::fmt;

    struct StringVisitor;

    impl<'de> Visitor<'de> for StringVisitor {
        type Value = String;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a string, number, boolean or null")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            Ok(v.to_string())
        }

        fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
            Ok(v.to_string())
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
            Ok(v.to_string())
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
            Ok(v.to_string())
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
            Ok(v.to_string())
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(String::new())
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(String::new())
        }
    }

    pub fn string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        deserializer.deserialize_any(StringVisitor)
    }

    /// Wrapper so sequence elements go through [`StringVisitor`] too
    struct LenientString(String);

    impl<'de> de::Deserialize<'de> for LenientString {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            string(deserializer).map(LenientString)
        }
    }

    struct ListVisitor;

    impl<'de> Visitor<'de> for ListVisitor {
        type Value = Vec<String>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a list of strings or a comma-separated string")
        }

        fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
            let mut items = Vec::new();
            while let Some(LenientString(item)) = seq.next_element()? {
                items.push(item);
            }
            Ok(items)
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            Ok(super::split_list(v))
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }
    }

    pub fn string_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
        deserializer.deserialize_any(ListVisitor)
    }

    struct MapVisitor;

    impl<'de> Visitor<'de> for MapVisitor {
        type Value = IndexMap<String, String>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a mapping of day keys to opening hours text")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut out = IndexMap::new();
            while let Some((key, LenientString(value))) = map.next_entry::<String, LenientString>()? {
                out.insert(key, value);
            }
            Ok(out)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(IndexMap::new())
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(IndexMap::new())
        }
    }

    pub fn string_map<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<IndexMap<String, String>, D::Error> {
        deserializer.deserialize_any(MapVisitor)
    }

    struct CoordinateVisitor;

    impl<'de> Visitor<'de> for CoordinateVisitor {
        type Value = Option<f64>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a number, a numeric string, an empty string or null")
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
            Ok(super::coordinate_from_number(v))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
            Ok(super::coordinate_from_number(v as f64))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
            Ok(super::coordinate_from_number(v as f64))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            Ok(super::parse_coordinate(v))
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
            deserializer.deserialize_any(CoordinateVisitor)
        }
    }

    pub fn coordinate<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
        deserializer.deserialize_any(CoordinateVisitor)
    }
}

/// Split a comma-separated form value into trimmed entries
///
/// Empty entries are kept; consumers drop them where the output requires it.
pub fn split_list(value: &str) -> Vec<String> {
    if value.trim().is_empty() {
        return Vec::new();
    }
    value.split(',').map(|s| s.trim().to_string()).collect()
}

/// Parse a coordinate typed into a form; non-numeric text means "not set"
pub fn parse_coordinate(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().and_then(coordinate_from_number)
}

/// A stored coordinate; blank form fields are saved as `0`, so zero is "not set"
pub fn coordinate_from_number(value: f64) -> Option<f64> {
    (value.is_finite() && value != 0.0).then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> LocationRecord {
        LocationRecord {
            name: "Corner Cafe".to_string(),
            business_type: "CafeOrCoffeeShop".to_string(),
            street_address: "1 Main St".to_string(),
            locality: "Springfield".to_string(),
            region: "IL".to_string(),
            postal_code: "62701".to_string(),
            country: "US".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_missing_required_fields() {
        let mut loc = complete();
        assert!(loc.is_eligible());

        loc.locality.clear();
        loc.name.clear();
        assert_eq!(loc.missing_required_fields(), vec!["name", "address_locality"]);
        assert!(!loc.is_eligible());
    }

    #[test]
    fn test_business_type_not_required() {
        let mut loc = complete();
        loc.business_type.clear();
        assert!(loc.is_eligible());
        assert!(!loc.is_food_business());
    }

    #[test]
    fn test_deserialize_stored_record() {
        let json = r#"{
            "name": "Corner Cafe",
            "type": "CafeOrCoffeeShop",
            "address_street": "1 Main St",
            "address_locality": "Springfield",
            "address_region": "IL",
            "address_postalcode": 62701,
            "address_country": "US",
            "telephone": null,
            "latitude": "39.78",
            "longitude": -89.65,
            "opening_hours": {"Mo": "09:00-17:00", "Tu": ""},
            "area_served": ["Springfield", ""],
            "serves_cuisine": "Coffee, Pastries",
            "accepts_reservations": "False",
            "unknown_field": "ignored"
        }"#;
        let loc: LocationRecord = serde_json::from_str(json).unwrap();
        assert_eq!(loc.postal_code, "62701");
        assert_eq!(loc.telephone, "");
        assert_eq!(loc.coordinates(), Some((39.78, -89.65)));
        assert_eq!(loc.opening_hours.get(Weekday::Monday), "09:00-17:00");
        assert_eq!(loc.opening_hours.get(Weekday::Sunday), "");
        assert_eq!(loc.area_served, vec!["Springfield", ""]);
        assert_eq!(loc.serves_cuisine, vec!["Coffee", "Pastries"]);
        assert_eq!(loc.accepts_reservations, Reservations::Declines);
    }

    #[test]
    fn test_empty_coordinates_are_absent() {
        let loc: LocationRecord =
            serde_json::from_str(r#"{"latitude": "", "longitude": "abc"}"#).unwrap();
        assert_eq!(loc.latitude, None);
        assert_eq!(loc.longitude, None);
        assert_eq!(loc.coordinates(), None);
    }

    #[test]
    fn test_zero_coordinates_are_absent() {
        let loc: LocationRecord =
            serde_json::from_str(r#"{"latitude": 0.0, "longitude": 0}"#).unwrap();
        assert_eq!(loc.latitude, None);
        assert_eq!(loc.longitude, None);
        assert_eq!(loc.coordinates(), None);

        let loc: LocationRecord =
            serde_json::from_str(r#"{"latitude": "0", "longitude": 12.5}"#).unwrap();
        assert_eq!(loc.longitude, Some(12.5));
        assert_eq!(loc.coordinates(), None);
    }

    #[test]
    fn test_reservations_values() {
        assert_eq!(Reservations::from_form_value("True"), Reservations::Accepts);
        assert_eq!(Reservations::from_form_value("False"), Reservations::Declines);
        assert_eq!(Reservations::from_form_value(""), Reservations::Unset);
        assert_eq!(Reservations::from_form_value("  "), Reservations::Unset);
        assert_eq!(Reservations::from_form_value("yes"), Reservations::Accepts);
        assert_eq!(Reservations::from_form_value("false"), Reservations::Accepts);

        let loc: LocationRecord =
            serde_json::from_str(r#"{"accepts_reservations": true}"#).unwrap();
        assert_eq!(loc.accepts_reservations.as_bool(), Some(true));

        let loc: LocationRecord =
            serde_json::from_str(r#"{"accepts_reservations": 1}"#).unwrap();
        assert_eq!(loc.accepts_reservations, Reservations::Accepts);

        let loc: LocationRecord =
            serde_json::from_str(r#"{"accepts_reservations": 0}"#).unwrap();
        assert_eq!(loc.accepts_reservations, Reservations::Unset);
    }

    #[test]
    fn test_serialize_skips_empty_optionals() {
        let yaml = serde_yml::to_string(&complete()).unwrap();
        assert!(yaml.contains("type: CafeOrCoffeeShop"));
        assert!(yaml.contains("address_street: 1 Main St"));
        assert!(!yaml.contains("telephone"));
        assert!(!yaml.contains("accepts_reservations"));
        assert!(!yaml.contains("opening_hours"));
    }

    #[test]
    fn test_split_list() {
        assert_eq!(split_list("a, b ,c"), vec!["a", "b", "c"]);
        assert_eq!(split_list("a,,b"), vec!["a", "", "b"]);
        assert!(split_list("   ").is_empty());
    }

    #[test]
    fn test_parse_coordinate() {
        assert_eq!(parse_coordinate(" 40.7128 "), Some(40.7128));
        assert_eq!(parse_coordinate("-0.5"), Some(-0.5));
        assert_eq!(parse_coordinate("0"), None);
        assert_eq!(parse_coordinate("0.000"), None);
        assert_eq!(parse_coordinate("north"), None);
        assert_eq!(parse_coordinate("NaN"), None);
    }
}
