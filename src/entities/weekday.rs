//! Days of the week used by opening hours
//!
//! This table is the only place the day-key ordering lives. The wizard,
//! the sanitizer and the schema builder all iterate [`Weekday::ALL`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Base of the schema.org day-of-week URIs
pub const SCHEMA_DAY_BASE: &str = "https://schema.org/";

/// A day of the week, in Monday-first order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Weekday {
    #[serde(rename = "Mo")]
    Monday,
    #[serde(rename = "Tu")]
    Tuesday,
    #[serde(rename = "We")]
    Wednesday,
    #[serde(rename = "Th")]
    Thursday,
    #[serde(rename = "Fr")]
    Friday,
    #[serde(rename = "Sa")]
    Saturday,
    #[serde(rename = "Su")]
    Sunday,
}

/// (day, storage key, schema.org day name)
const DAYS: [(Weekday, &str, &str); 7] = [
    (Weekday::Monday, "Mo", "Monday"),
    (Weekday::Tuesday, "Tu", "Tuesday"),
    (Weekday::Wednesday, "We", "Wednesday"),
    (Weekday::Thursday, "Th", "Thursday"),
    (Weekday::Friday, "Fr", "Friday"),
    (Weekday::Saturday, "Sa", "Saturday"),
    (Weekday::Sunday, "Su", "Sunday"),
];

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    fn entry(self) -> &'static (Weekday, &'static str, &'static str) {
        &DAYS[self as usize]
    }

    /// Two-letter key used in stored opening hours ("Mo", "Tu", ...)
    pub fn key(self) -> &'static str {
        self.entry().1
    }

    /// Full English / schema.org day name ("Monday", ...)
    pub fn name(self) -> &'static str {
        self.entry().2
    }

    /// schema.org URI, e.g. `https://schema.org/Monday`
    pub fn schema_uri(self) -> String {
        format!("{}{}", SCHEMA_DAY_BASE, self.name())
    }

    /// Look up a day by its storage key (exact match)
    pub fn from_key(key: &str) -> Option<Self> {
        DAYS.iter().find(|(_, k, _)| *k == key).map(|(d, _, _)| *d)
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
