//! Opening hours normalization
//!
//! Turns the free-text hours typed for each day into schema.org
//! `OpeningHoursSpecification` groups. Days sharing the same open/close pair
//! are merged into one group; group order and day order follow first
//! appearance, so the result is stable for unchanged input.

use serde::Serialize;

use crate::entities::location::OpeningHours;
use crate::entities::weekday::Weekday;

/// Literal a day can be set to instead of time ranges
pub const CLOSED: &str = "closed";

/// Time used for both opens and closes on a closed day
pub const CLOSED_TIME: &str = "00:00";

/// One open/close range on one day
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpeningSlot {
    pub day_uri: String,
    pub opens: String,
    pub closes: String,
}

/// Days that share an open/close pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OpeningHoursGroup {
    #[serde(rename = "@type")]
    kind: &'static str,
    #[serde(rename = "dayOfWeek")]
    pub days: Vec<String>,
    pub opens: String,
    pub closes: String,
}

impl OpeningHoursGroup {
    fn new(opens: String, closes: String) -> Self {
        Self {
            kind: "OpeningHoursSpecification",
            days: Vec::new(),
            opens,
            closes,
        }
    }
}

/// Outcome of parsing one day's text
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DayParse {
    /// (opens, closes) pairs in the order they were typed
    pub ranges: Vec<(String, String)>,
    /// Candidates that were not `HH:MM-HH:MM`
    pub rejected: Vec<String>,
}

/// Split `HH:MM-HH:MM` into its two times
///
/// Only the exact shape is accepted: two digits, colon, two digits, hyphen,
/// and the same again. Values are not range-checked.
pub fn parse_range(candidate: &str) -> Option<(&str, &str)> {
    let b = candidate.as_bytes();
    if b.len() != 11 || b[5] != b'-' {
        return None;
    }
    let (opens, closes) = (&candidate[..5], &candidate[6..]);
    (is_clock(opens) && is_clock(closes)).then_some((opens, closes))
}

fn is_clock(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() == 5
        && b[2] == b':'
        && b[..2].iter().all(u8::is_ascii_digit)
        && b[3..].iter().all(u8::is_ascii_digit)
}

/// Parse the text typed for a single day
///
/// `"closed"` (any case) yields one 00:00-00:00 range. Otherwise the text is
/// split on commas and every well-formed range is kept.
pub fn parse_day(raw: &str) -> DayParse {
    let text = raw.trim();
    let mut parsed = DayParse::default();
    if text.is_empty() {
        return parsed;
    }
    if text.eq_ignore_ascii_case(CLOSED) {
        parsed
            .ranges
            .push((CLOSED_TIME.to_string(), CLOSED_TIME.to_string()));
        return parsed;
    }
    for candidate in text.split(',').map(str::trim) {
        match parse_range(candidate) {
            Some((opens, closes)) => parsed.ranges.push((opens.to_string(), closes.to_string())),
            None => parsed.rejected.push(candidate.to_string()),
        }
    }
    parsed
}

/// Flatten a week of opening hours into slots, Monday first
pub fn collect_slots(hours: &OpeningHours) -> Vec<OpeningSlot> {
    Weekday::ALL
        .iter()
        .flat_map(|day| {
            let uri = day.schema_uri();
            parse_day(hours.get(*day))
                .ranges
                .into_iter()
                .map(move |(opens, closes)| OpeningSlot {
                    day_uri: uri.clone(),
                    opens,
                    closes,
                })
        })
        .collect()
}

/// Merge slots sharing an (opens, closes) pair, keeping first-seen order
pub fn group_slots(slots: Vec<OpeningSlot>) -> Vec<OpeningHoursGroup> {
    let mut groups: Vec<OpeningHoursGroup> = Vec::new();
    for slot in slots {
        let idx = match groups
            .iter()
            .position(|g| g.opens == slot.opens && g.closes == slot.closes)
        {
            Some(idx) => idx,
            None => {
                groups.push(OpeningHoursGroup::new(slot.opens, slot.closes));
                groups.len() - 1
            }
        };
        let group = &mut groups[idx];
        if !group.days.contains(&slot.day_uri) {
            group.days.push(slot.day_uri);
        }
    }
    groups
}

/// Opening hours specification groups for a location (empty when none parse)
pub fn opening_hours_specification(hours: &OpeningHours) -> Vec<OpeningHoursGroup> {
    group_slots(collect_slots(hours))
}

/// Candidates that were dropped, per day, for reporting
pub fn rejected_ranges(hours: &OpeningHours) -> Vec<(Weekday, String)> {
    Weekday::ALL
        .iter()
        .flat_map(|day| {
            parse_day(hours.get(*day))
                .rejected
                .into_iter()
                .map(move |r| (*day, r))
        })
        .collect()
}
