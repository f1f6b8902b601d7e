//! Local SEO Schema
//!
//! Builds schema.org LocalBusiness JSON-LD from a collection of business
//! locations, with opening hours normalized and grouped into
//! `OpeningHoursSpecification` entries.

pub mod cli;
pub mod core;
pub mod entities;
pub mod schema;
