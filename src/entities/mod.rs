//! Entity type definitions
//!
//! - [`LocationRecord`] - one business location as entered by the operator
//! - [`Weekday`] - the ordered day table shared by every layer
//! - [`business_type`] - the schema.org type catalog and the food-type list

pub mod business_type;
pub mod location;
pub mod weekday;

pub use location::{LocationRecord, Locations, OpeningHours, Reservations};
pub use weekday::Weekday;
