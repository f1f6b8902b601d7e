//! Schema system - JSON-LD building, rendering and validation

pub mod builder;
pub mod hours;
pub mod render;
pub mod validator;
pub mod wizard;

pub use builder::{BuildOptions, LocalBusinessSchema, ReservationStyle, SchemaBuilder};
pub use render::{HeadRenderer, RenderError};
pub use validator::{ValidationError, Validator};
pub use wizard::LocationWizard;
