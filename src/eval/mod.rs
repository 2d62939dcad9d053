//! Pure operator evaluation over JSON values

pub mod coerce;
pub mod operator;
pub mod path;

pub use coerce::{display_string, parse_datetime, value_as_datetime, value_as_number};
pub use operator::{compare, matches};
pub use path::{resolve_path, resolve_present};
