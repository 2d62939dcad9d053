//! Core module containing the typed vocabulary shared by every compiler

pub mod error;
pub mod field;
pub mod range;
pub mod sort;
pub mod values;

pub use error::{ConfigError, ParseError, SieveError};
pub use field::{FieldType, FilterValue, Operator, format_number};
pub use range::Range;
pub use sort::{SortDirection, SortSpec};
pub use values::{DateRange, FilterValues};
