pub mod csv_row;
pub mod ordered_map;

pub use csv_row::{CsvRow, MappedRow};
pub use ordered_map::OrderedStringMap;
