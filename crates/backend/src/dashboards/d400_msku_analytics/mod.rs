pub mod aggregator;
pub mod service;

pub use aggregator::{aggregate, aggregate_pairs, parse_quantity};
