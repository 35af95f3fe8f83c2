pub mod aggregate;

pub use aggregate::{NewProduct, Product, ProductRef, ProductUpdate};
